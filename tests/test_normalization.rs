mod common;

use std::collections::BTreeMap;
use std::str::FromStr;

use fatsecret_search::client::normalize::{
    build_food_item, coerce_decimal, normalize, parse_serving,
};
use fatsecret_search::client::{
    ErrorKind, FoodType, ImageType, OneOrMany, RawAttribute, RawFood, RawServing, TriState,
};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use serde_json::{json, Value};

fn raw_food(value: Value) -> RawFood {
    serde_json::from_value(value).expect("fixture should deserialize")
}

fn dec(text: &str) -> Decimal {
    Decimal::from_str(text).unwrap()
}

#[test]
fn test_singleton_object_equals_one_element_list() {
    let single: Option<OneOrMany<RawAttribute>> =
        serde_json::from_value(json!({ "name": "Egg", "value": "1" })).unwrap();
    let list: Option<OneOrMany<RawAttribute>> =
        serde_json::from_value(json!([{ "name": "Egg", "value": "1" }])).unwrap();

    let single = normalize(single);
    assert_eq!(single.len(), 1);
    assert_eq!(single, normalize(list));
}

#[test]
fn test_absent_null_and_empty_containers_yield_empty_sequences() {
    let absent: Option<OneOrMany<RawServing>> = None;
    let null: Option<OneOrMany<RawServing>> = serde_json::from_value(Value::Null).unwrap();
    let empty_list: Option<OneOrMany<RawServing>> = serde_json::from_value(json!([])).unwrap();
    let empty_object: Option<OneOrMany<RawServing>> = serde_json::from_value(json!({})).unwrap();
    let empty_string: Option<OneOrMany<String>> = serde_json::from_value(json!("")).unwrap();

    assert!(normalize(absent).is_empty());
    assert!(normalize(null).is_empty());
    assert!(normalize(empty_list).is_empty());
    assert!(normalize(empty_object).is_empty());
    assert!(normalize(empty_string).is_empty());
}

#[test]
fn test_list_order_is_preserved() {
    let categories: Option<OneOrMany<String>> =
        serde_json::from_value(json!(["Yogurt", "Dairy", "Snacks"])).unwrap();
    assert_eq!(normalize(categories), vec!["Yogurt", "Dairy", "Snacks"]);
}

#[test]
fn test_single_and_list_encoded_foods_build_identically() {
    let single = build_food_item(raw_food(common::generic_food())).unwrap();

    let mut listed = common::generic_food();
    let serving = listed["servings"]["serving"].take();
    listed["servings"]["serving"] = json!([serving]);
    let image = listed["food_images"]["food_image"].take();
    listed["food_images"]["food_image"] = json!([image]);
    let allergen = listed["food_attributes"]["allergens"]["allergen"].take();
    listed["food_attributes"]["allergens"]["allergen"] = json!([allergen]);

    assert_eq!(single, build_food_item(raw_food(listed)).unwrap());
}

#[test]
fn test_decimal_coercion_is_total() {
    let inputs = [
        "95", "0", "-1", "1.50", " 12.5 ", "1e3", "2.5E-2", "", "   ", "abc", "1.2.3", "NaN",
        "--5", "12kcal", "١٢",
    ];
    for input in inputs {
        let coerced = coerce_decimal(Some(&json!(input)));
        if let Some(value) = coerced {
            let reparsed = Decimal::from_str(input.trim())
                .or_else(|_| Decimal::from_scientific(input.trim()))
                .expect("a present value must come from a parsable input");
            assert_eq!(value, reparsed, "input {:?}", input);
        }
    }

    assert_eq!(coerce_decimal(Some(&json!("1.50"))), Some(dec("1.50")));
    assert_eq!(coerce_decimal(Some(&json!(" 12.5 "))), Some(dec("12.5")));
    assert_eq!(coerce_decimal(Some(&json!(42))), Some(dec("42")));
    assert_eq!(coerce_decimal(Some(&json!(0.25))), Some(dec("0.25")));
    assert_eq!(coerce_decimal(Some(&json!("abc"))), None);
    assert_eq!(coerce_decimal(Some(&json!(""))), None);
    assert_eq!(coerce_decimal(Some(&json!(true))), None);
    assert_eq!(coerce_decimal(Some(&Value::Null)), None);
    assert_eq!(coerce_decimal(None), None);
}

#[test]
fn test_missing_food_type_defaults_to_generic() {
    let food = build_food_item(raw_food(common::generic_food())).unwrap();
    assert_eq!(food.food_type, FoodType::Generic);
    assert_eq!(food.brand_name, None);

    let unknown = build_food_item(raw_food(json!({ "food_type": "Restaurant" }))).unwrap();
    assert_eq!(unknown.food_type, FoodType::Generic);

    let branded = build_food_item(raw_food(common::branded_food())).unwrap();
    assert_eq!(branded.food_type, FoodType::Brand);
    assert_eq!(branded.brand_name.as_deref(), Some("Fage"));
}

#[test]
fn test_missing_required_text_fields_default_to_empty() {
    let food = build_food_item(raw_food(json!({}))).unwrap();
    assert_eq!(food.food_id, "");
    assert_eq!(food.food_name, "");
    assert_eq!(food.food_url, "");
    assert_eq!(food.food_sub_categories, None);
    assert!(food.images.is_empty());
    assert!(food.servings.is_empty());
    assert!(food.allergens.is_empty());
    assert!(food.preferences.is_empty());
}

#[test]
fn test_is_default_absent_stays_absent() {
    let food = build_food_item(raw_food(common::generic_food())).unwrap();
    assert_eq!(food.servings.len(), 1);
    assert_eq!(food.servings[0].is_default, None);

    let branded = build_food_item(raw_food(common::branded_food())).unwrap();
    assert_eq!(branded.servings[0].is_default, Some(1));
    assert_eq!(branded.servings[1].is_default, Some(0));
}

#[test]
fn test_allergen_values_become_tri_states() {
    let food = build_food_item(raw_food(json!({
        "food_attributes": {
            "allergens": {
                "allergen": [
                    { "name": "Egg", "value": "1" },
                    { "name": "Milk", "value": "-1" }
                ]
            }
        }
    })))
    .unwrap();

    let expected: BTreeMap<String, TriState> = [
        ("Egg".to_string(), TriState::True),
        ("Milk".to_string(), TriState::Unknown),
    ]
    .into_iter()
    .collect();
    assert_eq!(food.allergens, expected);
    assert_eq!(food.allergens["Egg"].as_i8(), 1);
    assert_eq!(food.allergens["Milk"].as_i8(), -1);
}

#[test]
fn test_unknown_attribute_names_and_bad_values_are_tolerated() {
    let food = build_food_item(raw_food(json!({
        "food_attributes": {
            "preferences": {
                "preference": [
                    { "name": "Keto", "value": "1" },
                    { "name": "Vegan", "value": "maybe" },
                    { "name": "Vegetarian", "value": 7 }
                ]
            }
        }
    })))
    .unwrap();

    assert_eq!(food.preferences["Keto"], TriState::True);
    assert_eq!(food.preferences["Vegan"], TriState::Unknown);
    assert_eq!(food.preferences["Vegetarian"], TriState::Unknown);
}

#[test]
fn test_attribute_without_name_fails_the_build() {
    let result = build_food_item(raw_food(json!({
        "food_attributes": {
            "allergens": { "allergen": [{ "id": "3", "value": "1" }] }
        }
    })));

    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    assert!(err.to_string().contains("allergen"));
}

#[test]
fn test_malformed_nutrient_only_blanks_that_field() {
    let food = build_food_item(raw_food(common::branded_food())).unwrap();
    let per_100g = &food.servings[1];

    assert_eq!(per_100g.fat, None);
    assert_eq!(per_100g.calories, Some(dec("59")));
    assert_eq!(per_100g.protein, Some(dec("10.59")));
    assert_eq!(per_100g.sodium, None);
}

#[test]
fn test_serving_fields_are_mapped() {
    let raw: RawServing = serde_json::from_value(json!({
        "serving_id": 12130,
        "serving_description": "1 container",
        "metric_serving_amount": "170.000",
        "metric_serving_unit": "g",
        "number_of_units": "1.000",
        "calories": "100",
        "vitamin_d": "0.1",
        "iron": " 0.5 "
    }))
    .unwrap();

    let serving = parse_serving(&raw);
    assert_eq!(serving.serving_id, "12130");
    assert_eq!(serving.serving_description, "1 container");
    assert_eq!(serving.serving_url, "");
    assert_eq!(serving.measurement_description, "");
    assert_eq!(serving.metric_serving_amount, Some(dec("170.000")));
    assert_eq!(serving.metric_serving_unit.as_deref(), Some("g"));
    assert_eq!(serving.number_of_units, Some(dec("1.000")));
    assert_eq!(serving.calories, Some(dec("100")));
    assert_eq!(serving.vitamin_d, Some(dec("0.1")));
    assert_eq!(serving.iron, Some(dec("0.5")));
    assert_eq!(serving.is_default, None);
    assert_eq!(serving.cholesterol, None);
}

#[test]
fn test_categories_and_images() {
    let food = build_food_item(raw_food(common::branded_food())).unwrap();

    assert_eq!(
        food.food_sub_categories,
        Some(vec!["Yogurt".to_string(), "Dairy".to_string()])
    );
    assert_eq!(food.images.len(), 2);
    assert_eq!(food.images[0].image_type, ImageType::Standard);
    assert_eq!(food.images[1].image_type, ImageType::Isolated);

    let single_category = build_food_item(raw_food(json!({
        "food_sub_categories": { "food_sub_category": "Fruit" },
        "food_images": { "food_image": { "image_url": "https://m.ftscrt.com/x.jpg" } }
    })))
    .unwrap();
    assert_eq!(single_category.food_sub_categories, Some(vec!["Fruit".to_string()]));
    assert_eq!(single_category.images[0].image_type, ImageType::Standard);

    let no_categories = build_food_item(raw_food(json!({
        "food_sub_categories": { "food_sub_category": [] }
    })))
    .unwrap();
    assert_eq!(no_categories.food_sub_categories, None);
}

#[test]
fn test_non_string_image_url_reads_as_absent() {
    let food = build_food_item(raw_food(json!({
        "food_name": "Apple",
        "food_images": { "food_image": { "image_url": 123, "image_type": "Isolated" } }
    })))
    .unwrap();

    assert_eq!(food.food_name, "Apple");
    assert_eq!(food.images.len(), 1);
    assert_eq!(food.images[0].image_url, "");
    assert_eq!(food.images[0].image_type, ImageType::Isolated);
}

#[test]
fn test_one_element_serving_list_with_bad_text_keeps_nutrients() {
    let food = build_food_item(raw_food(json!({
        "servings": { "serving": [{ "serving_description": 5, "calories": "105" }] }
    })))
    .unwrap();

    assert_eq!(food.servings.len(), 1);
    assert_eq!(food.servings[0].serving_description, "");
    assert_eq!(food.servings[0].serving_id, "");
    assert_eq!(food.servings[0].calories, Some(dec("105")));
}

#[test]
fn test_bad_field_in_first_serving_leaves_second_intact() {
    let food = build_food_item(raw_food(json!({
        "servings": {
            "serving": [
                { "serving_id": "1", "metric_serving_unit": 1, "calories": "50" },
                { "serving_id": "2", "metric_serving_unit": "g", "calories": "80" }
            ]
        }
    })))
    .unwrap();

    assert_eq!(food.servings.len(), 2);
    assert_eq!(food.servings[0].serving_id, "1");
    assert_eq!(food.servings[0].metric_serving_unit, None);
    assert_eq!(food.servings[0].calories, Some(dec("50")));
    assert_eq!(food.servings[1].metric_serving_unit.as_deref(), Some("g"));
    assert_eq!(food.servings[1].calories, Some(dec("80")));
}

#[test]
fn test_entries_of_the_wrong_shape_are_dropped() {
    let food = build_food_item(raw_food(json!({
        "food_sub_categories": { "food_sub_category": ["Fruit", 7] },
        "servings": { "serving": [5, { "calories": "10" }] },
        "food_attributes": { "allergens": "none" }
    })))
    .unwrap();

    assert_eq!(food.food_sub_categories, Some(vec!["Fruit".to_string()]));
    assert_eq!(food.servings.len(), 1);
    assert_eq!(food.servings[0].calories, Some(dec("10")));
    assert!(food.allergens.is_empty());
}

#[test]
fn test_empty_entries_are_dropped_bare_or_listed() {
    let bare: Option<OneOrMany<RawServing>> = serde_json::from_value(json!({})).unwrap();
    let listed: Option<OneOrMany<RawServing>> = serde_json::from_value(json!([{}])).unwrap();
    let mixed: Option<OneOrMany<String>> = serde_json::from_value(json!(["", "Fruit"])).unwrap();

    assert_eq!(normalize(bare), normalize(listed));
    assert_eq!(normalize(mixed), vec!["Fruit"]);
}

//! Normalization of raw FatSecret payloads into the [`FoodItem`] model.
//!
//! The rules are small but load-bearing:
//!
//! - scalar fields go through [`coerce_decimal`] / [`coerce_integer`], which never fail;
//! - repeated fields go through [`normalize`], which always yields a `Vec`;
//! - only a missing allergen/preference `name` is fatal for a food.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::client::error::FatSecretError;
use crate::client::types::*;

/// Flattens an absent, single or list-shaped field into a `Vec`, preserving order.
///
/// A value equal to its type's default (an empty object or empty string) is the API's
/// way of saying "nothing here". It is dropped whether it arrives bare or inside a list,
/// so `{}` and `[{}]` both yield an empty `Vec`.
pub fn normalize<T>(raw: Option<OneOrMany<T>>) -> Vec<T>
where
    T: Default + PartialEq,
{
    let items = match raw {
        None => return Vec::new(),
        Some(OneOrMany::Many(items)) => items,
        Some(OneOrMany::One(item)) => vec![item],
    };
    let empty = T::default();
    items.into_iter().filter(|item| *item != empty).collect()
}

/// Parses a decimal from a string or number. Absent or malformed input is `None`.
pub fn coerce_decimal(raw: Option<&Value>) -> Option<Decimal> {
    match raw? {
        Value::String(text) => parse_decimal(text),
        Value::Number(number) => parse_decimal(&number.to_string()),
        _ => None,
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Parses an integer from a string or number. Absent or malformed input is `None`.
///
/// Integral decimals such as `"1.0"` are accepted; fractional ones are not.
pub fn coerce_integer(raw: Option<&Value>) -> Option<i64> {
    match raw? {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| coerce_decimal(raw).and_then(integral)),
        Value::String(text) => text
            .trim()
            .parse::<i64>()
            .ok()
            .or_else(|| parse_decimal(text).and_then(integral)),
        _ => None,
    }
}

fn integral(value: Decimal) -> Option<i64> {
    if value.fract().is_zero() {
        i64::try_from(value.trunc()).ok()
    } else {
        None
    }
}

/// Renders an identifier field that may arrive as a string or a number.
fn text_field(raw: Option<&Value>) -> String {
    match raw {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    }
}

/// Maps a raw serving field-by-field. Malformed nutrients become `None`.
pub fn parse_serving(raw: &RawServing) -> Serving {
    let decimal = |field: &Option<Value>| coerce_decimal(field.as_ref());

    Serving {
        serving_id: text_field(raw.serving_id.as_ref()),
        serving_description: raw.serving_description.clone().unwrap_or_default(),
        serving_url: raw.serving_url.clone().unwrap_or_default(),
        metric_serving_amount: decimal(&raw.metric_serving_amount),
        metric_serving_unit: raw.metric_serving_unit.clone(),
        number_of_units: decimal(&raw.number_of_units),
        measurement_description: raw.measurement_description.clone().unwrap_or_default(),
        is_default: coerce_integer(raw.is_default.as_ref()),
        calories: decimal(&raw.calories),
        carbohydrate: decimal(&raw.carbohydrate),
        protein: decimal(&raw.protein),
        fat: decimal(&raw.fat),
        saturated_fat: decimal(&raw.saturated_fat),
        polyunsaturated_fat: decimal(&raw.polyunsaturated_fat),
        monounsaturated_fat: decimal(&raw.monounsaturated_fat),
        trans_fat: decimal(&raw.trans_fat),
        cholesterol: decimal(&raw.cholesterol),
        sodium: decimal(&raw.sodium),
        potassium: decimal(&raw.potassium),
        fiber: decimal(&raw.fiber),
        sugar: decimal(&raw.sugar),
        added_sugars: decimal(&raw.added_sugars),
        vitamin_d: decimal(&raw.vitamin_d),
        vitamin_a: decimal(&raw.vitamin_a),
        vitamin_c: decimal(&raw.vitamin_c),
        calcium: decimal(&raw.calcium),
        iron: decimal(&raw.iron),
    }
}

fn collect_attributes(
    kind: &str,
    known: &[&str],
    entries: Vec<RawAttribute>,
) -> Result<BTreeMap<String, TriState>, FatSecretError> {
    let mut flags = BTreeMap::new();
    for entry in entries {
        let name = entry.name.ok_or_else(|| {
            FatSecretError::MalformedResponse(format!("{} entry is missing `name`", kind))
        })?;
        if !known.contains(&name.as_str()) {
            tracing::debug!("Accepting undocumented {} name: {}", kind, name);
        }
        let value = coerce_integer(entry.value.as_ref())
            .map(TriState::from_i64)
            .unwrap_or(TriState::Unknown);
        flags.insert(name, value);
    }
    Ok(flags)
}

/// Builds one [`FoodItem`] from a search hit.
///
/// Fails only when an allergen or preference entry has no `name`.
pub fn build_food_item(raw: RawFood) -> Result<FoodItem, FatSecretError> {
    let attributes = raw.food_attributes.unwrap_or_default();
    let allergens = collect_attributes(
        "allergen",
        KNOWN_ALLERGENS,
        normalize(attributes.allergens.and_then(|a| a.allergen)),
    )?;
    let preferences = collect_attributes(
        "preference",
        KNOWN_PREFERENCES,
        normalize(attributes.preferences.and_then(|p| p.preference)),
    )?;

    let servings = normalize(raw.servings.and_then(|s| s.serving))
        .iter()
        .map(parse_serving)
        .collect();

    let images = normalize(raw.food_images.and_then(|i| i.food_image))
        .into_iter()
        .map(|image| FoodImage {
            image_url: image.image_url.unwrap_or_default(),
            image_type: ImageType::parse(image.image_type.as_deref()),
        })
        .collect();

    let categories = normalize(raw.food_sub_categories.and_then(|c| c.food_sub_category));

    Ok(FoodItem {
        food_id: text_field(raw.food_id.as_ref()),
        food_name: raw.food_name.unwrap_or_default(),
        brand_name: raw.brand_name,
        food_type: FoodType::parse(raw.food_type.as_deref()),
        food_url: raw.food_url.unwrap_or_default(),
        food_description: raw.food_description,
        food_sub_categories: if categories.is_empty() { None } else { Some(categories) },
        images,
        servings,
        allergens,
        preferences,
    })
}

/// Normalizes a whole search envelope into a page of foods, in API order.
pub fn build_search_page(search: RawFoodsSearch) -> Result<FoodSearchPage, FatSecretError> {
    let total_results = coerce_integer(search.total_results.as_ref()).unwrap_or(0);
    let max_results = coerce_integer(search.max_results.as_ref()).unwrap_or(0);
    let page_number = coerce_integer(search.page_number.as_ref()).unwrap_or(0);

    if total_results == 0 {
        return Ok(FoodSearchPage {
            total_results,
            max_results,
            page_number,
            foods: Vec::new(),
        });
    }

    let hits = match search.results.and_then(|r| r.food) {
        Some(hits) => normalize(Some(hits)),
        None => normalize(search.food),
    };

    let foods = hits
        .into_iter()
        .map(build_food_item)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FoodSearchPage {
        total_results,
        max_results,
        page_number,
        foods,
    })
}

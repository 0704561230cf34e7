//! Console rendering of normalized foods.

use std::fmt::Write;

use rust_decimal::Decimal;

use crate::client::types::{FoodItem, Serving, TriState};

const RULE_WIDTH: usize = 60;

/// `"<value> <unit>"`, or `"Not available"` when the nutrient is absent.
pub fn format_nutrient(value: Option<Decimal>, unit: &str) -> String {
    match value {
        Some(value) => format!("{} {}", value, unit),
        None => "Not available".to_string(),
    }
}

/// Renders one food as a block of lines, starting with a separator rule.
pub fn render_food(food: &FoodItem) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_food(&mut out, food);
    out
}

/// Renders every food in order, separated by blank lines.
pub fn render_foods(foods: &[FoodItem]) -> String {
    foods.iter().map(render_food).collect::<Vec<_>>().join("\n")
}

fn write_food(out: &mut String, food: &FoodItem) -> std::fmt::Result {
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "Food: {}", food.food_name)?;
    if let Some(brand) = food.brand_name.as_deref().filter(|b| !b.is_empty()) {
        writeln!(out, "Brand: {}", brand)?;
    }
    writeln!(out, "Type: {}", food.food_type.as_str())?;
    writeln!(out, "URL: {}", food.food_url)?;
    if let Some(description) = food.food_description.as_deref() {
        writeln!(out, "Summary: {}", description)?;
    }

    if let Some(categories) = &food.food_sub_categories {
        writeln!(out, "\nCategories: {}", categories.join(", "))?;
    }

    if !food.images.is_empty() {
        writeln!(out, "\nImages:")?;
        for image in &food.images {
            writeln!(out, "  {}: {}", image.image_type.as_str(), image.image_url)?;
        }
    }

    // Flags print alphabetically by name.
    write_flags(out, "Allergens", food.allergens.iter())?;
    write_flags(out, "Dietary Info", food.preferences.iter())?;

    if !food.servings.is_empty() {
        writeln!(out, "\nServings:")?;
        for serving in &food.servings {
            write_serving(out, serving)?;
        }
    }
    Ok(())
}

fn write_flags<'a>(
    out: &mut String,
    heading: &str,
    flags: impl ExactSizeIterator<Item = (&'a String, &'a TriState)>,
) -> std::fmt::Result {
    if flags.len() == 0 {
        return Ok(());
    }
    writeln!(out, "\n{}:", heading)?;
    for (name, value) in flags {
        writeln!(out, "  {}: {}", name, value.label())?;
    }
    Ok(())
}

fn write_serving(out: &mut String, serving: &Serving) -> std::fmt::Result {
    writeln!(out, "\n  {}", serving.serving_description)?;
    if let (Some(amount), Some(unit)) = (
        serving.metric_serving_amount.filter(|a| !a.is_zero()),
        serving.metric_serving_unit.as_deref().filter(|u| !u.is_empty()),
    ) {
        writeln!(out, "  Amount: {} {}", amount, unit)?;
    }
    if let Some(units) = serving.number_of_units.filter(|u| !u.is_zero()) {
        writeln!(out, "  Units: {}", units)?;
    }
    if !serving.measurement_description.is_empty() {
        writeln!(out, "  Measurement: {}", serving.measurement_description)?;
    }
    if serving.is_default.unwrap_or(0) != 0 {
        writeln!(out, "  (Default Serving)")?;
    }

    writeln!(out, "  Calories: {}", format_nutrient(serving.calories, "kcal"))?;
    writeln!(out, "  Protein: {}", format_nutrient(serving.protein, "g"))?;
    writeln!(out, "  Carbohydrates: {}", format_nutrient(serving.carbohydrate, "g"))?;
    writeln!(out, "  Fat: {}", format_nutrient(serving.fat, "g"))?;

    // Remaining nutrients only appear when present and non-zero.
    let optional = [
        ("Saturated Fat", serving.saturated_fat, "g"),
        ("Polyunsaturated Fat", serving.polyunsaturated_fat, "g"),
        ("Monounsaturated Fat", serving.monounsaturated_fat, "g"),
        ("Trans Fat", serving.trans_fat, "g"),
        ("Cholesterol", serving.cholesterol, "mg"),
        ("Sodium", serving.sodium, "mg"),
        ("Potassium", serving.potassium, "mg"),
        ("Fiber", serving.fiber, "g"),
        ("Sugar", serving.sugar, "g"),
        ("Added Sugars", serving.added_sugars, "g"),
        ("Vitamin D", serving.vitamin_d, "µg"),
        ("Vitamin A", serving.vitamin_a, "µg"),
        ("Vitamin C", serving.vitamin_c, "mg"),
        ("Calcium", serving.calcium, "mg"),
        ("Iron", serving.iron, "mg"),
    ];
    for (label, value, unit) in optional {
        if let Some(value) = value.filter(|v| !v.is_zero()) {
            writeln!(out, "  {}: {}", label, format_nutrient(Some(value), unit))?;
        }
    }
    Ok(())
}

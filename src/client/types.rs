//! Type definitions for the FatSecret API.
//!
//! This module holds two families of types:
//!
//! - `Raw*` types mirror the JSON the API actually sends. They are deliberately loose:
//!   scalar fields are kept as [`serde_json::Value`] and repeated fields as
//!   [`OneOrMany`], because the API stringifies numbers, omits fields freely, and
//!   collapses single-element lists into bare objects. A text field or nested container
//!   of the wrong JSON type reads as absent rather than failing the response.
//! - [`FoodItem`], [`Serving`], [`FoodImage`] and friends are the normalized model built
//!   from those raw types by [`crate::client::normalize`].
//!
//! ## API Compatibility
//!
//! - Repeated fields (`serving`, `food_image`, `allergen`, `preference`,
//!   `food_sub_category`, search hits) may be absent, a single object, or a list.
//! - Numeric fields arrive as strings (`"95"`) and sometimes as numbers.
//! - `is_default` and `food_sub_categories` only appear under premier API scopes.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// OAuth2 token response from the FatSecret token endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The Bearer token string. Missing in malformed responses.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Validity in seconds as reported by the provider (typically 86400)
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// A repeated field that the API may send as a bare object or as a list.
///
/// Wrap it in `Option` to cover the "absent" case as well, then flatten with
/// [`crate::client::normalize::normalize`].
///
/// Decoding goes through [`Value`] so an array is always a list of entries. Entries that
/// do not decode as `T` are dropped instead of failing the enclosing response.
#[derive(Debug, Clone, PartialEq)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<'de, T> Deserialize<'de> for OneOrMany<T>
where
    T: DeserializeOwned,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => {
                OneOrMany::Many(items.into_iter().filter_map(decode_entry).collect())
            }
            value => match decode_entry(value) {
                Some(item) => OneOrMany::One(item),
                None => OneOrMany::Many(Vec::new()),
            },
        })
    }
}

fn decode_entry<T: DeserializeOwned>(value: Value) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(item) => Some(item),
        Err(e) => {
            tracing::debug!("Skipping malformed entry: {}", e);
            None
        }
    }
}

/// Reads a field of any shape and keeps it only if it decodes as `T`.
///
/// Used for text fields and nested containers, where a wrong JSON type means "absent".
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(decode_entry(value))
}

/// Top-level body of a `foods.search` response.
#[derive(Debug, Default, Deserialize)]
pub struct RawSearchEnvelope {
    #[serde(default)]
    pub foods_search: Option<RawFoodsSearch>,
    #[serde(default)]
    pub foods: Option<RawFoodsSearch>,
    #[serde(default)]
    pub error: Option<RawApiError>,
}

/// Error payload. FatSecret sends these with a 200 status.
#[derive(Debug, Deserialize)]
pub struct RawApiError {
    #[serde(default)]
    pub code: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawFoodsSearch {
    #[serde(default)]
    pub max_results: Option<Value>,
    #[serde(default)]
    pub total_results: Option<Value>,
    #[serde(default)]
    pub page_number: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub results: Option<RawSearchResults>,
    /// `foods.search` v1 puts hits directly under `foods.food`.
    #[serde(default)]
    pub food: Option<OneOrMany<RawFood>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawSearchResults {
    #[serde(default)]
    pub food: Option<OneOrMany<RawFood>>,
}

/// One search hit as sent by the API.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawFood {
    #[serde(default)]
    pub food_id: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub food_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub brand_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub food_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub food_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub food_description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub food_sub_categories: Option<RawSubCategories>,
    #[serde(default, deserialize_with = "lenient")]
    pub food_images: Option<RawFoodImages>,
    #[serde(default, deserialize_with = "lenient")]
    pub food_attributes: Option<RawFoodAttributes>,
    #[serde(default, deserialize_with = "lenient")]
    pub servings: Option<RawServings>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawSubCategories {
    #[serde(default)]
    pub food_sub_category: Option<OneOrMany<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawFoodImages {
    #[serde(default)]
    pub food_image: Option<OneOrMany<RawFoodImage>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawFoodImage {
    #[serde(default, deserialize_with = "lenient")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub image_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawFoodAttributes {
    #[serde(default, deserialize_with = "lenient")]
    pub allergens: Option<RawAllergens>,
    #[serde(default, deserialize_with = "lenient")]
    pub preferences: Option<RawPreferences>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawAllergens {
    #[serde(default)]
    pub allergen: Option<OneOrMany<RawAttribute>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawPreferences {
    #[serde(default)]
    pub preference: Option<OneOrMany<RawAttribute>>,
}

/// An allergen or dietary preference entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawAttribute {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawServings {
    #[serde(default)]
    pub serving: Option<OneOrMany<RawServing>>,
}

/// A serving as sent by the API. Every field may be missing or malformed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawServing {
    #[serde(default)]
    pub serving_id: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub serving_description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub serving_url: Option<String>,
    #[serde(default)]
    pub metric_serving_amount: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub metric_serving_unit: Option<String>,
    #[serde(default)]
    pub number_of_units: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub measurement_description: Option<String>,
    /// `Some(Value::Null)` still counts as "key present"
    #[serde(default, deserialize_with = "deserialize_present")]
    pub is_default: Option<Value>,
    #[serde(default)]
    pub calories: Option<Value>,
    #[serde(default)]
    pub carbohydrate: Option<Value>,
    #[serde(default)]
    pub protein: Option<Value>,
    #[serde(default)]
    pub fat: Option<Value>,
    #[serde(default)]
    pub saturated_fat: Option<Value>,
    #[serde(default)]
    pub polyunsaturated_fat: Option<Value>,
    #[serde(default)]
    pub monounsaturated_fat: Option<Value>,
    #[serde(default)]
    pub trans_fat: Option<Value>,
    #[serde(default)]
    pub cholesterol: Option<Value>,
    #[serde(default)]
    pub sodium: Option<Value>,
    #[serde(default)]
    pub potassium: Option<Value>,
    #[serde(default)]
    pub fiber: Option<Value>,
    #[serde(default)]
    pub sugar: Option<Value>,
    #[serde(default)]
    pub added_sugars: Option<Value>,
    #[serde(default)]
    pub vitamin_d: Option<Value>,
    #[serde(default)]
    pub vitamin_a: Option<Value>,
    #[serde(default)]
    pub vitamin_c: Option<Value>,
    #[serde(default)]
    pub calcium: Option<Value>,
    #[serde(default)]
    pub iron: Option<Value>,
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Documented allergen names. Names outside this list are still accepted.
pub const KNOWN_ALLERGENS: &[&str] = &[
    "Egg", "Fish", "Gluten", "Lactose", "Milk", "Nuts", "Peanuts", "Sesame", "Shellfish", "Soy",
];

/// Documented dietary preference names. Names outside this list are still accepted.
pub const KNOWN_PREFERENCES: &[&str] = &["Vegan", "Vegetarian"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FoodType {
    Brand,
    Generic,
}

impl FoodType {
    /// Parses the API's `food_type`; anything unrecognized is `Generic`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("Brand") => Self::Brand,
            _ => Self::Generic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Brand => "Brand",
            Self::Generic => "Generic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImageType {
    Standard,
    Isolated,
}

impl ImageType {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("Isolated") => Self::Isolated,
            _ => Self::Standard,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Isolated => "Isolated",
        }
    }
}

/// Allergen/preference flag: `-1` unknown, `0` false, `1` true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "i8")]
pub enum TriState {
    Unknown = -1,
    False = 0,
    True = 1,
}

impl TriState {
    pub fn from_i64(value: i64) -> Self {
        match value {
            0 => Self::False,
            1 => Self::True,
            _ => Self::Unknown,
        }
    }

    pub fn as_i8(self) -> i8 {
        self as i8
    }

    /// Console label: `Unknown`, `Yes` or `No`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::False => "No",
            Self::True => "Yes",
        }
    }
}

impl From<TriState> for i8 {
    fn from(value: TriState) -> Self {
        value.as_i8()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoodImage {
    pub image_url: String,
    pub image_type: ImageType,
}

/// A normalized serving. Every nutrient is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Serving {
    pub serving_id: String,
    pub serving_description: String,
    pub serving_url: String,
    pub metric_serving_amount: Option<Decimal>,
    pub metric_serving_unit: Option<String>,
    pub number_of_units: Option<Decimal>,
    pub measurement_description: String,
    /// Premier scope only; `None` when the API did not send it.
    pub is_default: Option<i64>,
    pub calories: Option<Decimal>,
    pub carbohydrate: Option<Decimal>,
    pub protein: Option<Decimal>,
    pub fat: Option<Decimal>,
    pub saturated_fat: Option<Decimal>,
    pub polyunsaturated_fat: Option<Decimal>,
    pub monounsaturated_fat: Option<Decimal>,
    pub trans_fat: Option<Decimal>,
    pub cholesterol: Option<Decimal>,
    pub sodium: Option<Decimal>,
    pub potassium: Option<Decimal>,
    pub fiber: Option<Decimal>,
    pub sugar: Option<Decimal>,
    pub added_sugars: Option<Decimal>,
    pub vitamin_d: Option<Decimal>,
    pub vitamin_a: Option<Decimal>,
    pub vitamin_c: Option<Decimal>,
    pub calcium: Option<Decimal>,
    pub iron: Option<Decimal>,
}

/// A food returned by a search, normalized from [`RawFood`].
///
/// `brand_name` is expected to be `None` for `Generic` foods, but that is not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoodItem {
    pub food_id: String,
    pub food_name: String,
    pub brand_name: Option<String>,
    pub food_type: FoodType,
    pub food_url: String,
    pub food_description: Option<String>,
    /// `None` when the API sent no categories (premier scope only)
    pub food_sub_categories: Option<Vec<String>>,
    pub images: Vec<FoodImage>,
    pub servings: Vec<Serving>,
    /// Keyed by name, so iteration is alphabetical rather than API order.
    pub allergens: BTreeMap<String, TriState>,
    pub preferences: BTreeMap<String, TriState>,
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoodSearchPage {
    pub total_results: i64,
    pub max_results: i64,
    pub page_number: i64,
    pub foods: Vec<FoodItem>,
}

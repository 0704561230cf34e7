#![allow(dead_code)]

use fatsecret_search::{FatSecretClient, FatSecretConfig};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN_PATH: &str = "/connect/token";
pub const API_PATH: &str = "/rest/server.api";
pub const TEST_TOKEN: &str = "test_access_token_0123456789";

/// A FatSecret client wired to a local mock server.
pub struct TestEnvironment {
    pub server: MockServer,
    pub client: FatSecretClient,
}

impl TestEnvironment {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let config = FatSecretConfig::new("test_client_id", "test_client_secret")
            .with_token_url(format!("{}{}", server.uri(), TOKEN_PATH))
            .with_api_url(format!("{}{}", server.uri(), API_PATH));

        Self {
            client: FatSecretClient::new(config),
            server,
        }
    }

    /// Mounts a token endpoint that must be hit exactly `times` times.
    pub async fn mock_token(&self, times: u64) {
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": TEST_TOKEN,
                "expires_in": 86400,
                "token_type": "Bearer"
            })))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Mounts a search endpoint answering `body` that must be hit exactly `times` times.
    pub async fn mock_search(&self, body: Value, times: u64) {
        Mock::given(method("GET"))
            .and(path(API_PATH))
            .and(query_param("method", "foods.search"))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(times)
            .mount(&self.server)
            .await;
    }
}

/// Wraps hits in a `foods_search` envelope.
pub fn search_response(total_results: &str, food: Value) -> Value {
    json!({
        "foods_search": {
            "max_results": "20",
            "total_results": total_results,
            "page_number": "0",
            "results": { "food": food }
        }
    })
}

/// A branded food with two servings, images, attributes and categories.
pub fn branded_food() -> Value {
    json!({
        "food_id": "3092",
        "food_name": "Greek Yogurt",
        "brand_name": "Fage",
        "food_type": "Brand",
        "food_url": "https://foods.fatsecret.com/calories-nutrition/fage/greek-yogurt",
        "food_sub_categories": {
            "food_sub_category": ["Yogurt", "Dairy"]
        },
        "food_images": {
            "food_image": [
                { "image_url": "https://m.ftscrt.com/food/3092_sm.jpg", "image_type": "Standard" },
                { "image_url": "https://m.ftscrt.com/food/3092_iso.png", "image_type": "Isolated" }
            ]
        },
        "food_attributes": {
            "allergens": {
                "allergen": [
                    { "id": "1", "name": "Egg", "value": "0" },
                    { "id": "5", "name": "Milk", "value": "1" }
                ]
            },
            "preferences": {
                "preference": [
                    { "id": "1", "name": "Vegan", "value": "0" },
                    { "id": "2", "name": "Vegetarian", "value": "1" }
                ]
            }
        },
        "servings": {
            "serving": [
                {
                    "serving_id": "12130",
                    "serving_description": "1 container",
                    "serving_url": "https://foods.fatsecret.com/serving/12130",
                    "metric_serving_amount": "170.000",
                    "metric_serving_unit": "g",
                    "number_of_units": "1.000",
                    "measurement_description": "container",
                    "is_default": "1",
                    "calories": "100",
                    "carbohydrate": "6.00",
                    "protein": "18.00",
                    "fat": "0",
                    "sodium": "65",
                    "sugar": "6.00",
                    "calcium": "200"
                },
                {
                    "serving_id": "12131",
                    "serving_description": "100 g",
                    "metric_serving_amount": "100.000",
                    "metric_serving_unit": "g",
                    "number_of_units": "100.000",
                    "measurement_description": "g",
                    "is_default": "0",
                    "calories": "59",
                    "carbohydrate": "3.53",
                    "protein": "10.59",
                    "fat": "not-a-number"
                }
            ]
        }
    })
}

/// A generic food that uses the collapsed single-object encodings and omits optional keys.
pub fn generic_food() -> Value {
    json!({
        "food_id": "33691",
        "food_name": "Banana",
        "food_url": "https://foods.fatsecret.com/calories-nutrition/usda/banana",
        "food_images": {
            "food_image": { "image_url": "https://m.ftscrt.com/food/33691.jpg", "image_type": "Standard" }
        },
        "food_attributes": {
            "allergens": {
                "allergen": { "id": "1", "name": "Egg", "value": "0" }
            }
        },
        "servings": {
            "serving": {
                "serving_id": "32978",
                "serving_description": "1 medium",
                "metric_serving_amount": "118.000",
                "metric_serving_unit": "g",
                "number_of_units": "1.000",
                "measurement_description": "medium",
                "calories": "105",
                "carbohydrate": "26.95",
                "protein": "1.29",
                "fat": "0.39"
            }
        }
    })
}

pub fn init_test_logging() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

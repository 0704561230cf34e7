use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::client::{
    auth::{token_preview, HttpTokenProvider, TokenManager},
    error::{ApiErrorCode, FatSecretError},
    normalize::{build_search_page, coerce_integer},
    types::*,
};
use crate::config::FatSecretConfig;

/// Largest page size `foods.search` accepts.
pub const MAX_RESULTS_LIMIT: u32 = 50;

pub struct FatSecretClient {
    api_url: String,
    client: Client,
    tokens: TokenManager,
}

impl FatSecretClient {
    /// Builds a client; no network activity happens until the first search.
    pub fn new(config: FatSecretConfig) -> Self {
        let client = Client::new();
        let provider = HttpTokenProvider::new(
            client.clone(),
            config.token_url,
            config.client_id,
            config.client_secret,
            config.scope,
        );
        Self {
            api_url: config.api_url,
            tokens: TokenManager::new(Arc::new(provider)),
            client,
        }
    }

    pub fn from_env() -> Result<Self, FatSecretError> {
        FatSecretConfig::from_env().map(Self::new)
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    /// Searches foods and returns them in API order.
    pub async fn search(
        &self,
        query: &str,
        max_results: u32,
        page_number: u32,
    ) -> Result<Vec<FoodItem>, FatSecretError> {
        self.search_page(query, max_results, page_number)
            .await
            .map(|page| page.foods)
    }

    /// Like [`search`](Self::search) but keeps the paging metadata the API echoes back.
    pub async fn search_page(
        &self,
        query: &str,
        max_results: u32,
        page_number: u32,
    ) -> Result<FoodSearchPage, FatSecretError> {
        if !(1..=MAX_RESULTS_LIMIT).contains(&max_results) {
            return Err(FatSecretError::ParameterOutOfRange(format!(
                "max_results must be between 1 and {}, got {}",
                MAX_RESULTS_LIMIT, max_results
            )));
        }

        let token = self.tokens.get_token().await?;
        tracing::debug!("Using access token: {}", token_preview(&token));

        let params = [
            "method=foods.search".to_string(),
            "format=json".to_string(),
            format!("search_expression={}", urlencoding::encode(query)),
            format!("max_results={}", max_results),
            format!("page_number={}", page_number),
        ];
        let url = format!("{}?{}", self.api_url, params.join("&"));

        tracing::debug!("Making food search request to: {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&token)
            .timeout(Duration::from_secs(30))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Network error searching foods: {}", e);
                FatSecretError::Api(format!("failed to connect to FatSecret API: {}", e))
            })?;

        let status = response.status();
        tracing::debug!("Food search response status: {}", status);

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            tracing::error!("Food search failed with status {}: {}", status, error_body);

            if status.as_u16() == 401 {
                self.tokens.invalidate().await;
            }
            return Err(FatSecretError::Api(format!(
                "food search failed with status {}: {}",
                status, error_body
            )));
        }

        let envelope: RawSearchEnvelope = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse food search response: {}", e);
            FatSecretError::Api(format!("invalid response format from FatSecret: {}", e))
        })?;

        if let Some(error) = envelope.error {
            let code = ApiErrorCode::from_code(coerce_integer(error.code.as_ref()).unwrap_or(0));
            let message = error.message.unwrap_or_default();
            tracing::warn!("FatSecret returned error {}: {}", code, message);

            if code.is_auth_failure() {
                self.tokens.invalidate().await;
            }
            return Err(FatSecretError::Provider { code, message });
        }

        let search = envelope
            .foods_search
            .or(envelope.foods)
            .unwrap_or_default();
        let page = build_search_page(search)?;

        tracing::debug!(
            "Food search for '{}' returned {} of {} results",
            query,
            page.foods.len(),
            page.total_results
        );
        Ok(page)
    }
}

//! Authentication handling for the FatSecret API.
//!
//! FatSecret uses the OAuth2 client-credentials flow: the client id and secret are
//! exchanged for a Bearer token that is valid for about a day. [`TokenManager`] caches
//! that token and only goes back to the token endpoint once the cached copy expires.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use tokio::sync::Mutex;

use crate::client::error::FatSecretError;
use crate::client::types::TokenResponse;

/// How long a fetched token is trusted. Shorter than the provider's 24h to absorb skew.
pub const TOKEN_TTL_HOURS: i64 = 23;

/// Source of the current time. Swapped for a fake in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Exchanges credentials for a Bearer token.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn fetch_token(&self) -> Result<String, FatSecretError>;
}

/// # FatSecret Token Endpoint
///
/// `POST`s `grant_type=client_credentials&scope=<scope>` to the token URL with HTTP
/// Basic auth. Any transport failure, non-2xx status or body without `access_token`
/// is an [`FatSecretError::Authentication`].
pub struct HttpTokenProvider {
    token_url: String,
    client_id: String,
    client_secret: String,
    scope: String,
    client: Client,
}

impl HttpTokenProvider {
    pub fn new(
        client: Client,
        token_url: String,
        client_id: String,
        client_secret: String,
        scope: String,
    ) -> Self {
        Self {
            token_url,
            client_id,
            client_secret,
            scope,
            client,
        }
    }
}

#[async_trait]
impl TokenProvider for HttpTokenProvider {
    async fn fetch_token(&self) -> Result<String, FatSecretError> {
        tracing::debug!("Requesting access token from: {}", self.token_url);

        let form = [
            ("grant_type", "client_credentials"),
            ("scope", self.scope.as_str()),
        ];

        let response = self
            .client
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&form)
            .timeout(Duration::from_secs(10))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Network error during authentication: {}", e);
                FatSecretError::Authentication(format!(
                    "failed to reach token endpoint {}: {}",
                    self.token_url, e
                ))
            })?;

        let status = response.status();
        tracing::debug!("Token response status: {}", status);

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            tracing::error!("Authentication failed with status {}: {}", status, error_body);

            return Err(FatSecretError::Authentication(match status.as_u16() {
                400 => format!("token request rejected: {}", error_body),
                401 => "invalid client id or client secret".to_string(),
                403 => "client is not allowed to use the requested scope".to_string(),
                _ => format!("token endpoint returned {}: {}", status, error_body),
            }));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse token response: {}", e);
            FatSecretError::Authentication(format!("invalid token response: {}", e))
        })?;

        match token.access_token {
            Some(access_token) if !access_token.is_empty() => {
                if let Some(expires_in) = token.expires_in {
                    tracing::debug!("Provider reports token validity of {}s", expires_in);
                }
                Ok(access_token)
            }
            _ => Err(FatSecretError::Authentication(
                "token response did not contain an access_token".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

/// # Access Token Cache
///
/// Holds at most one token and its expiry. [`TokenManager::get_token`] keeps the lock for
/// the whole check-refresh-store sequence, so concurrent callers share one refresh.
pub struct TokenManager {
    provider: Arc<dyn TokenProvider>,
    clock: Arc<dyn Clock>,
    ttl: chrono::Duration,
    cache: Mutex<Option<CachedToken>>,
}

impl TokenManager {
    pub fn new(provider: Arc<dyn TokenProvider>) -> Self {
        Self::with_clock(provider, Arc::new(SystemClock))
    }

    pub fn with_clock(provider: Arc<dyn TokenProvider>, clock: Arc<dyn Clock>) -> Self {
        Self {
            provider,
            clock,
            ttl: chrono::Duration::hours(TOKEN_TTL_HOURS),
            cache: Mutex::new(None),
        }
    }

    pub async fn get_token(&self) -> Result<String, FatSecretError> {
        let mut cache = self.cache.lock().await;

        if let Some(cached) = cache.as_ref() {
            if self.clock.now() < cached.expires_at {
                return Ok(cached.token.clone());
            }
            tracing::debug!("Cached access token expired at {}", cached.expires_at);
        }

        *cache = None;
        let token = self.provider.fetch_token().await?;
        let expires_at = self.clock.now() + self.ttl;

        tracing::info!("Obtained FatSecret access token, cached until {}", expires_at);
        tracing::debug!("Received token: {}", token_preview(&token));

        *cache = Some(CachedToken {
            token: token.clone(),
            expires_at,
        });
        Ok(token)
    }

    pub async fn is_authenticated(&self) -> bool {
        match self.cache.lock().await.as_ref() {
            Some(cached) => self.clock.now() < cached.expires_at,
            None => false,
        }
    }

    /// Drops the cached token so the next call re-authenticates.
    pub async fn invalidate(&self) {
        *self.cache.lock().await = None;
    }
}

pub(crate) fn token_preview(token: &str) -> String {
    let end = token
        .char_indices()
        .nth(10)
        .map(|(index, _)| index)
        .unwrap_or(token.len());
    format!("{}...", &token[..end])
}

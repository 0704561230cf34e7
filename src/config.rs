use crate::client::error::FatSecretError;

pub const DEFAULT_TOKEN_URL: &str = "https://oauth.fatsecret.com/connect/token";
pub const DEFAULT_API_URL: &str = "https://platform.fatsecret.com/rest/server.api";
pub const DEFAULT_SCOPE: &str = "basic";

#[derive(Debug, Clone)]
pub struct FatSecretConfig {
    pub client_id: String,
    pub client_secret: String,
    pub scope: String,
    pub token_url: String,
    pub api_url: String,
}

impl FatSecretConfig {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scope: DEFAULT_SCOPE.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// Reads credentials from the process environment (and a `.env` file, if present).
    ///
    /// `FATSECRET_CLIENT_ID` and `FATSECRET_CLIENT_SECRET` are required.
    pub fn from_env() -> Result<Self, FatSecretError> {
        let _ = dotenvy::dotenv();

        let client_id = required_var("FATSECRET_CLIENT_ID");
        let client_secret = required_var("FATSECRET_CLIENT_SECRET");
        let (client_id, client_secret) = match (client_id, client_secret) {
            (Some(id), Some(secret)) => (id, secret),
            _ => {
                return Err(FatSecretError::Configuration(
                    "please set FATSECRET_CLIENT_ID and FATSECRET_CLIENT_SECRET environment variables"
                        .to_string(),
                ))
            }
        };

        Ok(Self {
            client_id,
            client_secret,
            scope: std::env::var("FATSECRET_SCOPE").unwrap_or_else(|_| DEFAULT_SCOPE.into()),
            token_url: std::env::var("FATSECRET_TOKEN_URL")
                .unwrap_or_else(|_| DEFAULT_TOKEN_URL.into()),
            api_url: std::env::var("FATSECRET_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into()),
        })
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

fn required_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

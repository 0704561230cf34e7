use std::env;
use std::sync::Arc;

use fatsecret_search::{FatSecretClient, FatSecretConfig, FatSecretMcpServer};
use rmcp::transport::sse_server::{SseServer, SseServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".to_string().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = FatSecretConfig::from_env()?;
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3001".to_string());

    let client = Arc::new(FatSecretClient::new(config.clone()));

    // Fail fast on bad credentials instead of on the first tool call
    tracing::info!("Validating FatSecret credentials...");
    if let Err(e) = client.tokens().get_token().await {
        tracing::error!("Authentication failed: {}", e);
        tracing::error!("Please verify:");
        tracing::error!("  - FATSECRET_CLIENT_ID and FATSECRET_CLIENT_SECRET are correct");
        tracing::error!("  - FATSECRET_TOKEN_URL is reachable: {}", config.token_url);
        tracing::error!("  - The requested scope '{}' is enabled for this client", config.scope);
        std::process::exit(1);
    }
    tracing::info!("Successfully authenticated with FatSecret");

    let sse_config = SseServerConfig {
        bind: bind_addr.parse()?,
        sse_path: "/sse".to_string(),
        post_path: "/message".to_string(),
        ct: tokio_util::sync::CancellationToken::new(),
        sse_keep_alive: None,
    };

    tracing::info!("FatSecret MCP Server listening on {}", sse_config.bind);

    let sse_server = SseServer::serve_with_config(sse_config).await?;

    // All sessions share one client, and with it one token cache
    let ct = sse_server.with_service(move || FatSecretMcpServer::new(client.clone()));

    tracing::info!("FatSecret MCP Server started successfully");

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down...");
    ct.cancel();

    Ok(())
}

use std::sync::Arc;

use anyhow::Result;
use portfolio_relay::{router, ChatRelay, RelayConfig};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = RelayConfig::from_env()?;
    if config.api_key().is_err() {
        warn!("GROQ_API_KEY is not set; chat requests will fail until it is configured");
    }

    let bind_addr = config.bind_addr;
    let relay = Arc::new(ChatRelay::new(config));

    let listener = TcpListener::bind(bind_addr).await?;
    info!(address = %listener.local_addr()?, "chat relay listening");

    axum::serve(listener, router(relay))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("chat relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

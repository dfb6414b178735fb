//! Site labor cost engine - HTTP server entry point.

use anyhow::{Context, Result};
use sitepay::api::{AppState, create_router};
use sitepay::config::ConfigLoader;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,sitepay=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_dir =
        std::env::var("SITEPAY_CONFIG_DIR").unwrap_or_else(|_| "./config/default".to_string());
    let config = ConfigLoader::load(&config_dir)
        .with_context(|| format!("failed to load configuration from {}", config_dir))?;
    info!(
        config_dir = %config_dir,
        trades = config.config().trades().len(),
        rate_tables = config.config().rate_tables().len(),
        "Configuration loaded"
    );

    let app = create_router(AppState::new(config));

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("sitepay listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

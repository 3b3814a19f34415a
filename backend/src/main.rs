use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lwp_reversal_backend::{create_router, initialize_backend, AppConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG overrides the default level; `log` records are captured too
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load()?;
    info!(?config, "Loaded configuration");

    let app_state = initialize_backend(&config).await?;
    let app = create_router(app_state, &config.allowed_origin)?;

    info!("Starting server on {}", config.bind_address);
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

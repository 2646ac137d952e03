use anyhow::Context;

use catalog_api::{app, config::ApiConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    catalog_observability::init();

    let config = ApiConfig::from_env()?;
    let catalog = app::services::build_catalog(&config)
        .await
        .context("failed to initialize product store")?;

    let app = app::build_app(config.jwt_secret.clone(), catalog);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
    }
    tracing::info!("shutting down");
}

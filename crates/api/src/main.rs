use std::sync::Arc;

use anyhow::Context;

use library_api::config::ApiConfig;
use library_inventory::Catalog;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env().context("failed to load configuration")?;
    library_observability::init(config.log_format);

    let catalog = if config.seed_catalog {
        Catalog::seeded()
    } else {
        tracing::warn!("catalog seeding disabled; starting empty");
        Catalog::new()
    };
    tracing::info!(books = catalog.len(), "catalog ready");

    let app = library_api::app::build_app(Arc::new(catalog));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

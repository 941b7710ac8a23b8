use std::sync::Arc;

use anyhow::Context;
use stockroom_api::app::{self, services::AppServices};
use stockroom_auth::HashParams;
use stockroom_infra::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env().context("invalid configuration")?;
    stockroom_observability::init(settings.log_format);

    if settings.uses_dev_secret() {
        tracing::warn!("JWT_SECRET not set; using insecure dev default");
    }

    let services = AppServices::from_settings(&settings, HashParams::default()).await?;
    let app = app::build_app(Arc::new(services), &settings.api_prefix);

    let listener = tokio::net::TcpListener::bind(settings.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.bind_addr))?;

    tracing::info!(
        name = %settings.app_name,
        version = %settings.app_version,
        prefix = %settings.api_prefix,
        "listening on {}",
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!(name = %settings.app_name, "shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}

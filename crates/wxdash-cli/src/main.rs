use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::Instrument;
use wxdash_config::AppConfig;
use wxdash_source::OpenWeatherClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Observability
    let span = wxdash_obs::init("wxdash");
    run().instrument(span).await
}

async fn run() -> Result<()> {
    // Config
    let cfg = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to load config, using defaults");
        AppConfig::default()
    });
    let openweather = cfg.openweather();
    if openweather.has_placeholder_key() {
        tracing::warn!(
            "no OpenWeatherMap API key configured; set OPENWEATHER_API_KEY or [openweather].api_key"
        );
    }
    let source = OpenWeatherClient::new(openweather).context("Failed to build weather client")?;
    let icon_base = source.settings().icon_url.clone();

    // Build app and state
    let (app, state) = wxdash_cli::build_app(Arc::new(source), cfg.dashboard_settings(), icon_base);

    // Start HTTP server
    let addr: SocketAddr = cfg
        .http_bind()
        .parse()
        .context("Invalid HTTP bind address")?;
    let listener = TcpListener::bind(addr)
        .await
        .context("failed to bind TCP listener")?;

    // Mark ready just before serving
    wxdash_cli::set_ready(&state, true);

    tracing::info!(%addr, "HTTP server listening");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

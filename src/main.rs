use actix_web::{App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod app;
mod model;
mod service;

use app::AppState;
use model::Config;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let bind_addr = config.bind_addr();

    let state = AppState::new(&config).map_err(|e| {
        tracing::error!(error = %e, "Failed to initialize application state");
        std::io::Error::other(e.to_string())
    })?;

    tracing::info!(
        alerts = state.alerts.len(),
        models = state.metrics.list().len(),
        forensics = %state.invoices.analyzer_target(),
        "Starting fraud screening server on {}",
        bind_addr
    );

    HttpServer::new(move || {
        App::new()
            .configure(|cfg| state.configure(cfg))
            .configure(api::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await
}

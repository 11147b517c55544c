use linkbudget_backend::config;
use linkbudget_backend::module::handler::LinkBudgetHandler;
use linkbudget_backend::module::presets::PresetCatalog;
use linkbudget_backend::module::report::ReportExporter;
use linkbudget_backend::service::{self, AppState};

use anyhow::{Context, Result};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = config::read_config()?;

    // Initialize logging
    let _logging_guard = linkbudget_backend::logging::init_logging(
        &config.log_dir,
        "linkbudget-backend",
        &config.log_level,
    )?;

    tracing::info!("Link budget backend starting...");

    let catalog = match &config.preset_file {
        Some(path) => match PresetCatalog::load_from_file(path).await {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!("Failed to load presets from {}: {:#}, using built-in presets", path, e);
                PresetCatalog::builtin()
            }
        },
        None => PresetCatalog::builtin(),
    };
    tracing::info!("Presets loaded: {}", catalog.stats());

    let handler = LinkBudgetHandler::new(Arc::new(catalog));
    let exporter = ReportExporter::new(&config.export_dir, config.chart_log_scale);
    let mut app = service::router(AppState::new(handler, exporter));
    if config.enable_cors {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    let addr = config.server_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context(format!("Failed to bind {}", addr))?;
    tracing::info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

// Main entry point - Dependency injection and console setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use crate::application::auth_service::AuthService;
use crate::application::history_service::HistoryService;
use crate::infrastructure::config::load_client_config;
use crate::infrastructure::http_repository::HttpDrillingRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::chart::{ChartFrame, Point};
use crate::presentation::console::Console;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing on stderr so it does not interleave with the console
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = load_client_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(HttpDrillingRepository::new(&config.server)?);

    // Create services (application layer)
    let auth_service = AuthService::new(repository.clone());
    let history_service = HistoryService::new(repository);

    // Create application state
    let state = AppState {
        auth_service,
        history_service,
    };

    let frame = ChartFrame::new(Point::new(0.0, 0.0), config.chart.width, config.chart.height)
        .ok_or_else(|| anyhow::anyhow!("invalid chart size"))?;

    tracing::info!("Using drilling data server at {}", config.server.base_url);

    // Run the console (presentation layer)
    let mut console = Console::new(state, frame);
    let mut stdout = tokio::io::stdout();
    console.run(BufReader::new(tokio::io::stdin()), &mut stdout).await?;

    Ok(())
}

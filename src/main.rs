//! AliceBot workplace assistant
//!
//! Main application entry point

use std::sync::Arc;
use anyhow::Context;
use tracing::{info, warn};

use AliceBot::{
    config::Settings,
    dialogs::DialogRouter,
    handlers::{register_default_dialogs, MessageHandler},
    server::{self, AppState},
    services::ServiceFactory,
    state::create_storage,
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Optional .env file for local development
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("Failed to load configuration")?;
    settings.validate()?;

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", AliceBot::info());

    // Initialize services
    info!("Initializing services...");
    let services = Arc::new(ServiceFactory::new(&settings)?);

    info!("Registering dialogs...");
    let mut router = DialogRouter::new(services);
    register_default_dialogs(&mut router)?;
    info!(dialogs = ?router.labels(), "Dialogs registered");

    // Initialize state management
    let storage = create_storage(&settings.session).await?;

    let handler = MessageHandler::new(Arc::new(router), storage, &settings);
    let app = server::routes(AppState { handler });

    let addr = settings.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(addr = %addr, "Listening for activities on /api/messages");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("AliceBot has been shut down.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

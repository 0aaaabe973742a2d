//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the AliceBot application.

use tracing::{info, warn, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use crate::config::LoggingConfig;
use crate::utils::errors::{AliceBotError, Result};

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| AliceBotError::Config(format!("Invalid log filter: {}", e)))?;

    let stdout_layer = if config.json {
        fmt::layer().json().with_writer(std::io::stdout).boxed()
    } else {
        fmt::layer().with_writer(std::io::stdout).boxed()
    };

    let (file_layer, guard) = match &config.directory {
        Some(directory) => {
            let file_appender = tracing_appender::rolling::daily(directory, "alicebot.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer().with_ansi(false).with_writer(non_blocking).boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| AliceBotError::Config(format!("Failed to initialize logging: {}", e)))?;

    info!(level = %config.level, file = ?config.directory, "Logging initialized");
    Ok(guard)
}

/// Log a completed turn with structured data
pub fn log_turn(conversation_id: &str, intent: Option<&str>, replies: usize, duration_ms: u64) {
    info!(
        conversation_id = conversation_id,
        intent = intent,
        replies = replies,
        duration_ms = duration_ms,
        "Turn completed"
    );
}

/// Log a failed call to an external collaborator whose failure was absorbed
pub fn log_collaborator_failure(collaborator: &str, error: &str, fallback: &str) {
    warn!(
        collaborator = collaborator,
        error = error,
        fallback = fallback,
        "Collaborator call failed, continuing with fallback"
    );
}

/// Log a dialog stack transition
pub fn log_dialog_transition(conversation_id: &str, dialog: &str, step: usize, transition: &str) {
    debug!(
        conversation_id = conversation_id,
        dialog = dialog,
        step = step,
        transition = transition,
        "Dialog transition"
    );
}

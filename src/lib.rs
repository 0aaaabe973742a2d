//! AliceBot workplace assistant
//!
//! A scripted chat bot that classifies user messages with a hosted
//! language-understanding model and answers through multi-step waterfall
//! dialogs: leave requests, holiday schedule, meeting scheduling and hotel
//! search and reviews.

#![allow(non_snake_case)]

pub mod config;
pub mod dialogs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod server;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{AliceBotError, Result};

// Re-export main components for easy access
pub use dialogs::DialogRouter;
pub use handlers::MessageHandler;
pub use services::ServiceFactory;
pub use state::StateStorage;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}

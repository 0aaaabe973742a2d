//! Middleware module
//!
//! This module contains middleware applied to every inbound message

pub mod logging;
pub mod spell_check;

// Re-export commonly used middleware
pub use logging::{LoggingMiddleware, PerformanceTracker};
pub use spell_check::SpellCheckMiddleware;

//! Test helpers module
//!
//! This module provides utilities and helpers for testing the AliceBot
//! application: scripted collaborators, a mock language service server, a Redis
//! instance for session storage, and a unified test context.

#![allow(dead_code)]


pub use collaborators::*;
pub use language_mock::*;
pub use redis_helper::*;
pub use test_context::*;

use std::sync::Once;
use AliceBot::models::{Card, OutgoingMessage};

static INIT: Once = Once::new();

/// Initialize logging for tests (called once)
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("AliceBot=debug")
            .with_test_writer()
            .try_init();
    });
}

/// Text of every reply, empty for card-only replies
pub fn texts(replies: &[OutgoingMessage]) -> Vec<String> {
    replies.iter()
        .map(|r| r.text.clone().unwrap_or_default())
        .collect()
}

/// First card of the first reply carrying attachments
pub fn first_card(replies: &[OutgoingMessage]) -> Option<&Card> {
    replies.iter()
        .find(|r| r.has_attachments())
        .map(|r| r.attachments[0].card())
}

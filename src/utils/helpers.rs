//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use uuid::Uuid;

/// Generate a new UUID v4
pub fn generate_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// Truncate text to a maximum number of characters with ellipsis
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Normalize a button reply or typed choice for comparison
pub fn normalize_choice(text: &str) -> String {
    text.trim().to_ascii_lowercase()
}

/// Compare a user reply against an expected choice value
pub fn matches_choice(reply: &str, choice: &str) -> bool {
    normalize_choice(reply) == normalize_choice(choice)
}

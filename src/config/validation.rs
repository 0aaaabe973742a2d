//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{AliceBotError, Result};
use super::{SessionBackend, Settings};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_bot_config(&settings.bot)?;
    validate_recognizer_config(&settings.recognizer)?;
    validate_spell_config(&settings.spell)?;
    validate_dialog_config(&settings.dialogs)?;
    validate_session_config(&settings.session)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.port == 0 {
        return Err(AliceBotError::Config(
            "Server port must be greater than 0".to_string()
        ));
    }

    if config.host.is_empty() {
        return Err(AliceBotError::Config(
            "Server host is required".to_string()
        ));
    }

    Ok(())
}

/// The app identity and secret come as a pair
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.app_id.is_empty() != config.app_password.is_empty() {
        return Err(AliceBotError::Config(
            "App id and app password must be configured together".to_string()
        ));
    }

    Ok(())
}

fn validate_recognizer_config(config: &super::RecognizerConfig) -> Result<()> {
    if !config.model_url.is_empty() {
        url::Url::parse(&config.model_url)?;
    }

    if config.timeout_seconds == 0 {
        return Err(AliceBotError::Config(
            "Recognizer timeout must be greater than 0".to_string()
        ));
    }

    validate_threshold("recognizer.intent_threshold", config.intent_threshold)
}

fn validate_spell_config(config: &super::SpellConfig) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }

    if config.endpoint.is_empty() {
        return Err(AliceBotError::Config(
            "Spell check endpoint is required when spell correction is enabled".to_string()
        ));
    }

    if config.api_key.is_empty() {
        return Err(AliceBotError::Config(
            "Spell check API key is required when spell correction is enabled".to_string()
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(AliceBotError::Config(
            "Spell check timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

fn validate_dialog_config(config: &super::DialogConfig) -> Result<()> {
    validate_threshold("dialogs.interrupt_threshold", config.interrupt_threshold)
}

fn validate_session_config(config: &super::SessionConfig) -> Result<()> {
    if config.backend == SessionBackend::Redis && config.redis_url.is_empty() {
        return Err(AliceBotError::Config(
            "Redis URL is required for the redis session backend".to_string()
        ));
    }

    if config.turn_timeout_seconds == 0 {
        return Err(AliceBotError::Config(
            "Turn timeout must be greater than 0".to_string()
        ));
    }

    if config.ttl_seconds == 0 {
        return Err(AliceBotError::Config(
            "Session TTL must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(AliceBotError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(AliceBotError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}

fn validate_threshold(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(AliceBotError::Config(
            format!("{} must be between 0 and 1, got {}", name, value)
        ));
    }
    Ok(())
}

//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub bot: BotConfig,
    pub recognizer: RecognizerConfig,
    pub spell: SpellConfig,
    pub dialogs: DialogConfig,
    pub session: SessionConfig,
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Bot identity used by the messaging transport
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub name: String,
    pub app_id: String,
    pub app_password: String,
}

/// Intent recognizer configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecognizerConfig {
    /// Full endpoint URL of the hosted model; empty disables recognition
    pub model_url: String,
    pub timeout_seconds: u64,
    /// Minimum score for an intent to count as recognized
    pub intent_threshold: f64,
}

/// Spell correction configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpellConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub api_key: String,
    pub timeout_seconds: u64,
}

/// Dialog routing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DialogConfig {
    /// Whether a recognized intent may interrupt a running waterfall
    pub allow_interruptions: bool,
    pub interrupt_threshold: f64,
}

/// Conversation session configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    pub backend: SessionBackend,
    pub redis_url: String,
    pub prefix: String,
    pub ttl_seconds: u64,
    pub turn_timeout_seconds: u64,
}

/// Where conversation sessions live between turns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    Memory,
    Redis,
}

/// Sample hotel store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    pub latency_ms: u64,
    pub max_results: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: Option<String>,
    pub json: bool,
}

/// Plain environment variables recognized in addition to the prefixed ones,
/// mapped to their setting key. Later entries win over earlier aliases.
const WELL_KNOWN_ENV: &[(&str, &str)] = &[
    ("HOST", "server.host"),
    ("PORT", "server.port"),
    ("MICROSOFT_APP_ID", "bot.app_id"),
    ("MICROSOFT_APP_PASSWORD", "bot.app_password"),
    ("LUIS_MODEL_URL", "recognizer.model_url"),
    ("INTENT_MODEL_URL", "recognizer.model_url"),
    ("IS_SPELL_CORRECTION_ENABLED", "spell.enabled"),
    ("SPELL_CORRECTION_ENABLED", "spell.enabled"),
    ("BING_SPELL_CHECK_API_KEY", "spell.api_key"),
];

impl Settings {
    /// Load settings from defaults, configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::from_env_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings using a custom lookup for the well-known plain variables
    pub fn from_env_lookup<F>(lookup: F) -> Result<Self, config::ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("ALICEBOT").separator("__"));

        for (var, key) in WELL_KNOWN_ENV {
            if let Some(value) = lookup(var).filter(|v| !v.is_empty()) {
                builder = builder.set_override(*key, value)?;
            }
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::AliceBotError> {
        super::validation::validate_settings(self)
    }

    /// Socket address string the HTTP server binds to
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3978,
            },
            bot: BotConfig {
                name: "Alice".to_string(),
                app_id: String::new(),
                app_password: String::new(),
            },
            recognizer: RecognizerConfig {
                model_url: String::new(),
                timeout_seconds: 5,
                intent_threshold: 0.1,
            },
            spell: SpellConfig {
                enabled: false,
                endpoint: "https://api.cognitive.microsoft.com/bing/v7.0/spellcheck".to_string(),
                api_key: String::new(),
                timeout_seconds: 3,
            },
            dialogs: DialogConfig {
                allow_interruptions: true,
                interrupt_threshold: 0.7,
            },
            session: SessionConfig {
                backend: SessionBackend::Memory,
                redis_url: "redis://localhost:6379".to_string(),
                prefix: "alicebot:".to_string(),
                ttl_seconds: 3600,
                turn_timeout_seconds: 30,
            },
            store: StoreConfig {
                latency_ms: 250,
                max_results: 5,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                directory: None,
                json: false,
            },
        }
    }
}

//! Error handling for AliceBot
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for AliceBot application
#[derive(Error, Debug)]
pub enum AliceBotError {
    #[error("Intent recognizer error: {0}")]
    Recognizer(#[from] RecognizerError),

    #[error("Spell check error: {0}")]
    SpellCheck(#[from] SpellCheckError),

    #[error("Hotel store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Dialog already registered: {label}")]
    DuplicateDialog { label: String },

    #[error("Dialog has no steps: {label}")]
    InvalidDialog { label: String },

    #[error("Unknown dialog: {label}")]
    UnknownDialog { label: String },

    #[error("Dialog {label} is already running in this conversation")]
    DialogCycle { label: String },

    #[error("No active dialog for conversation {conversation_id}")]
    NoActiveDialog { conversation_id: String },

    #[error("Dialog step failed in {dialog} at step {step}: {reason}")]
    StepFailed { dialog: String, step: usize, reason: String },

    #[error("Turn timed out after {seconds}s")]
    TurnTimeout { seconds: u64 },

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Intent recognizer specific errors
#[derive(Error, Debug)]
pub enum RecognizerError {
    #[error("Recognizer request failed: {0}")]
    RequestFailed(String),

    #[error("Recognizer timeout")]
    Timeout,

    #[error("Invalid recognizer response: {0}")]
    InvalidResponse(String),

    #[error("Recognizer not configured")]
    NotConfigured,
}

/// Spell check service specific errors
#[derive(Error, Debug)]
pub enum SpellCheckError {
    #[error("Spell check request failed: {0}")]
    RequestFailed(String),

    #[error("Spell check timeout")]
    Timeout,

    #[error("Invalid spell check response: {0}")]
    InvalidResponse(String),
}

/// Hotel and review store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store unavailable")]
    Unavailable,
}

/// Result type alias for AliceBot operations
pub type Result<T> = std::result::Result<T, AliceBotError>;

/// Result type alias for recognizer operations
pub type RecognizerResult<T> = std::result::Result<T, RecognizerError>;

/// Result type alias for spell check operations
pub type SpellCheckResult<T> = std::result::Result<T, SpellCheckError>;

/// Result type alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

impl AliceBotError {
    /// Check if the error is recoverable within a single turn
    pub fn is_recoverable(&self) -> bool {
        match self {
            AliceBotError::Recognizer(_) => true,
            AliceBotError::SpellCheck(_) => true,
            AliceBotError::Store(_) => true,
            AliceBotError::Config(_) => false,
            AliceBotError::DuplicateDialog { .. } => false,
            AliceBotError::InvalidDialog { .. } => false,
            AliceBotError::UnknownDialog { .. } => false,
            AliceBotError::DialogCycle { .. } => false,
            AliceBotError::NoActiveDialog { .. } => false,
            AliceBotError::StepFailed { .. } => true,
            AliceBotError::TurnTimeout { .. } => true,
            AliceBotError::Redis(_) => true,
            AliceBotError::Http(_) => true,
            AliceBotError::Serialization(_) => false,
            AliceBotError::UrlParse(_) => false,
            AliceBotError::InvalidInput(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AliceBotError::Config(_) => ErrorSeverity::Critical,
            AliceBotError::DuplicateDialog { .. } => ErrorSeverity::Critical,
            AliceBotError::InvalidDialog { .. } => ErrorSeverity::Critical,
            AliceBotError::Recognizer(_) => ErrorSeverity::Warning,
            AliceBotError::SpellCheck(_) => ErrorSeverity::Warning,
            AliceBotError::Store(_) => ErrorSeverity::Warning,
            AliceBotError::TurnTimeout { .. } => ErrorSeverity::Warning,
            AliceBotError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

//! Logging middleware
//!
//! This module provides logging middleware for tracking bot interactions,
//! performance metrics, and debugging information.

use std::time::{Duration, Instant};
use tracing::{info, debug, warn, error, Span};
use crate::models::{IncomingMessage, OutgoingMessage};
use crate::utils::errors::{AliceBotError, ErrorSeverity};
use crate::utils::helpers::truncate_text;

/// Longest message text written to the logs
const MAX_LOGGED_TEXT: usize = 200;

/// Turns slower than this are reported
const SLOW_TURN: Duration = Duration::from_secs(5);

/// Logging middleware for bot interactions
#[derive(Debug, Clone)]
pub struct LoggingMiddleware {
    log_user_interactions: bool,
    log_performance: bool,
    log_errors: bool,
}

impl LoggingMiddleware {
    /// Create a new LoggingMiddleware instance
    pub fn new(log_user_interactions: bool, log_performance: bool, log_errors: bool) -> Self {
        Self {
            log_user_interactions,
            log_performance,
            log_errors,
        }
    }

    /// Log an inbound message
    pub fn log_message(&self, message: &IncomingMessage) {
        if !self.log_user_interactions {
            return;
        }

        debug!(
            conversation_id = %message.conversation_id,
            user_id = message.user_id.as_deref(),
            text = %truncate_text(&message.text, MAX_LOGGED_TEXT),
            "Message received"
        );
    }

    /// Log the replies produced for a turn
    pub fn log_replies(&self, conversation_id: &str, replies: &[OutgoingMessage]) {
        if !self.log_user_interactions {
            return;
        }

        let cards: usize = replies.iter().map(|r| r.attachments.len()).sum();
        debug!(
            conversation_id = conversation_id,
            replies = replies.len(),
            cards = cards,
            "Replies sent"
        );
    }

    /// Log error with context, at the level its severity calls for
    pub fn log_error(&self, error: &AliceBotError, context: &str, conversation_id: Option<&str>) {
        if !self.log_errors {
            return;
        }

        let severity = error.severity();
        let recoverable = error.is_recoverable();
        match severity {
            ErrorSeverity::Info => info!(
                error = %error, context = context, conversation_id = conversation_id,
                recoverable = recoverable, "Request rejected"
            ),
            ErrorSeverity::Warning => warn!(
                error = %error, context = context, conversation_id = conversation_id,
                recoverable = recoverable, "Error occurred"
            ),
            ErrorSeverity::Error | ErrorSeverity::Critical => error!(
                error = %error, context = context, conversation_id = conversation_id,
                recoverable = recoverable, severity = %severity, "Error occurred"
            ),
        }
    }

    /// Create a performance tracking span
    pub fn create_performance_span(&self, operation: &str) -> Option<PerformanceTracker> {
        if self.log_performance {
            Some(PerformanceTracker::new(operation.to_string()))
        } else {
            None
        }
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new(true, true, true)
    }
}

/// Performance tracker for measuring operation duration
pub struct PerformanceTracker {
    operation: String,
    start_time: Instant,
    _span: Span,
}

impl PerformanceTracker {
    fn new(operation: String) -> Self {
        let span = tracing::info_span!("performance", operation = %operation);

        Self {
            operation,
            start_time: Instant::now(),
            _span: span,
        }
    }

    /// Complete the performance tracking and log the result
    pub fn complete(self, success: bool) -> Duration {
        let duration = self.start_time.elapsed();

        if success {
            info!(
                operation = %self.operation,
                duration_ms = duration.as_millis(),
                "Operation completed successfully"
            );
        } else {
            warn!(
                operation = %self.operation,
                duration_ms = duration.as_millis(),
                "Operation failed"
            );
        }

        if duration > SLOW_TURN {
            warn!(
                operation = %self.operation,
                duration_ms = duration.as_millis(),
                "Slow operation detected"
            );
        }
        duration
    }
}

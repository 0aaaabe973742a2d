//! Spell check middleware
//!
//! Rewrites inbound text before dialogs and the recognizer see it.

use std::sync::Arc;
use tracing::debug;
use crate::models::IncomingMessage;
use crate::services::SpellCorrector;
use crate::utils::logging::log_collaborator_failure;

#[derive(Clone, Default)]
pub struct SpellCheckMiddleware {
    corrector: Option<Arc<dyn SpellCorrector>>,
}

impl SpellCheckMiddleware {
    /// Create a middleware; `None` passes messages through untouched
    pub fn new(corrector: Option<Arc<dyn SpellCorrector>>) -> Self {
        Self { corrector }
    }

    pub fn is_enabled(&self) -> bool {
        self.corrector.is_some()
    }

    /// Replace the message text with its corrected form.
    ///
    /// Any failure keeps the original text.
    pub async fn process(&self, mut message: IncomingMessage) -> IncomingMessage {
        let Some(corrector) = &self.corrector else {
            return message;
        };

        match corrector.correct(&message.text).await {
            Ok(corrected) => {
                if corrected != message.text {
                    debug!(conversation_id = %message.conversation_id, "Message text corrected");
                }
                message.text = corrected;
            }
            Err(e) => {
                log_collaborator_failure("spell_check", &e.to_string(), "original text");
            }
        }

        message
    }
}

impl std::fmt::Debug for SpellCheckMiddleware {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpellCheckMiddleware")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

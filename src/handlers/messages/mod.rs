//! Message handlers module
//!
//! Drives one inbound message through the turn pipeline: lock the
//! conversation, load its session, correct spelling, resume or dispatch a
//! dialog, then persist the session.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::config::{DialogConfig, Settings};
use crate::dialogs::{DialogRouter, TurnOutput, STEP_FAILURE_MESSAGE};
use crate::middleware::{LoggingMiddleware, SpellCheckMiddleware};
use crate::models::{IncomingMessage, OutgoingMessage, RecognizedIntent};
use crate::state::{ConversationContext, ConversationLocks, StateStorage};
use crate::utils::errors::{AliceBotError, Result};
use crate::utils::logging::{log_collaborator_failure, log_turn};

/// Sent when a turn exceeds its time budget
pub const TIMEOUT_MESSAGE: &str = "Sorry, that took too long. Let's start over.";

/// Handles inbound messages for every conversation
#[derive(Clone)]
pub struct MessageHandler {
    router: Arc<DialogRouter>,
    storage: Arc<dyn StateStorage>,
    locks: ConversationLocks,
    spell_check: SpellCheckMiddleware,
    logging: LoggingMiddleware,
    dialogs: DialogConfig,
    turn_timeout: Duration,
}

impl MessageHandler {
    pub fn new(router: Arc<DialogRouter>, storage: Arc<dyn StateStorage>, settings: &Settings) -> Self {
        let spell_check = SpellCheckMiddleware::new(router.services().spell_checker.clone());

        Self {
            router,
            storage,
            locks: ConversationLocks::new(),
            spell_check,
            logging: LoggingMiddleware::default(),
            dialogs: settings.dialogs.clone(),
            turn_timeout: Duration::from_secs(settings.session.turn_timeout_seconds),
        }
    }

    /// Override the per-turn time budget
    pub fn with_turn_timeout(mut self, timeout: Duration) -> Self {
        self.turn_timeout = timeout;
        self
    }

    pub fn router(&self) -> &DialogRouter {
        &self.router
    }

    pub fn locks(&self) -> &ConversationLocks {
        &self.locks
    }

    /// Handle one user message and return the replies for it
    pub async fn handle_message(&self, message: IncomingMessage) -> Vec<OutgoingMessage> {
        let tracker = self.logging.create_performance_span("turn");
        let conversation_id = message.conversation_id.clone();

        let _guard = self.locks.acquire(&conversation_id).await;
        self.logging.log_message(&message);

        // The time budget covers session load, spell check and routing
        let mut loaded: Option<ConversationContext> = None;
        let turn = async {
            let session = loaded.insert(self.load_session(&conversation_id).await);
            let message = self.spell_check.process(message).await;
            self.route(session, &message).await
        };
        let routed = tokio::time::timeout(self.turn_timeout, turn).await;

        let mut session = loaded.unwrap_or_else(|| ConversationContext::new(&conversation_id));
        let (replies, intent) = match routed {
            Ok(Ok((output, intent))) => (output.replies, intent),
            Ok(Err(e)) => {
                self.logging.log_error(&e, "routing message", Some(&conversation_id));
                self.router.cancel_all(&mut session);
                (vec![OutgoingMessage::text(STEP_FAILURE_MESSAGE)], None)
            }
            Err(_) => {
                let timeout = AliceBotError::TurnTimeout { seconds: self.turn_timeout.as_secs() };
                self.logging.log_error(&timeout, "resetting conversation", Some(&conversation_id));
                self.router.cancel_all(&mut session);
                (vec![OutgoingMessage::text(TIMEOUT_MESSAGE)], None)
            }
        };

        if tokio::time::timeout(self.turn_timeout, self.save_session(&session)).await.is_err() {
            warn!(conversation_id = %conversation_id, "Timed out persisting session");
        }

        self.logging.log_replies(&conversation_id, &replies);
        let duration_ms = tracker
            .map(|t| t.complete(true).as_millis() as u64)
            .unwrap_or_default();
        log_turn(&conversation_id, intent.as_deref(), replies.len(), duration_ms);

        replies
    }

    /// Resume the running dialog or start a new one
    async fn route(
        &self,
        session: &mut ConversationContext,
        message: &IncomingMessage,
    ) -> Result<(TurnOutput, Option<String>)> {
        let mut recognized: Option<Option<RecognizedIntent>> = None;

        if !session.is_idle() {
            if self.dialogs.allow_interruptions {
                let intent = self.recognize(message).await;
                if let Some(trigger) = intent.as_ref().filter(|i| self.is_trigger(i)) {
                    info!(
                        conversation_id = %session.conversation_id,
                        intent = %trigger.intent,
                        score = trigger.score,
                        "Intent interrupts active dialog"
                    );
                    let label = trigger.intent.clone();
                    self.router.cancel_all(session);
                    let output = self.router.dispatch(session, intent, message).await?;
                    return Ok((output, Some(label)));
                }
                recognized = Some(intent);
            }

            let output = self.router.resume(session, message).await?;
            if !output.is_unhandled() {
                return Ok((output, None));
            }
            debug!(conversation_id = %session.conversation_id, "Dialog finished silently, classifying message");
        }

        let intent = match recognized {
            Some(intent) => intent,
            None => self.recognize(message).await,
        };
        let label = intent.as_ref().map(|i| i.intent.clone());
        let output = self.router.dispatch(session, intent, message).await?;
        Ok((output, label))
    }

    fn is_trigger(&self, intent: &RecognizedIntent) -> bool {
        intent.score >= self.dialogs.interrupt_threshold && self.router.is_registered(&intent.intent)
    }

    /// Classify the message; failures count as no match
    async fn recognize(&self, message: &IncomingMessage) -> Option<RecognizedIntent> {
        let recognizer = self.router.services().recognizer.as_ref()?;

        match recognizer.recognize(&message.text).await {
            Ok(intent) => intent,
            Err(e) => {
                log_collaborator_failure("recognizer", &e.to_string(), "default responder");
                None
            }
        }
    }

    async fn load_session(&self, conversation_id: &str) -> ConversationContext {
        match self.storage.load_context(conversation_id).await {
            Ok(Some(session)) => session,
            Ok(None) => ConversationContext::new(conversation_id),
            Err(e) => {
                error!(conversation_id = conversation_id, error = %e, "Failed to load session, starting fresh");
                ConversationContext::new(conversation_id)
            }
        }
    }

    async fn save_session(&self, session: &ConversationContext) {
        let result = if session.is_idle() {
            self.storage.delete_context(&session.conversation_id).await
        } else {
            self.storage.save_context(session).await
        };

        if let Err(e) = result {
            error!(conversation_id = %session.conversation_id, error = %e, "Failed to persist session");
        }
    }
}

impl std::fmt::Debug for MessageHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageHandler")
            .field("router", &self.router)
            .field("turn_timeout", &self.turn_timeout)
            .finish_non_exhaustive()
    }
}

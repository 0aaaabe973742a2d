//! Dialog router
//!
//! Owns the registration table (intent label -> waterfall) and drives the
//! dialog stack of one conversation across suspend/resume turns.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::models::{IncomingMessage, OutgoingMessage, RecognizedIntent};
use crate::services::ServiceFactory;
use crate::state::{ConversationContext, DialogState};
use crate::utils::errors::{AliceBotError, Result};
use crate::utils::logging::log_dialog_transition;
use super::waterfall::{StepArgs, StepOutcome, TurnContext, Waterfall};

/// Maximum nesting of begun dialogs
pub const MAX_DIALOG_DEPTH: usize = 8;

/// Sent when a step fails and the conversation is reset
pub const STEP_FAILURE_MESSAGE: &str = "Oops. Something went wrong and we need to start over.";

/// Builds the reply for messages no dialog handles
pub type DefaultResponder = Arc<dyn Fn(&IncomingMessage) -> OutgoingMessage + Send + Sync>;

/// Result of routing one message
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutput {
    pub replies: Vec<OutgoingMessage>,
    pub state: DialogState,
}

impl TurnOutput {
    /// Whether the turn neither replied nor left a dialog running
    pub fn is_unhandled(&self) -> bool {
        self.replies.is_empty() && self.state.is_idle()
    }
}

/// Reply used when nothing matched
pub fn not_understood(message: &IncomingMessage) -> OutgoingMessage {
    OutgoingMessage::text(format!(
        "Sorry, I did not understand '{}'. Type 'help' if you need assistance.",
        message.text
    ))
}

pub struct DialogRouter {
    dialogs: HashMap<String, Arc<Waterfall>>,
    default_responder: DefaultResponder,
    services: Arc<ServiceFactory>,
}

impl DialogRouter {
    /// Create an empty router
    pub fn new(services: Arc<ServiceFactory>) -> Self {
        Self {
            dialogs: HashMap::new(),
            default_responder: Arc::new(not_understood),
            services,
        }
    }

    /// Replace the reply used for unrecognized messages
    pub fn with_default_responder<F>(mut self, responder: F) -> Self
    where
        F: Fn(&IncomingMessage) -> OutgoingMessage + Send + Sync + 'static,
    {
        self.default_responder = Arc::new(responder);
        self
    }

    /// Register a waterfall under a unique label
    pub fn register(&mut self, label: &str, waterfall: Waterfall) -> Result<()> {
        if waterfall.is_empty() {
            return Err(AliceBotError::InvalidDialog { label: label.to_string() });
        }
        if self.dialogs.contains_key(label) {
            return Err(AliceBotError::DuplicateDialog { label: label.to_string() });
        }

        debug!(label = label, steps = waterfall.len(), "Registered dialog");
        self.dialogs.insert(label.to_string(), Arc::new(waterfall));
        Ok(())
    }

    pub fn is_registered(&self, label: &str) -> bool {
        self.dialogs.contains_key(label)
    }

    /// Registered labels, sorted
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.dialogs.keys().map(String::as_str).collect();
        labels.sort_unstable();
        labels
    }

    pub fn services(&self) -> &Arc<ServiceFactory> {
        &self.services
    }

    /// Start the waterfall registered for `intent`, replacing anything running.
    ///
    /// With no intent, the `None` intent, or an unregistered label, the
    /// default responder answers and the conversation is left idle.
    pub async fn dispatch(
        &self,
        session: &mut ConversationContext,
        intent: Option<RecognizedIntent>,
        message: &IncomingMessage,
    ) -> Result<TurnOutput> {
        let label = intent.as_ref()
            .filter(|i| !i.is_none_intent() && self.is_registered(&i.intent))
            .map(|i| i.intent.clone());

        let Some(label) = label else {
            debug!(
                conversation_id = %session.conversation_id,
                intent = intent.as_ref().map(|i| i.intent.as_str()),
                "No dialog for message, using default responder"
            );
            session.clear_stack();
            return Ok(TurnOutput {
                replies: vec![(self.default_responder)(message)],
                state: DialogState::Idle,
            });
        };

        info!(conversation_id = %session.conversation_id, dialog = %label, "Starting dialog");
        session.start_dialog(&label);
        log_dialog_transition(&session.conversation_id, &label, 0, "begin");

        let mut turn = TurnContext::new(message.clone(), self.services.clone());
        self.run(session, &mut turn, StepArgs::with_intent(intent)).await
    }

    /// Continue the innermost running waterfall with the user's reply
    pub async fn resume(
        &self,
        session: &mut ConversationContext,
        message: &IncomingMessage,
    ) -> Result<TurnOutput> {
        if session.is_idle() {
            return Err(AliceBotError::NoActiveDialog {
                conversation_id: session.conversation_id.clone(),
            });
        }

        session.advance_step()?;
        let mut turn = TurnContext::new(message.clone(), self.services.clone());
        self.run(session, &mut turn, StepArgs::with_response(Some(message.text.clone()))).await
    }

    /// Abort every running dialog
    pub fn cancel_all(&self, session: &mut ConversationContext) {
        if !session.is_idle() {
            info!(conversation_id = %session.conversation_id, summary = ?session.summary(), "Cancelling dialogs");
        }
        session.clear_stack();
    }

    /// Execute steps until one suspends or the stack empties
    async fn run(
        &self,
        session: &mut ConversationContext,
        turn: &mut TurnContext,
        mut args: StepArgs,
    ) -> Result<TurnOutput> {
        loop {
            let Some((dialog, index)) = session.active_frame().map(|f| (f.dialog.clone(), f.step)) else {
                break;
            };

            let waterfall = match self.dialogs.get(&dialog) {
                Some(waterfall) => Arc::clone(waterfall),
                None => {
                    session.clear_stack();
                    return Err(AliceBotError::UnknownDialog { label: dialog });
                }
            };

            let Some(step) = waterfall.get(index) else {
                // Replied past the last step: the waterfall is simply done
                args = match self.complete_frame(session) {
                    Some(next_args) => next_args,
                    None => break,
                };
                continue;
            };

            if let Some(frame) = session.active_frame_mut() {
                turn.data = std::mem::take(&mut frame.data);
            }
            let result = step.run(turn, args).await;
            if let Some(frame) = session.active_frame_mut() {
                frame.data = std::mem::take(&mut turn.data);
            }

            let outcome = match result {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(
                        conversation_id = %session.conversation_id,
                        dialog = %dialog,
                        step = index,
                        error = %e,
                        "Dialog step failed, resetting conversation"
                    );
                    session.clear_stack();
                    turn.send_text(STEP_FAILURE_MESSAGE);
                    break;
                }
            };

            match outcome {
                StepOutcome::Prompt => {
                    log_dialog_transition(&session.conversation_id, &dialog, index, "wait");
                    break;
                }
                StepOutcome::Next(value) => {
                    session.advance_step()?;
                    log_dialog_transition(&session.conversation_id, &dialog, index + 1, "next");
                    args = StepArgs::with_response(value);
                }
                StepOutcome::BeginDialog(child) => {
                    self.begin_child(session, &child)?;
                    log_dialog_transition(&session.conversation_id, &child, 0, "begin");
                    args = StepArgs::default();
                }
                StepOutcome::End => {
                    args = match self.complete_frame(session) {
                        Some(next_args) => next_args,
                        None => break,
                    };
                }
            }
        }

        Ok(TurnOutput {
            replies: turn.take_replies(),
            state: session.state(),
        })
    }

    /// Push `child` above the current dialog
    fn begin_child(&self, session: &mut ConversationContext, child: &str) -> Result<()> {
        let failure = if !self.is_registered(child) {
            Some(AliceBotError::UnknownDialog { label: child.to_string() })
        } else if session.is_in_dialog(child) || session.depth() >= MAX_DIALOG_DEPTH {
            Some(AliceBotError::DialogCycle { label: child.to_string() })
        } else {
            None
        };

        if let Some(err) = failure {
            warn!(conversation_id = %session.conversation_id, child = child, error = %err, "Cannot begin child dialog");
            session.clear_stack();
            return Err(err);
        }

        session.push_dialog(child);
        Ok(())
    }

    /// Pop the finished dialog; returns the parent's input when one resumes
    fn complete_frame(&self, session: &mut ConversationContext) -> Option<StepArgs> {
        let finished = session.pop_dialog()?;
        log_dialog_transition(&session.conversation_id, &finished.dialog, finished.step, "end");

        // The parent was parked on the step that began the child
        session.advance_step().ok()?;
        Some(StepArgs::child_completed(finished.dialog))
    }
}

impl std::fmt::Debug for DialogRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogRouter")
            .field("dialogs", &self.labels())
            .finish_non_exhaustive()
    }
}

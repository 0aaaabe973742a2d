//! Waterfall dialogs
//!
//! A waterfall is an ordered list of steps. Each step runs once per user
//! turn, may send messages, and tells the router what happens next: wait for
//! a reply, move straight on, begin a child dialog, or finish.

use std::sync::Arc;
use futures::future::BoxFuture;
use serde::{de::DeserializeOwned, Serialize};

use crate::models::{IncomingMessage, OutgoingMessage, RecognizedIntent};
use crate::services::ServiceFactory;
use crate::state::DialogData;
use crate::utils::errors::Result;

/// Future returned by a step
pub type StepFuture<'a> = BoxFuture<'a, Result<StepOutcome>>;

/// What the router does after a step returns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// A prompt was sent; suspend until the next user message
    Prompt,
    /// Run the next step in this turn, handing it the value as its response
    Next(Option<String>),
    /// Begin the named dialog beneath this one; this dialog continues at its
    /// next step once the child completes
    BeginDialog(String),
    /// This waterfall is complete
    End,
}

/// Input handed to a step
#[derive(Debug, Clone, Default)]
pub struct StepArgs {
    /// Set on the first step of an intent-triggered dialog
    pub intent: Option<RecognizedIntent>,
    /// Raw reply to the previous step's prompt, or the value passed via `Next`
    pub response: Option<String>,
    /// Label of the child dialog that just completed
    pub child_completed: Option<String>,
}

impl StepArgs {
    pub fn with_intent(intent: Option<RecognizedIntent>) -> Self {
        Self {
            intent,
            ..Self::default()
        }
    }

    pub fn with_response(response: Option<String>) -> Self {
        Self {
            response,
            ..Self::default()
        }
    }

    pub fn child_completed(dialog: String) -> Self {
        Self {
            child_completed: Some(dialog),
            ..Self::default()
        }
    }

    /// Reply text, trimmed, or empty when there is none
    pub fn response_text(&self) -> &str {
        self.response.as_deref().map(str::trim).unwrap_or("")
    }
}

/// Everything a step can see and touch during one turn
pub struct TurnContext {
    message: IncomingMessage,
    services: Arc<ServiceFactory>,
    replies: Vec<OutgoingMessage>,
    pub(crate) data: DialogData,
}

impl TurnContext {
    pub fn new(message: IncomingMessage, services: Arc<ServiceFactory>) -> Self {
        Self {
            message,
            services,
            replies: Vec::new(),
            data: DialogData::new(),
        }
    }

    /// The message being handled in this turn
    pub fn message(&self) -> &IncomingMessage {
        &self.message
    }

    pub fn services(&self) -> &ServiceFactory {
        &self.services
    }

    pub fn send(&mut self, message: OutgoingMessage) {
        self.replies.push(message);
    }

    pub fn send_text(&mut self, text: impl Into<String>) {
        self.send(OutgoingMessage::text(text));
    }

    /// Send a prompt and suspend
    pub fn prompt(&mut self, message: OutgoingMessage) -> StepOutcome {
        self.send(message);
        StepOutcome::Prompt
    }

    /// Send a final message and complete the waterfall
    pub fn end_with(&mut self, message: OutgoingMessage) -> StepOutcome {
        self.send(message);
        StepOutcome::End
    }

    pub(crate) fn take_replies(&mut self) -> Vec<OutgoingMessage> {
        std::mem::take(&mut self.replies)
    }

    /// Stash a value in the running dialog's variable bag
    pub fn set_data<T: Serialize>(&mut self, key: &str, value: T) -> Result<()> {
        let json_value = serde_json::to_value(value)?;
        self.data.insert(key.to_string(), json_value);
        Ok(())
    }

    /// Read a value from the running dialog's variable bag
    pub fn get_data<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.data.get(key) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    /// Get string data (convenience method)
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get_data::<String>(key).unwrap_or(None)
    }
}

/// One step of a waterfall.
///
/// Implemented for any function of the shape
/// `fn(&mut TurnContext, StepArgs) -> StepFuture<'_>`.
pub trait Step: Send + Sync {
    fn run<'a>(&'a self, turn: &'a mut TurnContext, args: StepArgs) -> StepFuture<'a>;
}

impl<F> Step for F
where
    F: for<'t> Fn(&'t mut TurnContext, StepArgs) -> StepFuture<'t> + Send + Sync,
{
    fn run<'a>(&'a self, turn: &'a mut TurnContext, args: StepArgs) -> StepFuture<'a> {
        self(turn, args)
    }
}

/// Ordered sequence of steps registered under one label
#[derive(Default)]
pub struct Waterfall {
    steps: Vec<Box<dyn Step>>,
}

impl Waterfall {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step
    pub fn step<S: Step + 'static>(mut self, step: S) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&dyn Step> {
        self.steps.get(index).map(|step| step.as_ref())
    }
}

impl std::fmt::Debug for Waterfall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Waterfall")
            .field("steps", &self.steps.len())
            .finish()
    }
}

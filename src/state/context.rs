//! Conversation context management
//!
//! This module tracks, per conversation, the stack of running waterfall
//! dialogs, the step each one is waiting on, and the data each dialog
//! instance captured along the way.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc, Duration};

use crate::utils::errors::{AliceBotError, Result};

/// Variable bag owned by one dialog instance
pub type DialogData = HashMap<String, serde_json::Value>;

/// One running waterfall on the dialog stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogFrame {
    /// Registered dialog label
    pub dialog: String,
    /// Index of the step that last ran (and is awaiting a reply when suspended)
    pub step: usize,
    /// Data captured by this dialog instance
    #[serde(default)]
    pub data: DialogData,
}

impl DialogFrame {
    pub fn new(dialog: &str) -> Self {
        Self {
            dialog: dialog.to_string(),
            step: 0,
            data: HashMap::new(),
        }
    }
}

/// Observable routing state of a conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogState {
    Idle,
    Running { dialog: String, step: usize },
}

impl DialogState {
    pub fn is_idle(&self) -> bool {
        matches!(self, DialogState::Idle)
    }
}

/// Per-conversation session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationContext {
    /// Conversation this context belongs to
    pub conversation_id: String,
    /// Running dialogs, innermost last
    pub stack: Vec<DialogFrame>,
    /// When this context expires (for cleanup)
    pub expires_at: Option<DateTime<Utc>>,
    /// When this context was last updated
    pub updated_at: DateTime<Utc>,
}

impl ConversationContext {
    /// Create a new idle context for a conversation
    pub fn new(conversation_id: &str) -> Self {
        Self {
            conversation_id: conversation_id.to_string(),
            stack: Vec::new(),
            expires_at: None,
            updated_at: Utc::now(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn state(&self) -> DialogState {
        match self.stack.last() {
            Some(frame) => DialogState::Running {
                dialog: frame.dialog.clone(),
                step: frame.step,
            },
            None => DialogState::Idle,
        }
    }

    /// Innermost running dialog
    pub fn active_frame(&self) -> Option<&DialogFrame> {
        self.stack.last()
    }

    pub fn active_frame_mut(&mut self) -> Option<&mut DialogFrame> {
        self.stack.last_mut()
    }

    /// Replace whatever is running with a fresh instance of `dialog`
    pub fn start_dialog(&mut self, dialog: &str) {
        self.stack.clear();
        self.push_dialog(dialog);
    }

    /// Begin `dialog` on top of the current one, suspending the parent
    pub fn push_dialog(&mut self, dialog: &str) {
        self.stack.push(DialogFrame::new(dialog));
        self.touch();
    }

    /// Remove the innermost dialog
    pub fn pop_dialog(&mut self) -> Option<DialogFrame> {
        self.touch();
        self.stack.pop()
    }

    /// Move the innermost dialog to its next step
    pub fn advance_step(&mut self) -> Result<usize> {
        let conversation_id = self.conversation_id.clone();
        let frame = self.active_frame_mut()
            .ok_or(AliceBotError::NoActiveDialog { conversation_id })?;
        frame.step += 1;
        let step = frame.step;
        self.touch();
        Ok(step)
    }

    /// Abort every running dialog
    pub fn clear_stack(&mut self) {
        self.stack.clear();
        self.touch();
    }

    /// Depth of the dialog stack
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Check if context has expired
    pub fn is_expired(&self) -> bool {
        if let Some(expires_at) = self.expires_at {
            Utc::now() > expires_at
        } else {
            false
        }
    }

    /// Push the expiry `ttl` into the future from now
    pub fn extend_expiry(&mut self, ttl: Duration) {
        self.expires_at = Some(Utc::now() + ttl);
    }

    /// Set custom expiry time
    pub fn set_expiry(&mut self, expires_at: DateTime<Utc>) {
        self.expires_at = Some(expires_at);
        self.touch();
    }

    /// Check if the conversation is inside a specific dialog (at any depth)
    pub fn is_in_dialog(&self, dialog: &str) -> bool {
        self.stack.iter().any(|f| f.dialog == dialog)
    }

    /// Create a summary of the context for logging
    pub fn summary(&self) -> ContextSummary {
        ContextSummary {
            conversation_id: self.conversation_id.clone(),
            dialogs: self.stack.iter().map(|f| format!("{}#{}", f.dialog, f.step)).collect(),
            data_keys: self.stack.iter()
                .flat_map(|f| f.data.keys().cloned())
                .collect(),
            expires_at: self.expires_at,
            updated_at: self.updated_at,
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Context summary for logging and debugging
#[derive(Debug, Clone, Serialize)]
pub struct ContextSummary {
    pub conversation_id: String,
    pub dialogs: Vec<String>,
    pub data_keys: Vec<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

//! Messaging activity models
//!
//! Inbound and outbound activities exchanged with the messaging transport,
//! plus the transport-neutral message types the dialogs work with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::models::card::{Attachment, AttachmentLayout};
use crate::utils::errors::{AliceBotError, Result};
use crate::utils::helpers::generate_uuid;

/// Activity type carrying user text
pub const MESSAGE_ACTIVITY: &str = "message";

/// Account on the channel (user or bot)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelAccount {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Conversation reference
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationAccount {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Activity envelope as posted to and returned from `/api/messages`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(rename = "type")]
    pub activity_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<ChannelAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<ChannelAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation: Option<ConversationAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_layout: Option<AttachmentLayout>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

/// Response body of the messaging endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityBatch {
    pub activities: Vec<Activity>,
}

impl Activity {
    /// Whether this activity carries a user message
    pub fn is_message(&self) -> bool {
        self.activity_type == MESSAGE_ACTIVITY
    }

    /// Extract the transport-neutral message the router consumes
    pub fn to_incoming(&self) -> Result<IncomingMessage> {
        let conversation = self.conversation.as_ref()
            .filter(|c| !c.id.is_empty())
            .ok_or_else(|| AliceBotError::InvalidInput("Activity has no conversation".to_string()))?;

        Ok(IncomingMessage {
            conversation_id: conversation.id.clone(),
            text: self.text.clone().unwrap_or_default(),
            user_id: self.from.as_ref().map(|f| f.id.clone()),
            user_name: self.from.as_ref().and_then(|f| f.name.clone()),
        })
    }

    /// Build the reply activity carrying `message` back to the same conversation
    pub fn reply(&self, message: &OutgoingMessage) -> Activity {
        Activity {
            activity_type: MESSAGE_ACTIVITY.to_string(),
            id: Some(generate_uuid()),
            timestamp: Some(Utc::now()),
            channel_id: self.channel_id.clone(),
            service_url: self.service_url.clone(),
            from: self.recipient.clone(),
            recipient: self.from.clone(),
            conversation: self.conversation.clone(),
            reply_to_id: self.id.clone(),
            text: message.text.clone(),
            attachment_layout: message.attachment_layout,
            attachments: message.attachments.clone(),
        }
    }
}

/// User message as seen by the dialogs
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingMessage {
    pub conversation_id: String,
    pub text: String,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
}

impl IncomingMessage {
    pub fn new(conversation_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            text: text.into(),
            user_id: None,
            user_name: None,
        }
    }
}

/// Bot message produced by a dialog step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_layout: Option<AttachmentLayout>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl OutgoingMessage {
    /// Plain text message
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Card carousel message
    pub fn carousel(attachments: Vec<Attachment>) -> Self {
        Self {
            text: None,
            attachment_layout: Some(AttachmentLayout::Carousel),
            attachments,
        }
    }

    /// Attach a caption to a card message
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }
}

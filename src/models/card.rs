//! Card attachment models
//!
//! Structured message payloads rendered by the channel: hero and thumbnail
//! cards with images and action buttons.

use serde::{Deserialize, Serialize};

/// How a message with several attachments is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentLayout {
    List,
    Carousel,
}

/// Card attachment, tagged with its channel content type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "contentType", content = "content")]
pub enum Attachment {
    #[serde(rename = "application/vnd.microsoft.card.hero")]
    Hero(Card),
    #[serde(rename = "application/vnd.microsoft.card.thumbnail")]
    Thumbnail(Card),
}

impl Attachment {
    pub fn card(&self) -> &Card {
        match self {
            Attachment::Hero(card) | Attachment::Thumbnail(card) => card,
        }
    }
}

/// Card content shared by hero and thumbnail cards
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subtitle: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<CardImage>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<CardAction>,
}

impl Card {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Add an image; empty URLs are skipped
    pub fn image(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        if !url.is_empty() {
            self.images.push(CardImage { url });
        }
        self
    }

    pub fn button(mut self, action: CardAction) -> Self {
        self.buttons.push(action);
        self
    }

    pub fn into_hero(self) -> Attachment {
        Attachment::Hero(self)
    }

    pub fn into_thumbnail(self) -> Attachment {
        Attachment::Thumbnail(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardImage {
    pub url: String,
}

/// Button kinds supported by the cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    /// Posts `value` back as if the user typed it
    #[serde(rename = "imBack")]
    ImBack,
    #[serde(rename = "openUrl")]
    OpenUrl,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardAction {
    #[serde(rename = "type")]
    pub action_type: ActionType,
    pub title: String,
    pub value: String,
}

impl CardAction {
    /// Button whose value comes back as the user's next message
    pub fn im_back(value: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            action_type: ActionType::ImBack,
            title: title.into(),
            value: value.into(),
        }
    }

    pub fn open_url(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            action_type: ActionType::OpenUrl,
            title: title.into(),
            value: url.into(),
        }
    }
}

//! Recognized intents and entities

use serde::{Deserialize, Serialize};

/// Label the recognizer reports when nothing matched
pub const NONE_INTENT: &str = "None";

/// Named value extracted from the user's text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    #[serde(rename = "type")]
    pub entity_type: String,
    pub entity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Entity {
    pub fn new(entity_type: impl Into<String>, entity: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            entity: entity.into(),
            start_index: None,
            end_index: None,
            score: None,
        }
    }
}

/// Classification result for one message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedIntent {
    pub intent: String,
    pub score: f64,
    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl RecognizedIntent {
    pub fn new(intent: impl Into<String>, score: f64) -> Self {
        Self {
            intent: intent.into(),
            score,
            entities: Vec::new(),
        }
    }

    pub fn with_entity(mut self, entity_type: impl Into<String>, entity: impl Into<String>) -> Self {
        self.entities.push(Entity::new(entity_type, entity));
        self
    }

    /// First entity of the given type
    pub fn find_entity(&self, entity_type: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.entity_type == entity_type)
    }

    /// Entity text of the given type, or an empty string
    pub fn entity_or_empty(&self, entity_type: &str) -> String {
        self.find_entity(entity_type)
            .map(|e| e.entity.clone())
            .unwrap_or_default()
    }

    pub fn is_none_intent(&self) -> bool {
        self.intent == NONE_INTENT
    }
}

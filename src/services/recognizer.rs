//! Intent recognizer client
//!
//! This service sends user text to the hosted language-understanding model
//! and turns its answer into a `RecognizedIntent`. A result below the
//! configured threshold, or the `None` intent, counts as "nothing matched".

use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;
use crate::config::RecognizerConfig;
use crate::models::{Entity, RecognizedIntent};
use crate::utils::errors::{AliceBotError, RecognizerError, RecognizerResult, Result};

/// Classifies user text into an intent with entities
#[async_trait]
pub trait IntentRecognizer: Send + Sync {
    /// `Ok(None)` means no intent matched
    async fn recognize(&self, text: &str) -> RecognizerResult<Option<RecognizedIntent>>;
}

/// Model endpoint response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LuisResponse {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub top_scoring_intent: Option<LuisIntent>,
    #[serde(default)]
    pub intents: Vec<LuisIntent>,
    #[serde(default)]
    pub entities: Vec<Entity>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LuisIntent {
    pub intent: String,
    #[serde(default)]
    pub score: Option<f64>,
}

impl LuisResponse {
    /// Pick the best intent; scoreless answers count as certain
    pub fn into_intent(self, threshold: f64) -> Option<RecognizedIntent> {
        let top = self.top_scoring_intent.or_else(|| {
            self.intents.into_iter().max_by(|a, b| {
                a.score.unwrap_or(0.0).total_cmp(&b.score.unwrap_or(0.0))
            })
        })?;

        let score = top.score.unwrap_or(1.0);
        if top.intent.is_empty() || score < threshold {
            return None;
        }

        let intent = RecognizedIntent {
            intent: top.intent,
            score,
            entities: self.entities,
        };

        if intent.is_none_intent() {
            None
        } else {
            Some(intent)
        }
    }
}

/// Hosted model client
#[derive(Debug, Clone)]
pub struct LuisRecognizer {
    client: Client,
    model_url: Url,
    intent_threshold: f64,
}

impl LuisRecognizer {
    /// Create a new recognizer for the configured model endpoint
    pub fn new(config: &RecognizerConfig) -> Result<Self> {
        if config.model_url.is_empty() {
            return Err(AliceBotError::Recognizer(RecognizerError::NotConfigured));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("AliceBot/1.0")
            .build()?;

        Ok(Self {
            client,
            model_url: Url::parse(&config.model_url)?,
            intent_threshold: config.intent_threshold,
        })
    }

    /// Endpoint URL with `q` set to the text, replacing any `q` already present
    fn query_url(&self, text: &str) -> Url {
        let mut url = self.model_url.clone();
        let kept: Vec<(String, String)> = url.query_pairs()
            .filter(|(k, _)| k != "q")
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        url.query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .append_pair("q", text);
        url
    }
}

#[async_trait]
impl IntentRecognizer for LuisRecognizer {
    async fn recognize(&self, text: &str) -> RecognizerResult<Option<RecognizedIntent>> {
        let url = self.query_url(text);
        debug!(host = ?url.host_str(), "Making recognizer request");

        let response = self.client
            .get(url)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RecognizerError::Timeout
                } else {
                    RecognizerError::RequestFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(RecognizerError::RequestFailed(
                format!("HTTP {}: {}", status, error_text)
            ));
        }

        let body: LuisResponse = response.json().await
            .map_err(|e| RecognizerError::InvalidResponse(e.to_string()))?;

        let intent = body.into_intent(self.intent_threshold);
        debug!(
            intent = intent.as_ref().map(|i| i.intent.as_str()),
            score = intent.as_ref().map(|i| i.score),
            "Recognizer result"
        );
        Ok(intent)
    }
}

//! Spell correction service
//!
//! Sends user text to the hosted spell check API and applies the first
//! suggestion for every flagged token.

use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;
use crate::config::SpellConfig;
use crate::utils::errors::{SpellCheckError, SpellCheckResult, Result};

/// Header carrying the API key
const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Rewrites user text with spelling fixes
#[async_trait]
pub trait SpellCorrector: Send + Sync {
    async fn correct(&self, text: &str) -> SpellCheckResult<String>;
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellCheckResponse {
    #[serde(default)]
    pub flagged_tokens: Vec<FlaggedToken>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlaggedToken {
    /// Character offset of the token in the submitted text
    pub offset: usize,
    pub token: String,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Suggestion {
    pub suggestion: String,
    #[serde(default)]
    pub score: Option<f64>,
}

/// Replace flagged tokens with their first suggestion.
///
/// Tokens are applied right to left so earlier offsets stay valid. A token
/// whose offset no longer lines up with the text is skipped.
pub fn apply_corrections(text: &str, tokens: &[FlaggedToken]) -> String {
    let mut chars: Vec<char> = text.chars().collect();

    let mut ordered: Vec<&FlaggedToken> = tokens.iter()
        .filter(|t| !t.suggestions.is_empty())
        .collect();
    ordered.sort_by(|a, b| b.offset.cmp(&a.offset));

    for token in ordered {
        let token_chars: Vec<char> = token.token.chars().collect();
        let end = match token.offset.checked_add(token_chars.len()) {
            Some(end) if end <= chars.len() => end,
            _ => {
                debug!(token = %token.token, offset = token.offset, "Skipping out of range spelling token");
                continue;
            }
        };
        if chars[token.offset..end] != token_chars[..] {
            debug!(token = %token.token, offset = token.offset, "Skipping misaligned spelling token");
            continue;
        }
        let replacement = token.suggestions[0].suggestion.chars();
        chars.splice(token.offset..end, replacement);
    }

    chars.into_iter().collect()
}

/// Hosted spell check client
#[derive(Debug, Clone)]
pub struct BingSpellService {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl BingSpellService {
    pub fn new(config: &SpellConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("AliceBot/1.0")
            .build()?;

        Ok(Self {
            client,
            endpoint: Url::parse(&config.endpoint)?,
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl SpellCorrector for BingSpellService {
    async fn correct(&self, text: &str) -> SpellCheckResult<String> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("mode", "spell")
            .append_pair("text", text);

        let response = self.client
            .get(url)
            .header(SUBSCRIPTION_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SpellCheckError::Timeout
                } else {
                    SpellCheckError::RequestFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(SpellCheckError::RequestFailed(
                format!("HTTP {}: {}", status, error_text)
            ));
        }

        let body: SpellCheckResponse = response.json().await
            .map_err(|e| SpellCheckError::InvalidResponse(e.to_string()))?;

        let corrected = apply_corrections(text, &body.flagged_tokens);
        if corrected != text {
            debug!(original = %text, corrected = %corrected, "Spelling corrected");
        }
        Ok(corrected)
    }
}

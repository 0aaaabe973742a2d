//! State storage implementation
//!
//! This module handles persistence of conversation sessions between turns,
//! with an in-process backend and a Redis backend, including serialization,
//! expiration, and cleanup.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use redis::AsyncCommands;
use tokio::sync::RwLock;
use tracing::{debug, warn, error, info};
use crate::config::{SessionBackend, SessionConfig};
use crate::utils::errors::Result;
use super::context::ConversationContext;

const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Session store consulted at the start and end of every turn
#[async_trait]
pub trait StateStorage: Send + Sync {
    /// Load a conversation context; expired contexts load as `None`
    async fn load_context(&self, conversation_id: &str) -> Result<Option<ConversationContext>>;

    /// Save a conversation context, refreshing its expiry
    async fn save_context(&self, context: &ConversationContext) -> Result<()>;

    /// Delete a conversation context
    async fn delete_context(&self, conversation_id: &str) -> Result<()>;
}

/// Build the storage backend selected in configuration
pub async fn create_storage(config: &SessionConfig) -> Result<Arc<dyn StateStorage>> {
    match config.backend {
        SessionBackend::Memory => {
            info!(ttl_seconds = config.ttl_seconds, "Using in-memory session storage");
            let storage = MemoryStateStorage::new(config.ttl_seconds);
            // Detached: the sweeper lives as long as the runtime
            storage.start_cleanup(CLEANUP_INTERVAL);
            Ok(Arc::new(storage))
        }
        SessionBackend::Redis => {
            info!(url = %config.redis_url, "Using Redis session storage");
            let storage = RedisStateStorage::new(config.clone()).await?;
            storage.test_connection().await?;
            Ok(Arc::new(storage))
        }
    }
}

/// In-process session storage
#[derive(Debug, Clone)]
pub struct MemoryStateStorage {
    contexts: Arc<RwLock<HashMap<String, ConversationContext>>>,
    ttl_seconds: u64,
}

impl MemoryStateStorage {
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            contexts: Arc::new(RwLock::new(HashMap::new())),
            ttl_seconds,
        }
    }

    /// Number of stored contexts, expired ones included
    pub async fn len(&self) -> usize {
        self.contexts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.contexts.read().await.is_empty()
    }

    /// Clean up expired contexts
    pub async fn cleanup_expired_contexts(&self) -> u32 {
        let mut contexts = self.contexts.write().await;
        let before = contexts.len();
        contexts.retain(|_, context| !context.is_expired());
        let cleaned = (before - contexts.len()) as u32;

        if cleaned > 0 {
            info!("Cleaned up {} expired contexts", cleaned);
        }
        cleaned
    }

    /// Periodically drop expired contexts until the returned handle is aborted
    pub fn start_cleanup(&self, interval: Duration) -> tokio::task::JoinHandle<()> {
        let storage = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                storage.cleanup_expired_contexts().await;
            }
        })
    }
}

#[async_trait]
impl StateStorage for MemoryStateStorage {
    async fn load_context(&self, conversation_id: &str) -> Result<Option<ConversationContext>> {
        let context = self.contexts.read().await.get(conversation_id).cloned();

        match context {
            Some(context) if context.is_expired() => {
                warn!(conversation_id = conversation_id, expires_at = ?context.expires_at, "Context has expired, removing");
                self.delete_context(conversation_id).await?;
                Ok(None)
            }
            other => Ok(other),
        }
    }

    async fn save_context(&self, context: &ConversationContext) -> Result<()> {
        let mut stored = context.clone();
        stored.extend_expiry(chrono::Duration::seconds(self.ttl_seconds as i64));

        debug!(conversation_id = %stored.conversation_id, depth = stored.depth(), "Saving context in memory");
        self.contexts.write().await.insert(stored.conversation_id.clone(), stored);
        Ok(())
    }

    async fn delete_context(&self, conversation_id: &str) -> Result<()> {
        if self.contexts.write().await.remove(conversation_id).is_some() {
            debug!("Deleted context for conversation {}", conversation_id);
        }
        Ok(())
    }
}

/// Redis key holding a conversation's serialized context
pub fn context_key(prefix: &str, conversation_id: &str) -> String {
    format!("{}context:{}", prefix, conversation_id)
}

/// Redis-based state storage
#[derive(Clone)]
pub struct RedisStateStorage {
    /// Redis connection manager
    connection_manager: redis::aio::ConnectionManager,
    /// Session configuration
    config: SessionConfig,
}

impl RedisStateStorage {
    /// Create a new state storage instance
    pub async fn new(config: SessionConfig) -> Result<Self> {
        let client = redis::Client::open(config.redis_url.as_str())?;
        let connection_manager = redis::aio::ConnectionManager::new(client).await?;

        Ok(Self {
            connection_manager,
            config,
        })
    }

    /// Get the Redis key for a conversation's context
    fn get_context_key(&self, conversation_id: &str) -> String {
        context_key(&self.config.prefix, conversation_id)
    }

    /// Test Redis connection
    pub async fn test_connection(&self) -> Result<()> {
        let mut conn = self.connection_manager.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

#[async_trait]
impl StateStorage for RedisStateStorage {
    async fn load_context(&self, conversation_id: &str) -> Result<Option<ConversationContext>> {
        let key = self.get_context_key(conversation_id);
        debug!(conversation_id = conversation_id, key = %key, "Loading context from Redis");

        let mut conn = self.connection_manager.clone();

        let serialized: Option<String> = match conn.get::<&str, Option<String>>(&key).await {
            Ok(data) => data,
            Err(e) => {
                error!(conversation_id = conversation_id, error = %e, "Failed to get context from Redis");
                return Err(e.into());
            }
        };

        match serialized {
            Some(data) => {
                let context: ConversationContext = match serde_json::from_str(&data) {
                    Ok(ctx) => ctx,
                    Err(e) => {
                        error!(conversation_id = conversation_id, error = %e, "Failed to deserialize context");
                        return Err(e.into());
                    }
                };

                if context.is_expired() {
                    warn!(conversation_id = conversation_id, expires_at = ?context.expires_at, "Context has expired, removing");
                    self.delete_context(conversation_id).await?;
                    return Ok(None);
                }

                debug!(conversation_id = conversation_id, depth = context.depth(), "Context loaded successfully");
                Ok(Some(context))
            }
            None => {
                debug!(conversation_id = conversation_id, "No context found in Redis");
                Ok(None)
            }
        }
    }

    async fn save_context(&self, context: &ConversationContext) -> Result<()> {
        let key = self.get_context_key(&context.conversation_id);
        let mut stored = context.clone();
        stored.extend_expiry(chrono::Duration::seconds(self.config.ttl_seconds as i64));

        let serialized = serde_json::to_string(&stored)?;
        let mut conn = self.connection_manager.clone();

        match conn.set_ex::<_, _, ()>(&key, serialized, self.config.ttl_seconds).await {
            Ok(_) => {
                debug!(conversation_id = %context.conversation_id, ttl_seconds = self.config.ttl_seconds, "Context saved to Redis");
                Ok(())
            }
            Err(e) => {
                error!(conversation_id = %context.conversation_id, error = %e, "Failed to save context to Redis");
                Err(e.into())
            }
        }
    }

    async fn delete_context(&self, conversation_id: &str) -> Result<()> {
        let key = self.get_context_key(conversation_id);
        let mut conn = self.connection_manager.clone();

        let deleted: u32 = conn.del(&key).await?;
        if deleted > 0 {
            debug!("Deleted context for conversation {}", conversation_id);
        }

        Ok(())
    }
}

impl std::fmt::Debug for RedisStateStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStateStorage")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

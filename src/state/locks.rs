//! Per-conversation turn serialization
//!
//! Each conversation processes one message at a time. Turns for the same
//! conversation queue behind a per-conversation async mutex; different
//! conversations never contend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::OwnedMutexGuard;
use tracing::debug;

/// Idle entries are swept once the table grows past this size
const PRUNE_THRESHOLD: usize = 1024;

/// Held for the duration of one turn
pub type TurnGuard = OwnedMutexGuard<()>;

#[derive(Debug, Clone, Default)]
pub struct ConversationLocks {
    locks: Arc<Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>>,
}

impl ConversationLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until no other turn of `conversation_id` is running
    pub async fn acquire(&self, conversation_id: &str) -> TurnGuard {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            if locks.len() > PRUNE_THRESHOLD {
                Self::prune_idle(&mut locks);
            }
            locks.entry(conversation_id.to_string())
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
                .clone()
        };

        lock.lock_owned().await
    }

    /// Drop entries no turn currently holds or waits on
    pub fn prune(&self) -> usize {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        Self::prune_idle(&mut locks)
    }

    pub fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn prune_idle(locks: &mut HashMap<String, Arc<tokio::sync::Mutex<()>>>) -> usize {
        let before = locks.len();
        // The table's own reference is the only one left when nobody holds or awaits the lock
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        let pruned = before - locks.len();
        if pruned > 0 {
            debug!(pruned = pruned, remaining = locks.len(), "Pruned idle conversation locks");
        }
        pruned
    }
}

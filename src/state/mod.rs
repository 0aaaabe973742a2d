//! State management module
//!
//! This module handles conversation sessions: the dialog stack, where it is
//! stored between turns, and per-conversation turn serialization.

pub mod context;
pub mod locks;
pub mod storage;

// Re-export commonly used state components
pub use context::{ConversationContext, DialogData, DialogFrame, DialogState};
pub use locks::{ConversationLocks, TurnGuard};
pub use storage::{context_key, create_storage, MemoryStateStorage, RedisStateStorage, StateStorage};

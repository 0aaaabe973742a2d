//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod activity;
pub mod card;
pub mod hotel;
pub mod intent;
pub mod leave;

// Re-export commonly used models
pub use activity::{Activity, ActivityBatch, ChannelAccount, ConversationAccount, IncomingMessage, OutgoingMessage};
pub use card::{Attachment, AttachmentLayout, ActionType, Card, CardAction, CardImage};
pub use hotel::{Hotel, Review};
pub use intent::{Entity, RecognizedIntent};
pub use leave::{DaysOffBalance, HolidaySchedule};

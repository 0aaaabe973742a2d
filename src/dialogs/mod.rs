//! Dialog engine
//!
//! Waterfall definitions and the router that selects and drives them.

pub mod router;
pub mod waterfall;

pub use router::{not_understood, DefaultResponder, DialogRouter, TurnOutput, MAX_DIALOG_DEPTH, STEP_FAILURE_MESSAGE};
pub use waterfall::{Step, StepArgs, StepFuture, StepOutcome, TurnContext, Waterfall};

//! Greeting and help dialogs

use crate::dialogs::{StepArgs, StepFuture, TurnContext, Waterfall};
use crate::models::OutgoingMessage;

pub const GREETING_TEXT: &str = "Hi, my name is Alice! Try asking me things like 'How many free days do I have?', 'Show me my holidays schedule'";

pub const HELP_TEXT: &str = "Hi! Try asking me things like 'search hotels in Seattle', 'search hotels near LAX airport' or 'show me the reviews of The Bot Resort'";

pub fn greeting_dialog() -> Waterfall {
    Waterfall::new().step(greet)
}

pub fn help_dialog() -> Waterfall {
    Waterfall::new().step(show_help)
}

fn greet(turn: &mut TurnContext, _args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { Ok(turn.end_with(OutgoingMessage::text(GREETING_TEXT))) })
}

fn show_help(turn: &mut TurnContext, _args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { Ok(turn.end_with(OutgoingMessage::text(HELP_TEXT))) })
}

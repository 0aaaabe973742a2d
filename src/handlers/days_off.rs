//! Days off, holiday schedule and leave request dialogs

use crate::dialogs::{StepArgs, StepFuture, TurnContext, Waterfall};
use crate::models::{DaysOffBalance, HolidaySchedule, OutgoingMessage};
use crate::utils::helpers::matches_choice;
use super::attachments::{days_off_card, holiday_schedule_card, leave_request_card};

/// Variable captured by the first leave request prompt
pub const DATE_FROM_KEY: &str = "date_from";
/// Variable captured by the second leave request prompt
pub const DATE_TO_KEY: &str = "date_to";

const BALANCE: DaysOffBalance = DaysOffBalance { used: 10, left: 16 };

fn current_schedule() -> HolidaySchedule {
    HolidaySchedule {
        duration_days: 10,
        from: "21.07.2018".to_string(),
        to: "28.07.2018".to_string(),
    }
}

pub fn check_days_off_dialog() -> Waterfall {
    Waterfall::new().step(show_balance)
}

pub fn holidays_schedule_dialog() -> Waterfall {
    Waterfall::new()
        .step(show_schedule)
        .step(handle_schedule_choice)
}

pub fn request_leave_dialog() -> Waterfall {
    Waterfall::new()
        .step(ask_date_from)
        .step(ask_date_to)
        .step(confirm_leave)
        .step(submit_leave)
}

fn show_balance(turn: &mut TurnContext, _args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move {
        Ok(turn.end_with(OutgoingMessage::carousel(vec![days_off_card(&BALANCE)])))
    })
}

fn show_schedule(turn: &mut TurnContext, _args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move {
        let card = holiday_schedule_card(&current_schedule());
        Ok(turn.prompt(OutgoingMessage::carousel(vec![card])))
    })
}

fn handle_schedule_choice(turn: &mut TurnContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move {
        let reply = args.response_text();
        let text = if matches_choice(reply, "change schedule") {
            "To change your schedule please send an email to HR!"
        } else if matches_choice(reply, "cancel schedule") {
            "Your schedule has been canceled"
        } else {
            "OK, your schedule stays as it is."
        };
        Ok(turn.end_with(OutgoingMessage::text(text)))
    })
}

fn ask_date_from(turn: &mut TurnContext, _args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { Ok(turn.prompt(OutgoingMessage::text("Date From?"))) })
}

fn ask_date_to(turn: &mut TurnContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move {
        turn.set_data(DATE_FROM_KEY, args.response_text())?;
        Ok(turn.prompt(OutgoingMessage::text("Date To?")))
    })
}

fn confirm_leave(turn: &mut TurnContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move {
        turn.set_data(DATE_TO_KEY, args.response_text())?;

        let date_from = turn.get_string(DATE_FROM_KEY).unwrap_or_default();
        let date_to = turn.get_string(DATE_TO_KEY).unwrap_or_default();
        let card = leave_request_card(&date_from, &date_to);
        Ok(turn.prompt(OutgoingMessage::carousel(vec![card])))
    })
}

fn submit_leave(turn: &mut TurnContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move {
        let text = if matches_choice(args.response_text(), "accept") {
            "Your leave request has been sent to your manager!"
        } else {
            "Request canceled"
        };
        Ok(turn.end_with(OutgoingMessage::text(text)))
    })
}

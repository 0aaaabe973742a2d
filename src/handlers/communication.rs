//! Colleague lookup and meeting scheduling dialogs

use crate::dialogs::{StepArgs, StepFuture, StepOutcome, TurnContext, Waterfall};
use crate::models::OutgoingMessage;
use crate::utils::helpers::matches_choice;
use super::attachments::{contact_card, meeting_time_card, room_card};
use super::labels;

pub fn check_im_status_dialog() -> Waterfall {
    Waterfall::new()
        .step(show_contact)
        .step(choose_action)
        .step(finish_after_action)
}

pub fn schedule_meeting_dialog() -> Waterfall {
    Waterfall::new()
        .step(ask_meeting_time)
        .step(offer_room)
        .step(confirm_reservation)
}

pub fn check_availability_dialog() -> Waterfall {
    Waterfall::new().step(show_availability)
}

fn show_contact(turn: &mut TurnContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move {
        let (name, surname) = match &args.intent {
            Some(intent) => (intent.entity_or_empty("UserName"), intent.entity_or_empty("surname")),
            None => (String::new(), String::new()),
        };
        let card = contact_card(&name, &surname);
        Ok(turn.prompt(OutgoingMessage::carousel(vec![card])))
    })
}

fn choose_action(turn: &mut TurnContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move {
        let reply = args.response_text();
        if matches_choice(reply, "schedulemeeting") {
            Ok(StepOutcome::BeginDialog(labels::SCHEDULE_MEETING.to_string()))
        } else if matches_choice(reply, "checkavailability") {
            Ok(StepOutcome::BeginDialog(labels::CHECK_AVAILABILITY.to_string()))
        } else {
            Ok(turn.end_with(OutgoingMessage::text("OK, let me know if you need anything else.")))
        }
    })
}

fn finish_after_action(_turn: &mut TurnContext, _args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { Ok(StepOutcome::End) })
}

fn ask_meeting_time(turn: &mut TurnContext, _args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { Ok(turn.prompt(OutgoingMessage::carousel(vec![meeting_time_card()]))) })
}

fn offer_room(turn: &mut TurnContext, _args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { Ok(turn.prompt(OutgoingMessage::carousel(vec![room_card()]))) })
}

fn confirm_reservation(turn: &mut TurnContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move {
        let text = if matches_choice(args.response_text(), "reserve") {
            "Your reservation request has been saved!"
        } else {
            "Request canceled"
        };
        Ok(turn.end_with(OutgoingMessage::text(text)))
    })
}

fn show_availability(turn: &mut TurnContext, _args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { Ok(turn.end_with(OutgoingMessage::text("Current status: On leave till 02.02.2018"))) })
}

//! Hotel search and review dialogs

use tracing::info;
use crate::dialogs::{StepArgs, StepFuture, StepOutcome, TurnContext, Waterfall};
use crate::models::OutgoingMessage;
use crate::utils::logging::log_collaborator_failure;
use super::attachments::{hotel_card, review_card};

pub const REVIEWS_UNAVAILABLE: &str = "Sorry, I couldn't look up reviews right now. Please try again later.";
pub const HOTELS_UNAVAILABLE: &str = "Sorry, I couldn't search for hotels right now. Please try again later.";

pub fn show_hotels_reviews_dialog() -> Waterfall {
    Waterfall::new().step(show_reviews)
}

pub fn search_hotels_dialog() -> Waterfall {
    Waterfall::new()
        .step(resolve_destination)
        .step(search_hotels)
}

fn show_reviews(turn: &mut TurnContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move {
        let hotel = args.intent.as_ref()
            .and_then(|intent| intent.find_entity("Hotel"))
            .map(|entity| entity.entity.trim().to_string())
            .filter(|name| !name.is_empty());

        let Some(hotel) = hotel else {
            return Ok(turn.end_with(OutgoingMessage::text("Which hotel would you like to see reviews for?")));
        };

        turn.send_text(format!("Looking for reviews of '{}'...", hotel));

        let store = turn.services().hotel_store.clone();
        let reply = match store.search_hotel_reviews(&hotel).await {
            Ok(reviews) if reviews.is_empty() => {
                OutgoingMessage::text(format!("Sorry, I couldn't find any reviews for '{}'.", hotel))
            }
            Ok(reviews) => {
                info!(hotel = %hotel, count = reviews.len(), "Found hotel reviews");
                OutgoingMessage::carousel(reviews.iter().map(review_card).collect())
            }
            Err(e) => {
                log_collaborator_failure("hotel_store", &e.to_string(), "apology");
                OutgoingMessage::text(REVIEWS_UNAVAILABLE)
            }
        };

        Ok(turn.end_with(reply))
    })
}

fn resolve_destination(turn: &mut TurnContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move {
        let destination = args.intent.as_ref().and_then(|intent| {
            intent.find_entity("builtin.geography.city")
                .map(|city| city.entity.clone())
                .or_else(|| {
                    intent.find_entity("AirportCode")
                        .map(|code| format!("{} airport", code.entity.to_uppercase()))
                })
        });

        match destination {
            Some(destination) => Ok(StepOutcome::Next(Some(destination))),
            None => Ok(turn.prompt(OutgoingMessage::text("Please enter your destination"))),
        }
    })
}

fn search_hotels(turn: &mut TurnContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move {
        let destination = args.response_text().to_string();
        if destination.is_empty() {
            return Ok(turn.end_with(OutgoingMessage::text("Sorry, I need a destination to search for hotels.")));
        }

        turn.send_text(format!("Looking for hotels in {}...", destination));

        let store = turn.services().hotel_store.clone();
        let reply = match store.search_hotels(&destination).await {
            Ok(hotels) if hotels.is_empty() => {
                OutgoingMessage::text(format!("Sorry, I couldn't find any hotels in {}.", destination))
            }
            Ok(hotels) => {
                OutgoingMessage::carousel(hotels.iter().map(hotel_card).collect())
                    .with_text(format!("I found {} hotels:", hotels.len()))
            }
            Err(e) => {
                log_collaborator_failure("hotel_store", &e.to_string(), "apology");
                OutgoingMessage::text(HOTELS_UNAVAILABLE)
            }
        };

        Ok(turn.end_with(reply))
    })
}

//! Card formatting for dialog replies
//!
//! Pure functions turning domain records into card attachments.

use crate::models::{Attachment, Card, CardAction, DaysOffBalance, HolidaySchedule, Hotel, Review};

/// Base URL of the search page linked from hotel cards
pub const HOTEL_SEARCH_URL: &str = "https://www.bing.com/search?q=hotels+in+";

pub fn days_off_card(balance: &DaysOffBalance) -> Attachment {
    Card::new("Your days off balance")
        .subtitle(format!("Days used: {}", balance.used))
        .text(format!("Days left: {}", balance.left))
        .button(CardAction::im_back("request leave", "Request leave"))
        .into_hero()
}

pub fn holiday_schedule_card(schedule: &HolidaySchedule) -> Attachment {
    Card::new("Here you have your holiday schedule")
        .subtitle(format!("Duration: {} days", schedule.duration_days))
        .text(format!("From: {}\nTo:{}", schedule.from, schedule.to))
        .button(CardAction::im_back("change schedule", "Change schedule"))
        .button(CardAction::im_back("cancel schedule", "Cancel schedule"))
        .into_hero()
}

pub fn leave_request_card(date_from: &str, date_to: &str) -> Attachment {
    Card::new("Your leave request")
        .subtitle("Are you sure?")
        .text(format!("From {} to {}", date_from, date_to))
        .button(CardAction::im_back("accept", "Accept"))
        .button(CardAction::im_back("cancel", "Cancel"))
        .into_hero()
}

/// Card offering actions for a found colleague; missing names render empty
pub fn contact_card(name: &str, surname: &str) -> Attachment {
    Card::new(format!("I have found {} {}", name, surname))
        .text("With what action you want to proceed?")
        .button(CardAction::im_back("schedulemeeting", "Schedule meeting"))
        .button(CardAction::im_back("checkavailability", "Check Availability"))
        .into_hero()
}

pub fn meeting_time_card() -> Attachment {
    Card::new("When you want to meet?")
        .button(CardAction::im_back("reserve now", "Now"))
        .button(CardAction::im_back("reserve today", "Today"))
        .button(CardAction::im_back("reserve tommorow", "Tommorow"))
        .button(CardAction::im_back("reserve choose", "Choose date"))
        .into_hero()
}

pub fn room_card() -> Attachment {
    Card::new("I have found a room for you:")
        .subtitle("Available 10:30 - 11:30")
        .text("Based on your schedules I chose ROOM ILC4001 on floor 4")
        .button(CardAction::im_back("reserve", "Reserve"))
        .button(CardAction::im_back("cancel", "Cancel"))
        .into_hero()
}

pub fn hotel_card(hotel: &Hotel) -> Attachment {
    Card::new(hotel.name.clone())
        .subtitle(format!(
            "{} stars. {} reviews. From ${} per night.",
            hotel.rating, hotel.number_of_reviews, hotel.price_starting
        ))
        .image(hotel.image.clone())
        .button(CardAction::open_url("More details", hotel_search_url(&hotel.location)))
        .into_hero()
}

pub fn review_card(review: &Review) -> Attachment {
    Card::new(review.title.clone())
        .text(review.text.clone())
        .image(review.image.clone())
        .into_thumbnail()
}

/// Search page for hotels in `location`, url-encoded
pub fn hotel_search_url(location: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(location.as_bytes()).collect();
    format!("{}{}", HOTEL_SEARCH_URL, encoded)
}

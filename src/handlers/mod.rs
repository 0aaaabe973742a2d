//! Bot handlers module
//!
//! This module contains the registered dialogs and the inbound message
//! pipeline:
//! - Dialog waterfalls grouped by topic
//! - Card formatting helpers
//! - The message handler driving one turn

pub mod attachments;
pub mod communication;
pub mod days_off;
pub mod greeting;
pub mod hotels;
pub mod messages;

pub use messages::MessageHandler;

use crate::dialogs::DialogRouter;
use crate::utils::errors::Result;

/// Intent labels the dialogs are registered under
pub mod labels {
    pub const GREETING: &str = "Greeting";
    pub const HELP: &str = "Help";
    pub const CHECK_DAYS_OFF: &str = "CheckDaysOff";
    pub const HOLIDAYS_SCHEDULE: &str = "HolidaysSchedule";
    pub const REQUEST_LEAVE: &str = "RequestLeave";
    pub const CHECK_IM_STATUS: &str = "Communication.CheckIMStatus";
    pub const SCHEDULE_MEETING: &str = "scheduleMeeting";
    pub const CHECK_AVAILABILITY: &str = "checkAvailability";
    pub const SHOW_HOTELS_REVIEWS: &str = "ShowHotelsReviews";
    pub const SEARCH_HOTELS: &str = "SearchHotels";
}

/// Register every built-in dialog
pub fn register_default_dialogs(router: &mut DialogRouter) -> Result<()> {
    router.register(labels::GREETING, greeting::greeting_dialog())?;
    router.register(labels::HELP, greeting::help_dialog())?;
    router.register(labels::CHECK_DAYS_OFF, days_off::check_days_off_dialog())?;
    router.register(labels::HOLIDAYS_SCHEDULE, days_off::holidays_schedule_dialog())?;
    router.register(labels::REQUEST_LEAVE, days_off::request_leave_dialog())?;
    router.register(labels::CHECK_IM_STATUS, communication::check_im_status_dialog())?;
    router.register(labels::SCHEDULE_MEETING, communication::schedule_meeting_dialog())?;
    router.register(labels::CHECK_AVAILABILITY, communication::check_availability_dialog())?;
    router.register(labels::SHOW_HOTELS_REVIEWS, hotels::show_hotels_reviews_dialog())?;
    router.register(labels::SEARCH_HOTELS, hotels::search_hotels_dialog())?;
    Ok(())
}

//! Leave and holiday records shown in the days-off dialogs

use serde::{Deserialize, Serialize};

/// Leave balance shown by the days-off card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaysOffBalance {
    pub used: u32,
    pub left: u32,
}

/// Upcoming holiday booked for the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolidaySchedule {
    pub duration_days: u32,
    pub from: String,
    pub to: String,
}

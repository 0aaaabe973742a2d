//! Hotel and review records returned by the hotel store

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub name: String,
    pub location: String,
    pub rating: u8,
    pub number_of_reviews: u32,
    pub price_starting: u32,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub title: String,
    pub text: String,
    pub image: String,
}

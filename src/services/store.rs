//! Hotel and review store

use std::time::Duration;
use async_trait::async_trait;
use tracing::debug;
use crate::config::StoreConfig;
use crate::models::{Hotel, Review};
use crate::utils::errors::StoreResult;

/// Lookup of hotels and their reviews
#[async_trait]
pub trait HotelStore: Send + Sync {
    async fn search_hotels(&self, destination: &str) -> StoreResult<Vec<Hotel>>;

    async fn search_hotel_reviews(&self, hotel_name: &str) -> StoreResult<Vec<Review>>;
}

const REVIEW_TITLES: &[&str] = &["Best place ever", "Very nice", "Not too bad", "Great location", "Friendly staff"];

const REVIEW_TEXT: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. \
    Mauris odio magna, sodales vel ligula sit amet, vulputate vehicula velit.";

/// Store returning generated sample data after a simulated delay
#[derive(Debug, Clone)]
pub struct SampleHotelStore {
    latency: Duration,
    max_results: usize,
}

impl SampleHotelStore {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            latency: Duration::from_millis(config.latency_ms),
            max_results: config.max_results,
        }
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Stable per-query seed so repeated lookups return the same data
    fn seed(query: &str) -> usize {
        query.bytes().fold(7usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize))
    }

    fn review_title(seed: usize, index: usize) -> &'static str {
        REVIEW_TITLES[seed.wrapping_add(index) % REVIEW_TITLES.len()]
    }
}

#[async_trait]
impl HotelStore for SampleHotelStore {
    async fn search_hotels(&self, destination: &str) -> StoreResult<Vec<Hotel>> {
        self.simulate_latency().await;

        let destination = destination.trim();
        if destination.is_empty() {
            return Ok(Vec::new());
        }

        let seed = Self::seed(&destination.to_lowercase());
        let hotels: Vec<Hotel> = (0..self.max_results)
            .map(|i| {
                let n = seed.wrapping_add(i.wrapping_mul(17));
                Hotel {
                    name: format!("{} Hotel {}", destination, i + 1),
                    location: destination.to_string(),
                    rating: (n % 5 + 1) as u8,
                    number_of_reviews: (n % 5000 + 100) as u32,
                    price_starting: (n % 450 + 80) as u32,
                    image: format!("https://placeholdit.imgix.net/~text?txtsize=35&txt=Hotel+{}&w=500&h=260", i + 1),
                }
            })
            .collect();

        debug!(destination = destination, count = hotels.len(), "Sample hotel search");
        Ok(hotels)
    }

    async fn search_hotel_reviews(&self, hotel_name: &str) -> StoreResult<Vec<Review>> {
        self.simulate_latency().await;

        let hotel_name = hotel_name.trim();
        if hotel_name.is_empty() {
            return Ok(Vec::new());
        }

        let seed = Self::seed(&hotel_name.to_lowercase());
        let reviews: Vec<Review> = (0..self.max_results)
            .map(|i| {
                let title = Self::review_title(seed, i);
                Review {
                    title: title.to_string(),
                    text: REVIEW_TEXT.to_string(),
                    image: format!("https://upload.wikimedia.org/wikipedia/en/e/ee/Unknown-person.gif?review={}", i + 1),
                }
            })
            .collect();

        debug!(hotel = hotel_name, count = reviews.len(), "Sample review search");
        Ok(reviews)
    }
}

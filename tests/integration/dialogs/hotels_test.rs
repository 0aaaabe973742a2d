//! Hotel search and review flows

use std::sync::Arc;
use AliceBot::handlers::hotels::{HOTELS_UNAVAILABLE, REVIEWS_UNAVAILABLE};
use AliceBot::models::{ActionType, Attachment, AttachmentLayout};

use crate::helpers::{texts, StubStore, TestConfig, TestContext};

fn with_store(store: StubStore) -> TestContext {
    TestContext::new_with_config(TestConfig {
        hotel_store: Some(Arc::new(store)),
        ..TestConfig::default()
    })
}

#[tokio::test]
async fn test_reviews_carousel() {
    let ctx = TestContext::new();

    let replies = ctx.send("conv-reviews", "show me the reviews of the bot resort").await;
    assert_eq!(replies.len(), 2);
    assert_eq!(texts(&replies)[0], "Looking for reviews of 'the bot resort'...");

    let carousel = &replies[1];
    assert_eq!(carousel.attachment_layout, Some(AttachmentLayout::Carousel));
    assert_eq!(carousel.attachments.len(), ctx.settings.store.max_results);
    assert!(carousel.attachments.iter().all(|a| matches!(a, Attachment::Thumbnail(_))));
    assert!(ctx.session("conv-reviews").await.is_none());
}

#[tokio::test]
async fn test_reviews_without_hotel_entity_asks_for_one() {
    let ctx = TestContext::new();

    let replies = ctx.send("conv-reviews-missing", "show me hotel reviews").await;
    assert_eq!(texts(&replies), vec!["Which hotel would you like to see reviews for?"]);
    assert!(ctx.session("conv-reviews-missing").await.is_none());
}

#[tokio::test]
async fn test_reviews_empty_result() {
    let ctx = with_store(StubStore::Empty);

    let replies = ctx.send("conv-reviews-empty", "show me the reviews of the bot resort").await;
    assert_eq!(
        texts(&replies),
        vec![
            "Looking for reviews of 'the bot resort'...",
            "Sorry, I couldn't find any reviews for 'the bot resort'.",
        ]
    );
}

#[tokio::test]
async fn test_reviews_store_failure() {
    let ctx = with_store(StubStore::Failing);

    let replies = ctx.send("conv-reviews-fail", "show me the reviews of the bot resort").await;
    assert_eq!(texts(&replies).last().map(String::as_str), Some(REVIEWS_UNAVAILABLE));
    assert!(ctx.session("conv-reviews-fail").await.is_none());
}

#[tokio::test]
async fn test_search_hotels_by_city() {
    let ctx = TestContext::new();

    let replies = ctx.send("conv-hotels", "search hotels in Seattle").await;
    assert_eq!(texts(&replies)[0], "Looking for hotels in Seattle...");

    let carousel = &replies[1];
    assert_eq!(carousel.text.as_deref(), Some("I found 3 hotels:"));
    let card = carousel.attachments[0].card();
    assert_eq!(card.title, "Seattle Hotel 1");
    assert!(card.subtitle.ends_with("per night."));
    assert_eq!(card.buttons[0].action_type, ActionType::OpenUrl);
    assert_eq!(card.buttons[0].value, "https://www.bing.com/search?q=hotels+in+Seattle");
}

#[tokio::test]
async fn test_search_hotels_by_airport() {
    let ctx = TestContext::new();

    let replies = ctx.send("conv-hotels-airport", "search hotels near LAX airport").await;
    assert_eq!(texts(&replies)[0], "Looking for hotels in LAX airport...");
}

#[tokio::test]
async fn test_search_hotels_prompts_for_destination() {
    let ctx = TestContext::new();
    let conv = "conv-hotels-prompt";

    let replies = ctx.send(conv, "search hotels").await;
    assert_eq!(texts(&replies), vec!["Please enter your destination"]);
    assert_eq!(ctx.waiting_on(conv).await, Some(("SearchHotels".to_string(), 0)));

    let replies = ctx.send(conv, "Paris").await;
    assert_eq!(texts(&replies)[0], "Looking for hotels in Paris...");
    assert_eq!(replies[1].attachments.len(), 3);
    assert!(ctx.session(conv).await.is_none());
}

#[tokio::test]
async fn test_search_hotels_empty_and_failing() {
    let empty = with_store(StubStore::Empty);
    let replies = empty.send("conv-hotels-empty", "search hotels in Seattle").await;
    assert_eq!(texts(&replies)[1], "Sorry, I couldn't find any hotels in Seattle.");

    let failing = with_store(StubStore::Failing);
    let replies = failing.send("conv-hotels-fail", "search hotels in Seattle").await;
    assert_eq!(texts(&replies)[1], HOTELS_UNAVAILABLE);
}

//! Days off, holiday schedule and leave request flows

use AliceBot::models::{ActionType, AttachmentLayout};

use crate::helpers::{first_card, texts, TestContext};

#[tokio::test]
async fn test_check_days_off_card() {
    let ctx = TestContext::new();

    let replies = ctx.send("conv-balance", "How many free days do I have?").await;
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].attachment_layout, Some(AttachmentLayout::Carousel));

    let card = first_card(&replies).unwrap();
    assert_eq!(card.title, "Your days off balance");
    assert_eq!(card.subtitle, "Days used: 10");
    assert_eq!(card.text, "Days left: 16");
    assert_eq!(card.buttons[0].action_type, ActionType::ImBack);
    assert_eq!(card.buttons[0].value, "request leave");
    assert_eq!(card.buttons[0].title, "Request leave");

    assert!(ctx.session("conv-balance").await.is_none());
}

#[tokio::test]
async fn test_days_off_button_starts_leave_request() {
    let ctx = TestContext::new();

    ctx.send("conv-balance-leave", "How many free days do I have?").await;
    let replies = ctx.send("conv-balance-leave", "request leave").await;

    assert_eq!(texts(&replies), vec!["Date From?"]);
}

#[tokio::test]
async fn test_holiday_schedule_change() {
    let ctx = TestContext::new();

    let replies = ctx.send("conv-holiday", "Show me my holidays schedule").await;
    let card = first_card(&replies).unwrap();
    assert_eq!(card.title, "Here you have your holiday schedule");
    assert_eq!(card.subtitle, "Duration: 10 days");
    assert_eq!(card.text, "From: 21.07.2018\nTo:28.07.2018");
    let values: Vec<&str> = card.buttons.iter().map(|b| b.value.as_str()).collect();
    assert_eq!(values, vec!["change schedule", "cancel schedule"]);
    assert_eq!(ctx.waiting_on("conv-holiday").await, Some(("HolidaysSchedule".to_string(), 0)));

    let replies = ctx.send("conv-holiday", "change schedule").await;
    assert_eq!(texts(&replies), vec!["To change your schedule please send an email to HR!"]);
    assert!(ctx.session("conv-holiday").await.is_none());
}

#[tokio::test]
async fn test_holiday_schedule_cancel_ignores_case() {
    let ctx = TestContext::new();

    ctx.send("conv-holiday-cancel", "show me my holidays schedule").await;
    let replies = ctx.send("conv-holiday-cancel", "  Cancel Schedule ").await;
    assert_eq!(texts(&replies), vec!["Your schedule has been canceled"]);
}

#[tokio::test]
async fn test_holiday_schedule_other_reply() {
    let ctx = TestContext::new();

    ctx.send("conv-holiday-other", "show me my holidays schedule").await;
    let replies = ctx.send("conv-holiday-other", "never mind").await;
    assert_eq!(texts(&replies), vec!["OK, your schedule stays as it is."]);
}

#[tokio::test]
async fn test_request_leave_accepted() {
    let ctx = TestContext::new();
    let conv = "conv-leave";

    assert_eq!(texts(&ctx.send(conv, "request leave").await), vec!["Date From?"]);
    assert_eq!(ctx.waiting_on(conv).await, Some(("RequestLeave".to_string(), 0)));

    assert_eq!(texts(&ctx.send(conv, "2018-08-01").await), vec!["Date To?"]);
    assert_eq!(ctx.waiting_on(conv).await, Some(("RequestLeave".to_string(), 1)));

    let replies = ctx.send(conv, "2018-08-05").await;
    let card = first_card(&replies).unwrap();
    assert_eq!(card.title, "Your leave request");
    assert_eq!(card.subtitle, "Are you sure?");
    assert_eq!(card.text, "From 2018-08-01 to 2018-08-05");
    let values: Vec<&str> = card.buttons.iter().map(|b| b.value.as_str()).collect();
    assert_eq!(values, vec!["accept", "cancel"]);

    let replies = ctx.send(conv, "accept").await;
    assert_eq!(texts(&replies), vec!["Your leave request has been sent to your manager!"]);
    assert!(ctx.session(conv).await.is_none());
}

#[tokio::test]
async fn test_request_leave_canceled() {
    let ctx = TestContext::new();
    let conv = "conv-leave-cancel";

    ctx.send(conv, "request leave").await;
    ctx.send(conv, "monday").await;
    ctx.send(conv, "friday").await;
    let replies = ctx.send(conv, "no thanks").await;

    assert_eq!(texts(&replies), vec!["Request canceled"]);
    assert!(ctx.session(conv).await.is_none());
}

#[tokio::test]
async fn test_request_leave_dates_are_stored_in_the_dialog_frame() {
    let ctx = TestContext::new();
    let conv = "conv-leave-frame";

    ctx.send(conv, "request leave").await;
    ctx.send(conv, "2018-09-10").await;

    let session = ctx.session(conv).await.unwrap();
    let frame = session.active_frame().unwrap();
    assert_eq!(frame.data.get("date_from"), Some(&serde_json::json!("2018-09-10")));
}

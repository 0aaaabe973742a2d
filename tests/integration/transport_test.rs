//! HTTP transport integration tests

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use AliceBot::server::{routes, AppState};

use crate::fixtures::{activity_without_conversation, conversation_update_activity, message_activity};
use crate::helpers::TestContext;

fn app(ctx: &TestContext) -> axum::Router {
    routes(AppState { handler: ctx.handler.clone() })
}

async fn post_activity(app: axum::Router, body: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/messages")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_message_round_trip() {
    let ctx = TestContext::new();

    let (status, body) = post_activity(app(&ctx), &message_activity("conv-http", "request leave")).await;
    assert_eq!(status, StatusCode::OK);

    let activities = body["activities"].as_array().unwrap();
    assert_eq!(activities.len(), 1);

    let reply = &activities[0];
    assert_eq!(reply["type"], "message");
    assert_eq!(reply["text"], "Date From?");
    assert_eq!(reply["replyToId"], "conv-http-in");
    assert_eq!(reply["conversation"]["id"], "conv-http");
    assert_eq!(reply["from"]["id"], "alice-bot");
    assert_eq!(reply["recipient"]["id"], "user-1");
    assert_eq!(reply["channelId"], "emulator");
    assert!(reply["id"].as_str().is_some());
}

#[tokio::test]
async fn test_card_reply_serialization() {
    let ctx = TestContext::new();

    let (_, body) = post_activity(app(&ctx), &message_activity("conv-http-card", "how many free days do I have?")).await;
    let reply = &body["activities"][0];

    assert_eq!(reply["attachmentLayout"], "carousel");
    let attachment = &reply["attachments"][0];
    assert_eq!(attachment["contentType"], "application/vnd.microsoft.card.hero");
    assert_eq!(attachment["content"]["title"], "Your days off balance");
    assert_eq!(attachment["content"]["buttons"][0]["type"], "imBack");
}

#[tokio::test]
async fn test_conversation_state_survives_between_requests() {
    let ctx = TestContext::new();

    post_activity(app(&ctx), &message_activity("conv-http-flow", "request leave")).await;
    let (_, body) = post_activity(app(&ctx), &message_activity("conv-http-flow", "tomorrow")).await;

    assert_eq!(body["activities"][0]["text"], "Date To?");
}

#[tokio::test]
async fn test_non_message_activity_gets_no_replies() {
    let ctx = TestContext::new();

    let (status, body) = post_activity(app(&ctx), &conversation_update_activity("conv-http-update")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["activities"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_missing_conversation_is_bad_request() {
    let ctx = TestContext::new();

    let (status, body) = post_activity(app(&ctx), &activity_without_conversation("hi")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("conversation"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let ctx = TestContext::new();

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app(&ctx).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["healthy"], true);
    assert_eq!(body["services"]["recognizer_configured"], true);
    assert_eq!(body["name"], "AliceBot");
}

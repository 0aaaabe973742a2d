//! Greeting, help and fallback replies

use AliceBot::handlers::greeting::{GREETING_TEXT, HELP_TEXT};

use crate::helpers::{texts, TestContext};

#[tokio::test]
async fn test_greeting() {
    let ctx = TestContext::new();

    let replies = ctx.send("conv-greet", "hi").await;
    assert_eq!(texts(&replies), vec![GREETING_TEXT]);
    assert!(ctx.session("conv-greet").await.is_none());
}

#[tokio::test]
async fn test_help() {
    let ctx = TestContext::new();

    let replies = ctx.send("conv-help", "help").await;
    assert_eq!(texts(&replies), vec![HELP_TEXT]);
}

#[tokio::test]
async fn test_unregistered_intent_gets_default_reply() {
    let ctx = TestContext::new();

    let replies = ctx.send("conv-fallback", "order a pizza").await;
    assert_eq!(
        texts(&replies),
        vec!["Sorry, I did not understand 'order a pizza'. Type 'help' if you need assistance."]
    );
    assert!(ctx.session("conv-fallback").await.is_none());
}

#[tokio::test]
async fn test_none_intent_gets_default_reply() {
    let ctx = TestContext::new();

    let replies = ctx.send("conv-none", "blah").await;
    assert_eq!(
        texts(&replies),
        vec!["Sorry, I did not understand 'blah'. Type 'help' if you need assistance."]
    );
}

//! Dialog router integration tests
//!
//! Drives hand-built waterfalls through the router to check turn-taking,
//! nesting and failure handling.

use std::sync::Arc;
use assert_matches::assert_matches;

use AliceBot::dialogs::{
    DialogRouter, StepArgs, StepFuture, StepOutcome, TurnContext, Waterfall, STEP_FAILURE_MESSAGE,
};
use AliceBot::models::{IncomingMessage, OutgoingMessage, RecognizedIntent};
use AliceBot::services::ServiceFactory;
use AliceBot::state::{ConversationContext, DialogState};
use AliceBot::AliceBotError;

use crate::helpers::{init_test_logging, texts, StubStore};

fn ask_name(turn: &mut TurnContext, _args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { Ok(turn.prompt(OutgoingMessage::text("Name?"))) })
}

fn greet_by_name(turn: &mut TurnContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move {
        turn.send_text(format!("Hello {}", args.response_text()));
        Ok(StepOutcome::End)
    })
}

fn skip_prompt(_turn: &mut TurnContext, _args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { Ok(StepOutcome::Next(Some("auto".to_string()))) })
}

fn explode(_turn: &mut TurnContext, _args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move {
        Err(AliceBotError::StepFailed {
            dialog: "broken".to_string(),
            step: 0,
            reason: "backend exploded".to_string(),
        })
    })
}

fn begin_child(turn: &mut TurnContext, _args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move {
        turn.set_data("owner", "parent")?;
        Ok(StepOutcome::BeginDialog("child".to_string()))
    })
}

fn parent_resumed(turn: &mut TurnContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move {
        let owner = turn.get_string("owner").unwrap_or_default();
        turn.send_text(format!(
            "parent resumed after {} with {} data",
            args.child_completed.as_deref().unwrap_or("nothing"),
            owner
        ));
        Ok(StepOutcome::End)
    })
}

fn child_step(turn: &mut TurnContext, _args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move {
        turn.set_data("owner", "child")?;
        turn.send_text("child ran");
        Ok(StepOutcome::End)
    })
}

fn begin_self(_turn: &mut TurnContext, _args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { Ok(StepOutcome::BeginDialog("loop".to_string())) })
}

fn begin_missing(_turn: &mut TurnContext, _args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { Ok(StepOutcome::BeginDialog("missing".to_string())) })
}

fn test_router() -> DialogRouter {
    init_test_logging();
    let services = Arc::new(ServiceFactory::from_parts(None, None, Arc::new(StubStore::Empty)));
    DialogRouter::new(services)
}

fn intent(label: &str) -> Option<RecognizedIntent> {
    Some(RecognizedIntent::new(label, 0.9))
}

fn message(text: &str) -> IncomingMessage {
    IncomingMessage::new("conv-router", text)
}

#[test]
fn test_duplicate_registration_fails() {
    let mut router = test_router();
    router.register("greet", Waterfall::new().step(ask_name)).unwrap();

    let result = router.register("greet", Waterfall::new().step(greet_by_name));
    assert_matches!(result, Err(AliceBotError::DuplicateDialog { label }) if label == "greet");
}

#[test]
fn test_empty_waterfall_is_rejected() {
    let mut router = test_router();
    let result = router.register("empty", Waterfall::new());
    assert_matches!(result, Err(AliceBotError::InvalidDialog { .. }));
    assert!(!router.is_registered("empty"));
}

#[tokio::test]
async fn test_unregistered_intent_uses_default_responder() {
    let router = test_router();
    let mut session = ConversationContext::new("conv-router");

    let output = router.dispatch(&mut session, intent("Unknown"), &message("order pizza")).await.unwrap();

    assert_eq!(
        texts(&output.replies),
        vec!["Sorry, I did not understand 'order pizza'. Type 'help' if you need assistance."]
    );
    assert_eq!(output.state, DialogState::Idle);
}

#[tokio::test]
async fn test_custom_default_responder() {
    let router = test_router()
        .with_default_responder(|m| OutgoingMessage::text(format!("echo: {}", m.text)));
    let mut session = ConversationContext::new("conv-router");

    let output = router.dispatch(&mut session, None, &message("anything")).await.unwrap();
    assert_eq!(texts(&output.replies), vec!["echo: anything"]);
}

#[tokio::test]
async fn test_resume_without_active_dialog_is_an_error() {
    let router = test_router();
    let mut session = ConversationContext::new("conv-router");

    let result = router.resume(&mut session, &message("hello?")).await;
    assert_matches!(result, Err(AliceBotError::NoActiveDialog { conversation_id }) if conversation_id == "conv-router");
}

#[tokio::test]
async fn test_prompt_suspends_until_next_message() {
    let mut router = test_router();
    router.register("greet", Waterfall::new().step(ask_name).step(greet_by_name)).unwrap();
    let mut session = ConversationContext::new("conv-router");

    let first = router.dispatch(&mut session, intent("greet"), &message("greet me")).await.unwrap();
    assert_eq!(texts(&first.replies), vec!["Name?"]);
    assert_eq!(first.state, DialogState::Running { dialog: "greet".to_string(), step: 0 });

    let second = router.resume(&mut session, &message("  Bob ")).await.unwrap();
    assert_eq!(texts(&second.replies), vec!["Hello Bob"]);
    assert!(second.state.is_idle());
    assert!(session.is_idle());
}

#[tokio::test]
async fn test_next_continues_in_the_same_turn() {
    let mut router = test_router();
    router.register("auto", Waterfall::new().step(skip_prompt).step(greet_by_name)).unwrap();
    let mut session = ConversationContext::new("conv-router");

    let output = router.dispatch(&mut session, intent("auto"), &message("go")).await.unwrap();
    assert_eq!(texts(&output.replies), vec!["Hello auto"]);
    assert!(output.state.is_idle());
}

#[tokio::test]
async fn test_child_dialog_returns_to_parent_with_own_data() {
    let mut router = test_router();
    router.register("parent", Waterfall::new().step(begin_child).step(parent_resumed)).unwrap();
    router.register("child", Waterfall::new().step(child_step)).unwrap();
    let mut session = ConversationContext::new("conv-router");

    let output = router.dispatch(&mut session, intent("parent"), &message("start")).await.unwrap();
    assert_eq!(
        texts(&output.replies),
        vec!["child ran", "parent resumed after child with parent data"]
    );
    assert!(session.is_idle());
}

#[tokio::test]
async fn test_prompting_child_suspends_the_parent() {
    let mut router = test_router();
    router.register("parent", Waterfall::new().step(begin_child).step(parent_resumed)).unwrap();
    router.register("child", Waterfall::new().step(ask_name).step(greet_by_name)).unwrap();
    let mut session = ConversationContext::new("conv-router");

    let first = router.dispatch(&mut session, intent("parent"), &message("start")).await.unwrap();
    assert_eq!(texts(&first.replies), vec!["Name?"]);
    assert_eq!(first.state, DialogState::Running { dialog: "child".to_string(), step: 0 });
    assert_eq!(session.depth(), 2);

    let second = router.resume(&mut session, &message("Ann")).await.unwrap();
    assert_eq!(
        texts(&second.replies),
        vec!["Hello Ann", "parent resumed after child with parent data"]
    );
    assert!(second.state.is_idle());
}

#[tokio::test]
async fn test_step_error_resets_with_apology() {
    let mut router = test_router();
    router.register("broken", Waterfall::new().step(explode).step(greet_by_name)).unwrap();
    let mut session = ConversationContext::new("conv-router");

    let output = router.dispatch(&mut session, intent("broken"), &message("break")).await.unwrap();
    assert_eq!(texts(&output.replies), vec![STEP_FAILURE_MESSAGE]);
    assert!(output.state.is_idle());
    assert!(session.is_idle());
}

#[tokio::test]
async fn test_beginning_unknown_child_fails() {
    let mut router = test_router();
    router.register("orphan", Waterfall::new().step(begin_missing)).unwrap();
    let mut session = ConversationContext::new("conv-router");

    let result = router.dispatch(&mut session, intent("orphan"), &message("go")).await;
    assert_matches!(result, Err(AliceBotError::UnknownDialog { label }) if label == "missing");
    assert!(session.is_idle());
}

#[tokio::test]
async fn test_dialog_cannot_begin_itself() {
    let mut router = test_router();
    router.register("loop", Waterfall::new().step(begin_self)).unwrap();
    let mut session = ConversationContext::new("conv-router");

    let result = router.dispatch(&mut session, intent("loop"), &message("go")).await;
    assert_matches!(result, Err(AliceBotError::DialogCycle { .. }));
    assert!(session.is_idle());
}

#[tokio::test]
async fn test_reply_after_last_step_completes_silently() {
    let mut router = test_router();
    router.register("single", Waterfall::new().step(ask_name)).unwrap();
    let mut session = ConversationContext::new("conv-router");

    router.dispatch(&mut session, intent("single"), &message("go")).await.unwrap();
    let output = router.resume(&mut session, &message("Zed")).await.unwrap();

    assert!(output.is_unhandled());
    assert!(session.is_idle());
}

#[tokio::test]
async fn test_dispatch_replaces_running_dialog() {
    let mut router = test_router();
    router.register("greet", Waterfall::new().step(ask_name).step(greet_by_name)).unwrap();
    router.register("auto", Waterfall::new().step(skip_prompt).step(greet_by_name)).unwrap();
    let mut session = ConversationContext::new("conv-router");

    router.dispatch(&mut session, intent("greet"), &message("greet")).await.unwrap();
    let output = router.dispatch(&mut session, intent("auto"), &message("auto")).await.unwrap();

    assert_eq!(texts(&output.replies), vec!["Hello auto"]);
    assert_eq!(session.depth(), 0);
}

#[tokio::test]
async fn test_cancel_all_clears_stack() {
    let mut router = test_router();
    router.register("greet", Waterfall::new().step(ask_name).step(greet_by_name)).unwrap();
    let mut session = ConversationContext::new("conv-router");

    router.dispatch(&mut session, intent("greet"), &message("greet")).await.unwrap();
    assert!(!session.is_idle());

    router.cancel_all(&mut session);
    assert!(session.is_idle());
    assert_eq!(router.labels(), vec!["greet"]);
}

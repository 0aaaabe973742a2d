//! HTTP transport
//!
//! Webhook endpoint receiving channel activities and a health check.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::handlers::MessageHandler;
use crate::models::{Activity, ActivityBatch};

/// Shared state for the transport routes
#[derive(Clone)]
pub struct AppState {
    pub handler: MessageHandler,
}

/// POST /api/messages
///
/// Runs one turn for a message activity and returns the replies addressed
/// to the same conversation.
async fn post_messages(State(state): State<AppState>, Json(activity): Json<Activity>) -> Response {
    if !activity.is_message() {
        debug!(activity_type = %activity.activity_type, "Ignoring non-message activity");
        return Json(ActivityBatch::default()).into_response();
    }

    let incoming = match activity.to_incoming() {
        Ok(incoming) => incoming,
        Err(e) => {
            warn!(error = %e, "Rejecting malformed activity");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response();
        }
    };

    let replies = state.handler.handle_message(incoming).await;
    let batch = ActivityBatch {
        activities: replies.iter().map(|reply| activity.reply(reply)).collect(),
    };
    Json(batch).into_response()
}

/// GET /health
async fn get_health(State(state): State<AppState>) -> impl IntoResponse {
    let services = state.handler.router().services().health_check();
    let status = if services.is_healthy() { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };

    (
        status,
        Json(json!({
            "name": crate::NAME,
            "version": crate::VERSION,
            "healthy": services.is_healthy(),
            "services": services,
            "issues": services.get_issues(),
        })),
    )
}

/// Build the transport routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/messages", post(post_messages))
        .route("/health", get(get_health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

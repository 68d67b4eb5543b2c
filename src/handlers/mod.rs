//! HTTP surface: JSON request/response wrappers around the scheduler.

pub mod review;
pub mod session;
pub mod words;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::srs::SchedulerError;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/review", post(review::submit_review))
    .route("/due-count", get(session::due_count))
    .route("/session-plan", get(session::session_plan))
    .route("/words", get(words::list_words).post(words::add_word))
    .route("/words/{id}", get(words::get_word))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

impl IntoResponse for SchedulerError {
  fn into_response(self) -> Response {
    let status = match &self {
      SchedulerError::Validation(_) => StatusCode::BAD_REQUEST,
      SchedulerError::NotFound { .. } => StatusCode::NOT_FOUND,
      SchedulerError::Conflict => StatusCode::CONFLICT,
      SchedulerError::RepositoryTimeout => StatusCode::SERVICE_UNAVAILABLE,
      SchedulerError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
      tracing::error!("request failed: {}", self);
    }

    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}

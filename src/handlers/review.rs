//! Review submission endpoint.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use crate::domain::ReviewOutcome;
use crate::srs::{NextReviewInfo, SchedulerError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
  pub user_id: i64,
  pub word_id: i64,
  /// 0-5 quality grade; grades below 3 count as a lapse.
  pub quality: i64,
}

pub async fn submit_review(
  State(state): State<AppState>,
  Json(req): Json<ReviewRequest>,
) -> Result<Json<NextReviewInfo>, SchedulerError> {
  let outcome = ReviewOutcome::from_quality(req.quality).ok_or_else(|| {
    SchedulerError::Validation(format!("quality grade {} is out of range 0-5", req.quality))
  })?;

  let info = state
    .scheduler
    .record_review(req.user_id, req.word_id, outcome, Utc::now())?;

  tracing::debug!(
    user_id = req.user_id,
    word_id = req.word_id,
    outcome = outcome.as_str(),
    mastery = info.mastery_level,
    "review recorded"
  );

  Ok(Json(info))
}

//! Due-count badge and session-plan endpoints.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::srs::{SchedulerError, SessionPlan};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DueCountQuery {
  pub user_id: i64,
}

#[derive(Debug, Serialize)]
pub struct DueCountResponse {
  pub count: i64,
}

pub async fn due_count(
  State(state): State<AppState>,
  Query(query): Query<DueCountQuery>,
) -> Result<Json<DueCountResponse>, SchedulerError> {
  let count = state.scheduler.due_count(query.user_id, Utc::now())?;
  Ok(Json(DueCountResponse { count }))
}

#[derive(Debug, Deserialize)]
pub struct SessionPlanQuery {
  pub user_id: i64,
  pub daily_goal: Option<i64>,
}

pub async fn session_plan(
  State(state): State<AppState>,
  Query(query): Query<SessionPlanQuery>,
) -> Result<Json<SessionPlan>, SchedulerError> {
  let daily_goal = query.daily_goal.unwrap_or(config::DEFAULT_DAILY_GOAL);
  let plan = state
    .scheduler
    .plan_session(query.user_id, daily_goal, Utc::now())?;
  Ok(Json(plan))
}

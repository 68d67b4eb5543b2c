//! Word catalog management.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::db::{self, words};
use crate::domain::Word;
use crate::srs::SchedulerError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddWordRequest {
  pub term: String,
  pub translation: String,
  pub note: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AddWordResponse {
  pub id: i64,
}

pub async fn add_word(
  State(state): State<AppState>,
  Json(req): Json<AddWordRequest>,
) -> Result<Json<AddWordResponse>, SchedulerError> {
  let term = req.term.trim();
  let translation = req.translation.trim();
  if term.is_empty() || translation.is_empty() {
    return Err(SchedulerError::Validation(
      "term and translation must not be blank".to_string(),
    ));
  }

  let conn = db::try_lock(&state.pool).map_err(|e| SchedulerError::Repository(e.to_string()))?;
  let word = Word::new(term.to_string(), translation.to_string(), req.note);
  let id = words::insert_word(&conn, &word)
    .map_err(|e| SchedulerError::Repository(e.to_string()))?;

  tracing::info!(id, term, "word added to catalog");
  Ok(Json(AddWordResponse { id }))
}

pub async fn get_word(
  State(state): State<AppState>,
  Path(word_id): Path<i64>,
) -> Result<Json<Word>, SchedulerError> {
  let conn = db::try_lock(&state.pool).map_err(|e| SchedulerError::Repository(e.to_string()))?;
  let word = words::get_word_by_id(&conn, word_id)
    .map_err(|e| SchedulerError::Repository(e.to_string()))?
    .ok_or(SchedulerError::NotFound { word_id })?;
  Ok(Json(word))
}

pub async fn list_words(
  State(state): State<AppState>,
) -> Result<Json<Vec<Word>>, SchedulerError> {
  let conn = db::try_lock(&state.pool).map_err(|e| SchedulerError::Repository(e.to_string()))?;
  let all = words::list_words(&conn, config::DEFAULT_WORD_LIMIT)
    .map_err(|e| SchedulerError::Repository(e.to_string()))?;
  Ok(Json(all))
}

//! Scheduling-state queries with optimistic concurrency.
//!
//! Every row carries a version; updates only apply when the stored
//! version still matches the one the caller loaded, so a lost read-
//! modify-write race surfaces as zero affected rows instead of a
//! silent overwrite.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result};

use crate::domain::{Versioned, WordSchedulingState};

const STATE_COLUMNS: &str = "user_id, word_id, ease_factor, interval_days, repetitions, \
   mastery_level, next_review_at, last_reviewed_at, total_reviews, total_correct, version";

pub fn get_state(
  conn: &Connection,
  user_id: i64,
  word_id: i64,
) -> Result<Option<Versioned<WordSchedulingState>>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {} FROM word_schedule WHERE user_id = ?1 AND word_id = ?2",
    STATE_COLUMNS
  ))?;

  let mut rows = stmt.query(params![user_id, word_id])?;
  if let Some(row) = rows.next()? {
    Ok(Some(row_to_state(row)?))
  } else {
    Ok(None)
  }
}

/// Insert a fresh state row at version 1. Fails if the row exists.
pub fn insert_state(conn: &Connection, state: &WordSchedulingState) -> Result<i64> {
  conn.execute(
    r#"
    INSERT INTO word_schedule (user_id, word_id, ease_factor, interval_days, repetitions,
                               mastery_level, next_review_at, last_reviewed_at,
                               total_reviews, total_correct, version)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, 1)
    "#,
    params![
      state.user_id,
      state.word_id,
      state.ease_factor,
      state.interval_days,
      state.repetitions,
      state.mastery_level,
      state.next_review_at.to_rfc3339(),
      state.last_reviewed_at.map(|dt| dt.to_rfc3339()),
      state.total_reviews,
      state.total_correct,
    ],
  )?;
  Ok(1)
}

/// Conditional update: applies only if the stored version still equals
/// `expected_version`. Returns the new version, or None when the row
/// moved on (or disappeared) underneath the caller.
pub fn update_state_if_version(
  conn: &Connection,
  state: &WordSchedulingState,
  expected_version: i64,
) -> Result<Option<i64>> {
  let updated = conn.execute(
    r#"
    UPDATE word_schedule
    SET ease_factor = ?1, interval_days = ?2, repetitions = ?3, mastery_level = ?4,
        next_review_at = ?5, last_reviewed_at = ?6,
        total_reviews = ?7, total_correct = ?8,
        version = version + 1
    WHERE user_id = ?9 AND word_id = ?10 AND version = ?11
    "#,
    params![
      state.ease_factor,
      state.interval_days,
      state.repetitions,
      state.mastery_level,
      state.next_review_at.to_rfc3339(),
      state.last_reviewed_at.map(|dt| dt.to_rfc3339()),
      state.total_reviews,
      state.total_correct,
      state.user_id,
      state.word_id,
      expected_version,
    ],
  )?;

  if updated == 1 {
    Ok(Some(expected_version + 1))
  } else {
    Ok(None)
  }
}

pub fn list_states(conn: &Connection, user_id: i64) -> Result<Vec<WordSchedulingState>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {} FROM word_schedule WHERE user_id = ?1 ORDER BY word_id ASC",
    STATE_COLUMNS
  ))?;

  let states = stmt
    .query_map(params![user_id], |row| row_to_state(row).map(|v| v.value))?
    .collect::<Result<Vec<_>>>()?;
  Ok(states)
}

pub fn get_due_count(conn: &Connection, user_id: i64, now: DateTime<Utc>) -> Result<i64> {
  conn.query_row(
    "SELECT COUNT(*) FROM word_schedule WHERE user_id = ?1 AND next_review_at <= ?2",
    params![user_id, now.to_rfc3339()],
    |row| row.get(0),
  )
}

fn row_to_state(row: &rusqlite::Row) -> Result<Versioned<WordSchedulingState>> {
  let next_review_str: String = row.get(6)?;
  let last_reviewed_str: Option<String> = row.get(7)?;

  let value = WordSchedulingState {
    user_id: row.get(0)?,
    word_id: row.get(1)?,
    ease_factor: row.get(2)?,
    interval_days: row.get(3)?,
    repetitions: row.get(4)?,
    mastery_level: row.get(5)?,
    next_review_at: parse_timestamp(&next_review_str),
    last_reviewed_at: last_reviewed_str.as_deref().map(parse_timestamp),
    total_reviews: row.get(8)?,
    total_correct: row.get(9)?,
  };

  Ok(Versioned {
    version: row.get(10)?,
    value,
  })
}

fn parse_timestamp(s: &str) -> DateTime<Utc> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .unwrap_or_else(|_| Utc::now())
}

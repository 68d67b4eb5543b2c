//! SQLite-backed implementation of the scheduler's repository trait.

use chrono::{DateTime, Utc};
use rusqlite::ErrorCode;

use crate::db::{self, schedule, words, DbPool};
use crate::domain::{Versioned, WordSchedulingState};
use crate::srs::{RepositoryError, SchedulingRepository};

#[derive(Clone)]
pub struct SqliteRepository {
  pool: DbPool,
}

impl SqliteRepository {
  pub fn new(pool: DbPool) -> Self {
    Self { pool }
  }

  fn lock(&self) -> Result<std::sync::MutexGuard<'_, rusqlite::Connection>, RepositoryError> {
    db::try_lock(&self.pool).map_err(|e| RepositoryError::Backend(e.to_string()))
  }
}

/// SQLITE_BUSY means the busy_timeout on the connection elapsed; that
/// surfaces as a timeout rather than a generic backend failure so the
/// caller can apply its own backoff policy.
fn map_sqlite_error(err: rusqlite::Error) -> RepositoryError {
  match &err {
    rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::DatabaseBusy => {
      RepositoryError::Timeout
    }
    _ => RepositoryError::Backend(err.to_string()),
  }
}

impl SchedulingRepository for SqliteRepository {
  fn load_state(
    &self,
    user_id: i64,
    word_id: i64,
  ) -> Result<Option<Versioned<WordSchedulingState>>, RepositoryError> {
    let conn = self.lock()?;
    schedule::get_state(&conn, user_id, word_id).map_err(map_sqlite_error)
  }

  fn save_state(
    &self,
    previous_version: Option<i64>,
    state: &WordSchedulingState,
  ) -> Result<i64, RepositoryError> {
    let conn = self.lock()?;
    match previous_version {
      None => match schedule::insert_state(&conn, state) {
        Ok(version) => Ok(version),
        // Primary-key violation: someone created the row first
        Err(rusqlite::Error::SqliteFailure(e, _))
          if e.code == ErrorCode::ConstraintViolation =>
        {
          Err(RepositoryError::Conflict)
        }
        Err(e) => Err(map_sqlite_error(e)),
      },
      Some(expected) => schedule::update_state_if_version(&conn, state, expected)
        .map_err(map_sqlite_error)?
        .ok_or(RepositoryError::Conflict),
    }
  }

  fn list_states(&self, user_id: i64) -> Result<Vec<WordSchedulingState>, RepositoryError> {
    let conn = self.lock()?;
    schedule::list_states(&conn, user_id).map_err(map_sqlite_error)
  }

  fn list_unseen_words(
    &self,
    user_id: i64,
    limit: usize,
  ) -> Result<Vec<i64>, RepositoryError> {
    let conn = self.lock()?;
    words::list_unseen_words(&conn, user_id, limit).map_err(map_sqlite_error)
  }

  fn due_count(&self, user_id: i64, now: DateTime<Utc>) -> Result<i64, RepositoryError> {
    let conn = self.lock()?;
    schedule::get_due_count(&conn, user_id, now).map_err(map_sqlite_error)
  }

  fn word_exists(&self, word_id: i64) -> Result<bool, RepositoryError> {
    let conn = self.lock()?;
    words::word_exists(&conn, word_id).map_err(map_sqlite_error)
  }
}

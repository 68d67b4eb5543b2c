//! Scheduler service: the facade the HTTP layer talks to.
//!
//! Owns all mutation of scheduling state. Loads through the repository,
//! applies the interval model, and writes back under optimistic
//! concurrency. A repository handle is injected at construction; the
//! service never reaches for ambient globals.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{ReviewOutcome, Versioned, WordSchedulingState};
use crate::srs::error::{RepositoryError, SchedulerError};
use crate::srs::{build_session, due_items, interval, SessionPlan};

/// Persistence boundary consumed by the service. Implemented by the
/// SQLite layer in production and by in-memory doubles in tests.
pub trait SchedulingRepository: Send + Sync {
  fn load_state(
    &self,
    user_id: i64,
    word_id: i64,
  ) -> Result<Option<Versioned<WordSchedulingState>>, RepositoryError>;

  /// Persist a state. `previous_version` of `None` means the row must
  /// not exist yet; otherwise the stored version must still match.
  /// Returns the new version token.
  fn save_state(
    &self,
    previous_version: Option<i64>,
    state: &WordSchedulingState,
  ) -> Result<i64, RepositoryError>;

  fn list_states(&self, user_id: i64) -> Result<Vec<WordSchedulingState>, RepositoryError>;

  /// Catalog words the user has no scheduling row for, ordered by word
  /// id, capped at `limit`.
  fn list_unseen_words(&self, user_id: i64, limit: usize)
    -> Result<Vec<i64>, RepositoryError>;

  fn due_count(&self, user_id: i64, now: DateTime<Utc>) -> Result<i64, RepositoryError>;

  fn word_exists(&self, word_id: i64) -> Result<bool, RepositoryError>;
}

/// What the UI needs back after a review.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NextReviewInfo {
  pub next_review_at: DateTime<Utc>,
  pub mastery_level: i64,
}

pub struct SchedulerService<R> {
  repo: R,
}

impl<R: SchedulingRepository> SchedulerService<R> {
  pub fn new(repo: R) -> Self {
    Self { repo }
  }

  /// Record one review outcome for a word.
  ///
  /// Creates a fresh new-item state on first exposure. A version
  /// conflict is retried exactly once with freshly loaded state; a
  /// second conflict surfaces to the caller.
  pub fn record_review(
    &self,
    user_id: i64,
    word_id: i64,
    outcome: ReviewOutcome,
    now: DateTime<Utc>,
  ) -> Result<NextReviewInfo, SchedulerError> {
    if !self.repo.word_exists(word_id)? {
      return Err(SchedulerError::NotFound { word_id });
    }

    match self.try_record(user_id, word_id, outcome, now) {
      Err(SchedulerError::Conflict) => {
        tracing::debug!(user_id, word_id, "review conflict, retrying once");
        self.try_record(user_id, word_id, outcome, now)
      }
      result => result,
    }
  }

  fn try_record(
    &self,
    user_id: i64,
    word_id: i64,
    outcome: ReviewOutcome,
    now: DateTime<Utc>,
  ) -> Result<NextReviewInfo, SchedulerError> {
    let (previous_version, state) = match self.repo.load_state(user_id, word_id)? {
      Some(versioned) => (Some(versioned.version), versioned.value),
      None => (None, WordSchedulingState::new(user_id, word_id, now)),
    };

    let mut next = interval::apply_review(&state, outcome, now);
    next.total_reviews += 1;
    if outcome.is_correct() {
      next.total_correct += 1;
    }

    self.repo.save_state(previous_version, &next)?;

    Ok(NextReviewInfo {
      next_review_at: next.next_review_at,
      mastery_level: next.mastery_level,
    })
  }

  /// Number of items due at `now`, for UI badges.
  pub fn due_count(&self, user_id: i64, now: DateTime<Utc>) -> Result<i64, SchedulerError> {
    Ok(self.repo.due_count(user_id, now)?)
  }

  /// Compose the review queue and session planner against the current
  /// repository snapshot.
  pub fn plan_session(
    &self,
    user_id: i64,
    daily_goal: i64,
    now: DateTime<Utc>,
  ) -> Result<SessionPlan, SchedulerError> {
    if daily_goal <= 0 {
      return Ok(SessionPlan::default());
    }

    let states = self.repo.list_states(user_id)?;
    let due = due_items(states, now, daily_goal as usize);
    let new_words = self.repo.list_unseen_words(user_id, daily_goal as usize)?;

    Ok(build_session(&due, new_words, daily_goal))
  }
}

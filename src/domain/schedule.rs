use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Scheduling state for one (user, word) pair.
///
/// Mutated exclusively by the scheduler service; the review queue and
/// session planner only read. Counters `total_reviews`/`total_correct`
/// feed success-rate reporting and never influence scheduling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordSchedulingState {
  pub user_id: i64,
  pub word_id: i64,
  /// Interval growth multiplier, clamped to [1.3, 3.0].
  pub ease_factor: f64,
  /// Days until the next review; 0 means new/unseen.
  pub interval_days: i64,
  /// Consecutive correct reviews since the last lapse.
  pub repetitions: i64,
  /// Coarse 0-5 bucket shown in the UI, derived from repetitions.
  pub mastery_level: i64,
  pub next_review_at: DateTime<Utc>,
  pub last_reviewed_at: Option<DateTime<Utc>>,
  pub total_reviews: i64,
  pub total_correct: i64,
}

impl WordSchedulingState {
  /// Fresh state for a word the user has never reviewed.
  pub fn new(user_id: i64, word_id: i64, now: DateTime<Utc>) -> Self {
    Self {
      user_id,
      word_id,
      ease_factor: 2.5,
      interval_days: 0,
      repetitions: 0,
      mastery_level: 0,
      next_review_at: now,
      last_reviewed_at: None,
      total_reviews: 0,
      total_correct: 0,
    }
  }

  pub fn is_due(&self, now: DateTime<Utc>) -> bool {
    self.next_review_at <= now
  }

  /// Fraction of reviews answered correctly, for reporting only.
  pub fn success_rate(&self) -> f64 {
    if self.total_reviews > 0 {
      self.total_correct as f64 / self.total_reviews as f64
    } else {
      0.0
    }
  }
}

/// A value paired with its optimistic-concurrency version token.
///
/// The repository bumps the token on every successful save; a save
/// presenting a stale token fails instead of overwriting.
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<T> {
  pub version: i64,
  pub value: T,
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Duration;

  #[test]
  fn test_new_state_defaults() {
    let now = Utc::now();
    let state = WordSchedulingState::new(1, 42, now);

    assert_eq!(state.user_id, 1);
    assert_eq!(state.word_id, 42);
    assert!((state.ease_factor - 2.5).abs() < f64::EPSILON);
    assert_eq!(state.interval_days, 0);
    assert_eq!(state.repetitions, 0);
    assert_eq!(state.mastery_level, 0);
    assert_eq!(state.next_review_at, now);
    assert!(state.last_reviewed_at.is_none());
    assert_eq!(state.total_reviews, 0);
    assert_eq!(state.total_correct, 0);
  }

  #[test]
  fn test_new_state_is_immediately_due() {
    let now = Utc::now();
    let state = WordSchedulingState::new(1, 42, now);
    assert!(state.is_due(now));
  }

  #[test]
  fn test_is_due_future_review() {
    let now = Utc::now();
    let mut state = WordSchedulingState::new(1, 42, now);
    state.next_review_at = now + Duration::days(3);
    assert!(!state.is_due(now));
    assert!(state.is_due(now + Duration::days(3)));
  }

  #[test]
  fn test_success_rate_no_reviews() {
    let state = WordSchedulingState::new(1, 42, Utc::now());
    assert!((state.success_rate() - 0.0).abs() < f64::EPSILON);
  }

  #[test]
  fn test_success_rate() {
    let mut state = WordSchedulingState::new(1, 42, Utc::now());
    state.total_reviews = 4;
    state.total_correct = 3;
    assert!((state.success_rate() - 0.75).abs() < f64::EPSILON);
  }
}

//! SM-2 style interval model.
//!
//! Pure state transition: a review outcome plus the current scheduling
//! state yields a new state. Persistence and the total/correct counters
//! are the scheduler service's responsibility.

use chrono::{DateTime, Duration, Utc};

use crate::domain::{ReviewOutcome, WordSchedulingState};

const MIN_EASE_FACTOR: f64 = 1.3;
const MAX_EASE_FACTOR: f64 = 3.0;

/// Ceiling on interval growth, ~100 years. Keeps the computed next
/// review inside chrono's representable date range no matter how long
/// a correct streak runs.
const MAX_INTERVAL_DAYS: i64 = 36_500;

/// Ease penalty applied on a lapse.
const LAPSE_EASE_DELTA: f64 = 0.2;

/// Ease reward applied on a correct review.
const CORRECT_EASE_DELTA: f64 = 0.1;

/// Apply one review to a scheduling state.
///
/// On a lapse the item drops back to a 1-day interval and loses ease;
/// on a correct review the interval follows the 1 -> 6 -> interval*ease
/// progression, with the growth using the ease factor as it was before
/// this review's reward.
pub fn apply_review(
  state: &WordSchedulingState,
  outcome: ReviewOutcome,
  now: DateTime<Utc>,
) -> WordSchedulingState {
  let mut next = state.clone();

  match outcome {
    ReviewOutcome::Incorrect => {
      next.repetitions = 0;
      next.interval_days = 1;
      next.ease_factor = (state.ease_factor - LAPSE_EASE_DELTA).max(MIN_EASE_FACTOR);
    }
    ReviewOutcome::Correct => {
      next.repetitions = state.repetitions + 1;
      next.interval_days = match next.repetitions {
        1 => 1,
        2 => 6,
        _ => (((state.interval_days as f64) * state.ease_factor).round() as i64)
          .min(MAX_INTERVAL_DAYS),
      };
      next.ease_factor = (state.ease_factor + CORRECT_EASE_DELTA).min(MAX_EASE_FACTOR);
    }
  }

  next.last_reviewed_at = Some(now);
  next.next_review_at = now + Duration::days(next.interval_days);
  next.mastery_level = mastery_level(next.repetitions, next.interval_days);
  next
}

/// Coarse 0-5 mastery bucket; derived, never stored independently.
pub fn mastery_level(repetitions: i64, interval_days: i64) -> i64 {
  if interval_days >= 1 {
    repetitions.min(5)
  } else {
    0
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Duration;

  fn new_state() -> WordSchedulingState {
    WordSchedulingState::new(1, 42, Utc::now())
  }

  #[test]
  fn test_first_correct_review() {
    let result = apply_review(&new_state(), ReviewOutcome::Correct, Utc::now());
    assert_eq!(result.repetitions, 1);
    assert_eq!(result.interval_days, 1);
    assert!((result.ease_factor - 2.6).abs() < 1e-9);
    assert_eq!(result.mastery_level, 1);
  }

  #[test]
  fn test_second_correct_review() {
    let now = Utc::now();
    let first = apply_review(&new_state(), ReviewOutcome::Correct, now);
    let second = apply_review(&first, ReviewOutcome::Correct, now + Duration::days(1));
    assert_eq!(second.repetitions, 2);
    assert_eq!(second.interval_days, 6);
    assert!((second.ease_factor - 2.7).abs() < 1e-9);
  }

  #[test]
  fn test_third_correct_review_uses_prior_ease() {
    let mut state = new_state();
    state.repetitions = 2;
    state.interval_days = 6;
    state.ease_factor = 2.7;

    let result = apply_review(&state, ReviewOutcome::Correct, Utc::now());
    assert_eq!(result.repetitions, 3);
    // 6 * 2.7 = 16.2 rounds to 16; growth uses the pre-reward ease
    assert_eq!(result.interval_days, 16);
    assert!((result.ease_factor - 2.8).abs() < 1e-9);
  }

  #[test]
  fn test_lapse_resets_progress() {
    let mut state = new_state();
    state.repetitions = 5;
    state.interval_days = 40;
    state.ease_factor = 2.7;

    let result = apply_review(&state, ReviewOutcome::Incorrect, Utc::now());
    assert_eq!(result.repetitions, 0);
    assert_eq!(result.interval_days, 1);
    assert!((result.ease_factor - 2.5).abs() < 1e-9);
    assert_eq!(result.mastery_level, 0);
  }

  #[test]
  fn test_lapse_reset_regardless_of_history() {
    for (reps, interval, ease) in [(0, 0, 2.5), (1, 1, 1.3), (10, 200, 3.0)] {
      let mut state = new_state();
      state.repetitions = reps;
      state.interval_days = interval;
      state.ease_factor = ease;

      let result = apply_review(&state, ReviewOutcome::Incorrect, Utc::now());
      assert_eq!(result.repetitions, 0);
      assert_eq!(result.interval_days, 1);
    }
  }

  #[test]
  fn test_ease_factor_floor() {
    let mut state = new_state();
    for _ in 0..20 {
      state = apply_review(&state, ReviewOutcome::Incorrect, Utc::now());
    }
    assert!((state.ease_factor - MIN_EASE_FACTOR).abs() < 1e-9);
  }

  #[test]
  fn test_ease_factor_cap() {
    let mut state = new_state();
    let mut now = Utc::now();
    for _ in 0..20 {
      state = apply_review(&state, ReviewOutcome::Correct, now);
      now += Duration::days(state.interval_days);
    }
    assert!(state.ease_factor <= MAX_EASE_FACTOR + 1e-9);
    assert!((state.ease_factor - MAX_EASE_FACTOR).abs() < 1e-9);
  }

  #[test]
  fn test_ease_stays_bounded_under_mixed_reviews() {
    let mut state = new_state();
    let outcomes = [
      ReviewOutcome::Correct,
      ReviewOutcome::Incorrect,
      ReviewOutcome::Correct,
      ReviewOutcome::Correct,
      ReviewOutcome::Incorrect,
      ReviewOutcome::Incorrect,
      ReviewOutcome::Correct,
    ];
    for _ in 0..10 {
      for outcome in outcomes {
        state = apply_review(&state, outcome, Utc::now());
        assert!(state.ease_factor >= MIN_EASE_FACTOR - 1e-9);
        assert!(state.ease_factor <= MAX_EASE_FACTOR + 1e-9);
      }
    }
  }

  #[test]
  fn test_interval_non_decreasing_on_correct_streak() {
    let mut state = new_state();
    let mut now = Utc::now();
    let mut prev_interval = 0;
    for _ in 0..10 {
      state = apply_review(&state, ReviewOutcome::Correct, now);
      assert!(state.interval_days >= prev_interval || state.repetitions <= 2);
      if state.repetitions > 2 {
        assert!(state.interval_days >= prev_interval);
      }
      prev_interval = state.interval_days;
      now += Duration::days(state.interval_days);
    }
    assert!(state.interval_days > 30);
  }

  #[test]
  fn test_long_correct_streak_caps_interval() {
    let mut state = new_state();
    let now = Utc::now();
    for _ in 0..60 {
      state = apply_review(&state, ReviewOutcome::Correct, now);
      assert!(state.interval_days <= MAX_INTERVAL_DAYS);
      assert_eq!(state.next_review_at, now + Duration::days(state.interval_days));
    }
    assert_eq!(state.interval_days, MAX_INTERVAL_DAYS);

    // A lapse still drops a capped item back to one day
    state = apply_review(&state, ReviewOutcome::Incorrect, now);
    assert_eq!(state.interval_days, 1);
  }

  #[test]
  fn test_next_review_derived_from_interval() {
    let now = Utc::now();
    let result = apply_review(&new_state(), ReviewOutcome::Correct, now);
    assert_eq!(result.last_reviewed_at, Some(now));
    assert_eq!(result.next_review_at, now + Duration::days(result.interval_days));
  }

  #[test]
  fn test_mastery_tracks_repetitions() {
    let mut state = new_state();
    let mut now = Utc::now();
    for expected in 1..=7 {
      state = apply_review(&state, ReviewOutcome::Correct, now);
      assert_eq!(state.mastery_level, expected.min(5));
      now += Duration::days(state.interval_days);
    }
  }

  #[test]
  fn test_mastery_level_unseen_item() {
    assert_eq!(mastery_level(0, 0), 0);
    assert_eq!(mastery_level(3, 0), 0);
  }

  #[test]
  fn test_counters_untouched() {
    let mut state = new_state();
    state.total_reviews = 7;
    state.total_correct = 4;
    let result = apply_review(&state, ReviewOutcome::Correct, Utc::now());
    assert_eq!(result.total_reviews, 7);
    assert_eq!(result.total_correct, 4);
  }

  #[test]
  fn test_worked_example() {
    // New word: ease 2.5, interval 0, repetitions 0.
    let now = Utc::now();
    let state = new_state();

    let r1 = apply_review(&state, ReviewOutcome::Correct, now);
    assert_eq!(r1.repetitions, 1);
    assert_eq!(r1.interval_days, 1);
    assert!((r1.ease_factor - 2.6).abs() < 1e-9);

    let r2 = apply_review(&r1, ReviewOutcome::Correct, now + Duration::days(1));
    assert_eq!(r2.repetitions, 2);
    assert_eq!(r2.interval_days, 6);
    assert!((r2.ease_factor - 2.7).abs() < 1e-9);

    let r3 = apply_review(&r2, ReviewOutcome::Incorrect, now + Duration::days(7));
    assert_eq!(r3.repetitions, 0);
    assert_eq!(r3.interval_days, 1);
    assert!((r3.ease_factor - 2.5).abs() < 1e-9);
  }
}

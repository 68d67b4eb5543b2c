//! Due-item ordering for review sessions.

use chrono::{DateTime, Utc};

use crate::domain::WordSchedulingState;

/// Items due at `now`, most overdue first.
///
/// Ties on `next_review_at` break by ascending word id so session
/// contents are reproducible. `limit` of 0 means unlimited.
pub fn due_items(
  states: Vec<WordSchedulingState>,
  now: DateTime<Utc>,
  limit: usize,
) -> Vec<WordSchedulingState> {
  let mut due: Vec<_> = states.into_iter().filter(|s| s.is_due(now)).collect();
  due.sort_by(|a, b| {
    a.next_review_at
      .cmp(&b.next_review_at)
      .then(a.word_id.cmp(&b.word_id))
  });
  if limit > 0 {
    due.truncate(limit);
  }
  due
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Duration;

  fn state_due_at(word_id: i64, next_review_at: DateTime<Utc>) -> WordSchedulingState {
    let mut state = WordSchedulingState::new(1, word_id, Utc::now());
    state.next_review_at = next_review_at;
    state
  }

  #[test]
  fn test_filters_and_orders_with_tie_break() {
    let t = Utc::now();
    // A due tomorrow, B and C equally overdue, D due next week
    let states = vec![
      state_due_at(1, t + Duration::days(1)),  // A
      state_due_at(2, t - Duration::days(5)),  // B
      state_due_at(3, t - Duration::days(5)),  // C
      state_due_at(4, t + Duration::days(10)), // D
    ];

    let due = due_items(states, t, 0);
    let ids: Vec<i64> = due.iter().map(|s| s.word_id).collect();
    assert_eq!(ids, vec![2, 3]);
  }

  #[test]
  fn test_most_overdue_first() {
    let t = Utc::now();
    let states = vec![
      state_due_at(1, t - Duration::days(1)),
      state_due_at(2, t - Duration::days(9)),
      state_due_at(3, t - Duration::days(4)),
    ];

    let due = due_items(states, t, 0);
    let ids: Vec<i64> = due.iter().map(|s| s.word_id).collect();
    assert_eq!(ids, vec![2, 3, 1]);
  }

  #[test]
  fn test_item_due_exactly_now_is_included() {
    let t = Utc::now();
    let due = due_items(vec![state_due_at(1, t)], t, 0);
    assert_eq!(due.len(), 1);
  }

  #[test]
  fn test_limit_truncates() {
    let t = Utc::now();
    let states = (1..=10)
      .map(|id| state_due_at(id, t - Duration::days(id)))
      .collect();

    let due = due_items(states, t, 3);
    assert_eq!(due.len(), 3);
    // Word 10 is the most overdue
    assert_eq!(due[0].word_id, 10);
  }

  #[test]
  fn test_zero_limit_is_unlimited() {
    let t = Utc::now();
    let states = (1..=10).map(|id| state_due_at(id, t)).collect();
    assert_eq!(due_items(states, t, 0).len(), 10);
  }

  #[test]
  fn test_empty_input() {
    assert!(due_items(vec![], Utc::now(), 0).is_empty());
  }
}

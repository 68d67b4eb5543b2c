use serde::{Deserialize, Serialize};

/// Outcome of a single review.
///
/// The UI may submit a 0-5 quality grade; grades below 3 collapse to
/// `Incorrect`, the rest to `Correct`. Grades above 5 are rejected at
/// the API boundary before any state is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewOutcome {
  Correct,
  Incorrect,
}

impl ReviewOutcome {
  pub fn from_quality(quality: i64) -> Option<Self> {
    match quality {
      0..=2 => Some(Self::Incorrect),
      3..=5 => Some(Self::Correct),
      _ => None,
    }
  }

  pub fn is_correct(&self) -> bool {
    matches!(self, Self::Correct)
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Correct => "correct",
      Self::Incorrect => "incorrect",
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_from_quality_failing_grades() {
    assert_eq!(ReviewOutcome::from_quality(0), Some(ReviewOutcome::Incorrect));
    assert_eq!(ReviewOutcome::from_quality(1), Some(ReviewOutcome::Incorrect));
    assert_eq!(ReviewOutcome::from_quality(2), Some(ReviewOutcome::Incorrect));
  }

  #[test]
  fn test_from_quality_passing_grades() {
    assert_eq!(ReviewOutcome::from_quality(3), Some(ReviewOutcome::Correct));
    assert_eq!(ReviewOutcome::from_quality(4), Some(ReviewOutcome::Correct));
    assert_eq!(ReviewOutcome::from_quality(5), Some(ReviewOutcome::Correct));
  }

  #[test]
  fn test_from_quality_out_of_range() {
    assert_eq!(ReviewOutcome::from_quality(6), None);
    assert_eq!(ReviewOutcome::from_quality(255), None);
    assert_eq!(ReviewOutcome::from_quality(-1), None);
    assert_eq!(ReviewOutcome::from_quality(i64::MIN), None);
  }

  #[test]
  fn test_is_correct() {
    assert!(ReviewOutcome::Correct.is_correct());
    assert!(!ReviewOutcome::Incorrect.is_correct());
  }

  #[test]
  fn test_serde_snake_case() {
    let c: ReviewOutcome = serde_json::from_str("\"correct\"").unwrap();
    assert_eq!(c, ReviewOutcome::Correct);
    assert_eq!(serde_json::to_string(&ReviewOutcome::Incorrect).unwrap(), "\"incorrect\"");
  }
}

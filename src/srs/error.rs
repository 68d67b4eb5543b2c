use thiserror::Error;

/// Failure at the repository boundary.
#[derive(Debug, Error)]
pub enum RepositoryError {
  /// Optimistic-concurrency version mismatch on save.
  #[error("scheduling state changed concurrently")]
  Conflict,
  /// The backing store did not answer within its timeout.
  #[error("repository timed out")]
  Timeout,
  #[error("repository failure: {0}")]
  Backend(String),
}

/// Errors surfaced by the scheduler service. The interval model itself
/// is total and never fails; this is the sole error-raising boundary.
#[derive(Debug, Error)]
pub enum SchedulerError {
  /// Caller's fault; rejected before any state is touched.
  #[error("invalid input: {0}")]
  Validation(String),
  /// The referenced word is not in the catalog.
  #[error("word {word_id} not found")]
  NotFound { word_id: i64 },
  /// Version mismatch persisted through the automatic retry.
  #[error("concurrent review for the same word, please try again")]
  Conflict,
  /// Repository I/O timeout; never retried internally so a review is
  /// never applied twice.
  #[error("storage timed out")]
  RepositoryTimeout,
  #[error("storage failure: {0}")]
  Repository(String),
}

impl From<RepositoryError> for SchedulerError {
  fn from(err: RepositoryError) -> Self {
    match err {
      RepositoryError::Conflict => Self::Conflict,
      RepositoryError::Timeout => Self::RepositoryTimeout,
      RepositoryError::Backend(msg) => Self::Repository(msg),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_repository_error_conversion() {
    assert!(matches!(
      SchedulerError::from(RepositoryError::Conflict),
      SchedulerError::Conflict
    ));
    assert!(matches!(
      SchedulerError::from(RepositoryError::Timeout),
      SchedulerError::RepositoryTimeout
    ));
    assert!(matches!(
      SchedulerError::from(RepositoryError::Backend("disk".into())),
      SchedulerError::Repository(_)
    ));
  }

  #[test]
  fn test_display_messages() {
    let err = SchedulerError::NotFound { word_id: 7 };
    assert_eq!(err.to_string(), "word 7 not found");
  }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A vocabulary catalog entry. Scheduling state references words by id;
/// a review for a word missing from the catalog is rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word {
  pub id: i64,
  pub term: String,
  pub translation: String,
  pub note: Option<String>,
  pub added_at: DateTime<Utc>,
}

impl Word {
  pub fn new(term: String, translation: String, note: Option<String>) -> Self {
    Self {
      id: 0,
      term,
      translation,
      note,
      added_at: Utc::now(),
    }
  }
}

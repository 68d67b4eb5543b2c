use rusqlite::{Connection, Result};

pub fn run_migrations(conn: &Connection) -> Result<()> {
  // Complete schema for new databases; column migrations below handle
  // upgrades for existing ones.
  conn.execute_batch(
    r#"
    CREATE TABLE IF NOT EXISTS words (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      term TEXT NOT NULL UNIQUE,
      translation TEXT NOT NULL,
      note TEXT,
      added_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS word_schedule (
      user_id INTEGER NOT NULL,
      word_id INTEGER NOT NULL,
      ease_factor REAL NOT NULL DEFAULT 2.5,
      interval_days INTEGER NOT NULL DEFAULT 0,
      repetitions INTEGER NOT NULL DEFAULT 0,
      mastery_level INTEGER NOT NULL DEFAULT 0,
      next_review_at TEXT NOT NULL,
      last_reviewed_at TEXT,
      total_reviews INTEGER NOT NULL DEFAULT 0,
      total_correct INTEGER NOT NULL DEFAULT 0,
      version INTEGER NOT NULL DEFAULT 1,
      PRIMARY KEY (user_id, word_id),
      FOREIGN KEY (word_id) REFERENCES words(id)
    );

    -- Indexes
    CREATE INDEX IF NOT EXISTS idx_word_schedule_due ON word_schedule(user_id, next_review_at);
    CREATE INDEX IF NOT EXISTS idx_word_schedule_word ON word_schedule(word_id);
    "#,
  )?;

  // Migration: version column for optimistic concurrency (older
  // databases predate conflict detection)
  add_column_if_missing(conn, "word_schedule", "version", "INTEGER NOT NULL DEFAULT 1")?;

  // Migration: notes on catalog entries
  add_column_if_missing(conn, "words", "note", "TEXT")?;

  Ok(())
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
  conn
    .prepare(&format!("SELECT {} FROM {} LIMIT 1", column, table))
    .is_ok()
}

/// Add a column if it doesn't already exist
fn add_column_if_missing(conn: &Connection, table: &str, column: &str, column_def: &str) -> Result<()> {
  if !column_exists(conn, table, column) {
    conn.execute(
      &format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, column_def),
      [],
    )?;
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_migrations_idempotent() {
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    run_migrations(&conn).unwrap();

    assert!(column_exists(&conn, "words", "term"));
    assert!(column_exists(&conn, "word_schedule", "version"));
  }
}

//! Word catalog queries.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result};

use crate::domain::Word;

pub fn insert_word(conn: &Connection, word: &Word) -> Result<i64> {
  conn.execute(
    "INSERT INTO words (term, translation, note, added_at) VALUES (?1, ?2, ?3, ?4)",
    params![word.term, word.translation, word.note, word.added_at.to_rfc3339()],
  )?;
  Ok(conn.last_insert_rowid())
}

pub fn get_word_by_id(conn: &Connection, id: i64) -> Result<Option<Word>> {
  let mut stmt = conn.prepare(
    "SELECT id, term, translation, note, added_at FROM words WHERE id = ?1",
  )?;

  let mut rows = stmt.query(params![id])?;
  if let Some(row) = rows.next()? {
    Ok(Some(row_to_word(row)?))
  } else {
    Ok(None)
  }
}

pub fn word_exists(conn: &Connection, id: i64) -> Result<bool> {
  conn.query_row(
    "SELECT COUNT(*) > 0 FROM words WHERE id = ?1",
    params![id],
    |row| row.get(0),
  )
}

pub fn list_words(conn: &Connection, limit: usize) -> Result<Vec<Word>> {
  let mut stmt = conn.prepare(
    "SELECT id, term, translation, note, added_at FROM words ORDER BY id ASC LIMIT ?1",
  )?;

  let words = stmt
    .query_map(params![limit as i64], |row| row_to_word(row))?
    .collect::<Result<Vec<_>>>()?;
  Ok(words)
}

/// Catalog words with no scheduling row for this user, ordered by id so
/// session plans are reproducible.
pub fn list_unseen_words(conn: &Connection, user_id: i64, limit: usize) -> Result<Vec<i64>> {
  let mut stmt = conn.prepare(
    r#"
    SELECT w.id
    FROM words w
    LEFT JOIN word_schedule ws ON ws.word_id = w.id AND ws.user_id = ?1
    WHERE ws.word_id IS NULL
    ORDER BY w.id ASC
    LIMIT ?2
    "#,
  )?;

  let ids = stmt
    .query_map(params![user_id, limit as i64], |row| row.get(0))?
    .collect::<Result<Vec<_>>>()?;
  Ok(ids)
}

fn row_to_word(row: &rusqlite::Row) -> Result<Word> {
  let added_at_str: String = row.get(4)?;

  Ok(Word {
    id: row.get(0)?,
    term: row.get(1)?,
    translation: row.get(2)?,
    note: row.get(3)?,
    added_at: DateTime::parse_from_rfc3339(&added_at_str)
      .map(|dt| dt.with_timezone(&Utc))
      .unwrap_or_else(|_| Utc::now()),
  })
}

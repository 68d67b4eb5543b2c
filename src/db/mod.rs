pub mod repository;
pub mod schedule;
pub mod schema;
pub mod words;

use rusqlite::{Connection, Result};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::Word;

pub use repository::SqliteRepository;
pub use schema::run_migrations;

pub type DbPool = Arc<Mutex<Connection>>;

/// Error returned when the database lock cannot be acquired
#[derive(Debug)]
pub struct DbLockError;

impl std::fmt::Display for DbLockError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "Database unavailable")
  }
}

impl std::error::Error for DbLockError {}

/// Try to acquire the database lock, returning an error if poisoned
pub fn try_lock(pool: &DbPool) -> std::result::Result<MutexGuard<'_, Connection>, DbLockError> {
  pool.lock().map_err(|_: PoisonError<_>| {
    tracing::error!("Database mutex poisoned - a thread panicked while holding the lock");
    DbLockError
  })
}

pub fn init_db(path: &Path) -> Result<DbPool> {
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).ok();
  }

  let conn = Connection::open(path)?;
  conn.busy_timeout(std::time::Duration::from_millis(
    crate::config::DB_BUSY_TIMEOUT_MS,
  ))?;
  run_migrations(&conn)?;
  Ok(Arc::new(Mutex::new(conn)))
}

pub fn seed_starter_words(conn: &Connection) -> Result<()> {
  let count: i64 = conn.query_row("SELECT COUNT(*) FROM words", [], |row| row.get(0))?;
  if count > 0 {
    return Ok(());
  }

  for word in get_starter_words() {
    words::insert_word(conn, &word)?;
  }
  Ok(())
}

fn word(term: &str, translation: &str, note: Option<&str>) -> Word {
  Word::new(
    term.to_string(),
    translation.to_string(),
    note.map(|s| s.to_string()),
  )
}

/// Starter Spanish vocabulary for an empty catalog.
fn get_starter_words() -> Vec<Word> {
  let entries = [
    ("hola", "hello", Some("Greeting, any time of day")),
    ("adiós", "goodbye", None),
    ("gracias", "thank you", None),
    ("por favor", "please", None),
    ("agua", "water", Some("Feminine noun that takes 'el' in singular")),
    ("pan", "bread", None),
    ("casa", "house", None),
    ("perro", "dog", None),
    ("gato", "cat", None),
    ("libro", "book", None),
    ("comer", "to eat", None),
    ("beber", "to drink", None),
    ("hablar", "to speak", None),
    ("leer", "to read", None),
    ("escribir", "to write", None),
    ("grande", "big", None),
    ("pequeño", "small", None),
    ("rojo", "red", None),
    ("azul", "blue", None),
    ("hoy", "today", None),
    ("mañana", "tomorrow / morning", Some("Context decides which")),
    ("siempre", "always", None),
    ("nunca", "never", None),
    ("amigo", "friend", None),
  ];

  entries
    .into_iter()
    .map(|(term, translation, note)| word(term, translation, note))
    .collect()
}

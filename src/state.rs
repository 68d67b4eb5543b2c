//! Application state shared across handlers.

use std::sync::Arc;

use crate::db::{DbPool, SqliteRepository};
use crate::srs::SchedulerService;

/// Application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    /// Scheduler facade; owns all scheduling-state mutation
    pub scheduler: Arc<SchedulerService<SqliteRepository>>,

    /// Direct pool for word-catalog reads/writes
    pub pool: DbPool,
}

impl AppState {
    pub fn new(pool: DbPool) -> Self {
        let scheduler = Arc::new(SchedulerService::new(SqliteRepository::new(pool.clone())));
        Self { scheduler, pool }
    }
}

//! Database layer for the livestock portal.

mod admin;
mod herd;
mod marketplace;
mod schema;

#[allow(unused_imports)]
pub use admin::*;
#[allow(unused_imports)]
pub use herd::*;
#[allow(unused_imports)]
pub use marketplace::*;
pub use schema::*;

use std::path::Path;
use std::sync::Arc;

use rusqlite::Connection;
use thiserror::Error;

use crate::feed::{ChangeEvent, ChangeFeed, ChangeKind};
use crate::validation::ValidationError;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
}

pub type DbResult<T> = Result<T, DbError>;

/// Database connection wrapper.
///
/// Writes are published on the attached change feed, if any.
pub struct Database {
    conn: Connection,
    feed: Option<Arc<dyn ChangeFeed>>,
}

impl Database {
    /// Open database at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        let db = Self { conn, feed: None };
        db.initialize()?;
        tracing::info!(path = %path.display(), "database opened");
        Ok(db)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn, feed: None };
        db.initialize()?;
        Ok(db)
    }

    /// Attach a change feed that receives an event for every write.
    pub fn with_change_feed(mut self, feed: Arc<dyn ChangeFeed>) -> Self {
        self.feed = Some(feed);
        self
    }

    /// Initialize schema.
    fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Begin a transaction.
    pub fn transaction(&mut self) -> DbResult<rusqlite::Transaction<'_>> {
        Ok(self.conn.transaction()?)
    }

    /// Publish a change for `table` if a feed is attached.
    pub(crate) fn notify(&self, table: &str, kind: ChangeKind, record_id: &str) {
        if let Some(feed) = &self.feed {
            feed.publish(&ChangeEvent {
                table: table.to_string(),
                kind,
                record_id: record_id.to_string(),
            });
        }
    }
}

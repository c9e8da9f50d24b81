//! Database connection management
//!
//! A pooled SQLite handle. `Database::open` prepares an on-disk store for the
//! server and CLI; `Database::in_memory` backs the tests.

use std::path::Path;
use std::sync::Arc;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, OpenFlags};
use thiserror::Error;

use super::migrations;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database connection error: {0}")]
    Connection(#[from] r2d2::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Cannot prepare data directory: {0}")]
    Io(#[from] std::io::Error),
}

pub type DbResult<T> = Result<T, DbError>;

/// Pool size for the on-disk store; tool calls are short and mostly reads
const FILE_POOL_SIZE: u32 = 4;

/// Per-connection setup for the on-disk store
const FILE_PRAGMAS: &str = "PRAGMA foreign_keys = ON;
                            PRAGMA journal_mode = WAL;
                            PRAGMA synchronous = NORMAL;
                            PRAGMA busy_timeout = 5000;";

type SqlitePool = Pool<SqliteConnectionManager>;

/// Shared handle to the FitTrack store
#[derive(Clone)]
pub struct Database {
    pool: Arc<SqlitePool>,
}

impl Database {
    /// Open the store at `path` and bring its schema up to date
    ///
    /// Missing parent directories are created first.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let manager = SqliteConnectionManager::file(path)
            .with_flags(OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE)
            .with_init(|conn| conn.execute_batch(FILE_PRAGMAS));
        let database = Self::from_pool(Pool::builder().max_size(FILE_POOL_SIZE).build(manager)?);

        let version = database.with_conn(|conn| {
            migrations::run_migrations(conn)?;
            migrations::get_schema_version(conn)
        })?;
        tracing::info!(path = %path.display(), schema_version = version, "Database ready");

        Ok(database)
    }

    /// Single-connection in-memory store
    ///
    /// Each SQLite memory connection is its own database, so the pool holds
    /// exactly one. The schema is not applied.
    pub fn in_memory() -> DbResult<Self> {
        let manager = SqliteConnectionManager::memory()
            .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));
        Ok(Self::from_pool(Pool::builder().max_size(1).build(manager)?))
    }

    fn from_pool(pool: SqlitePool) -> Self {
        Self { pool: Arc::new(pool) }
    }

    pub fn get_conn(&self) -> DbResult<PooledConnection<SqliteConnectionManager>> {
        Ok(self.pool.get()?)
    }

    /// Run `f` with a pooled connection
    pub fn with_conn<F, T>(&self, f: F) -> DbResult<T>
    where
        F: FnOnce(&Connection) -> DbResult<T>,
    {
        let conn = self.get_conn()?;
        f(&conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FoodItem;

    #[test]
    fn test_open_creates_directory_and_schema() {
        let dir = std::env::temp_dir().join(format!("fittrack-open-{}", std::process::id()));
        let path = dir.join("nested").join("fittrack.db");
        let _ = std::fs::remove_dir_all(&dir);

        let db = Database::open(&path).unwrap();
        assert!(path.exists());
        let version = db.with_conn(migrations::get_schema_version).unwrap();
        assert_eq!(version, migrations::SCHEMA_VERSION);
        assert_eq!(db.with_conn(FoodItem::count).unwrap(), 10);
        drop(db);

        // Reopening keeps the data and does not reseed
        let db = Database::open(&path).unwrap();
        assert_eq!(db.with_conn(FoodItem::count).unwrap(), 10);
        drop(db);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_in_memory_has_no_schema() {
        let db = Database::in_memory().unwrap();
        assert!(db.with_conn(FoodItem::count).is_err());

        db.with_conn(migrations::run_migrations).unwrap();
        assert_eq!(db.with_conn(FoodItem::count).unwrap(), 10);
    }
}

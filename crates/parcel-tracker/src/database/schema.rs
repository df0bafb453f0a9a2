//! Database schema definitions and initialization

use std::{path::Path, time::Duration};

use parcel_core::{Error, Result};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};

/// Database schema as SQL string - executed once on open.
///
/// `AUTOINCREMENT` keeps parcel numbers from being reused after a delete.
pub(crate) const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS parcel (
    number INTEGER PRIMARY KEY AUTOINCREMENT,
    client INTEGER NOT NULL,
    status TEXT NOT NULL CHECK(status IN ('registered', 'sent', 'delivered')),
    address TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_parcel_client ON parcel(client);
";

/// How long a writer waits for SQLite's file lock before giving up
pub(crate) const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open a pool on the parcel database file.
///
/// WAL lets listings read while a guarded write is in flight; concurrent
/// guarded writes queue on the busy timeout instead of failing with
/// `SQLITE_BUSY`.
pub(crate) async fn create_connection_pool(path: &Path) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(|e| {
            Error::storage(format!(
                "Failed to open parcel database {}: {e}",
                path.display()
            ))
        })
}

/// Initialize database schema
pub(crate) async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(SCHEMA)
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(|e| Error::storage(format!("Failed to initialize schema: {e}")))
}

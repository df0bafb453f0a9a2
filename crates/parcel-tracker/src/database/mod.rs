//! Parcel persistence using `SQLx`
//!
//! This module provides async SQLite-based persistence with:
//! - Connection pooling (no Arc<Mutex<>>)
//! - Simple embedded schema (no migration files)
//! - Status-guarded address changes and deletions as single statements

use std::path::Path;

use parcel_core::{
    ClientId, NewParcel, Parcel, ParcelNumber, ParcelStatus, ParcelStore, Result, WriteOutcome,
};
use sqlx::SqlitePool;

mod parcel_ops;
mod query;
mod schema;
mod validation;

/// Parcel database with connection pooling
#[derive(Debug, Clone)]
pub struct ParcelDb {
    pool: SqlitePool,
}

impl ParcelDb {
    /// Open the parcel database at `path`, creating file and schema if needed
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the path cannot hold a database file and
    /// `Error::Storage` if connecting or schema initialization fails
    pub async fn open(path: &Path) -> Result<Self> {
        validation::validate_database_path(path)?;

        let pool = schema::create_connection_pool(path).await?;
        schema::init_schema(&pool).await?;

        tracing::debug!(path = %path.display(), "opened parcel database");
        Ok(Self { pool })
    }

    /// Close every pooled connection; the handle is consumed
    pub async fn close(self) {
        self.pool.close().await;
    }
}

impl ParcelStore for ParcelDb {
    async fn add(&self, parcel: &NewParcel) -> Result<ParcelNumber> {
        parcel_ops::insert_parcel(&self.pool, parcel).await
    }

    async fn get(&self, number: ParcelNumber) -> Result<Parcel> {
        query::query_parcel_by_number(&self.pool, number).await
    }

    async fn get_by_client(&self, client: ClientId) -> Result<Vec<Parcel>> {
        query::query_parcels_by_client(&self.pool, client).await
    }

    async fn set_status(&self, number: ParcelNumber, status: ParcelStatus) -> Result<()> {
        parcel_ops::update_status(&self.pool, number, status).await
    }

    async fn set_address(&self, number: ParcelNumber, address: &str) -> Result<WriteOutcome> {
        parcel_ops::update_address_if_registered(&self.pool, number, address).await
    }

    async fn delete(&self, number: ParcelNumber) -> Result<WriteOutcome> {
        parcel_ops::delete_if_registered(&self.pool, number).await
    }
}

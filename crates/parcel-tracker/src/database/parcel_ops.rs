//! Parcel writes
//!
//! Address changes and deletions carry the status guard in their `WHERE`
//! clause, so the check and the write are one statement.

use parcel_core::{
    parcel::format_timestamp, Error, NewParcel, ParcelNumber, ParcelStatus, Result, WriteOutcome,
};
use sqlx::SqlitePool;

/// Insert a new parcel into database
pub(crate) async fn insert_parcel(pool: &SqlitePool, parcel: &NewParcel) -> Result<ParcelNumber> {
    sqlx::query(
        "INSERT INTO parcel (client, status, address, created_at)
         VALUES (?, ?, ?, ?)",
    )
    .bind(parcel.client.get())
    .bind(parcel.status.to_string())
    .bind(parcel.address.as_str())
    .bind(format_timestamp(&parcel.created_at))
    .execute(pool)
    .await
    .map(|result| ParcelNumber::new(result.last_insert_rowid()))
    .map_err(|e| Error::storage(format!("Failed to add parcel: {e}")))
}

/// Overwrite the status of a parcel
pub(crate) async fn update_status(
    pool: &SqlitePool,
    number: ParcelNumber,
    status: ParcelStatus,
) -> Result<()> {
    sqlx::query("UPDATE parcel SET status = ? WHERE number = ?")
        .bind(status.to_string())
        .bind(number.get())
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(|e| Error::storage(format!("Failed to set status of parcel {number}: {e}")))
}

/// Overwrite the address of a parcel that is still registered
pub(crate) async fn update_address_if_registered(
    pool: &SqlitePool,
    number: ParcelNumber,
    address: &str,
) -> Result<WriteOutcome> {
    sqlx::query("UPDATE parcel SET address = ? WHERE number = ? AND status = ?")
        .bind(address)
        .bind(number.get())
        .bind(ParcelStatus::Registered.to_string())
        .execute(pool)
        .await
        .map(|result| WriteOutcome::from_rows_affected(result.rows_affected()))
        .map_err(|e| Error::storage(format!("Failed to set address of parcel {number}: {e}")))
}

/// Delete a parcel that is still registered
pub(crate) async fn delete_if_registered(
    pool: &SqlitePool,
    number: ParcelNumber,
) -> Result<WriteOutcome> {
    sqlx::query("DELETE FROM parcel WHERE number = ? AND status = ?")
        .bind(number.get())
        .bind(ParcelStatus::Registered.to_string())
        .execute(pool)
        .await
        .map(|result| WriteOutcome::from_rows_affected(result.rows_affected()))
        .map_err(|e| Error::storage(format!("Failed to delete parcel {number}: {e}")))
}

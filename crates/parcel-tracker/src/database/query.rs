//! Query execution and row parsing for parcel reads

use parcel_core::{
    parcel::parse_timestamp, ClientId, Error, Parcel, ParcelNumber, ParcelStatus, Result,
};
use sqlx::{Row, SqlitePool};

/// Parse a database row into a Parcel
pub(crate) fn parse_parcel_row(row: &sqlx::sqlite::SqliteRow) -> Result<Parcel> {
    let number: i64 = row
        .try_get("number")
        .map_err(|e| Error::storage(format!("Failed to read number: {e}")))?;
    let client: i64 = row
        .try_get("client")
        .map_err(|e| Error::storage(format!("Failed to read client: {e}")))?;
    let status_str: String = row
        .try_get("status")
        .map_err(|e| Error::storage(format!("Failed to read status: {e}")))?;
    let address: String = row
        .try_get("address")
        .map_err(|e| Error::storage(format!("Failed to read address: {e}")))?;
    let created_at_str: String = row
        .try_get("created_at")
        .map_err(|e| Error::storage(format!("Failed to read created_at: {e}")))?;

    Ok(Parcel {
        number: ParcelNumber::new(number),
        client: ClientId::new(client),
        status: ParcelStatus::parse(&status_str)?,
        address,
        created_at: parse_timestamp(&created_at_str)?,
    })
}

/// Query a parcel by number
pub(crate) async fn query_parcel_by_number(
    pool: &SqlitePool,
    number: ParcelNumber,
) -> Result<Parcel> {
    sqlx::query(
        "SELECT number, client, status, address, created_at
         FROM parcel WHERE number = ?",
    )
    .bind(number.get())
    .fetch_optional(pool)
    .await
    .map_err(|e| Error::storage(format!("Failed to query parcel {number}: {e}")))?
    .map_or(Err(Error::NotFound(number)), |row| parse_parcel_row(&row))
}

/// Query all parcels of a client in number order
pub(crate) async fn query_parcels_by_client(
    pool: &SqlitePool,
    client: ClientId,
) -> Result<Vec<Parcel>> {
    let rows = sqlx::query(
        "SELECT number, client, status, address, created_at
         FROM parcel WHERE client = ? ORDER BY number",
    )
    .bind(client.get())
    .fetch_all(pool)
    .await
    .map_err(|e| Error::storage(format!("Failed to query parcels of client {client}: {e}")))?;

    rows.iter().map(parse_parcel_row).collect()
}

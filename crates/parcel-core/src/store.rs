//! Persistence port for parcels
//!
//! The store is the only component that touches the storage medium.
//! Address changes and deletions are guarded by the stored status inside a
//! single write, so no read-then-write race exists between callers.

use serde::{Deserialize, Serialize};

use crate::{ClientId, NewParcel, Parcel, ParcelNumber, ParcelStatus, Result};

/// Result of a status-guarded write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteOutcome {
    /// The row matched the guard and was written
    Applied,
    /// No row matched; the stored state is untouched
    Unchanged,
}

impl WriteOutcome {
    #[must_use]
    pub const fn from_rows_affected(rows: u64) -> Self {
        if rows > 0 {
            Self::Applied
        } else {
            Self::Unchanged
        }
    }

    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Durable storage for parcel records
#[allow(async_fn_in_trait)]
pub trait ParcelStore {
    /// Insert a parcel and return its newly assigned number
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the write cannot be completed
    async fn add(&self, parcel: &NewParcel) -> Result<ParcelNumber>;

    /// Fetch a parcel by number
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no parcel has this number
    async fn get(&self, number: ParcelNumber) -> Result<Parcel>;

    /// Fetch all parcels of a client, ordered by number ascending
    async fn get_by_client(&self, client: ClientId) -> Result<Vec<Parcel>>;

    /// Overwrite the status unconditionally
    async fn set_status(&self, number: ParcelNumber, status: ParcelStatus) -> Result<()>;

    /// Overwrite the address only while the parcel is registered
    async fn set_address(&self, number: ParcelNumber, address: &str) -> Result<WriteOutcome>;

    /// Remove the parcel only while it is registered
    async fn delete(&self, number: ParcelNumber) -> Result<WriteOutcome>;
}

//! In-memory parcel store
//!
//! Same contract as the SQLite store: numbers start at 1 and are never
//! reused, and guarded writes check the status under the same lock that
//! performs the write.

use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard},
};

use crate::{
    ClientId, Error, NewParcel, Parcel, ParcelNumber, ParcelStatus, ParcelStore, Result,
    WriteOutcome,
};

#[derive(Debug, Default)]
struct Rows {
    last_number: i64,
    parcels: BTreeMap<ParcelNumber, Parcel>,
}

/// Parcel store backed by an ordered map
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<Rows>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored parcels
    pub fn len(&self) -> Result<usize> {
        self.lock().map(|rows| rows.parcels.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        self.len().map(|len| len == 0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Rows>> {
        self.rows
            .lock()
            .map_err(|e| Error::storage(format!("Parcel store lock poisoned: {e}")))
    }
}

impl ParcelStore for MemoryStore {
    async fn add(&self, parcel: &NewParcel) -> Result<ParcelNumber> {
        let mut rows = self.lock()?;
        rows.last_number += 1;
        let number = ParcelNumber::new(rows.last_number);
        rows.parcels
            .insert(number, parcel.clone().with_number(number));
        Ok(number)
    }

    async fn get(&self, number: ParcelNumber) -> Result<Parcel> {
        self.lock()?
            .parcels
            .get(&number)
            .cloned()
            .ok_or(Error::NotFound(number))
    }

    async fn get_by_client(&self, client: ClientId) -> Result<Vec<Parcel>> {
        Ok(self
            .lock()?
            .parcels
            .values()
            .filter(|p| p.client == client)
            .cloned()
            .collect())
    }

    async fn set_status(&self, number: ParcelNumber, status: ParcelStatus) -> Result<()> {
        if let Some(parcel) = self.lock()?.parcels.get_mut(&number) {
            parcel.status = status;
        }
        Ok(())
    }

    async fn set_address(&self, number: ParcelNumber, address: &str) -> Result<WriteOutcome> {
        let mut rows = self.lock()?;
        match rows.parcels.get_mut(&number) {
            Some(parcel) if parcel.status.is_mutable() => {
                parcel.address = address.to_string();
                Ok(WriteOutcome::Applied)
            }
            _ => Ok(WriteOutcome::Unchanged),
        }
    }

    async fn delete(&self, number: ParcelNumber) -> Result<WriteOutcome> {
        let mut rows = self.lock()?;
        let guarded = rows
            .parcels
            .get(&number)
            .is_some_and(|p| p.status.is_mutable());

        if guarded {
            rows.parcels.remove(&number);
            Ok(WriteOutcome::Applied)
        } else {
            Ok(WriteOutcome::Unchanged)
        }
    }
}

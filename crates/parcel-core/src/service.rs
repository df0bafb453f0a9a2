//! Parcel lifecycle service
//!
//! Orchestrates the store into domain operations. The service owns no state;
//! every read and write goes through the injected `ParcelStore`, and every
//! observable side effect goes through the injected `EventSink`.

use crate::{
    ClientId, EventSink, NewParcel, Parcel, ParcelEvent, ParcelNumber, ParcelStatus, ParcelStore,
    Result, WriteOutcome,
};

/// Registration, status advancement and guarded mutation of parcels
#[derive(Debug)]
pub struct ParcelService<S, E> {
    store: S,
    events: E,
}

impl<S: ParcelStore, E: EventSink> ParcelService<S, E> {
    pub const fn new(store: S, events: E) -> Self {
        Self { store, events }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Give the store back, e.g. to close it
    pub fn into_store(self) -> S {
        self.store
    }

    /// Register a new parcel for `client` at `address`
    ///
    /// # Errors
    ///
    /// Propagates storage errors from the store
    pub async fn register(&self, client: ClientId, address: &str) -> Result<Parcel> {
        let new_parcel = NewParcel::registered(client, address);
        let number = self.store.add(&new_parcel).await?;
        let parcel = new_parcel.with_number(number);

        tracing::debug!(number = %number, client = %client, "registered parcel");
        self.events.emit(&ParcelEvent::Registered {
            parcel: parcel.clone(),
        });

        Ok(parcel)
    }

    /// Fetch a single parcel
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no parcel has this number
    pub async fn parcel(&self, number: ParcelNumber) -> Result<Parcel> {
        self.store.get(number).await
    }

    /// List all parcels of `client` in number order, emitting one event per parcel
    pub async fn list_for_client(&self, client: ClientId) -> Result<Vec<Parcel>> {
        let parcels = self.store.get_by_client(client).await?;

        self.events.emit(&ParcelEvent::ClientListing {
            client,
            count: parcels.len(),
        });
        parcels.iter().for_each(|parcel| {
            self.events.emit(&ParcelEvent::Listed {
                parcel: parcel.clone(),
            });
        });

        Ok(parcels)
    }

    /// Move a parcel to its next status and return the resulting status.
    ///
    /// A delivered parcel stays delivered; no write and no event happen.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no parcel has this number
    pub async fn advance_status(&self, number: ParcelNumber) -> Result<ParcelStatus> {
        let parcel = self.store.get(number).await?;
        let next = parcel.status.next();

        if next == parcel.status {
            tracing::debug!(number = %number, status = %next, "status already terminal");
            return Ok(next);
        }

        self.events.emit(&ParcelEvent::StatusAdvanced {
            number,
            from: parcel.status,
            to: next,
        });
        self.store.set_status(number, next).await?;

        Ok(next)
    }

    /// Change the delivery address; only registered parcels are affected
    pub async fn change_address(&self, number: ParcelNumber, address: &str) -> Result<WriteOutcome> {
        let outcome = self.store.set_address(number, address).await?;
        tracing::debug!(number = %number, ?outcome, "change address");
        Ok(outcome)
    }

    /// Delete a parcel; only registered parcels are affected
    pub async fn delete(&self, number: ParcelNumber) -> Result<WriteOutcome> {
        let outcome = self.store.delete(number).await?;
        tracing::debug!(number = %number, ?outcome, "delete parcel");
        Ok(outcome)
    }
}

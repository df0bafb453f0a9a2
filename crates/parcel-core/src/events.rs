//! Domain events emitted by the parcel service
//!
//! Events describe what happened; sinks decide how it is rendered.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::{ClientId, Parcel, ParcelNumber, ParcelStatus};

/// Something observable that happened to a parcel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ParcelEvent {
    /// A new parcel was stored
    Registered { parcel: Parcel },
    /// A client listing begins; `count` `Listed` events follow
    ClientListing { client: ClientId, count: usize },
    /// One parcel of a client listing
    Listed { parcel: Parcel },
    /// A parcel moved to its next status
    StatusAdvanced {
        number: ParcelNumber,
        from: ParcelStatus,
        to: ParcelStatus,
    },
}

impl ParcelEvent {
    /// Parcel number the event refers to, if any
    #[must_use]
    pub const fn number(&self) -> Option<ParcelNumber> {
        match self {
            Self::Registered { parcel } | Self::Listed { parcel } => Some(parcel.number),
            Self::StatusAdvanced { number, .. } => Some(*number),
            Self::ClientListing { .. } => None,
        }
    }
}

/// Receiver of domain events
pub trait EventSink {
    fn emit(&self, event: &ParcelEvent);
}

impl<T: EventSink + ?Sized> EventSink for &T {
    fn emit(&self, event: &ParcelEvent) {
        (**self).emit(event);
    }
}

/// Sink that writes events as structured `tracing` records
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &ParcelEvent) {
        match event {
            ParcelEvent::Registered { parcel } => tracing::info!(
                number = %parcel.number,
                client = %parcel.client,
                address = %parcel.address,
                created_at = %parcel.created_at_rfc3339(),
                "parcel registered"
            ),
            ParcelEvent::ClientListing { client, count } => {
                tracing::info!(client = %client, count, "listing client parcels");
            }
            ParcelEvent::Listed { parcel } => tracing::info!(
                number = %parcel.number,
                client = %parcel.client,
                address = %parcel.address,
                status = %parcel.status,
                created_at = %parcel.created_at_rfc3339(),
                "parcel"
            ),
            ParcelEvent::StatusAdvanced { number, from, to } => {
                tracing::info!(number = %number, from = %from, to = %to, "parcel status advanced");
            }
        }
    }
}

/// Sink that keeps every event in memory
///
/// Emitting cannot fail, so a lock poisoned by a panicking emitter is
/// recovered: each recorded event was pushed whole and stays valid.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<ParcelEvent>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events in emission order
    #[must_use]
    pub fn events(&self) -> Vec<ParcelEvent> {
        self.lock().clone()
    }

    /// Drain the recorded events
    pub fn take(&self) -> Vec<ParcelEvent> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ParcelEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: &ParcelEvent) {
        self.lock().push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::NewParcel;

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();
        let first = ParcelEvent::ClientListing {
            client: ClientId::new(1),
            count: 0,
        };
        let second = ParcelEvent::StatusAdvanced {
            number: ParcelNumber::new(2),
            from: ParcelStatus::Registered,
            to: ParcelStatus::Sent,
        };
        (&sink).emit(&first);
        sink.emit(&second);

        assert_eq!(sink.take(), vec![first, second]);
        assert!(sink.events().is_empty());
    }

    #[test]
    #[allow(clippy::panic)]
    fn test_memory_sink_keeps_events_after_poisoned_lock() {
        let sink = Arc::new(MemorySink::new());
        let first = ParcelEvent::ClientListing {
            client: ClientId::new(1),
            count: 1,
        };
        sink.emit(&first);

        let poisoner = Arc::clone(&sink);
        let joined = std::thread::spawn(move || {
            let _guard = poisoner.events.lock();
            panic!("emitter failed while holding the lock");
        })
        .join();
        assert!(joined.is_err());
        assert!(sink.events.is_poisoned());

        let second = ParcelEvent::ClientListing {
            client: ClientId::new(2),
            count: 0,
        };
        sink.emit(&second);
        assert_eq!(sink.events(), vec![first.clone(), second.clone()]);
        assert_eq!(sink.take(), vec![first, second]);
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_event_json_is_tagged() -> Result<(), serde_json::Error> {
        let parcel = NewParcel::registered(ClientId::new(3), "Elm St. 4")
            .with_number(ParcelNumber::new(11));
        let event = ParcelEvent::Registered { parcel };
        let json = serde_json::to_value(&event)?;

        assert_eq!(json["event"], "registered");
        assert_eq!(json["parcel"]["number"], 11);
        assert_eq!(json["parcel"]["status"], "registered");
        assert_eq!(event.number(), Some(ParcelNumber::new(11)));
        Ok(())
    }
}

//! Parcel-core - Core parcel tracking types and logic
//!
//! This crate provides:
//! - Parcel domain types and the status lifecycle
//! - The `ParcelStore` persistence port and an in-memory implementation
//! - Domain events and the `EventSink` observer port
//! - `ParcelService`, which enforces registration defaults and the status rules
//!
//! ## Laws (Compiler Enforced)
//!
//! - No `unwrap()` / `expect()` / `panic!()` - returns `Result` instead
//! - No `unsafe` - safe Rust only

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod error;
pub mod events;
pub mod memory;
pub mod parcel;
pub mod service;
pub mod store;

pub use error::{Error, Result};
pub use events::{EventSink, MemorySink, ParcelEvent, TracingSink};
pub use memory::MemoryStore;
pub use parcel::{ClientId, NewParcel, Parcel, ParcelNumber, ParcelStatus};
pub use service::ParcelService;
pub use store::{ParcelStore, WriteOutcome};

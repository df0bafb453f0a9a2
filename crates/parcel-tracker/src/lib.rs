//! Parcel tracker - register parcels and track their delivery status
//!
//! SQLite persistence, configuration, console rendering and the CLI around
//! the service in `parcel-core`.

pub mod cli;
pub mod commands;
pub mod config;
pub mod database;
pub mod render;

pub use config::Config;
pub use database::ParcelDb;
pub use render::{ConsoleSink, OutputFormat};

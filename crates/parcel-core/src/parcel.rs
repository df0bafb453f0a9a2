//! Parcel types and the delivery-status lifecycle

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{Error, Result};

/// Gateway-assigned parcel identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParcelNumber(i64);

impl ParcelNumber {
    #[must_use]
    pub const fn new(number: i64) -> Self {
        Self(number)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ParcelNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the client that owns a parcel
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(i64);

impl ClientId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position of a parcel in its delivery lifecycle.
///
/// Status only moves forward: `Registered -> Sent -> Delivered`.
/// `Delivered` is terminal.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ParcelStatus {
    /// Accepted for delivery; address may still change and the parcel may be deleted
    #[default]
    Registered,
    /// Handed over for delivery
    Sent,
    /// Delivered to the recipient
    Delivered,
}

impl ParcelStatus {
    /// The status a parcel moves to on its next advance.
    ///
    /// `Delivered` maps to itself.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Registered => Self::Sent,
            Self::Sent | Self::Delivered => Self::Delivered,
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered)
    }

    /// Whether address changes and deletion are still permitted
    #[must_use]
    pub const fn is_mutable(self) -> bool {
        matches!(self, Self::Registered)
    }

    /// Parse the stored textual form of a status.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` for text that names no known status.
    pub fn parse(s: &str) -> Result<Self> {
        s.parse()
            .map_err(|_| Error::storage(format!("Invalid parcel status: {s}")))
    }
}

/// A parcel that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewParcel {
    pub client: ClientId,
    pub status: ParcelStatus,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

impl NewParcel {
    /// A freshly registered parcel, stamped with the current UTC time
    #[must_use]
    pub fn registered(client: ClientId, address: impl Into<String>) -> Self {
        Self {
            client,
            status: ParcelStatus::Registered,
            address: address.into(),
            created_at: Utc::now().trunc_subsecs(0),
        }
    }

    /// Attach the number assigned by the store
    #[must_use]
    pub fn with_number(self, number: ParcelNumber) -> Parcel {
        Parcel {
            number,
            client: self.client,
            status: self.status,
            address: self.address,
            created_at: self.created_at,
        }
    }
}

/// A stored parcel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parcel {
    pub number: ParcelNumber,
    pub client: ClientId,
    pub status: ParcelStatus,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

impl Parcel {
    /// Creation time in its persisted form (RFC3339, UTC, whole seconds)
    #[must_use]
    pub fn created_at_rfc3339(&self) -> String {
        format_timestamp(&self.created_at)
    }
}

/// Format a timestamp the way it is persisted
#[must_use]
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a persisted timestamp.
///
/// # Errors
///
/// Returns `Error::Storage` if the text is not RFC3339.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::storage(format!("Invalid timestamp '{s}': {e}")))
}

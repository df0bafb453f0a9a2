//! Error types for parcel-core

use thiserror::Error;

use crate::parcel::ParcelNumber;

/// Core error type for parcel operations
#[derive(Debug, Error)]
pub enum Error {
    /// No parcel is stored under the requested number
    #[error("Parcel {0} not found")]
    NotFound(ParcelNumber),

    /// The storage medium could not complete a read or write
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration could not be parsed or is inconsistent
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Filesystem errors outside the storage medium itself
    #[error("IO error: {0}")]
    Io(String),
}

impl Error {
    /// Create a storage error.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an IO error.
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Returns the process exit code for this error.
    ///
    /// - 1: bad configuration
    /// - 2: IO failure
    /// - 3: parcel not found
    /// - 4: storage failure
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidConfig(_) => 1,
            Self::Io(_) => 2,
            Self::NotFound(_) => 3,
            Self::Storage(_) => 4,
        }
    }

    /// Check whether this error reports a missing parcel.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::io_error(err.to_string())
    }
}

/// Result type alias for parcel-core operations
pub type Result<T> = std::result::Result<T, Error>;

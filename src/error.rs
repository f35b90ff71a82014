//! Error handling.

use std::fmt::Debug;
use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GeotagError {
    /// The input is not laid out the way a JPEG with an EXIF block should be.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A declared length, offset or count points past the end of the available bytes.
    #[error("Truncated data: expected to read {needed} bytes at offset {offset}, only {available} available")]
    TruncatedData {
        /// Offset at which the read was attempted.
        offset: usize,
        /// Number of bytes the read required.
        needed: usize,
        /// Length of the buffer being read.
        available: usize,
    },

    /// IO Error.
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Error while fetching data using object store.
    #[cfg(feature = "object_store")]
    #[error(transparent)]
    ObjectStore(#[from] object_store::Error),

    /// Reqwest error
    #[cfg(feature = "reqwest")]
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),

    /// External error
    #[error(transparent)]
    External(Box<dyn std::error::Error + Send + Sync>),
}

impl GeotagError {
    /// Returns `true` if the error came from parsing the image bytes rather than loading them.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            GeotagError::InvalidFormat(_) | GeotagError::TruncatedData { .. }
        )
    }

    pub(crate) fn truncated(offset: usize, needed: usize, available: usize) -> Self {
        GeotagError::TruncatedData {
            offset,
            needed,
            available,
        }
    }
}

/// Crate-specific result type.
pub type GeotagResult<T> = std::result::Result<T, GeotagError>;

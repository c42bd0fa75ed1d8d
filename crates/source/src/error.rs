//! Listing Source Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::io::Error as IoError;
use std::path::PathBuf;

/// A listing source error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for listing source operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Saved page does not exist
    #[display("page not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// Access denied
    #[display("permission denied: {}", _0.display())]
    PermissionDenied(#[error(not(source))] PathBuf),
    /// Underlying I/O error
    #[display("I/O error: {_0}")]
    Io(IoError),
    /// The listings could not be decoded.
    #[display("invalid listing data")]
    InvalidData,
    /// Marketplace could not be reached.
    #[display("network error: {_0}")]
    Network(#[error(not(source))] String),
    /// Marketplace took too long to respond.
    #[display("timed out waiting for listings")]
    Timeout,
    /// Marketplace served an anti-bot page instead of results.
    #[display("blocked by the marketplace")]
    Blocked,
}
impl From<IoError> for ErrorKind {
    fn from(err: IoError) -> Self {
        Self::Io(err)
    }
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Network(_) | Self::Timeout)
    }
}

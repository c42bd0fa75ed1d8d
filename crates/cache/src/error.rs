//! Cache Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A cache error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for cache operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The time-to-live must be non-zero (and representable).
    #[display("invalid cache TTL")]
    InvalidTtl,
    /// The retention window must be at least as long as the TTL.
    #[display("cache retention shorter than TTL")]
    InvalidRetention,
    /// The sweep interval must be non-zero.
    #[display("invalid sweep interval")]
    InvalidInterval,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Configuration doesn't fix itself.
        false
    }
}

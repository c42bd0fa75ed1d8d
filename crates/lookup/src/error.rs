//! Lookup Error Types
//!
//! Failures stay typed until the very edge of [`PriceLookup`](crate::PriceLookup),
//! where [`ErrorKind::reply`] turns them into something a chat user can read.

use derive_more::{Display, Error};
use pricebot_engine::Reply;

/// A lookup error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for lookup operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Blank query; rejected before anything else happens.
    #[display("empty query")]
    EmptyQuery,
    /// The listing source failed (unreachable, blocked, garbage).
    #[display("listing source failed: {_0}")]
    Upstream(#[error(not(source))] String),
    /// No listings arrived before the deadline.
    #[display("listing source timed out")]
    Timeout,
    /// Invalid settings when building a lookup.
    #[display("could not set up price lookups")]
    Construction,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Upstream(_) | Self::Timeout)
    }

    /// What the user gets told instead of a price.
    pub fn reply(&self, query: &str) -> Reply {
        let query = query.trim();
        match self {
            Self::EmptyQuery => Reply::empty_query(),
            Self::Upstream(reason) => {
                Reply::new(format!("sorry, failed to fetch card/product \"{query}\" - {reason}"))
            },
            Self::Timeout => Reply::new(format!(
                "sorry, looking up \"{query}\" took too long. Please try again in a moment!"
            )),
            Self::Construction => Reply::new("sorry, price lookups are unavailable right now."),
        }
    }
}

//! Listing source trait and implementations.
//!
//! A listing source turns a query into the raw listings of a marketplace
//! results page. How it gets them (a live browser, an HTTP client, a page
//! saved to disk) is entirely up to the implementation; the matching engine
//! only ever sees the [`RawListing`]s.

mod file;
#[cfg(any(test, feature = "mock"))]
mod mock;

pub use self::file::FileSource;
#[cfg(any(test, feature = "mock"))]
pub use self::mock::MockSource;
use crate::error::Result;
use async_trait::async_trait;
use pricebot_extract::RawListing;

/// Unified interface for listing sources.
///
/// # Errors
/// Implementations report failures with the crate's
/// [`ErrorKind`](crate::error::ErrorKind): [`Network`](crate::error::ErrorKind::Network)
/// and [`Timeout`](crate::error::ErrorKind::Timeout) when the marketplace can't
/// be reached in time, [`Blocked`](crate::error::ErrorKind::Blocked) when it
/// answers with an anti-bot page. An empty results page is *not* an error.
///
/// # Examples
///
/// ```
/// use pricebot_source::{ListingSource, error::Result};
///
/// async fn titles(source: &dyn ListingSource, query: &str) -> Result<Vec<String>> {
///     let listings = source.fetch(query).await?;
///     Ok(listings.into_iter().filter_map(|l| l.title).collect())
/// }
/// ```
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Name of the source (used for logging only).
    fn name(&self) -> &str;

    /// Every listing on the results page for `query`, in page order.
    async fn fetch(&self, query: &str) -> Result<Vec<RawListing>>;
}

//! In-memory listing source for testing.

use crate::ListingSource;
use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use pricebot_extract::RawListing;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

type FailureFn = Box<dyn Fn() -> ErrorKind + Send + Sync>;

/// In-memory listing source for testing.
///
/// Serves canned listings per query (matched case-insensitively, unknown
/// queries get an empty results page), optionally after a delay or with an
/// injected failure, and counts how often it was asked.
///
/// # Examples
///
/// ```
/// use pricebot_source::{ListingSource, RawListing, backend::MockSource};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let source = MockSource::with_listings([
///     ("charizard", vec![RawListing::new("Charizard", "Base Set", "$300.00")]),
/// ]);
/// assert_eq!(source.fetch("Charizard").await?.len(), 1);
/// assert!(source.fetch("mewtwo").await?.is_empty());
/// assert_eq!(source.fetches(), 2);
/// # Ok(())
/// # }
/// ```
pub struct MockSource {
    listings: HashMap<String, Vec<RawListing>>,
    delay: Option<Duration>,
    failure: Option<FailureFn>,
    fetches: AtomicUsize,
}
impl MockSource {
    pub fn with_listings(listings: impl IntoIterator<Item = (impl AsRef<str>, Vec<RawListing>)>) -> Self {
        Self {
            listings: listings.into_iter().map(|(query, raw)| (Self::key(query.as_ref()), raw)).collect(),
            delay: None,
            failure: None,
            fetches: AtomicUsize::new(0),
        }
    }

    /// Wait (on the Tokio clock) before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fail every fetch with the error produced by `failure`.
    pub fn failing_with(mut self, failure: impl Fn() -> ErrorKind + Send + Sync + 'static) -> Self {
        self.failure = Some(Box::new(failure));
        self
    }

    /// Number of fetches started so far.
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn key(query: &str) -> String {
        query.trim().to_lowercase()
    }
}
impl Default for MockSource {
    fn default() -> Self {
        let listings: [(&str, Vec<RawListing>); 0] = [];
        Self::with_listings(listings)
    }
}

#[async_trait]
impl ListingSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, query: &str) -> Result<Vec<RawListing>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(failure) = &self.failure {
            exn::bail!(failure());
        }
        Ok(self.listings.get(&Self::key(query)).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_canned_listings() {
        let source = MockSource::with_listings([("pikachu", vec![RawListing::titled("Pikachu")])]);
        assert_eq!(source.fetch(" PIKACHU ").await.unwrap(), vec![RawListing::titled("Pikachu")]);
        assert_eq!(source.fetches(), 1);
    }

    #[tokio::test]
    async fn test_failure() {
        let source = MockSource::default().failing_with(|| ErrorKind::Blocked);
        let err = source.fetch("pikachu").await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Blocked));
        assert_eq!(source.fetches(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay() {
        let source = MockSource::default().with_delay(Duration::from_secs(5));
        let started = tokio::time::Instant::now();
        source.fetch("pikachu").await.unwrap();
        assert!(started.elapsed() >= Duration::from_secs(5));
    }
}

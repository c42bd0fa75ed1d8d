use crate::format::{DEFAULT_USER, Reply};
use crate::matcher::Matcher;
use crate::query::MatchQuery;
use crate::select::{Selection, select_best};
use pricebot_extract::Listing;
use tracing::instrument;

/// Outcome of matching a query against a results page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a> {
    /// The page had no usable listings at all.
    NoListings,
    /// Nothing matched; the first listing on the page is offered instead.
    NoMatch { fallback: &'a Listing },
    Matched(Selection<'a>),
}

/// The matching pipeline with its tuning. Holds no mutable state: the same
/// query and listings always produce the same reply.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Engine {
    matcher: Matcher,
}
impl Engine {
    pub fn new(matcher: Matcher) -> Self {
        Self { matcher }
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Filter, then select. Falls back to the first listing when nothing
    /// matches.
    #[instrument(level = "debug", skip(self, query, listings), fields(query = %query, listings = listings.len()))]
    pub fn resolution<'a>(&self, query: &MatchQuery, listings: &'a [Listing]) -> Resolution<'a> {
        let Some(first) = listings.first() else {
            return Resolution::NoListings;
        };
        let candidates = self.matcher.candidates(query, listings);
        tracing::debug!(candidates = candidates.len(), "Matched listings");
        if candidates.is_empty() {
            return Resolution::NoMatch { fallback: first };
        }
        Resolution::Matched(select_best(&candidates))
    }

    /// The user-independent reply for a query.
    pub fn reply(&self, query: &MatchQuery, listings: &[Listing]) -> Reply {
        Reply::from_resolution(&self.resolution(query, listings), query)
    }

    /// The final message for `user`. Blank queries get a prompt instead.
    pub fn resolve(&self, query: &str, user: &str, listings: &[Listing]) -> String {
        match MatchQuery::new(query) {
            Some(query) => self.reply(&query, listings).for_user(user),
            None => Reply::empty_query().for_user(user),
        }
    }
}

/// Resolve `query` against already-normalized listings with the default
/// tuning, addressed to [`DEFAULT_USER`].
///
/// ```rust
/// use pricebot_engine::resolve;
/// assert_eq!(resolve("arceus", &[]), "Streamer, no product cards found for \"arceus\"");
/// ```
pub fn resolve(query: &str, listings: &[Listing]) -> String {
    Engine::default().resolve(query, DEFAULT_USER, listings)
}

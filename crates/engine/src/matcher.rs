//! Deciding whether a query plausibly refers to a listing.
//!
//! Two tiers, either of which is enough:
//!
//! - **Substring**: the folded query and folded title (lowercase, non-word
//!   characters stripped) contain one another.
//! - **Word coverage**: enough of the query's words are "covered" by some
//!   word of the title, where covered means either word contains the other,
//!   or they're the same length (give or take the tolerance) and only differ
//!   in their last character.
//!
//! Both tiers run against the raw title and the clean title.

use crate::query::{MatchQuery, fold, words};
use pricebot_extract::Listing;

/// Fraction of query words that must be covered by title words.
pub const DEFAULT_COVERAGE_THRESHOLD: f64 = 0.8;
/// Largest length difference between two words that may still be treated as
/// the same word with a different last character (plurals, typos).
pub const DEFAULT_LENGTH_TOLERANCE: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matcher {
    coverage_threshold: f64,
    length_tolerance: usize,
}
impl Matcher {
    /// `coverage_threshold` is expected to be within `(0, 1]`; values outside
    /// that range are clamped.
    pub fn new(coverage_threshold: f64, length_tolerance: usize) -> Self {
        Self {
            coverage_threshold: coverage_threshold.clamp(f64::EPSILON, 1.0),
            length_tolerance,
        }
    }

    pub fn coverage_threshold(&self) -> f64 {
        self.coverage_threshold
    }

    pub fn length_tolerance(&self) -> usize {
        self.length_tolerance
    }

    pub fn is_match(&self, query: &MatchQuery, listing: &Listing) -> bool {
        let folded = fold(query.as_str());
        let query_words = query.words();
        [listing.title.as_str(), listing.clean_title.as_str()]
            .into_iter()
            .any(|title| contains_either_way(&folded, &fold(title)) || self.covers_query(&query_words, title))
    }

    /// All listings matching the query, in their original order.
    pub fn candidates<'a>(&self, query: &MatchQuery, listings: &'a [Listing]) -> Vec<&'a Listing> {
        listings.iter().filter(|listing| self.is_match(query, listing)).collect()
    }

    fn covers_query(&self, query_words: &[String], title: &str) -> bool {
        if query_words.is_empty() {
            return false;
        }
        let title_words = words(title);
        let covered = query_words
            .iter()
            .filter(|word| title_words.iter().any(|candidate| self.covers_word(candidate, word)))
            .count();
        covered >= self.required_words(query_words.len())
    }

    fn covers_word(&self, title_word: &str, query_word: &str) -> bool {
        if title_word.contains(query_word) || query_word.contains(title_word) {
            return true;
        }
        let title_len = title_word.chars().count();
        let query_len = query_word.chars().count();
        title_len.abs_diff(query_len) <= self.length_tolerance && drop_last(title_word) == drop_last(query_word)
    }

    fn required_words(&self, total: usize) -> usize {
        // Nudge down before rounding up so that e.g. 15 * 0.8 doesn't become 13.
        let required = (total as f64 * self.coverage_threshold - 1e-9).ceil();
        (required as usize).max(1)
    }
}
impl Default for Matcher {
    fn default() -> Self {
        Self::new(DEFAULT_COVERAGE_THRESHOLD, DEFAULT_LENGTH_TOLERANCE)
    }
}

/// [`Matcher::is_match`] with the default tuning.
pub fn is_match(query: &MatchQuery, listing: &Listing) -> bool {
    Matcher::default().is_match(query, listing)
}

fn contains_either_way(a: &str, b: &str) -> bool {
    !a.is_empty() && !b.is_empty() && (a.contains(b) || b.contains(a))
}

fn drop_last(word: &str) -> &str {
    word.char_indices().last().map(|(i, _)| &word[..i]).unwrap_or(word)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricebot_extract::{RawListing, normalize};
    use rstest::rstest;

    fn listing(title: &str) -> Listing {
        normalize(RawListing::titled(title)).unwrap()
    }

    fn query(text: &str) -> MatchQuery {
        MatchQuery::new(text).unwrap()
    }

    #[rstest]
    #[case("Charizard Vmax", "Charizard VMAX (Secret Rare)")]
    #[case("charizard", "Charizard VMAX")]
    #[case("Charizard VMAX (Secret Rare) 1st Edition", "Charizard VMAX")]
    #[case("pikachu vmax", "Pikachu VMAX (Foil)")]
    #[case("luke-skywalker", "Luke Skywalker")]
    // Plural on the query side.
    #[case("pikachus vmax", "Pikachu VMAX Promo")]
    // Same length, different last character.
    #[case("darth vadet", "Darth Vader - Sith Lord")]
    // 4 of 5 words covered is enough.
    #[case("luke skywalker knight jedi zzz", "Luke Skywalker, Jedi Knight")]
    fn test_matches(#[case] q: &str, #[case] title: &str) {
        assert!(is_match(&query(q), &listing(title)), "{q:?} should match {title:?}");
    }

    #[rstest]
    #[case("zzz", "Charizard VMAX")]
    #[case("mewtwo", "Charizard")]
    // 3 of 5 words covered is not enough.
    #[case("luke skywalker jedi xxx yyy", "Luke Skywalker, Jedi Knight")]
    #[case("!!!", "Charizard")]
    fn test_does_not_match(#[case] q: &str, #[case] title: &str) {
        assert!(!is_match(&query(q), &listing(title)), "{q:?} should not match {title:?}");
    }

    #[test]
    fn test_clean_title_is_checked() {
        // Only the clean title ("pikachu vmax") is contained in the query.
        let foil = listing("Pikachu VMAX (Foil)");
        assert!(is_match(&query("pikachu vmax holo"), &foil));
    }

    #[test]
    fn test_threshold_is_configurable() {
        let strict = Matcher::new(1.0, DEFAULT_LENGTH_TOLERANCE);
        let title = listing("Luke Skywalker, Jedi Knight");
        assert!(!strict.is_match(&query("luke skywalker knight jedi zzz"), &title));
        assert!(strict.is_match(&query("luke skywalker knight jedi"), &title));
    }

    #[test]
    fn test_last_character_rule() {
        let title = listing("Darth Vader");
        assert!(is_match(&query("darth vadet"), &title));
        assert!(Matcher::new(DEFAULT_COVERAGE_THRESHOLD, 0).is_match(&query("darth vadet"), &title));
        // Words of different lengths can't be equal once both lose their last character.
        assert!(!is_match(&query("darth vadets"), &title));
    }

    #[rstest]
    #[case(1, 1)]
    #[case(2, 2)]
    #[case(3, 3)]
    #[case(4, 4)]
    #[case(5, 4)]
    #[case(10, 8)]
    #[case(15, 12)]
    fn test_required_words(#[case] total: usize, #[case] expected: usize) {
        assert_eq!(Matcher::default().required_words(total), expected);
    }

    #[test]
    fn test_candidates_keep_order() {
        let listings = vec![listing("Charizard"), listing("Pikachu"), listing("Charizard VMAX")];
        let found = Matcher::default().candidates(&query("charizard"), &listings);
        let titles: Vec<_> = found.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, ["Charizard", "Charizard VMAX"]);
    }
}

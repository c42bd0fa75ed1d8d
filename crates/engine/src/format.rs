//! Rendering a [`Resolution`] into a chat message.

use crate::query::MatchQuery;
use crate::resolve::Resolution;
use crate::select::Selection;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Hard upper bound on the length (in characters) of every message.
pub const MAX_MESSAGE_CHARS: usize = 390;
const ELLIPSIS: &str = "...";
/// Who a message is addressed to when the caller doesn't say.
pub const DEFAULT_USER: &str = "Streamer";

/// Cut a message down to [`MAX_MESSAGE_CHARS`], ending it with an ellipsis
/// when anything had to go.
pub fn truncate(message: String) -> String {
    if message.chars().count() <= MAX_MESSAGE_CHARS {
        return message;
    }
    let keep = MAX_MESSAGE_CHARS - ELLIPSIS.len();
    let mut truncated: String = message.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// A message body that doesn't know who it's for yet.
///
/// Replies are what gets cached: the same body is shared by everyone asking
/// about the same card, and [`for_user`](Self::for_user) addresses it to the
/// caller (and enforces the length limit) on the way out.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reply {
    body: String,
}
impl Reply {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    /// Prompt sent back for a blank query.
    pub fn empty_query() -> Self {
        Self::new("please provide a card name!")
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// The final message: `"{user}, {body}"`, at most [`MAX_MESSAGE_CHARS`] long.
    pub fn for_user(&self, user: &str) -> String {
        truncate(format!("{}, {}", user, self.body))
    }

    pub fn from_resolution(resolution: &Resolution<'_>, query: &MatchQuery) -> Self {
        let body = match resolution {
            Resolution::NoListings => no_listings(query),
            Resolution::NoMatch { fallback } => format!(
                "no exact match for \"{}\". Found: {} ({}) | Price: {}",
                query, fallback.title, fallback.set_name, fallback.price_text
            ),
            Resolution::Matched(Selection { non_foil: Some(regular), foil: Some(foil) }) => format!(
                "Card: {} ({}) | Regular: {} | Foil: {}",
                regular.clean_title, regular.set_name, regular.price_text, foil.price_text
            ),
            Resolution::Matched(Selection { non_foil: Some(regular), foil: None }) => format!(
                "Card: {} ({}) | Market: {} | Foil: Not found",
                regular.title, regular.set_name, regular.price_text
            ),
            Resolution::Matched(Selection { non_foil: None, foil: Some(foil) }) => format!(
                "Card: {} ({}) | Regular: Not found | Foil: {}",
                foil.clean_title, foil.set_name, foil.price_text
            ),
            // Only reachable with an empty candidate set, which is NoMatch.
            Resolution::Matched(Selection { non_foil: None, foil: None }) => no_listings(query),
        };
        Self::new(body)
    }
}
impl Display for Reply {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.body)
    }
}

fn no_listings(query: &MatchQuery) -> String {
    format!("no product cards found for \"{}\"", query)
}

/// Render a resolution for `user`.
pub fn format(resolution: &Resolution<'_>, query: &MatchQuery, user: &str) -> String {
    Reply::from_resolution(resolution, query).for_user(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricebot_extract::{Listing, RawListing, normalize};
    use rstest::rstest;

    fn listing(title: &str, set_name: &str, price: &str) -> Listing {
        normalize(RawListing::new(title, set_name, price)).unwrap()
    }

    fn query(text: &str) -> MatchQuery {
        MatchQuery::new(text).unwrap()
    }

    #[test]
    fn test_no_listings() {
        assert_eq!(
            format(&Resolution::NoListings, &query("arceus"), "Streamer"),
            "Streamer, no product cards found for \"arceus\""
        );
    }

    #[test]
    fn test_no_match() {
        let fallback = listing("Charizard", "Base Set", "$300.00");
        assert_eq!(
            format(&Resolution::NoMatch { fallback: &fallback }, &query("mewtwo"), "viewer"),
            "viewer, no exact match for \"mewtwo\". Found: Charizard (Base Set) | Price: $300.00"
        );
    }

    #[test]
    fn test_both_variants() {
        let regular = listing("Pikachu VMAX", "Vivid Voltage", "$45.00");
        let foil = listing("Pikachu VMAX (Foil)", "Vivid Voltage", "$60.00");
        let selection = Selection { non_foil: Some(&regular), foil: Some(&foil) };
        assert_eq!(
            format(&Resolution::Matched(selection), &query("pikachu vmax"), "Streamer"),
            "Streamer, Card: pikachu vmax (Vivid Voltage) | Regular: $45.00 | Foil: $60.00"
        );
    }

    #[test]
    fn test_regular_only_uses_display_title() {
        let regular = listing("Pikachu VMAX", "Vivid Voltage", "$45.00");
        let selection = Selection { non_foil: Some(&regular), foil: None };
        assert_eq!(
            format(&Resolution::Matched(selection), &query("pikachu"), "Streamer"),
            "Streamer, Card: Pikachu VMAX (Vivid Voltage) | Market: $45.00 | Foil: Not found"
        );
    }

    #[test]
    fn test_foil_only() {
        let foil = listing("Pikachu VMAX (Foil)", "Vivid Voltage", "N/A");
        let selection = Selection { non_foil: None, foil: Some(&foil) };
        assert_eq!(
            format(&Resolution::Matched(selection), &query("pikachu"), "Streamer"),
            "Streamer, Card: pikachu vmax (Vivid Voltage) | Regular: Not found | Foil: N/A"
        );
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(389)]
    #[case(390)]
    fn test_short_messages_untouched(#[case] length: usize) {
        let message = "x".repeat(length);
        assert_eq!(truncate(message.clone()), message);
    }

    #[rstest]
    #[case(391)]
    #[case(1000)]
    fn test_long_messages_truncated(#[case] length: usize) {
        let message = truncate("x".repeat(length));
        assert_eq!(message.chars().count(), MAX_MESSAGE_CHARS);
        assert!(message.ends_with("..."));
        assert_eq!(&message[..387], "x".repeat(387));
    }

    #[test]
    fn test_truncation_counts_characters() {
        let message = truncate("é".repeat(400));
        assert_eq!(message.chars().count(), MAX_MESSAGE_CHARS);
        assert!(message.starts_with(&"é".repeat(387)));
        assert!(message.ends_with("..."));
    }

    #[test]
    fn test_long_usernames_still_bounded() {
        let reply = Reply::new("Card: ".to_string() + &"a".repeat(380));
        let message = reply.for_user(&"u".repeat(50));
        assert_eq!(message.chars().count(), MAX_MESSAGE_CHARS);
        assert!(message.ends_with("..."));
    }
}

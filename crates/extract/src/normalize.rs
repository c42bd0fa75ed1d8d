use crate::consts::{self, FOIL_MARKER, FOIL_SUFFIX};
use crate::models::{Listing, RawListing};
use crate::price::{PRICE_UNKNOWN, parse_price};
use tracing::instrument;

/// Turn a scraped listing into a [`Listing`].
///
/// Returns `None` (the record is discarded) when the title is missing or blank.
/// A missing set name becomes an empty string and a missing or blank price
/// becomes [`PRICE_UNKNOWN`].
///
/// ```rust
/// use pricebot_extract::{RawListing, normalize};
/// let listing = normalize(RawListing::titled("Foo (Foil)")).unwrap();
/// assert!(listing.is_foil);
/// assert_eq!(listing.clean_title, "foo");
/// ```
pub fn normalize(raw: RawListing) -> Option<Listing> {
    let title = raw.title.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())?;
    let set_name = raw.set_name.map(|s| s.trim().to_string()).unwrap_or_default();
    let price_text = raw
        .price_text
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| PRICE_UNKNOWN.to_string());
    let lowered = title.to_lowercase();
    let is_foil = lowered.contains(FOIL_MARKER);
    let is_special = consts::SPECIAL_PRINT_REGEX.is_match(&format!("{} {}", title, set_name));
    Some(Listing {
        clean_title: clean_title(&lowered),
        price: parse_price(&price_text),
        title,
        set_name,
        price_text,
        is_foil,
        is_special,
    })
}

/// Normalize a whole results page, preserving the original order and dropping
/// untitled records.
#[instrument(level = "debug", skip(raws))]
pub fn normalize_all(raws: impl IntoIterator<Item = RawListing>) -> Vec<Listing> {
    let listings: Vec<Listing> = raws.into_iter().filter_map(normalize).collect();
    tracing::debug!(count = listings.len(), "Normalized listings");
    listings
}

fn clean_title(lowered: &str) -> String {
    lowered.replace(FOIL_SUFFIX, "").replace(FOIL_MARKER, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(RawListing::default())]
    #[case(RawListing::titled(""))]
    #[case(RawListing::titled("   "))]
    #[case(RawListing { title: None, set_name: Some("Base Set".to_string()), price_text: Some("$1.00".to_string()) })]
    fn test_untitled_is_discarded(#[case] raw: RawListing) {
        assert_eq!(normalize(raw), None);
    }

    #[test]
    fn test_foil_title() {
        let listing = normalize(RawListing::titled("Foo (Foil)")).unwrap();
        assert!(listing.is_foil);
        assert_eq!(listing.clean_title, "foo");
        assert_eq!(listing.title, "Foo (Foil)");
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let listing = normalize(RawListing::titled("Charizard")).unwrap();
        assert_eq!(listing.set_name, "");
        assert_eq!(listing.price_text, PRICE_UNKNOWN);
        assert_eq!(listing.price, None);
        assert!(!listing.is_foil);
        assert!(!listing.is_special);
    }

    #[rstest]
    #[case("Pikachu VMAX (Foil)", "pikachu vmax")]
    #[case("Pikachu VMAX Foil", "pikachu vmax")]
    #[case("FOIL Luke Skywalker", "luke skywalker")]
    #[case("Charizard VMAX (Secret Rare)", "charizard vmax (secret rare)")]
    fn test_clean_title(#[case] title: &str, #[case] expected: &str) {
        assert_eq!(normalize(RawListing::titled(title)).unwrap().clean_title, expected);
    }

    #[rstest]
    #[case("Darth Vader (Showcase)", "Spark of Rebellion", true)]
    #[case("Darth Vader", "Spark of Rebellion Promo", true)]
    #[case("Darth Vader - Hyperspace", "", true)]
    #[case("Black Lotus (Extended Art)", "", true)]
    #[case("Sol Ring", "Commander: Organized Play", true)]
    #[case("Luke Skywalker (Serialized)", "Shadows of the Galaxy", true)]
    #[case("Darth Vader", "Spark of Rebellion", false)]
    #[case("Pikachu VMAX (Foil)", "Vivid Voltage", false)]
    fn test_special_print(#[case] title: &str, #[case] set_name: &str, #[case] expected: bool) {
        let listing = normalize(RawListing::new(title, set_name, "$1.00")).unwrap();
        assert_eq!(listing.is_special, expected);
    }

    #[rstest]
    #[case::absent(None)]
    #[case::empty(Some(""))]
    #[case::whitespace(Some("  "))]
    fn test_blank_price_is_unknown(#[case] price_text: Option<&str>) {
        let raw = RawListing { price_text: price_text.map(str::to_string), ..RawListing::titled("Charizard") };
        let listing = normalize(raw).unwrap();
        assert_eq!(listing.price_text, PRICE_UNKNOWN);
        assert_eq!(listing.price, None);
    }

    #[test]
    fn test_price_is_parsed() {
        let listing = normalize(RawListing::new("Pikachu", "Base Set", " $4.50 ")).unwrap();
        assert_eq!(listing.price_text, "$4.50");
        assert_eq!(listing.price, Some(4.5));
    }

    #[test]
    fn test_normalize_all_keeps_order() {
        let listings = normalize_all([
            RawListing::titled("First"),
            RawListing::titled(""),
            RawListing::titled("Second"),
        ]);
        let titles: Vec<_> = listings.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, ["First", "Second"]);
    }
}

/// Price text used when a listing has no market price.
pub const PRICE_UNKNOWN: &str = "N/A";

/// Parse scraped price text into a number.
///
/// Everything that isn't an ASCII digit or a decimal point is thrown away
/// before parsing, so currency symbols and thousands separators don't matter.
/// Returns `None` for empty text, the [`PRICE_UNKNOWN`] sentinel, and anything
/// that doesn't leave a parseable number behind (`"Out of stock"`, `"1.2.3"`).
///
/// ```rust
/// use pricebot_extract::parse_price;
/// assert_eq!(parse_price("$1,234.50"), Some(1234.5));
/// assert_eq!(parse_price("N/A"), None);
/// ```
pub fn parse_price(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() || text == PRICE_UNKNOWN {
        return None;
    }
    let digits: String = text.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
    digits.parse::<f64>().ok().filter(|value| value.is_finite())
}

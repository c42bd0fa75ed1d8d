use std::fmt::{Display, Formatter, Result as FmtResult};

/// A scraped listing after [normalization](crate::normalize).
///
/// Every field is derived deterministically from the [`RawListing`](crate::RawListing)
/// it was built from; a `Listing` with an empty title never exists.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    /// Title as displayed on the marketplace.
    pub title: String,
    /// Lowercased title with the foil markers removed.
    pub clean_title: String,
    /// Set (expansion) name, empty if unknown.
    pub set_name: String,
    /// Market price as displayed, [`PRICE_UNKNOWN`](crate::PRICE_UNKNOWN) if missing.
    pub price_text: String,
    /// Parsed market price, `None` when the text isn't a number.
    pub price: Option<f64>,
    pub is_foil: bool,
    /// Serialized, showcase, promo and other limited/alternate prints.
    pub is_special: bool,
}
impl Listing {
    /// A "main set" listing: an ordinary print with a known price.
    pub fn is_main_set_priced(&self) -> bool {
        !self.is_special && self.price.is_some()
    }
}

impl Display for Listing {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} ({})", self.title, self.set_name)
    }
}

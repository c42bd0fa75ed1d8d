use pricebot_extract::Listing;

/// The best non-foil and best foil listing among the matches. Either (but,
/// given at least one candidate, never both) may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Selection<'a> {
    pub non_foil: Option<&'a Listing>,
    pub foil: Option<&'a Listing>,
}

/// Split the candidates into non-foil and foil, then pick the best of each
/// with [`prioritize_main_set`].
pub fn select_best<'a>(candidates: &[&'a Listing]) -> Selection<'a> {
    let (foil, non_foil): (Vec<&Listing>, Vec<&Listing>) =
        candidates.iter().copied().partition(|listing| listing.is_foil);
    Selection {
        non_foil: prioritize_main_set(&non_foil),
        foil: prioritize_main_set(&foil),
    }
}

/// Pick the representative listing of one variant:
///
/// 1. the cheapest priced main-set (non-special) print, otherwise
/// 2. the cheapest priced print of any kind, otherwise
/// 3. the first listing (price unknown).
///
/// Ties on price go to whichever came first on the page.
pub fn prioritize_main_set<'a>(listings: &[&'a Listing]) -> Option<&'a Listing> {
    cheapest(listings.iter().copied().filter(|listing| listing.is_main_set_priced()))
        .or_else(|| cheapest(listings.iter().copied()))
        .or_else(|| listings.first().copied())
}

fn cheapest<'a>(listings: impl Iterator<Item = &'a Listing>) -> Option<&'a Listing> {
    // `min_by` keeps the first of several equal elements.
    listings
        .filter_map(|listing| listing.price.map(|price| (price, listing)))
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, listing)| listing)
}

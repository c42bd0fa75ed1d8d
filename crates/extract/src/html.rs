//! Pulling raw listings out of a saved marketplace results page.
//!
//! Marketplaces redesign their markup often enough that no single set of
//! selectors survives for long, so extraction runs an ordered cascade of
//! [`Strategy`]s and stops at the first one that finds anything.

use crate::consts;
use crate::error::{ErrorKind, Result};
use crate::models::RawListing;
use crate::price::PRICE_UNKNOWN;
use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;
use tracing::instrument;

/// One way of locating product cards (and their fields) in a results page.
pub trait Strategy: Send + Sync {
    /// Used for logging only.
    fn name(&self) -> &str;

    /// Every listing this strategy can find, in page order. An empty result
    /// means "try the next strategy".
    fn extract(&self, document: &Html) -> Vec<RawListing>;
}

/// A [`Strategy`] described by four CSS selectors: one for the product card,
/// and three evaluated inside each card for its title, set name and price.
#[derive(Debug, Clone)]
pub struct CardSelectors {
    name: String,
    card: Selector,
    title: Selector,
    set_name: Selector,
    price: Selector,
}
impl CardSelectors {
    /// Build a strategy from user-supplied selectors.
    pub fn parse(name: impl Into<String>, card: &str, title: &str, set_name: &str, price: &str) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            card: Self::selector(card)?,
            title: Self::selector(title)?,
            set_name: Self::selector(set_name)?,
            price: Self::selector(price)?,
        })
    }

    fn selector(css: &str) -> Result<Selector> {
        // Selector errors borrow the input, so they can't be raised as-is.
        match Selector::parse(css) {
            Ok(selector) => Ok(selector),
            Err(e) => {
                tracing::debug!(css, error = ?e, "Rejected CSS selector");
                exn::bail!(ErrorKind::InvalidSelector(css.to_string()))
            },
        }
    }

    fn text_of(card: &ElementRef<'_>, selector: &Selector) -> Option<String> {
        card.select(selector).next().map(|el| el.text().collect::<String>().trim().to_string())
    }
}
impl Strategy for CardSelectors {
    fn name(&self) -> &str {
        &self.name
    }

    fn extract(&self, document: &Html) -> Vec<RawListing> {
        document
            .select(&self.card)
            .map(|card| RawListing {
                title: Some(Self::text_of(&card, &self.title).unwrap_or_default()),
                set_name: Some(Self::text_of(&card, &self.set_name).unwrap_or_default()),
                price_text: Some(Self::text_of(&card, &self.price).unwrap_or_else(|| PRICE_UNKNOWN.to_string())),
            })
            .collect()
    }
}

/// Built-in cascade, most specific layout first.
const DEFAULT_CASCADE: &[[&str; 5]] = &[
    [
        "product-card",
        ".product-card",
        ".product-card__title.truncate",
        ".product-card__set-name__variant",
        ".product-card__market-price--value",
    ],
    [
        "search-result",
        ".search-result",
        ".search-result__title",
        ".search-result__subtitle",
        ".search-result__market-price--value",
    ],
    [
        "data-testid",
        "[data-testid='product-card']",
        "[data-testid='product-title']",
        "[data-testid='product-set']",
        "[data-testid='product-price']",
    ],
];

pub type BoxStrategy = Arc<dyn Strategy>;

/// Runs a cascade of [`Strategy`]s over a results page.
#[derive(Clone)]
pub struct Extractor {
    strategies: Vec<BoxStrategy>,
}
impl Extractor {
    pub fn new(strategies: Vec<BoxStrategy>) -> Self {
        Self { strategies }
    }

    /// Append a strategy to the end of the cascade.
    pub fn with_strategy(mut self, strategy: impl Strategy + 'static) -> Self {
        self.strategies.push(Arc::new(strategy));
        self
    }

    pub fn strategy_names(&self) -> impl Iterator<Item = &str> {
        self.strategies.iter().map(|s| s.name())
    }

    /// Extract listings from raw page HTML, using the first strategy that
    /// finds at least one product card.
    #[instrument(skip_all, fields(html_size = html.len(), strategy))]
    pub fn extract(&self, html: &str) -> Vec<RawListing> {
        let document = Html::parse_document(html);
        for strategy in &self.strategies {
            let listings = strategy.extract(&document);
            tracing::trace!(strategy = strategy.name(), found = listings.len(), "Tried extraction strategy");
            if !listings.is_empty() {
                tracing::Span::current().record("strategy", strategy.name());
                return listings;
            }
        }
        Vec::new()
    }
}
impl Default for Extractor {
    fn default() -> Self {
        let strategies = DEFAULT_CASCADE
            .iter()
            .filter_map(|[name, card, title, set_name, price]| {
                CardSelectors::parse(*name, card, title, set_name, price).ok()
            })
            .map(|s| Arc::new(s) as BoxStrategy)
            .collect();
        Self::new(strategies)
    }
}
impl std::fmt::Debug for Extractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extractor").field("strategies", &self.strategy_names().collect::<Vec<_>>()).finish()
    }
}

/// Returns `true` if the page is an anti-bot interstitial (Cloudflare
/// challenge, "Access Denied", captcha) rather than search results.
#[instrument(skip(html), fields(html_size = html.len()))]
pub fn is_blocked(html: &str) -> bool {
    let document = Html::parse_document(html);
    let blocked_title = document
        .select(&consts::PAGE_TITLE_SELECTOR)
        .next()
        .is_some_and(|el| consts::BLOCKED_TITLE_REGEX.is_match(&el.text().collect::<String>()));
    blocked_title || document.select(&consts::CAPTCHA_SELECTOR).next().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRODUCT_CARDS: &str = r#"
        <html><body>
            <div class="product-card">
                <span class="product-card__title truncate"> Pikachu VMAX </span>
                <span class="product-card__set-name__variant">Vivid Voltage</span>
                <span class="product-card__market-price--value">$45.00</span>
            </div>
            <div class="product-card">
                <span class="product-card__title truncate">Pikachu VMAX (Foil)</span>
                <span class="product-card__set-name__variant">Vivid Voltage</span>
            </div>
        </body></html>
    "#;

    const SEARCH_RESULTS: &str = r#"
        <html><body>
            <div class="search-result">
                <a class="search-result__title">Charizard</a>
                <span class="search-result__subtitle">Base Set</span>
                <span class="search-result__market-price--value">$300.00</span>
            </div>
        </body></html>
    "#;

    #[test]
    fn test_default_cascade_first_layout() {
        let listings = Extractor::default().extract(PRODUCT_CARDS);
        assert_eq!(
            listings,
            vec![
                RawListing::new("Pikachu VMAX", "Vivid Voltage", "$45.00"),
                RawListing::new("Pikachu VMAX (Foil)", "Vivid Voltage", PRICE_UNKNOWN),
            ]
        );
    }

    #[test]
    fn test_default_cascade_falls_through() {
        let listings = Extractor::default().extract(SEARCH_RESULTS);
        assert_eq!(listings, vec![RawListing::new("Charizard", "Base Set", "$300.00")]);
    }

    #[test]
    fn test_no_cards_found() {
        assert!(Extractor::default().extract("<html><body><p>No results</p></body></html>").is_empty());
    }

    #[test]
    fn test_custom_strategy_appended() {
        let html = r#"<ul><li class="c"><b class="t">Sol Ring</b><i class="s">Commander</i><em class="p">$1.50</em></li></ul>"#;
        let custom = CardSelectors::parse("custom", "li.c", ".t", ".s", ".p").unwrap();
        let extractor = Extractor::default().with_strategy(custom);
        assert_eq!(extractor.strategy_names().last(), Some("custom"));
        assert_eq!(extractor.extract(html), vec![RawListing::new("Sol Ring", "Commander", "$1.50")]);
    }

    #[test]
    fn test_invalid_selector() {
        let err = CardSelectors::parse("broken", "div[", ".t", ".s", ".p").unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidSelector(css) if css == "div["));
    }

    #[test]
    fn test_blocked_pages() {
        assert!(is_blocked("<html><head><title>Just a moment...</title></head><body></body></html>"));
        assert!(is_blocked("<html><head><title>Access Denied</title></head></html>"));
        assert!(is_blocked(r#"<html><body><form id="challenge-form"></form></body></html>"#));
        assert!(!is_blocked(PRODUCT_CARDS));
    }
}

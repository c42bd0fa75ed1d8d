//! Marketplace listing models and the steps that turn a scraped results page
//! into them.
//!
//! - [`parse_price`] turns market price text into a number (or nothing),
//! - [`normalize`] turns a [`RawListing`] into a [`Listing`] with derived
//!   foil/special-print flags and a cleaned title, and
//! - [`Extractor`] pulls [`RawListing`]s out of a saved results page by
//!   trying an ordered cascade of [`Strategy`]s.

mod consts;
pub mod error;
mod html;
pub mod models;
mod normalize;
mod price;

pub use crate::consts::{FOIL_MARKER, SPECIAL_PRINT_KEYWORDS};
pub use crate::html::{BoxStrategy, CardSelectors, Extractor, Strategy, is_blocked};
pub use crate::models::{Listing, RawListing};
pub use crate::normalize::{normalize, normalize_all};
pub use crate::price::{PRICE_UNKNOWN, parse_price};

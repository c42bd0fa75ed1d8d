//! Price lookups with a short-lived reply cache in front of the listing
//! source.
//!
//! ```text
//! query ─▶ cache ─(miss)─▶ listing source ─▶ normalize ─▶ engine ─▶ cache
//!            │                                                     │
//!            └─(hit)──────────────▶ reply ◀────────────────────────┘
//! ```
//!
//! This is the only place where failures turn into text: the source and the
//! cache report typed errors, [`PriceLookup`] answers with a message either
//! way.

mod construct;
pub mod error;
mod lookup;

pub use crate::construct::extractor;
pub use crate::lookup::PriceLookup;

//! Matching, ranking and selection engine.
//!
//! Given a [`MatchQuery`] and the normalized [`Listing`]s of a results page,
//! the engine:
//!
//! 1. filters the listings with the fuzzy [`Matcher`],
//! 2. picks the best non-foil and best foil variant ([`select_best`]), and
//! 3. renders a bounded-length [`Reply`].
//!
//! Everything in here is pure and synchronous; fetching listings and caching
//! replies is someone else's job.

mod format;
mod matcher;
mod query;
mod resolve;
mod select;

pub use crate::format::{DEFAULT_USER, MAX_MESSAGE_CHARS, Reply, format, truncate};
pub use crate::matcher::{DEFAULT_COVERAGE_THRESHOLD, DEFAULT_LENGTH_TOLERANCE, Matcher, is_match};
pub use crate::query::MatchQuery;
pub use crate::resolve::{Engine, Resolution, resolve};
pub use crate::select::{Selection, prioritize_main_set, select_best};
pub use pricebot_extract::Listing;

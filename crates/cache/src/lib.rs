//! In-memory response cache.
//!
//! Replies are memoized per normalized query (trimmed, lowercased) for a
//! short time-to-live, so a chat full of people asking about the same card
//! only hits the marketplace once. Entries go through four states:
//!
//! - **Absent**: never written, or evicted.
//! - **Fresh**: written less than the TTL ago; served from the cache.
//! - **Stale**: older than the TTL; never served, removed on the next lookup.
//! - **Evicted**: removed by a lookup miss or by the background
//!   [sweep](ResponseCache::sweep) once older than the retention window.
//!
//! The cache is the only shared mutable state in the system; it owns its map,
//! its configuration and its [`Clock`], and is shared behind an [`Arc`](std::sync::Arc).

mod clock;
mod config;
pub mod error;
mod store;
mod sweeper;

pub use crate::clock::{Clock, ClockHandle, SystemClock};
#[cfg(any(test, feature = "mock"))]
pub use crate::clock::MockClock;
pub use crate::config::CacheConfig;
pub use crate::store::{EntryState, ResponseCache, normalize_key};
pub use crate::sweeper::Sweeper;

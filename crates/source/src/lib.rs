pub mod backend;
pub mod error;

pub use crate::backend::ListingSource;
pub use pricebot_extract::RawListing;
use std::sync::Arc;

pub type SourceHandle = Arc<dyn ListingSource + Send + Sync>;

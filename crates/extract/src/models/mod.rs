mod listing;
mod raw;

pub use self::listing::Listing;
pub use self::raw::RawListing;

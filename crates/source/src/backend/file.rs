use crate::error::{ErrorKind, Result};
use crate::ListingSource;
use async_trait::async_trait;
use exn::ResultExt;
use pricebot_extract::{Extractor, RawListing, is_blocked};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::instrument;

/// Listings from a results page saved to disk.
///
/// `.json` files are read as an array of listing objects (`title`, `setName`,
/// `priceText`); anything else is treated as the page's HTML and run through
/// the [`Extractor`] cascade. The query is ignored: the page already *is* the
/// result of a search.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    extractor: Extractor,
}
impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            extractor: Extractor::default(),
        }
    }

    /// Replace the default extraction cascade (HTML pages only).
    pub fn with_extractor(mut self, extractor: Extractor) -> Self {
        self.extractor = extractor;
        self
    }

    fn is_json(&self) -> bool {
        self.path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    }

    fn map_io_error(e: std::io::Error, path: &Path) -> ErrorKind {
        match e.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied(path.to_path_buf()),
            _ => ErrorKind::Io(e),
        }
    }
}

#[async_trait]
impl ListingSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch(&self, query: &str) -> Result<Vec<RawListing>> {
        let contents = fs::read_to_string(&self.path).await.map_err(|e| Self::map_io_error(e, &self.path))?;
        if self.is_json() {
            return serde_json::from_str(&contents).or_raise(|| ErrorKind::InvalidData);
        }
        if is_blocked(&contents) {
            exn::bail!(ErrorKind::Blocked);
        }
        let listings = self.extractor.extract(&contents);
        tracing::debug!(count = listings.len(), "Extracted listings from saved page");
        Ok(listings)
    }
}

//! Local snapshot source.
//!
//! Reads a bundled `{ "Items": [...] }` document on every call and serves the
//! requested slice of it, fabricating the page metadata the remote API would
//! have sent.  Nothing is cached between calls.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use super::{FeedItem, FeedSource, PageRequest, PageResponse};
use crate::error::{Result, SourceError};

/// On-disk shape of the snapshot.  Any pagination fields it carries are
/// ignored.
#[derive(Debug, Deserialize)]
struct Snapshot {
    #[serde(rename = "Items", default)]
    items: Vec<FeedItem>,
}

pub struct LocalSource {
    path: PathBuf,
}

impl LocalSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Slice one page out of the full record list.
    ///
    /// A page that starts past the end of the data is empty, not an error.
    pub fn paginate(items: Vec<FeedItem>, request: PageRequest) -> PageResponse {
        let total_items = items.len();
        let (start, end) = request.bounds();
        let page: Vec<FeedItem> = items
            .into_iter()
            .skip(start)
            .take(end - start)
            .collect();

        PageResponse {
            total_items,
            page_number: request.page_number,
            page_size: request.page_size,
            items: page,
        }
    }

    fn load(&self) -> Result<Vec<FeedItem>> {
        let raw = fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        let snapshot: Snapshot = serde_json::from_str(&raw)?;
        Ok(snapshot.items)
    }
}

impl FeedSource for LocalSource {
    fn name(&self) -> &str {
        "Local File"
    }

    fn fetch_page(&self, request: PageRequest) -> Result<PageResponse> {
        let items = self.load()?;
        debug!(
            path = %self.path.display(),
            total = items.len(),
            page = request.page_number,
            size = request.page_size,
            "slicing local snapshot"
        );
        Ok(Self::paginate(items, request))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Request / response shapes exchanged with every feed source.

use serde::{Deserialize, Serialize};

use super::FeedItem;

/// Which page to fetch.  Serialised as the remote request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    /// 1-based page number.
    pub page_number: usize,
    pub page_size: usize,
}

impl PageRequest {
    pub fn new(page_number: usize, page_size: usize) -> Self {
        Self {
            page_number,
            page_size,
        }
    }

    /// Half-open index range `[start, end)` this page covers in the full feed.
    pub fn bounds(&self) -> (usize, usize) {
        let start = self.page_number.saturating_sub(1).saturating_mul(self.page_size);
        (start, start.saturating_add(self.page_size))
    }
}

/// One page of the feed plus the total record count across all pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PageResponse {
    pub total_items: usize,
    #[serde(default)]
    pub page_number: usize,
    #[serde(default)]
    pub page_size: usize,
    #[serde(default)]
    pub items: Vec<FeedItem>,
}

//! Feed source abstraction layer.
//!
//! This module defines the [`FeedSource`] trait, the record type
//! ([`FeedItem`]) and the page shapes every source speaks.  Two concrete
//! strategies live in sub-modules:
//!
//! * [`remote`]: asks the QueryFeed HTTP endpoint for one page.
//! * [`local`]: reads a bundled JSON snapshot and slices it locally.
//!
//! Both return the same [`PageResponse`], so the table view never needs to
//! know which one is active.
//!
//! ## For contributors: adding a new source
//!
//! 1. Create a new file in this directory (e.g. `csv.rs`).
//! 2. Define a struct and implement [`FeedSource`] for it.
//! 3. Add `mod csv;` below and re-export your struct in the `pub use` block.
//! 4. Add a [`SourceKind`] variant and wire it into `Fetcher::new` in
//!    `fetch.rs`.

mod feed_item;
mod local;
mod page;
mod remote;

pub use feed_item::{render_value, FeedItem};
pub use local::LocalSource;
pub use page::{PageRequest, PageResponse};
pub use remote::RemoteSource;

use std::fmt;

use crate::error::Result;

/// Trait that every feed source must implement.
///
/// Fetches run on worker threads, so implementations must be [`Send`] and
/// [`Sync`].  Sources keep no state between calls.
pub trait FeedSource: Send + Sync {
    /// Human-readable label shown in the status bar.
    fn name(&self) -> &str;

    /// Fetch one page of the feed.
    ///
    /// The returned page never holds more than `request.page_size` items.
    fn fetch_page(&self, request: PageRequest) -> Result<PageResponse>;
}

/// Caller-side toggle selecting which strategy serves the next fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SourceKind {
    #[default]
    Remote,
    Local,
}

impl SourceKind {
    pub fn toggled(self) -> Self {
        match self {
            Self::Remote => Self::Local,
            Self::Local => Self::Remote,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote => f.write_str("API"),
            Self::Local => f.write_str("Local File"),
        }
    }
}

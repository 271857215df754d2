//! Background page fetching.
//!
//! Every dispatched fetch runs on its own worker thread and reports back to
//! the UI thread over an [`mpsc`] channel.  Nothing is cancelled: if the user
//! pages quickly, several fetches may be in flight at once.  Each carries the
//! sequence number it was dispatched with, and [`App::apply_fetch`] drops any
//! result that is not the latest.
//!
//! [`App::apply_fetch`]: crate::app::App::apply_fetch

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use tracing::debug;

use crate::error::Result;
use crate::source::{FeedSource, PageRequest, PageResponse, SourceKind};

/// A fetch the view wants performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    /// Monotonically increasing dispatch number.
    pub seq: u64,
    pub source: SourceKind,
    pub request: PageRequest,
}

/// Messages sent from a fetch worker to the UI thread.
#[derive(Debug)]
pub struct FetchMsg {
    pub seq: u64,
    pub source: SourceKind,
    pub result: Result<PageResponse>,
}

/// Owns both strategies and the sending half of the result channel.
pub struct Fetcher {
    remote: Arc<dyn FeedSource>,
    local: Arc<dyn FeedSource>,
    tx: mpsc::Sender<FetchMsg>,
}

impl Fetcher {
    /// Returns the fetcher plus the receiver the main loop should drain on
    /// every tick.
    pub fn new(
        remote: Arc<dyn FeedSource>,
        local: Arc<dyn FeedSource>,
    ) -> (Self, mpsc::Receiver<FetchMsg>) {
        let (tx, rx) = mpsc::channel();
        (Self { remote, local, tx }, rx)
    }

    fn source(&self, kind: SourceKind) -> Arc<dyn FeedSource> {
        match kind {
            SourceKind::Remote => Arc::clone(&self.remote),
            SourceKind::Local => Arc::clone(&self.local),
        }
    }

    /// Run `ticket` on a worker thread.
    pub fn dispatch(&self, ticket: FetchTicket) {
        let source = self.source(ticket.source);
        let tx = self.tx.clone();
        debug!(
            seq = ticket.seq,
            source = source.name(),
            page = ticket.request.page_number,
            size = ticket.request.page_size,
            "dispatching fetch"
        );

        thread::spawn(move || {
            let result = source.fetch_page(ticket.request);
            // If the receiver is gone the main thread has exited.
            let _ = tx.send(FetchMsg {
                seq: ticket.seq,
                source: ticket.source,
                result,
            });
        });
    }
}

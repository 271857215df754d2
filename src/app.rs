use chrono::Local;
use ratatui::widgets::TableState;
use tracing::{debug, warn};

use crate::fetch::{FetchMsg, FetchTicket};
use crate::pagination::{total_pages, PageSize};
use crate::schema::{self, Column, Schema};
use crate::source::{FeedItem, PageRequest, SourceKind};

/// Longest text the page-jump field accepts.
const PAGE_INPUT_MAX: usize = 9;

/// What keypresses currently drive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Browse,
    /// Typing into the "go to page" field.
    PageJump,
}

pub struct App {
    /// Records of the last successfully loaded page.
    pub items: Vec<FeedItem>,
    /// Field names learned from the active source.
    pub schema: Schema,
    /// Current 1-based page.
    pub page_number: usize,
    pub page_size: PageSize,
    /// Total records across all pages, from the last successful fetch.
    pub total_items: usize,
    /// "Go to page" text being edited.  Only ASCII digits are accepted.
    pub page_input: String,
    pub source: SourceKind,
    pub loading: bool,
    /// Message of the last failed fetch, cleared when a new one starts.
    pub error: Option<String>,
    pub mode: InputMode,
    /// Row selection state for scrolling.
    pub table_state: TableState,
    /// Index of the first field column shown (the "#" column is pinned).
    pub column_offset: usize,
    /// Whether the user has requested to quit.
    pub quit: bool,
    /// Last fetch status message.
    pub status: String,
    next_seq: u64,
    /// Most recently dispatched fetch; only its result is applied.
    latest: Option<FetchTicket>,
    /// Fetch that produced `items`.
    loaded: Option<FetchTicket>,
    pending: Option<FetchTicket>,
}

impl App {
    /// Create the view state and queue the initial fetch of page 1.
    pub fn new(source: SourceKind, page_size: PageSize) -> Self {
        let mut app = Self {
            items: Vec::new(),
            schema: Schema::new(),
            page_number: 1,
            page_size,
            total_items: 0,
            page_input: "1".into(),
            source,
            loading: false,
            error: None,
            mode: InputMode::Browse,
            table_state: TableState::default(),
            column_offset: 0,
            quit: false,
            status: "Starting…".into(),
            next_seq: 0,
            latest: None,
            loaded: None,
            pending: None,
        };
        app.request_fetch();
        app
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total_items, self.page_size.get())
    }

    pub fn columns(&self) -> Vec<Column> {
        self.schema.columns(&self.items)
    }

    /// Feed position of row `row_index` of the loaded page.
    pub fn ordinal(&self, row_index: usize) -> usize {
        let request = self
            .loaded
            .map(|t| t.request)
            .unwrap_or_else(|| PageRequest::new(self.page_number, self.page_size.get()));
        schema::ordinal(request.page_number, request.page_size, row_index)
    }

    // -- fetch lifecycle -----------------------------------------------------

    fn request_fetch(&mut self) {
        self.next_seq += 1;
        let ticket = FetchTicket {
            seq: self.next_seq,
            source: self.source,
            request: PageRequest::new(self.page_number, self.page_size.get()),
        };
        self.latest = Some(ticket);
        self.pending = Some(ticket);
        self.loading = true;
        self.error = None;
        self.status = format!("Loading page {} from {}…", self.page_number, self.source);
    }

    /// Hand the queued fetch (if any) to the caller for dispatch.
    pub fn take_pending_fetch(&mut self) -> Option<FetchTicket> {
        self.pending.take()
    }

    /// Apply a finished fetch.  Results superseded by a newer dispatch are
    /// discarded; returns whether `msg` was applied.
    pub fn apply_fetch(&mut self, msg: FetchMsg) -> bool {
        let Some(latest) = self.latest.filter(|t| t.seq == msg.seq) else {
            debug!(seq = msg.seq, source = %msg.source, "discarding stale fetch result");
            return false;
        };
        self.loading = false;

        match msg.result {
            Ok(page) => {
                if self.loaded.map(|t| t.source) != Some(latest.source) {
                    self.schema.clear();
                }
                self.schema.observe(&page.items);
                self.total_items = page.total_items;
                self.items = page.items;
                self.loaded = Some(latest);
                self.table_state
                    .select(if self.items.is_empty() { None } else { Some(0) });
                self.column_offset = self
                    .column_offset
                    .min(self.schema.fields().len().saturating_sub(1));
                self.status = format!(
                    "Fetched {} items from {} at {}",
                    self.items.len(),
                    latest.source,
                    Local::now().format("%H:%M:%S")
                );
            }
            Err(e) => {
                warn!(seq = msg.seq, status = e.status(), error = %e, "fetch failed");
                self.error = Some(e.to_string());
                self.status = "Fetch failed".into();
            }
        }
        true
    }

    // -- pagination ----------------------------------------------------------

    fn goto_page(&mut self, page: usize) {
        self.page_input = page.to_string();
        if page != self.page_number {
            self.page_number = page;
            self.request_fetch();
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.page_number > 1 && !self.loading
    }

    pub fn can_go_forward(&self) -> bool {
        self.page_number < self.total_pages() && !self.loading
    }

    pub fn first_page(&mut self) {
        if self.can_go_back() {
            self.goto_page(1);
        }
    }

    pub fn previous_page(&mut self) {
        if self.can_go_back() {
            self.goto_page(self.page_number - 1);
        }
    }

    pub fn next_page(&mut self) {
        if self.can_go_forward() {
            self.goto_page(self.page_number + 1);
        }
    }

    pub fn last_page(&mut self) {
        if self.page_number != self.total_pages() && !self.loading {
            self.goto_page(self.total_pages());
        }
    }

    pub fn set_page_size(&mut self, size: PageSize) {
        if self.loading || (size == self.page_size && self.page_number == 1) {
            return;
        }
        self.page_size = size;
        self.page_number = 1;
        self.page_input = "1".into();
        self.request_fetch();
    }

    pub fn cycle_page_size(&mut self) {
        self.set_page_size(self.page_size.next());
    }

    pub fn toggle_source(&mut self) {
        if self.loading {
            return;
        }
        self.source = self.source.toggled();
        self.page_number = 1;
        self.page_input = "1".into();
        self.request_fetch();
    }

    // -- page jump -----------------------------------------------------------

    pub fn begin_page_jump(&mut self) {
        if !self.loading {
            self.mode = InputMode::PageJump;
        }
    }

    pub fn push_page_input(&mut self, c: char) {
        if self.mode == InputMode::PageJump
            && c.is_ascii_digit()
            && self.page_input.chars().count() < PAGE_INPUT_MAX
        {
            self.page_input.push(c);
        }
    }

    pub fn pop_page_input(&mut self) {
        if self.mode == InputMode::PageJump {
            self.page_input.pop();
        }
    }

    pub fn cancel_page_jump(&mut self) {
        self.mode = InputMode::Browse;
        self.page_input = self.page_number.to_string();
    }

    /// Jump to the typed page if it is in range, otherwise revert the text.
    pub fn submit_page_jump(&mut self) {
        self.mode = InputMode::Browse;
        match self.page_input.trim().parse::<usize>() {
            Ok(page) if (1..=self.total_pages()).contains(&page) => self.goto_page(page),
            _ => self.page_input = self.page_number.to_string(),
        }
    }

    // -- row / column navigation ---------------------------------------------

    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => (i + 1).min(self.items.len() - 1),
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn scroll_right(&mut self) {
        if self.column_offset + 1 < self.schema.fields().len() {
            self.column_offset += 1;
        }
    }

    pub fn scroll_left(&mut self) {
        self.column_offset = self.column_offset.saturating_sub(1);
    }
}

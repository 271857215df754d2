//! mafeed: a paged table viewer for a merger/acquisition event feed.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌──────────┐  FetchMsg  ┌──────────┐  draw()  ┌──────────┐
//! │ fetch.rs │ ─────────► │  app.rs  │ ───────► │  ui.rs   │
//! │ (worker) │  (channel) │ (state)  │          │ (render) │
//! └──────────┘            └──────────┘          └──────────┘
//!      ▲ dispatch(ticket)      ▲
//!      └──── main loop ────────┤ handle_key_event()
//!                         ┌──────────┐
//!                         │ input.rs │
//!                         └──────────┘
//! ```
//!
//! * **`source/`**: the `FeedSource` trait plus the remote (HTTP) and local
//!   (JSON snapshot) strategies.
//! * **`fetch`**: runs each page fetch on a worker thread.
//! * **`app`**: owns all view state (page, size, source, rows, errors).
//! * **`schema`**: derives table columns from the fetched records.
//! * **`ui`**: pure rendering of `App` state.
//! * **`input`**: maps key events to `App` mutations.
//! * **`main`**: wires config, logging, the terminal and the event loop
//!   together.

mod app;
mod config;
mod error;
mod fetch;
mod input;
mod logging;
mod pagination;
mod schema;
mod source;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;

use app::App;
use config::Config;
use fetch::Fetcher;
use source::{LocalSource, RemoteSource};

// ---------------------------------------------------------------------------
// RAII terminal guard
// ---------------------------------------------------------------------------

/// Manages terminal raw-mode and alternate-screen lifetime via [`Drop`].
///
/// Constructing this struct enters raw mode + alternate screen.  When the
/// value is dropped (normally or during stack unwinding) it restores the
/// terminal.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Install a panic hook that restores the terminal before printing the
/// panic message.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let config = Config::parse();
    logging::init_file_logger(&config.log_file, config.verbose)?;
    install_panic_hook();

    // -- configure feed sources ----------------------------------------------
    let remote = RemoteSource::new(
        config.base_url.clone(),
        config.developer_key.clone(),
        config.timeout(),
    )?;
    let local = LocalSource::new(&config.data_file);
    info!(
        endpoint = remote.endpoint().as_deref().unwrap_or("<unset>"),
        data_file = %local.path().display(),
        "feed sources configured"
    );
    let (fetcher, rx) = Fetcher::new(Arc::new(remote), Arc::new(local));

    // -- terminal setup (RAII: Drop restores on exit or panic) --------------
    let mut guard = TerminalGuard::new()?;
    let mut app = App::new(config.source, config.page_size);

    // -- main event loop -----------------------------------------------------
    // Each ~100 ms tick:
    //   1. Dispatch the fetch queued by the last state change, if any.
    //   2. Apply finished fetches.
    //   3. Render the UI.
    //   4. Poll for keyboard input (non-blocking, up to tick_rate).
    let tick_rate = Duration::from_millis(100);

    loop {
        if let Some(ticket) = app.take_pending_fetch() {
            fetcher.dispatch(ticket);
        }

        while let Ok(msg) = rx.try_recv() {
            app.apply_fetch(msg);
        }

        guard.terminal.draw(|f| ui::draw(&mut app, f))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key_event(&mut app, key);
            }
        }

        if app.quit {
            break;
        }
    }

    info!("exiting");
    Ok(())
}

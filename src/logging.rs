//! Tracing set-up.
//!
//! The terminal belongs to the TUI, so log lines go to a file instead of
//! stdout/stderr.  `RUST_LOG` overrides the verbosity flag.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_file_logger(path: &Path, verbose: u8) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let default_filter = match verbose {
        0 => "mafeed=info",
        1 => "mafeed=debug,info",
        _ => "mafeed=trace,debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false)
                .compact(),
        )
        .try_init()
        .context("installing tracing subscriber")?;
    Ok(())
}

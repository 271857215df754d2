//! Errors surfaced by feed sources.
//!
//! Every variant renders to a short human-readable message; that message is
//! what the table view shows after a failed fetch.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    /// Network failure, connection refused, timeout, bad URL.
    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The remote endpoint answered with a non-success status.
    #[error("API request failed: {reason}")]
    Status { status: u16, reason: String },

    /// The local snapshot could not be read.
    #[error("Failed to load test data: {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The body did not have the expected page shape.
    #[error("Failed to parse feed response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{what} is not configured")]
    Unconfigured { what: &'static str },
}

impl SourceError {
    /// HTTP status of a rejected request, if that is what failed.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SourceError>;

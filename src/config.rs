//! Command-line and environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};

use crate::pagination::PageSize;
use crate::source::SourceKind;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "mafeed",
    version,
    about = "Page through a merger/acquisition event feed in the terminal"
)]
pub struct Config {
    /// Base URL of the QueryFeed API (without the endpoint path).
    #[arg(long, env = "MAFEED_API_BASE_URL", value_name = "URL")]
    pub base_url: Option<String>,

    /// Static credential sent in the DeveloperKey header.
    #[arg(
        long,
        env = "MAFEED_DEVELOPER_KEY",
        default_value = "",
        hide_env_values = true,
        hide_default_value = true
    )]
    pub developer_key: String,

    /// Local JSON snapshot served by the "Local File" source.
    #[arg(
        long,
        env = "MAFEED_DATA_FILE",
        value_name = "FILE",
        default_value = "data/test-data.json"
    )]
    pub data_file: PathBuf,

    /// Source used for the first fetch.
    #[arg(long, value_enum, default_value_t = SourceKind::Remote)]
    pub source: SourceKind,

    /// Initial page size (25, 50 or 100).
    #[arg(long, default_value = "50", value_parser = parse_page_size)]
    pub page_size: PageSize,

    /// Per-request timeout in seconds.  Requests wait forever when unset.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// File that receives log output.
    #[arg(long, env = "MAFEED_LOG_FILE", default_value = "mafeed.log")]
    pub log_file: PathBuf,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}

fn parse_page_size(s: &str) -> Result<PageSize, String> {
    s.parse()
}

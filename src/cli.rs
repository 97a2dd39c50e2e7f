// src/cli.rs
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info, warn};

use crate::{
    config::{
        consts::{API_ROOT, DEFAULT_TIMEOUT_SECS},
        options::{AppOptions, CountrySelector, ExportFormat},
    },
    core::net::UreqTransport,
    credentials::Endpoints,
    data::Country,
    error::ScrapeError,
    file::{self, SaveSummary},
    progress::Progress,
    scrape::{self, Omission},
    session::Session,
    sources::api,
};

/// Fetch country leaders, add the lead paragraph of each leader's
/// encyclopedia page, and save everything as JSON or CSV.
#[derive(Parser, Debug, Clone)]
#[command(name = "leaders_scrape", version, about)]
pub struct Args {
    /// Output format.
    #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
    pub format: ExportFormat,

    /// Output file, or a directory (ending in a separator) for the default name.
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Leaders API base URL.
    #[arg(long, env = "LEADERS_API", default_value = API_ROOT)]
    pub api: String,

    /// Only these country codes (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub countries: Vec<String>,

    /// Enrich at most this many leaders per country.
    #[arg(long)]
    pub limit: Option<usize>,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Check the API's /status endpoint before starting.
    #[arg(long)]
    pub check_status: bool,

    /// Append log lines to this file instead of stderr.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Debug-level logging (ignored when RUST_LOG is set).
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn to_options(&self) -> AppOptions {
        let mut opts = AppOptions::default();
        opts.scrape.api_root = self.api.clone();
        opts.scrape.timeout = Duration::from_secs(self.timeout);
        opts.scrape.countries = CountrySelector::from_codes(&self.countries);
        opts.scrape.limit = self.limit;
        opts.export.format = self.format;
        if let Some(out) = &self.out {
            opts.export.set_path(&out.to_string_lossy());
        }
        opts
    }
}

/// Result of a full CLI run.
#[derive(Debug)]
pub struct Outcome {
    pub saved: SaveSummary,
    pub omissions: Vec<Omission>,
    pub paragraphs_found: usize,
    pub token_refreshes: usize,
}

/// Progress sink that reports through the log.
struct LogProgress;

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) { info!("processing {total} countries"); }
    fn item_failed(&mut self, country: &Country, reason: &str) { error!("{country}: {reason}"); }
    fn finish(&mut self) { info!("scrape finished"); }
}

pub fn run(args: &Args) -> Result<Outcome, ScrapeError> {
    let opts = args.to_options();
    let endpoints = Endpoints::new(&opts.scrape.api_root);
    let mut transport = UreqTransport::new(opts.scrape.timeout);

    if args.check_status {
        match api::check_status(&mut transport, &endpoints) {
            Ok(msg) => info!("API status: {msg}"),
            Err(e) => warn!("API status check failed: {e}"),
        }
    }

    let mut session = Session::open(transport, endpoints)?;
    let report = scrape::collect_leaders(&mut session, &opts.scrape, Some(&mut LogProgress))?;
    let paragraphs_found = report.paragraphs_found();

    for o in &report.omissions {
        warn!("omitted: {o}");
    }

    let saved = file::save_and_verify(&opts.export, &report.leaders)?;
    Ok(Outcome {
        saved,
        omissions: report.omissions,
        paragraphs_found,
        token_refreshes: report.token_refreshes,
    })
}

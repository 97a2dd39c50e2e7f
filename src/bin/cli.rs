// src/bin/cli.rs
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};

use leaders_scrape::{cli, log};

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = cli::Args::parse();
    log::init(args.verbose, args.log_file.as_deref()).wrap_err("initializing logging")?;

    let outcome = cli::run(&args).wrap_err("scrape failed")?;

    println!(
        "Saved {} leaders from {} countries to {}",
        outcome.saved.leaders,
        outcome.saved.countries,
        outcome.saved.path.display()
    );
    println!(
        "{} paragraphs found, {} omissions, {} token refreshes",
        outcome.paragraphs_found,
        outcome.omissions.len(),
        outcome.token_refreshes
    );
    Ok(())
}

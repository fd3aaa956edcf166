//! # Estimator CLI
//!
//! Command-line front end for `estimate_core`: print an estimate for a floor
//! plan, render it to PDF, or show the rate catalog.
//!
//! ```text
//! estimate_cli estimate --room kitchen:3x4 --room bedroom:3.5x4 --with-labor
//! estimate_cli invoice --plan house.json --out estimate.pdf
//! estimate_cli catalog --config rates.toml
//! ```

mod args;
mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;

use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let config = cli.config.as_deref();
    let settings = commands::load_settings(config)?;

    match &cli.command {
        Commands::Estimate { plan, json } => commands::run_estimate(plan, &settings, config.is_some(), *json),
        Commands::Invoice { plan, out } => commands::run_invoice(plan, &settings, config.is_some(), out),
        Commands::Catalog { json } => commands::run_catalog(&settings, *json),
    }
}

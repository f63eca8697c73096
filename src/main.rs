//! Sitekit - auxiliary tooling for a static blog.
//!
//! Three jobs the site templates delegate to tooling: full-text search over
//! the document index, per-post page enhancement (reading time, heading
//! anchors, table of contents), and social cover SVG-to-PNG conversion.

#![allow(dead_code)]

mod cli;
mod config;
mod covers;
mod logger;
mod post;
mod search;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    logger::set_verbose(cli.verbose);

    let config = SiteConfig::load(&cli.config)?;

    match &cli.command {
        Commands::Search { query, index } => {
            cli::search::run_search(query.as_deref(), index.as_ref(), &config)
        }
        Commands::Enhance { file, output, url } => {
            cli::enhance::run_enhance(file, output.as_ref(), url.as_deref(), &config)
        }
        Commands::Covers => {
            let report = cli::covers::run_covers(&config)?;
            // Every file gets attempted before the batch reports failure
            if report.any_failed() {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

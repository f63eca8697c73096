//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Sitekit static site tooling CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: sitekit.toml)
    #[arg(short = 'C', long, default_value = "sitekit.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Search the document index and print result markup
    #[command(visible_alias = "s")]
    Search {
        /// Query terms. Omit for the recent-documents listing.
        query: Option<String>,

        /// Index file path, overriding the configured one
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        index: Option<PathBuf>,
    },

    /// Enhance a rendered post page (reading time, heading ids, TOC)
    #[command(visible_alias = "e")]
    Enhance {
        /// Post HTML file to enhance
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,

        /// Write output to file instead of stdout
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,

        /// Canonical page URL, used by the copy-link button
        #[arg(short, long, value_hint = clap::ValueHint::Url)]
        url: Option<String>,
    },

    /// Convert social cover SVGs to PNG
    #[command(visible_alias = "c")]
    Covers,
}

#[allow(unused)]
impl Cli {
    pub const fn is_search(&self) -> bool {
        matches!(self.command, Commands::Search { .. })
    }
    pub const fn is_enhance(&self) -> bool {
        matches!(self.command, Commands::Enhance { .. })
    }
    pub const fn is_covers(&self) -> bool {
        matches!(self.command, Commands::Covers)
    }
}

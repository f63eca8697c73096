//! Covers command implementation.

use anyhow::Result;

use crate::config::SiteConfig;
use crate::covers::{self, BatchReport};

/// Execute covers command, returning the batch report for exit-status
/// handling in main.
pub fn run_covers(config: &SiteConfig) -> Result<BatchReport> {
    covers::run(config)
}

//! Enhance command implementation.
//!
//! Rewrites one rendered post page: reading time, heading anchor ids, and
//! the table of contents. The result goes to stdout unless `-o` names an
//! output file.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::SiteConfig;
use crate::post;
use crate::utils::plural_count;
use crate::{debug, log};

/// Execute enhance command
pub fn run_enhance(
    file: &Path,
    output: Option<&PathBuf>,
    url: Option<&str>,
    config: &SiteConfig,
) -> Result<()> {
    let html =
        fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))?;

    let enhanced = post::enhance(&html, url.unwrap_or(""), &config.post)
        .with_context(|| format!("failed to enhance {}", file.display()))?;

    match &enhanced.reading_time {
        Some(time) => {
            debug!(
                "enhance";
                "{}: {time} ({}), {}",
                file.display(),
                plural_count(enhanced.word_count, "word"),
                plural_count(enhanced.toc.len(), "heading")
            );
        }
        None => log!("enhance"; "{}: no content container, passed through", file.display()),
    }

    match output {
        Some(path) => {
            fs::write(path, &enhanced.html)
                .with_context(|| format!("failed to write {}", path.display()))?;
            log!("enhance"; "wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(enhanced.html.as_bytes())?;
        }
    }
    Ok(())
}

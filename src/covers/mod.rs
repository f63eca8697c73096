//! Social cover batch conversion.
//!
//! One-shot batch job over the site's vector covers: the site-wide default
//! image plus every SVG in the covers directory, each rasterized to a
//! same-named PNG sibling. A failing file is logged and skipped; the batch
//! always runs to the end and only then reports overall failure.

pub mod convert;

use crate::config::SiteConfig;
use crate::logger::{status_fail, status_ok};
use crate::utils::plural_count;
use crate::{debug, log};
use anyhow::{Context, Result};
use convert::RenderSpec;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of one batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub converted: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    pub fn any_failed(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Convert the default cover and every SVG in the covers directory.
///
/// Outputs are overwritten deterministically, so re-running is always safe.
pub fn run(config: &SiteConfig) -> Result<BatchReport> {
    let spec = RenderSpec {
        width: config.covers.width,
        height: config.covers.height,
        background: config.covers.background_rgb()?,
    };
    let options = convert::render_options();

    let mut report = BatchReport::default();

    let default_svg = config.root_join(&config.covers.default_image);
    if default_svg.exists() {
        convert_one(config, &default_svg, spec, &options, &mut report);
    } else {
        debug!("covers"; "no default cover at {}", default_svg.display());
    }

    let covers_dir = config.root_join(&config.covers.dir);
    if covers_dir.is_dir() {
        for svg in svg_files(&covers_dir)? {
            convert_one(config, &svg, spec, &options, &mut report);
        }
    } else {
        debug!("covers"; "no covers directory at {}", covers_dir.display());
    }

    if report.any_failed() {
        log!(
            "covers";
            "converted {}, {} failed",
            plural_count(report.converted.len(), "cover"),
            report.failed.len()
        );
    } else {
        log!("covers"; "converted {}", plural_count(report.converted.len(), "cover"));
    }

    Ok(report)
}

/// All `.svg` files in a directory, sorted for stable processing order.
fn svg_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("failed to read covers directory {}", dir.display()))?
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            let is_svg = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
            (is_svg && path.is_file()).then_some(path)
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Convert one file, capturing failure into the report instead of
/// propagating it.
fn convert_one(
    config: &SiteConfig,
    svg_path: &Path,
    spec: RenderSpec,
    options: &usvg::Options,
    report: &mut BatchReport,
) {
    let png_path = svg_path.with_extension("png");

    let result = fs::read(svg_path)
        .with_context(|| format!("failed to read {}", svg_path.display()))
        .and_then(|data| convert::convert_cover(&data, spec, options))
        .and_then(|png| {
            fs::write(&png_path, png)
                .with_context(|| format!("failed to write {}", png_path.display()))
        });

    match result {
        Ok(()) => {
            status_ok(&display_relative(config, &png_path));
            report.converted.push(png_path);
        }
        Err(e) => {
            status_fail(&display_relative(config, svg_path), &format!("{e:#}"));
            report.failed.push((svg_path.to_path_buf(), format!("{e:#}")));
        }
    }
}

/// Path relative to the project root, for log lines.
fn display_relative(config: &SiteConfig, path: &Path) -> String {
    path.strip_prefix(&config.root)
        .unwrap_or(path)
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="60" height="60">
<circle cx="30" cy="30" r="20" fill="#00ff00"/></svg>"##;

    /// Project layout with a default cover and `n` post covers.
    fn site(temp: &tempfile::TempDir, n: usize) -> SiteConfig {
        let root = temp.path();
        fs::create_dir_all(root.join("assets/images/covers")).unwrap();
        fs::write(root.join("assets/images/social-default.svg"), SVG).unwrap();
        for i in 0..n {
            fs::write(
                root.join(format!("assets/images/covers/post-{i}.svg")),
                SVG,
            )
            .unwrap();
        }

        let mut config = SiteConfig::default();
        config.root = root.to_path_buf();
        config
    }

    #[test]
    fn test_batch_converts_default_and_covers() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = site(&temp, 2);

        let report = run(&config).unwrap();
        assert_eq!(report.converted.len(), 3);
        assert!(!report.any_failed());
        assert!(temp.path().join("assets/images/social-default.png").exists());
        assert!(temp.path().join("assets/images/covers/post-0.png").exists());
        assert!(temp.path().join("assets/images/covers/post-1.png").exists());
    }

    #[test]
    fn test_failure_is_isolated_per_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = site(&temp, 3);
        // Corrupt the middle file
        fs::write(temp.path().join("assets/images/covers/post-1.svg"), "junk").unwrap();

        let report = run(&config).unwrap();
        assert!(report.any_failed());
        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].0.ends_with("post-1.svg"));
        // The rest (default + post-0 + post-2) still converted
        assert_eq!(report.converted.len(), 3);
        assert!(temp.path().join("assets/images/covers/post-0.png").exists());
        assert!(!temp.path().join("assets/images/covers/post-1.png").exists());
        assert!(temp.path().join("assets/images/covers/post-2.png").exists());
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = site(&temp, 1);

        run(&config).unwrap();
        let first = fs::read(temp.path().join("assets/images/covers/post-0.png")).unwrap();
        run(&config).unwrap();
        let second = fs::read(temp.path().join("assets/images/covers/post-0.png")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_directories_are_not_errors() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.root = temp.path().to_path_buf();

        let report = run(&config).unwrap();
        assert!(report.converted.is_empty());
        assert!(!report.any_failed());
    }
}

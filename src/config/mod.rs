//! Site configuration management for `sitekit.toml`.
//!
//! # Sections
//!
//! | Section    | Purpose                                             |
//! |------------|-----------------------------------------------------|
//! | `[search]` | Document index path and result page sizes           |
//! | `[post]`   | Reading-time and TOC settings for the post enhancer |
//! | `[covers]` | Social cover conversion paths and dimensions        |
//!
//! The config file is optional: every field defaults to the values the site
//! templates were written against, so a configless invocation behaves
//! identically to the stock setup.

mod error;

pub use error::ConfigError;

use crate::log;
use anyhow::Result;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing sitekit.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Search index settings
    pub search: SearchConfig,

    /// Post enhancer settings
    pub post: PostConfig,

    /// Social cover conversion settings
    pub covers: CoversConfig,
}

impl SiteConfig {
    /// Load configuration, searching upward from cwd for the config file.
    ///
    /// A missing file is not an error: the defaults apply and the project
    /// root is the current directory.
    pub fn load(config_name: &Path) -> Result<Self> {
        let cwd = std::env::current_dir()?;

        let config = match find_config_file(config_name, &cwd) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
                config.config_path = path;
                config
            }
            None => {
                let mut config = Self::default();
                config.root = cwd;
                config
            }
        };

        config.covers.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .map_err(|err| ConfigError::Parse(path.to_path_buf(), err))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), toml::de::Error> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "ignoring unknown fields in {}:", display_path);
        for field in fields {
            eprintln!("- {field}");
        }
    }

    /// Join a path with the project root directory.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }
}

/// Search upward from `start` for the named config file.
fn find_config_file(name: &Path, start: &Path) -> Option<PathBuf> {
    // Absolute paths are used as-is
    if name.is_absolute() {
        return name.exists().then(|| name.to_path_buf());
    }

    let mut dir = start;
    loop {
        let candidate = dir.join(name);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

// ============================================================================
// [search]
// ============================================================================

/// Search index settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Document index path, relative to the project root.
    pub index: PathBuf,
    /// Number of documents shown for an empty query.
    pub default_count: usize,
    /// Maximum number of ranked results.
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            index: PathBuf::from("search.json"),
            default_count: 10,
            max_results: 20,
        }
    }
}

// ============================================================================
// [post]
// ============================================================================

/// Post enhancer settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PostConfig {
    /// Reading speed used for the "N min read" estimate.
    pub words_per_minute: usize,
    /// Class of the article content container.
    pub content_class: String,
    /// Element id receiving the reading time text.
    pub reading_time_id: String,
    /// Element id receiving the generated table of contents.
    pub toc_id: String,
    /// Element id of the copy-link button.
    pub copy_link_id: String,
    /// Identifier assigned to headings whose text yields an empty slug.
    pub fallback_slug: String,
}

impl Default for PostConfig {
    fn default() -> Self {
        Self {
            words_per_minute: 200,
            content_class: "post-content".into(),
            reading_time_id: "reading-time".into(),
            toc_id: "post-toc".into(),
            copy_link_id: "copy-link-btn".into(),
            fallback_slug: "section".into(),
        }
    }
}

// ============================================================================
// [covers]
// ============================================================================

/// Social cover conversion settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CoversConfig {
    /// Directory of per-post cover SVGs, relative to the project root.
    pub dir: PathBuf,
    /// Site-wide default cover SVG, relative to the project root.
    pub default_image: PathBuf,
    /// Output raster width in pixels.
    pub width: u32,
    /// Output raster height in pixels.
    pub height: u32,
    /// Background color transparency is flattened onto ("#rrggbb").
    pub background: String,
}

impl Default for CoversConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("assets/images/covers"),
            default_image: PathBuf::from("assets/images/social-default.svg"),
            width: 1200,
            height: 630,
            background: "#0d1117".into(),
        }
    }
}

impl CoversConfig {
    /// Parse the configured background color into RGB components.
    pub fn background_rgb(&self) -> Result<(u8, u8, u8), ConfigError> {
        parse_hex_color(&self.background)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.background_rgb().map(|_| ())
    }
}

/// Parse a "#rrggbb" hex color string.
fn parse_hex_color(s: &str) -> Result<(u8, u8, u8), ConfigError> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ConfigError::InvalidColor(s.to_string()));
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
    Ok((channel(0), channel(2), channel(4)))
}

// ============================================================================
// Tests
// ============================================================================

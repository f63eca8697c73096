//! Typed configuration errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating `sitekit.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {1}", path = .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse config file {path}: {1}", path = .0.display())]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("invalid color '{0}': expected '#rrggbb'")]
    InvalidColor(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_message_includes_path() {
        let err = ConfigError::Io(
            PathBuf::from("/site/sitekit.toml"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(
            err.to_string(),
            "failed to read config file /site/sitekit.toml: gone"
        );
    }

    #[test]
    fn test_invalid_color_message() {
        let err = ConfigError::InvalidColor("#fff".into());
        assert_eq!(err.to_string(), "invalid color '#fff': expected '#rrggbb'");
    }
}

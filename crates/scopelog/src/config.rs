//! File configuration for scopelog.
//!
//! Loads settings from `scopelog.toml` in a directory or the user config
//! directory. Every key is optional; only keys that are present override the
//! runtime [`Settings`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, ScopelogError};
use crate::fields::FieldRepresentation;
use crate::settings::{LogFormat, Settings};
use crate::style::{AnsiStyler, PlainStyler};

/// The config file name
pub const CONFIG_FILE_NAME: &str = "scopelog.toml";

/// Settings loaded from `scopelog.toml`
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Show DEBUG records
    pub debug: Option<bool>,
    /// Show INFO records
    pub info: Option<bool>,
    /// Show WARN records
    pub warn: Option<bool>,
    /// Show ERROR records
    pub error: Option<bool>,
    /// Show the caller's file:line column
    pub show_lines: Option<bool>,
    /// Field representation: "none", "json" or "kv"
    pub fields: Option<FieldRepresentation>,
    /// Record layout: "pipe" or "json"
    pub format: Option<LogFormat>,
    /// Width of the scope column
    pub scope_length: Option<usize>,
    /// Emit terminal colors
    pub color: Option<bool>,
}

impl LogConfig {
    /// Load configuration from a directory.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if the file exists and parses successfully
    /// - `Ok(None)` if the file does not exist
    /// - `Err(...)` if the file exists but cannot be read or parsed
    pub fn load(dir: &Path) -> Result<Option<Self>> {
        let path = dir.join(CONFIG_FILE_NAME);

        if !path.exists() {
            return Ok(None);
        }

        Self::from_path(&path).map(Some)
    }

    /// Parse a specific config file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ScopelogError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config = toml::from_str(&content).map_err(|source| ScopelogError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "Loaded log configuration");
        Ok(config)
    }

    /// Try `dir`, then the user config directory.
    pub fn discover(dir: &Path) -> Result<Option<Self>> {
        if let Some(config) = Self::load(dir)? {
            return Ok(Some(config));
        }

        match user_config_dir() {
            Some(user_dir) => Self::load(&user_dir),
            None => Ok(None),
        }
    }

    /// Apply the keys that are set to `settings`.
    pub fn apply(&self, settings: &Settings) {
        if let Some(enabled) = self.debug {
            settings.set_debug(enabled);
        }
        if let Some(enabled) = self.info {
            settings.set_info(enabled);
        }
        if let Some(enabled) = self.warn {
            settings.set_warning(enabled);
        }
        if let Some(enabled) = self.error {
            settings.set_error(enabled);
        }
        if let Some(enabled) = self.show_lines {
            settings.set_show_lines(enabled);
        }
        if let Some(representation) = self.fields {
            settings.set_field_representation(representation);
        }
        if let Some(format) = self.format {
            settings.set_log_format(format);
        }
        if let Some(length) = self.scope_length {
            settings.set_scope_length(length);
        }
        match self.color {
            Some(true) => settings.set_styler(Arc::new(AnsiStyler)),
            Some(false) => settings.set_styler(Arc::new(PlainStyler)),
            None => {}
        }
    }
}

fn user_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("scopelog"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        assert_eq!(LogConfig::load(dir.path()).unwrap(), None);
    }

    #[test]
    fn test_load_and_apply() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"
debug = false
show_lines = true
fields = "kv"
format = "json"
scope_length = 40
"#,
        )
        .unwrap();

        let config = LogConfig::load(dir.path()).unwrap().unwrap();
        assert_eq!(config.debug, Some(false));
        assert_eq!(config.fields, Some(FieldRepresentation::KeyValue));
        assert_eq!(config.info, None);

        let settings = Settings::new();
        config.apply(&settings);
        assert!(!settings.is_enabled(Level::Debug));
        assert!(settings.is_enabled(Level::Info));
        assert!(settings.show_lines());
        assert_eq!(settings.field_representation(), FieldRepresentation::KeyValue);
        assert_eq!(settings.log_format(), LogFormat::Json);
        assert_eq!(settings.scope_length(), 40);
    }

    #[test]
    fn test_unknown_key_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "verbose = true\n").unwrap();

        let err = LogConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, ScopelogError::ConfigParse { .. }));
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_bad_value_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "fields = \"yaml\"\n").unwrap();
        assert!(LogConfig::load(dir.path()).is_err());
    }

    #[test]
    fn test_discover_prefers_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "scope_length = 8\n").unwrap();
        let config = LogConfig::discover(dir.path()).unwrap().unwrap();
        assert_eq!(config.scope_length, Some(8));
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = LogConfig::from_path(Path::new("/nonexistent/scopelog.toml")).unwrap_err();
        assert!(matches!(err, ScopelogError::ConfigRead { .. }));
    }
}

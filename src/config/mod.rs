//! Configuration management for `mounturl.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── settings   # [settings]
//! ├── error      # ConfigError
//! ├── handle     # SettingsHandle (atomic reload)
//! └── mod.rs     # UrlsConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section                | Purpose                                   |
//! |------------------------|-------------------------------------------|
//! | `[settings]`           | Mount prefix (`base_url`), https override |
//! | `[databases.<name>]`   | Known databases and their route segments  |

mod error;
mod handle;
mod settings;

pub use error::ConfigError;
pub use handle::SettingsHandle;
pub use settings::SettingsConfig;

use crate::{log, urls::DatabaseRoutes};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing mounturl.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UrlsConfig {
    /// Path the config was loaded from (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Server settings
    #[serde(default)]
    pub settings: SettingsConfig,

    /// Known databases
    #[serde(default)]
    pub databases: DatabaseRoutes,
}

impl UrlsConfig {
    /// Load and validate configuration from a file.
    ///
    /// A missing file yields the defaults (no mount prefix, no databases).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content =
                fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
            Self::from_content(&content, path)?
        } else {
            crate::debug!("config"; "{} not found, using defaults", path.display());
            Self::default()
        };

        config.config_path = path.to_path_buf();
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Parse file content, warning about unknown fields.
    fn from_content(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let (config, ignored) = Self::parse_with_ignored(content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
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
        log!("warning"; "unknown fields in {}, ignoring: {}", display_path, fields.join(", "));
    }

    /// Check the mount prefix and route overrides.
    ///
    /// A `base_url` without a trailing slash is accepted (the builder trims
    /// it before joining) but reported as a hint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = &self.settings.base_url;

        if !base_url.is_empty() && !base_url.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "settings.base_url `{base_url}` must start with `/`"
            )));
        }
        if !base_url.is_empty() && !base_url.ends_with('/') {
            log!("hint"; "settings.base_url `{}` has no trailing slash, `{}/` is expected", base_url, base_url);
        }

        let mut empty_routes: Vec<&str> = self
            .databases
            .iter()
            .filter(|(_, entry)| entry.route.as_deref().is_some_and(str::is_empty))
            .map(|(name, _)| name)
            .collect();
        if !empty_routes.is_empty() {
            empty_routes.sort_unstable();
            return Err(ConfigError::Validation(format!(
                "empty route for database(s): {}",
                empty_routes.join(", ")
            )));
        }

        Ok(())
    }

    /// Override the mount prefix (e.g. from the command line).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.settings.base_url = base_url.into();
        self
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config content.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> UrlsConfig {
    let (parsed, ignored) = UrlsConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

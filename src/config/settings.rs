//! `[settings]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [settings]
//! base_url = "/prefix/"       # Mount prefix ("" or "/" = served from root)
//! force_https_urls = false    # Rewrite http:// to https:// in absolute URLs
//! ```
//!
//! Set `base_url` when the service sits behind a proxy that forwards
//! `https://example.com/prefix/...` to it.

use serde::{Deserialize, Serialize};

/// Server settings read by the URL builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    /// Mount prefix for every generated path.
    /// - `""` (default): no prefix
    /// - `"/prefix/"`: paths become `/prefix/...`
    pub base_url: String,

    /// Force `https://` for absolute URLs.
    pub force_https_urls: bool,
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_settings_config() {
        let config =
            test_parse_config("[settings]\nbase_url = \"/prefix/\"\nforce_https_urls = true");

        assert_eq!(config.settings.base_url, "/prefix/");
        assert!(config.settings.force_https_urls);
    }

    #[test]
    fn test_settings_config_defaults() {
        let config = test_parse_config("");

        assert_eq!(config.settings.base_url, "");
        assert!(!config.settings.force_https_urls);
    }

    #[test]
    fn test_settings_config_partial_override() {
        let config = test_parse_config("[settings]\nforce_https_urls = true");

        assert!(config.settings.force_https_urls);
        assert_eq!(config.settings.base_url, "");
    }
}

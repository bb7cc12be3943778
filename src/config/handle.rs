//! Shared config with atomic reload support.
//!
//! Uses `arc-swap` for lock-free reads and atomic config replacement, so the
//! mount prefix and database routes can change while requests are in flight.
//! Each read sees one complete config.

use std::hash::Hasher;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use arc_swap::ArcSwap;
use rustc_hash::FxHasher;

use super::{ConfigError, UrlsConfig};
use crate::log;
use crate::urls::{MountPrefixProvider, RegistryError, ResourceRegistry, Urls};

/// Cloneable handle to the current [`UrlsConfig`].
#[derive(Debug, Clone)]
pub struct SettingsHandle {
    config: Arc<ArcSwap<UrlsConfig>>,
    /// Hash of the config file content the current config was loaded from.
    hash: Arc<AtomicU64>,
}

impl SettingsHandle {
    pub fn new(config: UrlsConfig) -> Self {
        let hash = std::fs::read_to_string(&config.config_path)
            .map(|content| content_hash(&content))
            .unwrap_or(0);

        Self {
            config: Arc::new(ArcSwap::from_pointee(config)),
            hash: Arc::new(AtomicU64::new(hash)),
        }
    }

    #[inline]
    pub fn current(&self) -> Arc<UrlsConfig> {
        self.config.load_full()
    }

    /// Replace the config for all subsequent reads.
    pub fn store(&self, config: UrlsConfig) {
        self.config.store(Arc::new(config));
    }

    /// Reload config from disk if content changed.
    ///
    /// Returns `Ok(true)` if config was updated, `Ok(false)` if unchanged.
    /// On error the previous config stays active.
    pub fn reload(&self) -> Result<bool, ConfigError> {
        let path = self.current().config_path.clone();

        let content =
            std::fs::read_to_string(&path).map_err(|err| ConfigError::Io(path.clone(), err))?;
        let new_hash = content_hash(&content);

        if new_hash == self.hash.load(Ordering::Relaxed) {
            return Ok(false);
        }

        let mut config = UrlsConfig::from_content(&content, &path)?;
        config.config_path = path;
        config.validate()?;

        self.store(config);
        self.hash.store(new_hash, Ordering::Relaxed);
        log!("config"; "reloaded {}", self.current().config_path.display());

        Ok(true)
    }

    /// URL builder reading prefix and routes from this handle on every call.
    pub fn urls(&self) -> Urls<'_> {
        Urls::new(self, self)
    }
}

impl MountPrefixProvider for SettingsHandle {
    fn mount_prefix(&self) -> String {
        self.config.load().settings.base_url.clone()
    }
}

impl ResourceRegistry for SettingsHandle {
    fn route_for(&self, database: &str) -> Result<String, RegistryError> {
        self.config.load().databases.route_for(database)
    }
}

/// Compute 64-bit hash of config file content.
#[inline]
fn content_hash(content: &str) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(content.as_bytes());
    hasher.finish()
}

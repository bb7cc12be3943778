//! Prefix-aware URL path construction.
//!
//! Every outbound path goes through [`Urls::path`], which applies the mount
//! prefix (the `base_url` setting) at most once and guarantees a leading `/`.
//! Results are [`NormalizedPath`]s, so feeding one back in is a no-op for the
//! prefix step.
//!
//! ```text
//! Urls
//!  ├── path(raw, format)            → /prefix/raw.format
//!  ├── instance(format)             → /prefix/
//!  ├── static_asset(file)           → /prefix/-/static/file
//!  ├── static_plugin_asset(p, file) → /prefix/-/static-plugins/p/file
//!  ├── logout()                     → /prefix/-/logout
//!  ├── database(db, format)         → /prefix/route
//!  ├── table / query(db, name, fmt) → /prefix/route/name
//!  ├── row(db, table, row, fmt)     → /prefix/route/table/row
//!  └── row_blob(db, table, row, c)  → /prefix/route/table/row.blob?_blob_column=c
//! ```

mod normalized;
pub mod provider;
pub mod registry;

pub use normalized::NormalizedPath;
pub use provider::{MountPrefixProvider, StaticPrefix};
pub use registry::{DatabaseEntry, DatabaseRoutes, RegistryError, ResourceRegistry};

use crate::absolute::{self, AbsoluteUrlError};
use crate::debug;
use crate::encoding::{append_format, quote_plus, tilde_encode};

/// Input accepted by [`Urls::path`]: a raw string or an already normalized path.
#[derive(Debug, Clone, Copy)]
pub enum PathInput<'a> {
    Raw(&'a str),
    Normalized(&'a NormalizedPath),
}

impl<'a> From<&'a str> for PathInput<'a> {
    fn from(path: &'a str) -> Self {
        Self::Raw(path)
    }
}

impl<'a> From<&'a String> for PathInput<'a> {
    fn from(path: &'a String) -> Self {
        Self::Raw(path)
    }
}

impl<'a> From<&'a NormalizedPath> for PathInput<'a> {
    fn from(path: &'a NormalizedPath) -> Self {
        Self::Normalized(path)
    }
}

/// Check whether `path` already carries `mount_prefix`.
///
/// Best-effort heuristic, true when any of these hold:
/// - the prefix is empty (nothing to apply)
/// - `path` starts with the full prefix (`/prefix/...`)
/// - `path` starts with the prefix without its slashes (`prefix...`)
///
/// The last rule also matches resource names that merely begin with the
/// prefix text, e.g. `prefixed` under `/prefix/`.
pub fn has_mount_prefix(path: &str, mount_prefix: &str) -> bool {
    if mount_prefix.is_empty() || path.starts_with(mount_prefix) {
        return true;
    }
    path.starts_with(mount_prefix.trim_matches('/'))
}

/// Builds URL paths for instance, static, database, table, query and row resources.
///
/// Holds the mount prefix and the database registry as capabilities and reads
/// both on every call.
#[derive(Clone, Copy)]
pub struct Urls<'a> {
    prefix: &'a dyn MountPrefixProvider,
    registry: &'a dyn ResourceRegistry,
}

impl std::fmt::Debug for Urls<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Urls")
            .field("mount_prefix", &self.prefix.mount_prefix())
            .finish_non_exhaustive()
    }
}

impl<'a> Urls<'a> {
    #[inline]
    pub const fn new(
        prefix: &'a dyn MountPrefixProvider,
        registry: &'a dyn ResourceRegistry,
    ) -> Self {
        Self { prefix, registry }
    }

    /// Whether `path` already carries the current mount prefix.
    pub fn is_prefixed(&self, path: &str) -> bool {
        has_mount_prefix(path, &self.prefix.mount_prefix())
    }

    /// Normalize `path` against the mount prefix and append an optional format.
    ///
    /// Raw paths get the prefix unless they already carry it, then a leading
    /// `/`. Normalized paths skip the prefix step, and get the format appended
    /// only if they were not already finished with that same format.
    ///
    /// # Examples
    /// ```
    /// use mounturl::urls::{DatabaseRoutes, StaticPrefix, Urls};
    ///
    /// let prefix = StaticPrefix::new("/prefix/");
    /// let routes = DatabaseRoutes::new();
    /// let urls = Urls::new(&prefix, &routes);
    ///
    /// assert_eq!(urls.path("foo", None), "/prefix/foo");
    /// assert_eq!(urls.path("/prefix/foo", None), "/prefix/foo");
    /// assert_eq!(urls.path("foo", Some("json")), "/prefix/foo.json");
    /// ```
    pub fn path<'p>(&self, path: impl Into<PathInput<'p>>, format: Option<&str>) -> NormalizedPath {
        match path.into() {
            PathInput::Normalized(normalized) => match format {
                Some(format) if normalized.format() != Some(format) => {
                    Self::finish(normalized.as_str().to_string(), Some(format))
                }
                _ => normalized.clone(),
            },
            PathInput::Raw(raw) => Self::finish(self.apply_prefix(raw), format),
        }
    }

    /// Prefix a raw path if needed and make sure it starts with `/`.
    fn apply_prefix(&self, raw: &str) -> String {
        let mount_prefix = self.prefix.mount_prefix();

        let mut path = if has_mount_prefix(raw, &mount_prefix) {
            raw.to_string()
        } else {
            debug!("urls"; "applying mount prefix `{}` to `{}`", mount_prefix, raw);
            format!(
                "{}/{}",
                mount_prefix.trim_end_matches('/'),
                raw.trim_start_matches('/')
            )
        };

        // Without a leading slash an absolute-URL resolver would treat the
        // path as relative to the request and repeat the prefix.
        if !path.starts_with('/') {
            path.insert(0, '/');
        }
        path
    }

    fn finish(path: String, format: Option<&str>) -> NormalizedPath {
        match format {
            Some(format) => {
                NormalizedPath::new(append_format(&path, format), Some(format.to_string()))
            }
            None => NormalizedPath::new(path, None),
        }
    }

    /// Instance root, e.g. `/prefix/` or `/prefix/.json`.
    pub fn instance(&self, format: Option<&str>) -> NormalizedPath {
        self.path("", format)
    }

    /// Bundled static asset under `-/static/`.
    pub fn static_asset(&self, path: &str) -> NormalizedPath {
        self.path(&format!("-/static/{path}"), None)
    }

    /// Static asset shipped by a plugin.
    pub fn static_plugin_asset(&self, plugin: &str, path: &str) -> NormalizedPath {
        self.path(&format!("-/static-plugins/{plugin}/{path}"), None)
    }

    pub fn logout(&self) -> NormalizedPath {
        self.path("-/logout", None)
    }

    /// Database page, routed via the registry and tilde-encoded.
    pub fn database(
        &self,
        database: &str,
        format: Option<&str>,
    ) -> Result<NormalizedPath, RegistryError> {
        let route = self.registry.route_for(database)?;
        let path = self.instance(None).join(&tilde_encode(&route));
        Ok(self.path(&path, format))
    }

    /// Table page inside `database`.
    pub fn table(
        &self,
        database: &str,
        table: &str,
        format: Option<&str>,
    ) -> Result<NormalizedPath, RegistryError> {
        self.database_child(database, table, format)
    }

    /// Canned query page inside `database`. Same shape as [`Urls::table`].
    pub fn query(
        &self,
        database: &str,
        query: &str,
        format: Option<&str>,
    ) -> Result<NormalizedPath, RegistryError> {
        self.database_child(database, query, format)
    }

    fn database_child(
        &self,
        database: &str,
        name: &str,
        format: Option<&str>,
    ) -> Result<NormalizedPath, RegistryError> {
        let path = self.database(database, None)?.join(&tilde_encode(name));
        Ok(self.path(&path, format))
    }

    /// Row page. `row_path` must already be encoded: composite primary keys
    /// arrive as `a,b` with each part tilde-encoded by the caller.
    pub fn row(
        &self,
        database: &str,
        table: &str,
        row_path: &str,
        format: Option<&str>,
    ) -> Result<NormalizedPath, RegistryError> {
        let path = self.table(database, table, None)?.join(row_path);
        Ok(self.path(&path, format))
    }

    /// Raw BLOB download for one column of a row.
    ///
    /// Never format-suffixed; the column goes in the query string with
    /// form-style percent-encoding.
    pub fn row_blob(
        &self,
        database: &str,
        table: &str,
        row_path: &str,
        column: &str,
    ) -> Result<NormalizedPath, RegistryError> {
        let segment = format!("{row_path}.blob?_blob_column={}", quote_plus(column));
        Ok(self.table(database, table, None)?.join(&segment))
    }

    /// Resolve `path` against the URL of the current request.
    ///
    /// The path is normalized first, so a relative or already prefixed input
    /// never yields a second copy of the mount prefix.
    pub fn absolute_url<'p>(
        &self,
        request_url: &str,
        path: impl Into<PathInput<'p>>,
        force_https: bool,
    ) -> Result<String, AbsoluteUrlError> {
        let normalized = self.path(path, None);
        absolute::absolute_url(request_url, normalized.as_str(), force_https)
    }
}

// ============================================================================
// tests
// ============================================================================

//! Source of the configured mount prefix.

use std::sync::Arc;

/// Supplies the current mount prefix (the `base_url` setting).
///
/// The value is `""` or a path such as `/prefix/`. It is read on every call
/// and may change between calls, so implementations must not cache it on
/// behalf of [`Urls`](super::Urls).
pub trait MountPrefixProvider: Send + Sync {
    fn mount_prefix(&self) -> String;
}

/// Fixed mount prefix, for tools and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticPrefix(String);

impl StaticPrefix {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self(prefix.into())
    }

    /// No mount prefix: everything is served from `/`.
    pub const fn root() -> Self {
        Self(String::new())
    }
}

impl MountPrefixProvider for StaticPrefix {
    fn mount_prefix(&self) -> String {
        self.0.clone()
    }
}

impl MountPrefixProvider for str {
    fn mount_prefix(&self) -> String {
        self.to_string()
    }
}

impl MountPrefixProvider for String {
    fn mount_prefix(&self) -> String {
        self.clone()
    }
}

impl<T: MountPrefixProvider + ?Sized> MountPrefixProvider for &T {
    fn mount_prefix(&self) -> String {
        (**self).mount_prefix()
    }
}

impl<T: MountPrefixProvider + ?Sized> MountPrefixProvider for Arc<T> {
    fn mount_prefix(&self) -> String {
        (**self).mount_prefix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_prefix() {
        assert_eq!(StaticPrefix::new("/prefix/").mount_prefix(), "/prefix/");
        assert_eq!(StaticPrefix::root().mount_prefix(), "");
    }

    #[test]
    fn test_str_and_arc_providers() {
        assert_eq!("/a/".mount_prefix(), "/a/");
        let shared: Arc<dyn MountPrefixProvider> = Arc::new(StaticPrefix::new("/b/"));
        assert_eq!(shared.mount_prefix(), "/b/");
    }
}

//! Path type marking mount-prefix normalization as already done.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::Serialize;

/// URL path with the mount prefix applied exactly once.
///
/// Invariants:
/// - Always starts with `/`
/// - Carries the mount prefix at most once
/// - Only built by [`Urls`](super::Urls), never from an arbitrary string
///
/// Passing a `NormalizedPath` back through [`Urls::path`](super::Urls::path)
/// leaves its prefix untouched.
#[derive(Debug, Clone)]
pub struct NormalizedPath {
    path: String,
    /// Format suffix applied last, if any.
    format: Option<String>,
}

impl NormalizedPath {
    #[inline]
    pub(crate) const fn new(path: String, format: Option<String>) -> Self {
        Self { path, format }
    }

    /// Get the path as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Format suffix this path was finished with (`json` for `/db.json`).
    #[inline]
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    /// Append `/{segment}`, keeping the normalized tag.
    ///
    /// The segment is taken as-is; encode identifiers before joining.
    #[must_use]
    pub fn join(&self, segment: &str) -> Self {
        let base = self.path.trim_end_matches('/');
        Self::new(format!("{base}/{segment}"), None)
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.path
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path)
    }
}

impl AsRef<str> for NormalizedPath {
    fn as_ref(&self) -> &str {
        &self.path
    }
}

impl Borrow<str> for NormalizedPath {
    fn borrow(&self) -> &str {
        &self.path
    }
}

impl From<NormalizedPath> for String {
    fn from(path: NormalizedPath) -> Self {
        path.path
    }
}

// Identity is the path string alone; the format tag is bookkeeping.

impl PartialEq for NormalizedPath {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for NormalizedPath {}

impl Hash for NormalizedPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl PartialOrd for NormalizedPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NormalizedPath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path.cmp(&other.path)
    }
}

impl PartialEq<str> for NormalizedPath {
    fn eq(&self, other: &str) -> bool {
        self.path == other
    }
}

impl PartialEq<&str> for NormalizedPath {
    fn eq(&self, other: &&str) -> bool {
        self.path == *other
    }
}

impl PartialEq<String> for NormalizedPath {
    fn eq(&self, other: &String) -> bool {
        &self.path == other
    }
}

impl Serialize for NormalizedPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.path.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join() {
        let db = NormalizedPath::new("/prefix/fixtures".to_string(), None);
        assert_eq!(db.join("facetable"), "/prefix/fixtures/facetable");
    }

    #[test]
    fn test_join_on_root() {
        let root = NormalizedPath::new("/prefix/".to_string(), None);
        assert_eq!(root.join("fixtures"), "/prefix/fixtures");
    }

    #[test]
    fn test_join_drops_format() {
        let db = NormalizedPath::new("/fixtures.json".to_string(), Some("json".to_string()));
        assert_eq!(db.join("x").format(), None);
    }

    #[test]
    fn test_equality_ignores_format() {
        let a = NormalizedPath::new("/db.json".to_string(), Some("json".to_string()));
        let b = NormalizedPath::new("/db.json".to_string(), None);
        assert_eq!(a, b);
    }

    #[test]
    fn test_hash() {
        use rustc_hash::FxHashSet;

        let mut set = FxHashSet::default();
        set.insert(NormalizedPath::new("/db".to_string(), None));
        set.insert(NormalizedPath::new("/db".to_string(), Some("csv".to_string())));

        assert_eq!(set.len(), 1);
        assert!(set.contains("/db"));
    }

    #[test]
    fn test_display_and_as_ref() {
        let p = NormalizedPath::new("/-/logout".to_string(), None);
        assert_eq!(format!("{p}"), "/-/logout");
        let s: &str = p.as_ref();
        assert_eq!(s, "/-/logout");
        assert_eq!(String::from(p), "/-/logout");
    }

    #[test]
    fn test_serialize() {
        let p = NormalizedPath::new("/prefix/db/name~2Ejson.json".to_string(), None);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#""/prefix/db/name~2Ejson.json""#);
    }
}

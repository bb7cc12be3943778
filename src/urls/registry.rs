//! Database name to route segment lookup.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lookup failures raised by a [`ResourceRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("database `{0}` does not exist")]
    UnknownDatabase(String),
}

/// Resolves a logical database name to the segment it is routed under.
///
/// The route may differ from the name, e.g. when two attached files share a
/// stem and one of them is routed as `name-2`.
pub trait ResourceRegistry: Send + Sync {
    fn route_for(&self, database: &str) -> Result<String, RegistryError>;
}

impl<T: ResourceRegistry + ?Sized> ResourceRegistry for &T {
    fn route_for(&self, database: &str) -> Result<String, RegistryError> {
        (**self).route_for(database)
    }
}

impl<T: ResourceRegistry + ?Sized> ResourceRegistry for Arc<T> {
    fn route_for(&self, database: &str) -> Result<String, RegistryError> {
        (**self).route_for(database)
    }
}

/// Per-database entry of the `[databases]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseEntry {
    /// Route segment override. Defaults to the database name.
    pub route: Option<String>,
}

/// In-memory registry of known databases.
///
/// ```toml
/// [databases.fixtures]
///
/// [databases.fixtures2]
/// route = "fixtures-2"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatabaseRoutes {
    entries: FxHashMap<String, DatabaseEntry>,
}

impl DatabaseRoutes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a database routed under its own name.
    pub fn add(&mut self, name: impl Into<String>) -> &mut Self {
        self.entries.insert(name.into(), DatabaseEntry::default());
        self
    }

    /// Register a database routed under `route`.
    pub fn add_routed(&mut self, name: impl Into<String>, route: impl Into<String>) -> &mut Self {
        self.entries.insert(
            name.into(),
            DatabaseEntry {
                route: Some(route.into()),
            },
        );
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DatabaseEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Database names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<const N: usize> From<[&str; N]> for DatabaseRoutes {
    fn from(names: [&str; N]) -> Self {
        let mut routes = Self::new();
        for name in names {
            routes.add(name);
        }
        routes
    }
}

impl ResourceRegistry for DatabaseRoutes {
    fn route_for(&self, database: &str) -> Result<String, RegistryError> {
        self.entries
            .get(database)
            .map(|entry| entry.route.clone().unwrap_or_else(|| database.to_string()))
            .ok_or_else(|| RegistryError::UnknownDatabase(database.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_defaults_to_name() {
        let routes = DatabaseRoutes::from(["_memory"]);
        assert_eq!(routes.route_for("_memory").unwrap(), "_memory");
    }

    #[test]
    fn test_route_override() {
        let mut routes = DatabaseRoutes::new();
        routes.add_routed("fixtures", "fixtures-2");
        assert_eq!(routes.route_for("fixtures").unwrap(), "fixtures-2");
    }

    #[test]
    fn test_unknown_database() {
        let routes = DatabaseRoutes::new();
        let err = routes.route_for("missing").unwrap_err();
        assert_eq!(err, RegistryError::UnknownDatabase("missing".to_string()));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_names_sorted() {
        let routes = DatabaseRoutes::from(["b", "a", "c"]);
        assert_eq!(routes.names(), vec!["a", "b", "c"]);
        assert_eq!(routes.len(), 3);
        assert!(routes.contains("a"));
        assert!(!routes.is_empty());
    }

    #[test]
    fn test_deserialize_table() {
        let toml = "[fixtures]\n\n[other]\nroute = \"other-2\"\n";
        let routes: DatabaseRoutes = toml::from_str(toml).unwrap();
        assert_eq!(routes.route_for("fixtures").unwrap(), "fixtures");
        assert_eq!(routes.route_for("other").unwrap(), "other-2");
    }
}

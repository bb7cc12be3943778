//! mounturl - prefix-aware URL paths for a service mounted under a base URL.
//!
//! | Module     | Purpose                                                   |
//! |------------|-----------------------------------------------------------|
//! | `urls`     | `Urls` path builder, `NormalizedPath`, provider traits    |
//! | `encoding` | Tilde-encoding of identifiers, format suffixes            |
//! | `absolute` | Absolute URL composition against a request URL           |
//! | `config`   | `mounturl.toml` loading and the reloadable settings handle |
//! | `cli`      | Command-line interface                                    |
//!
//! # Example
//!
//! ```
//! use mounturl::urls::{DatabaseRoutes, StaticPrefix, Urls};
//!
//! let prefix = StaticPrefix::new("/prefix/");
//! let routes = DatabaseRoutes::from(["fixtures"]);
//! let urls = Urls::new(&prefix, &routes);
//!
//! let table = urls.table("fixtures", "name.json", Some("json")).unwrap();
//! assert_eq!(table, "/prefix/fixtures/name~2Ejson.json");
//! ```

pub mod logger;

pub mod absolute;
pub mod cli;
pub mod config;
pub mod encoding;
pub mod urls;

pub use config::{SettingsHandle, UrlsConfig};
pub use urls::{NormalizedPath, Urls};

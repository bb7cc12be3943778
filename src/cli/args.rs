//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Build prefix-aware URL paths for a mounted service
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: mounturl.toml, missing file = defaults)
    #[arg(short = 'C', long, global = true, default_value = "mounturl.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Override the mount prefix from the config file.
    ///
    /// Example: serving under https://example.com/tools/data/:
    ///   mounturl --base-url /tools/data/ table fixtures facetable
    #[arg(short = 'B', long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Print the result as a JSON string
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Normalize an arbitrary path against the mount prefix
    #[command(visible_alias = "p")]
    Path {
        /// Path with or without leading slash or prefix
        raw: String,

        #[command(flatten)]
        format: FormatArg,
    },

    /// Instance root
    Instance {
        #[command(flatten)]
        format: FormatArg,
    },

    /// Bundled static asset
    Static {
        /// File path below `-/static/`
        file: String,
    },

    /// Static asset shipped by a plugin
    StaticPlugin {
        /// Plugin name
        plugin: String,

        /// File path inside the plugin's static directory
        file: String,
    },

    /// Logout page
    Logout,

    /// Database page
    #[command(visible_alias = "db")]
    Database {
        /// Database name
        name: String,

        #[command(flatten)]
        format: FormatArg,
    },

    /// Table page
    #[command(visible_alias = "t")]
    Table {
        database: String,
        table: String,

        #[command(flatten)]
        format: FormatArg,
    },

    /// Canned query page
    #[command(visible_alias = "q")]
    Query {
        database: String,
        query: String,

        #[command(flatten)]
        format: FormatArg,
    },

    /// Row page
    #[command(visible_alias = "r")]
    Row {
        database: String,
        table: String,

        /// Encoded row path (e.g. `1` or `a,b` for compound keys)
        row: String,

        #[command(flatten)]
        format: FormatArg,
    },

    /// Raw BLOB download for one column of a row
    Blob {
        database: String,
        table: String,

        /// Encoded row path
        row: String,

        /// Column holding the BLOB
        column: String,
    },

    /// Resolve a path against a request URL
    Absolute {
        /// Full URL of the incoming request
        #[arg(value_hint = clap::ValueHint::Url)]
        request_url: String,

        /// Path to resolve (normalized first)
        path: String,
    },

    /// Tilde-encode a resource identifier
    Encode { identifier: String },

    /// Decode a tilde-encoded identifier
    Decode { encoded: String },
}

/// Optional output format suffix shared by resource subcommands.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct FormatArg {
    /// Output format suffix (e.g. json, csv)
    #[arg(short, long)]
    pub format: Option<String>,
}

impl FormatArg {
    #[inline]
    pub fn as_deref(&self) -> Option<&str> {
        self.format.as_deref()
    }
}

//! Command-line interface module.

mod args;

pub use args::{Cli, Commands, FormatArg};

use anyhow::{Context, Result};

use crate::config::{SettingsHandle, UrlsConfig};
use crate::encoding::{tilde_decode, tilde_encode};
use crate::{debug, logger};

/// Load config, run the subcommand and print its result.
pub fn run(cli: &Cli) -> Result<()> {
    logger::set_verbose(cli.verbose);

    let handle = SettingsHandle::new(load_config(cli)?);
    debug!("config"; "mount prefix `{}`", handle.current().settings.base_url);

    let output = execute(&cli.command, &handle)?;
    if cli.json {
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{output}");
    }
    Ok(())
}

/// Load the config file and apply `--base-url`.
fn load_config(cli: &Cli) -> Result<UrlsConfig> {
    let mut config = UrlsConfig::load(&cli.config)
        .with_context(|| format!("failed to load config `{}`", cli.config.display()))?;

    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.clone());
        config.validate().context("invalid --base-url")?;
    }
    Ok(config)
}

/// Run one subcommand against the current config.
pub fn execute(command: &Commands, handle: &SettingsHandle) -> Result<String> {
    let urls = handle.urls();

    let path = match command {
        Commands::Path { raw, format } => urls.path(raw, format.as_deref()),
        Commands::Instance { format } => urls.instance(format.as_deref()),
        Commands::Static { file } => urls.static_asset(file),
        Commands::StaticPlugin { plugin, file } => urls.static_plugin_asset(plugin, file),
        Commands::Logout => urls.logout(),
        Commands::Database { name, format } => urls.database(name, format.as_deref())?,
        Commands::Table {
            database,
            table,
            format,
        } => urls.table(database, table, format.as_deref())?,
        Commands::Query {
            database,
            query,
            format,
        } => urls.query(database, query, format.as_deref())?,
        Commands::Row {
            database,
            table,
            row,
            format,
        } => urls.row(database, table, row, format.as_deref())?,
        Commands::Blob {
            database,
            table,
            row,
            column,
        } => urls.row_blob(database, table, row, column)?,
        Commands::Absolute { request_url, path } => {
            let force_https = handle.current().settings.force_https_urls;
            return Ok(urls.absolute_url(request_url, path, force_https)?);
        }
        Commands::Encode { identifier } => return Ok(tilde_encode(identifier)),
        Commands::Decode { encoded } => return Ok(tilde_decode(encoded)?),
    };

    Ok(path.into_string())
}

// ============================================================================
// tests
// ============================================================================

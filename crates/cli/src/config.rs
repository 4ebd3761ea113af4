//! Settings commands.
//!
//! Settings are loaded from TOML files and merged with environment variables
//! prefixed with `PREBID_MOBILE__`. For example, `PREBID_MOBILE__SERVER__ACCOUNT_ID`
//! will override `server.account_id` in the TOML file.

use std::fs;
use std::path::Path;

use prebid_mobile_common::settings::Settings;
use validator::Validate;

use crate::error::CliError;

/// Load and merge settings from a TOML file with environment variables.
///
/// Returns the settings together with their canonical TOML form.
pub(crate) fn load_and_merge_config(
    file: &Path,
    verbose: bool,
) -> Result<(Settings, String), CliError> {
    let content = fs::read_to_string(file)?;

    if verbose {
        log::info!("Loading settings from: {}", file.display());
        log::info!("Environment variables with PREBID_MOBILE__ prefix will be merged");
    }

    let settings = Settings::from_toml(&content)
        .map_err(|e| CliError::Config(format!("Failed to parse and merge settings: {e:?}")))?;

    settings
        .validate()
        .map_err(|e| CliError::Config(format!("Settings validation failed: {e}")))?;

    let merged_toml = settings
        .to_canonical_toml()
        .map_err(|e| CliError::Config(format!("Failed to serialize merged settings: {e:?}")))?;

    Ok((settings, merged_toml))
}

/// Validate a settings file and print a short summary.
pub fn validate(file: &Path, verbose: bool) -> Result<(), CliError> {
    let (settings, merged_toml) = load_and_merge_config(file, verbose)?;

    println!("Settings are valid");
    println!("  File: {}", file.display());
    println!("  Server: {}", settings.server.host);
    println!("  Account: {}", settings.server.account_id);
    println!("  Plugin renderers: {}", settings.plugins.len());

    if verbose {
        let value: toml::Value = toml::from_str(&merged_toml)?;
        if let Some(table) = value.as_table() {
            println!("\nSections found:");
            for key in table.keys() {
                println!("  - [{key}]");
            }
        }
    }

    Ok(())
}

/// Print the merged settings as TOML.
pub fn show(file: &Path, verbose: bool) -> Result<(), CliError> {
    let (_settings, merged_toml) = load_and_merge_config(file, verbose)?;
    print!("{merged_toml}");
    Ok(())
}

//! `larascaff config`: read and write configuration values.

use std::path::Path;

use serde_json::json;

use crate::{
    cli::{ConfigCommands, OutputFormat},
    config::{AppConfig, KEYS},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    config: &AppConfig,
    config_file: Option<&Path>,
    output: &OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = config
                .get(&key)
                .ok_or_else(|| CliError::UnknownConfigKey { key: key.clone() })?;
            if output.is_json() {
                output.json(&json!({ "key": key, "value": value }))?;
            } else {
                // Bypasses quiet mode: the value is the result.
                println!("{value}");
            }
        }

        ConfigCommands::Set { key, value } => {
            let path = AppConfig::target_path(config_file);
            set_value(&path, &key, &value)?;
            output.success(&format!("Set {key} = {value} in {}", path.display()))?;
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(config)?;
            } else {
                output.header("Current Configuration:")?;
                let serialised = toml::to_string_pretty(config)
                    .with_cli_context(|| "Failed to serialise config")?;
                output.print(&serialised)?;
            }
        }

        ConfigCommands::Path => {
            println!("{}", AppConfig::target_path(config_file).display());
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

/// Update one key in the TOML file at `path`, creating the file if needed.
///
/// Other keys, including ones larascaff does not know, are kept.
fn set_value(path: &Path, key: &str, raw: &str) -> CliResult<()> {
    let value = parse_value(key, raw)?;
    let Some((section, field)) = key.split_once('.') else {
        return Err(CliError::UnknownConfigKey { key: key.into() });
    };

    let mut document: toml::Table = if path.exists() {
        let text = std::fs::read_to_string(path)
            .with_cli_context(|| format!("Failed to read '{}'", path.display()))?;
        toml::from_str(&text).with_cli_context(|| format!("'{}' is not valid TOML", path.display()))?
    } else {
        toml::Table::new()
    };

    let entry = document
        .entry(section)
        .or_insert(toml::Value::Table(toml::Table::new()));
    let Some(table) = entry.as_table_mut() else {
        return Err(CliError::ConfigError {
            message: format!("[{section}] in '{}' is not a table", path.display()),
            source: None,
        });
    };
    table.insert(field.to_string(), value);

    let text = toml::to_string_pretty(&document).with_cli_context(|| "Failed to serialise config")?;
    toml::from_str::<AppConfig>(&text)
        .with_cli_context(|| format!("'{}' would no longer be a valid config", path.display()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_cli_context(|| format!("Failed to create config directory '{}'", parent.display()))?;
    }
    std::fs::write(path, text).with_cli_context(|| format!("Failed to write '{}'", path.display()))
}

/// Type a raw command-line value for `key`.
fn parse_value(key: &str, raw: &str) -> CliResult<toml::Value> {
    match key {
        "defaults.link" | "output.no_color" => {
            raw.parse::<bool>()
                .map(toml::Value::Boolean)
                .map_err(|e| CliError::InvalidInput {
                    message: format!("{key} expects true or false, got '{raw}'"),
                    source: Some(Box::new(e)),
                })
        }
        "output.format" => match OutputFormat::from_config(raw) {
            Some(_) => Ok(toml::Value::String(raw.to_ascii_lowercase())),
            None => Err(CliError::InvalidInput {
                message: format!("output.format must be auto, human, plain or json, got '{raw}'"),
                source: None,
            }),
        },
        known if KEYS.contains(&known) => Ok(toml::Value::String(raw.to_string())),
        _ => Err(CliError::UnknownConfigKey { key: key.into() }),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

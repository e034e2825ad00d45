//! `config` subcommands.
//!
//! Keys are TOML dotted paths (`backup`, `encodings`). The handlers are
//! generic over [`ConfigManager`] and write their output to the supplied
//! writer; hints about missing files go to stderr.

use std::io::Write;
use std::path::PathBuf;

use assetdesk_core::traits::ConfigManager;
use assetdesk_core::{Error, Result, write_with_backup};

use crate::cli::ConfigAction;
use crate::config::AppConfig;

/// Run a config subcommand against [`AppConfig`].
pub fn handle_config_command<W: Write>(
    config_path: Option<&str>,
    action: ConfigAction,
    out: &mut W,
) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path::<AppConfig, W>(config_path, out),
        ConfigAction::Get { key } => cmd_config_get::<AppConfig, W>(config_path, &key, out),
        ConfigAction::Set { key, value } => {
            cmd_config_set::<AppConfig, W>(config_path, &key, &value, out)
        }
        ConfigAction::Init { file, force } => {
            cmd_config_init::<AppConfig, W>(file.as_deref().or(config_path), force, out)
        }
        ConfigAction::Export { docker_env } => {
            let config = AppConfig::load(config_path)?;
            cmd_config_export(&config, docker_env, out)
        }
    }
}

fn config_file<C: ConfigManager>(config_path: Option<&str>) -> Result<PathBuf> {
    C::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("No platform config directory; pass --config"))
}

/// Print where the config file lives.
pub fn cmd_config_path<C: ConfigManager, W: Write>(
    config_path: Option<&str>,
    out: &mut W,
) -> Result<()> {
    let path = config_file::<C>(config_path)?;
    writeln!(out, "{}", path.display())?;
    if !path.is_file() {
        eprintln!(
            "(no file yet; `{} config init` writes the defaults there)",
            C::project_name()
        );
    }
    Ok(())
}

/// Print one value of the effective configuration.
pub fn cmd_config_get<C: ConfigManager, W: Write>(
    config_path: Option<&str>,
    key: &str,
    out: &mut W,
) -> Result<()> {
    let config = C::load(config_path)?;
    let table = as_table(&config)?;
    let value =
        lookup(&table, key).ok_or_else(|| Error::config(format!("Unknown config key '{key}'")))?;
    writeln!(out, "{}", display_value(value))?;
    Ok(())
}

/// Change one value in the config file.
///
/// The raw value is typed after the current (or default) value at `key`, so
/// list keys take comma-separated input. The edited file must load and pass
/// [`ConfigManager::validate`] before it replaces the old one.
pub fn cmd_config_set<C: ConfigManager, W: Write>(
    config_path: Option<&str>,
    key: &str,
    raw: &str,
    out: &mut W,
) -> Result<()> {
    let path = config_file::<C>(config_path)?;
    if !path.is_file() {
        return Err(Error::config(format!(
            "No config file at {}; run `{} config init` first",
            path.display(),
            C::project_name()
        )));
    }

    let content = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
    let mut doc: toml::Table = toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;

    let defaults = as_table(&C::default())?;
    let value = typed_value(raw, lookup(&doc, key).or_else(|| lookup(&defaults, key)));
    let shown = display_value(&value);
    insert_at(&mut doc, key, value)?;

    let text = toml::to_string_pretty(&doc).map_err(|e| Error::config(e.to_string()))?;
    let edited: C = toml::from_str(&text)
        .map_err(|e| Error::config(format!("Invalid value for '{key}': {e}")))?;
    edited
        .validate()
        .map_err(|e| Error::config(format!("Invalid value for '{key}': {e}")))?;

    write_with_backup(&path, text.as_bytes(), false)?;
    writeln!(out, "{key} = {shown} ({})", path.display())?;
    Ok(())
}

/// Write the default configuration, keeping a backup when replacing a file.
pub fn cmd_config_init<C: ConfigManager, W: Write>(
    file: Option<&str>,
    force: bool,
    out: &mut W,
) -> Result<()> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => C::default_config_path()
            .ok_or_else(|| Error::config("No platform config directory; pass --file"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "{} already exists; pass --force to replace it",
            path.display()
        )));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let report = write_with_backup(&path, C::default().to_toml_string()?.as_bytes(), true)?;
    writeln!(out, "Wrote default config to {}", report.path.display())?;
    if let Some(backup) = report.backup {
        writeln!(out, "Backup: {}", backup.display())?;
    }
    Ok(())
}

/// Print the configuration as `KEY=value` lines (or `--env KEY=value`).
pub fn cmd_config_export<C: ConfigManager, W: Write>(
    config: &C,
    docker_env: bool,
    out: &mut W,
) -> Result<()> {
    let prefix = if docker_env { "--env " } else { "" };
    for (key, value) in config.to_env_vars()? {
        writeln!(out, "{prefix}{key}={value}")?;
    }
    Ok(())
}

// ============================================================================
// TOML helpers
// ============================================================================

fn as_table<C: ConfigManager>(config: &C) -> Result<toml::Table> {
    toml::from_str(&config.to_toml_string()?).map_err(|e| Error::config(e.to_string()))
}

/// Value at a dotted key.
pub fn lookup<'a>(table: &'a toml::Table, key: &str) -> Option<&'a toml::Value> {
    let mut parts = key.split('.');
    let first = table.get(parts.next()?)?;
    parts.try_fold(first, |current, part| current.get(part))
}

/// Insert at a dotted key, creating intermediate tables.
pub fn insert_at(root: &mut toml::Table, key: &str, value: toml::Value) -> Result<()> {
    if key.split('.').any(str::is_empty) {
        return Err(Error::config(format!("Invalid config key '{key}'")));
    }
    let mut parts: Vec<&str> = key.split('.').collect();
    let last = parts.pop().unwrap_or(key);

    let mut table = root;
    for part in parts {
        table = table
            .entry(part)
            .or_insert_with(|| toml::Value::Table(toml::Table::new()))
            .as_table_mut()
            .ok_or_else(|| Error::config(format!("'{part}' in '{key}' is not a table")))?;
    }
    table.insert(last.to_string(), value);
    Ok(())
}

/// Type a raw command-line value after the value it replaces.
pub fn typed_value(raw: &str, current: Option<&toml::Value>) -> toml::Value {
    match current {
        Some(toml::Value::Array(_)) => toml::Value::Array(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(scalar)
                .collect(),
        ),
        Some(toml::Value::String(_)) => toml::Value::String(raw.to_string()),
        _ => scalar(raw),
    }
}

fn scalar(raw: &str) -> toml::Value {
    if let Ok(b) = raw.parse::<bool>() {
        toml::Value::Boolean(b)
    } else if let Ok(i) = raw.parse::<i64>() {
        toml::Value::Integer(i)
    } else if let Ok(f) = raw.parse::<f64>() {
        toml::Value::Float(f)
    } else {
        toml::Value::String(raw.to_string())
    }
}

/// Render a value the way it was typed: strings unquoted, lists comma-joined.
pub fn display_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

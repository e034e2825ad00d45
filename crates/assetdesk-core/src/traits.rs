//! Traits implemented by application crates.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// A TOML-backed application configuration.
///
/// Implementors supply the project name and defaults; loading, path
/// resolution, and serialization are shared.
pub trait ConfigManager: Serialize + DeserializeOwned + Default {
    /// Project name, used for the config directory and env var prefix.
    fn project_name() -> &'static str;

    /// Flatten the configuration into `PREFIX_KEY=value` pairs.
    fn to_env_vars(&self) -> Result<Vec<(String, String)>>;

    /// Check values that deserialize but cannot be used.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Default config file location: `<platform config dir>/<project>/config.toml`.
    fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(Self::project_name()).join("config.toml"))
    }

    /// Explicit path if given, otherwise the default location.
    fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        match explicit {
            Some(p) => Some(PathBuf::from(p)),
            None => Self::default_config_path(),
        }
    }

    /// Override values from the process environment after loading.
    fn apply_env_overrides(&mut self) -> Result<()> {
        Ok(())
    }

    /// Load the configuration, then apply [`apply_env_overrides`](Self::apply_env_overrides).
    ///
    /// A missing file yields the defaults; an explicit path that does not
    /// exist is an error.
    fn load(explicit: Option<&str>) -> Result<Self> {
        let mut config = match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) if explicit.is_some() => {
                return Err(Error::config(format!(
                    "Config file does not exist at {}",
                    path.display()
                )));
            }
            Some(path) => {
                log::debug!("no config at {}, using defaults", path.display());
                Self::default()
            }
            None => Self::default(),
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse the configuration from a TOML file.
    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Serialize to pretty TOML.
    fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}

//! Application configuration.

use assetdesk_core::util::resolver::{DEFAULT_HEADERS_SUBDIR, PathResolver};
use assetdesk_core::util::files::DEFAULT_PATTERNS;
use assetdesk_core::{ConfigManager, Error, FilePatterns, Result, TextEncoding};
use serde::{Deserialize, Serialize};

/// Project name used for the config directory and environment variables.
pub const PROJECT_NAME: &str = "assetdesk";

/// Default width of value previews in `keys` listings.
pub const DEFAULT_PREVIEW_WIDTH: usize = 200;

/// User configuration, read from `<config dir>/assetdesk/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Assets folder; discovered next to the binary when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets_dir: Option<String>,
    /// Header-file directory inside the assets folder.
    pub headers_subdir: String,
    /// File-name patterns listed and opened as assets.
    pub patterns: Vec<String>,
    /// Encodings tried when decoding, in preference order.
    pub encodings: Vec<String>,
    /// Keep the previous file as `<name>.bak` on save.
    pub backup: bool,
    /// Maximum characters shown per value in listings.
    pub preview_width: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            assets_dir: None,
            headers_subdir: DEFAULT_HEADERS_SUBDIR.to_string(),
            patterns: DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect(),
            encodings: TextEncoding::PREFERRED
                .iter()
                .map(|e| e.label().to_string())
                .collect(),
            backup: true,
            preview_width: DEFAULT_PREVIEW_WIDTH,
        }
    }
}

impl ConfigManager for AppConfig {
    fn project_name() -> &'static str {
        PROJECT_NAME
    }

    fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let resolver = self.resolver();
        let mut vars = Vec::new();
        if let Some(dir) = &self.assets_dir {
            vars.push((resolver.env_var("ASSETS_DIR"), dir.clone()));
        }
        vars.push((resolver.env_var("HEADERS_SUBDIR"), self.headers_subdir.clone()));
        vars.push((resolver.env_var("PATTERNS"), self.patterns.join(",")));
        vars.push((resolver.env_var("ENCODINGS"), self.encodings.join(",")));
        vars.push((resolver.env_var("BACKUP"), self.backup.to_string()));
        vars.push((resolver.env_var("PREVIEW_WIDTH"), self.preview_width.to_string()));
        Ok(vars)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_env(|name| std::env::var(name).ok())
    }

    fn validate(&self) -> Result<()> {
        self.file_patterns()?;
        self.text_encodings()?;
        if self.preview_width < 4 {
            return Err(Error::config("preview_width must be at least 4"));
        }
        Ok(())
    }
}

fn env_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

impl AppConfig {
    /// Override fields from `ASSETDESK_*` variables, the names
    /// [`to_env_vars`](ConfigManager::to_env_vars) exports.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let resolver = self.resolver();
        let var = |suffix: &str| {
            let name = resolver.env_var(suffix);
            lookup(&name).map(|value| (name, value))
        };

        if let Some((_, value)) = var("ASSETS_DIR") {
            self.assets_dir = Some(value);
        }
        if let Some((_, value)) = var("HEADERS_SUBDIR") {
            self.headers_subdir = value;
        }
        if let Some((_, value)) = var("PATTERNS") {
            self.patterns = env_list(&value);
        }
        if let Some((_, value)) = var("ENCODINGS") {
            self.encodings = env_list(&value);
        }
        if let Some((name, value)) = var("BACKUP") {
            self.backup = value
                .trim()
                .parse()
                .map_err(|_| Error::config(format!("{name} must be true or false, got '{value}'")))?;
        }
        if let Some((name, value)) = var("PREVIEW_WIDTH") {
            self.preview_width = value
                .trim()
                .parse()
                .map_err(|_| Error::config(format!("{name} must be a number, got '{value}'")))?;
        }
        Ok(())
    }

    /// Resolver seeded with the configured assets folder.
    pub fn resolver(&self) -> PathResolver {
        PathResolver::new(PROJECT_NAME).with_configured(self.assets_dir.as_deref())
    }

    /// Compiled file-name patterns.
    pub fn file_patterns(&self) -> Result<FilePatterns> {
        if self.patterns.is_empty() {
            return Err(Error::config("patterns must not be empty"));
        }
        FilePatterns::new(&self.patterns)
    }

    /// Configured encodings, in preference order.
    pub fn text_encodings(&self) -> Result<Vec<TextEncoding>> {
        if self.encodings.is_empty() {
            return Err(Error::config("encodings must not be empty"));
        }
        self.encodings
            .iter()
            .map(|label| {
                label
                    .parse::<TextEncoding>()
                    .map_err(|_| Error::config(format!("Unknown encoding '{label}'")))
            })
            .collect()
    }
}

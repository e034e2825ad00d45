//! Resolution of the `Assets` directory.
//!
//! `PathResolver` locates the folder that holds the editable asset files
//! using, in order: an explicit path, an environment variable, the
//! configured path, an `Assets` directory next to (or above) the binary,
//! and finally `./Assets`.
//!
//! # Example
//!
//! ```no_run
//! use assetdesk_core::util::resolver::PathResolver;
//!
//! let resolver = PathResolver::new("assetdesk").with_configured(Some("~/game/Assets"));
//!
//! // Checks ASSETDESK_ASSETS_DIR, then ~/game/Assets, then the binary's tree
//! if let Some(assets) = resolver.assets_dir(None) {
//!     println!("Assets: {:?}", assets);
//! }
//! ```

use std::env;
use std::path::{Path, PathBuf};

use crate::util::paths::{binary_dir, expand_tilde, find_dir_with_marker};

/// Default name of the assets directory.
pub const DEFAULT_ASSETS_DIR: &str = "Assets";

/// Default name of the header-file directory inside the assets directory.
pub const DEFAULT_HEADERS_SUBDIR: &str = "Headers";

/// Process state consulted by [`PathResolver::assets_dir_with`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Surroundings {
    /// Value of the `{PROJECT}_ASSETS_DIR` variable.
    pub env_assets_dir: Option<String>,
    /// Directory holding the running binary.
    pub binary_dir: Option<PathBuf>,
    /// Working directory.
    pub current_dir: Option<PathBuf>,
}

impl Surroundings {
    /// Read the environment, executable location and working directory.
    pub fn from_process(resolver: &PathResolver) -> Self {
        Self {
            env_assets_dir: env::var(resolver.env_var("ASSETS_DIR")).ok(),
            binary_dir: binary_dir(),
            current_dir: env::current_dir().ok(),
        }
    }
}

/// Configurable resolver for the assets directory of a project.
#[derive(Debug, Clone)]
pub struct PathResolver {
    /// Project name (e.g., "assetdesk")
    project_name: String,
    /// Environment variable prefix (e.g., "ASSETDESK")
    env_prefix: String,
    /// Directory name searched for when walking up from the binary
    assets_marker: String,
    /// Path from the configuration file (expanded with tilde)
    configured: Option<PathBuf>,
}

impl PathResolver {
    /// Create a new resolver for the given project name.
    ///
    /// The project name is converted to an environment variable prefix:
    /// - "assetdesk" → "ASSETDESK"
    /// - "asset-desk" → "ASSET_DESK"
    pub fn new(project_name: &str) -> Self {
        let env_prefix = project_name.to_uppercase().replace(['-', ' '], "_");

        Self {
            project_name: project_name.to_string(),
            env_prefix,
            assets_marker: DEFAULT_ASSETS_DIR.to_string(),
            configured: None,
        }
    }

    /// Set the directory name that identifies the assets folder.
    pub fn with_assets_marker(mut self, marker: &str) -> Self {
        self.assets_marker = marker.to_string();
        self
    }

    /// Set the assets path read from the configuration file (supports ~ expansion).
    pub fn with_configured(mut self, path: Option<&str>) -> Self {
        self.configured = path.map(expand_tilde);
        self
    }

    /// Get the environment variable name for a given suffix.
    ///
    /// # Example
    /// ```
    /// use assetdesk_core::util::resolver::PathResolver;
    ///
    /// let resolver = PathResolver::new("assetdesk");
    /// assert_eq!(resolver.env_var("ASSETS_DIR"), "ASSETDESK_ASSETS_DIR");
    /// ```
    pub fn env_var(&self, suffix: &str) -> String {
        format!("{}_{}", self.env_prefix, suffix)
    }

    /// Resolve the assets directory.
    ///
    /// An explicit path is authoritative: it is returned if it exists and
    /// nothing else is tried. Otherwise checks in order:
    /// 1. `{PROJECT}_ASSETS_DIR` environment variable
    /// 2. Configured path
    /// 3. Walk up from the binary looking for the assets marker
    /// 4. The assets marker in the current directory
    pub fn assets_dir(&self, explicit: Option<&Path>) -> Option<PathBuf> {
        self.assets_dir_with(explicit, &Surroundings::from_process(self))
    }

    /// [`assets_dir`](Self::assets_dir) against the given process state.
    pub fn assets_dir_with(&self, explicit: Option<&Path>, around: &Surroundings) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return path.is_dir().then(|| path.to_path_buf());
        }

        // 1. Check environment variable
        if let Some(path) = &around.env_assets_dir {
            let path = expand_tilde(path);
            if path.is_dir() {
                return Some(path);
            }
            log::debug!("{} points at missing {}", self.env_var("ASSETS_DIR"), path.display());
        }

        // 2. Configured path
        if let Some(configured) = &self.configured {
            if configured.is_dir() {
                return Some(configured.clone());
            }
            log::debug!("configured assets dir {} does not exist", configured.display());
        }

        // 3. Walk up from binary location
        if let Some(root) = around
            .binary_dir
            .as_deref()
            .and_then(|bin_dir| find_dir_with_marker(bin_dir, &self.assets_marker))
        {
            return Some(root.join(&self.assets_marker));
        }

        // 4. Current directory
        let local = around.current_dir.as_ref()?.join(&self.assets_marker);
        local.is_dir().then_some(local)
    }

    /// Location reported to the user when no assets directory exists.
    pub fn default_location(&self) -> PathBuf {
        binary_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(&self.assets_marker)
    }

    /// Get the project name.
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Get the environment variable prefix.
    pub fn env_prefix(&self) -> &str {
        &self.env_prefix
    }
}

/// Directory holding header files for the given assets directory.
pub fn headers_dir(assets_dir: &Path, subdir: &str) -> PathBuf {
    assets_dir.join(subdir)
}

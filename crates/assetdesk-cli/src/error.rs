//! Error types for assetdesk-cli

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for assetdesk-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in assetdesk-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from assetdesk-core or assetdesk-content
    #[error(transparent)]
    Core(#[from] assetdesk_core::Error),

    /// The file was classified as something other than INI.
    #[error("{} is {kind} content, not an INI document", path.display())]
    NotIni {
        /// File that was opened.
        path: PathBuf,
        /// What it was classified as.
        kind: &'static str,
    },

    /// The file was classified as something other than an item table.
    #[error("{} is not an item table", path.display())]
    NotItems {
        /// File that was opened.
        path: PathBuf,
    },

    /// The assets directory could not be located.
    #[error("Assets folder not found (expected {}); pass --assets or set assets_dir in the config", expected.display())]
    AssetsNotFound {
        /// Default location that was checked.
        expected: PathBuf,
    },

    /// Reading an answer from the terminal failed.
    #[error("Failed to read from the terminal: {0}")]
    Input(#[source] std::io::Error),

    /// Writing command output failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// JSON rendering failed.
    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

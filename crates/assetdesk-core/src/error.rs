//! Error types for assetdesk-core.
//!
//! Every crate in the workspace reports failures through this single
//! [`Error`] type, so the CLI can print one consistent message regardless
//! of which layer failed.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for assetdesk operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading, editing, or saving asset files.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// I/O error, optionally tied to the path being accessed.
    #[error("I/O error{}: {source}", fmt_path(.path))]
    Io {
        /// Path involved in the failed operation, if known.
        path: Option<PathBuf>,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Generic parse failure (header files, metadata, config values).
    #[error("Parse error: {0}")]
    Parse(String),

    /// An INI option appeared before any `[section]` header.
    #[error("File contains no section headers (line {line})")]
    MissingSectionHeader {
        /// 1-based line number of the offending option.
        line: usize,
    },

    /// Malformed INI line.
    #[error("Syntax error on line {line}: {message}")]
    Syntax {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    /// A section name was declared twice.
    #[error("Section '{0}' already exists")]
    DuplicateSection(String),

    /// A key was declared twice inside one section.
    #[error("Key '{key}' already exists in section '{section}'")]
    DuplicateKey {
        /// Section containing the duplicate.
        section: String,
        /// Duplicated key.
        key: String,
    },

    /// Requested section does not exist.
    #[error("No section: '{0}'")]
    NoSection(String),

    /// Requested key does not exist in the section.
    #[error("No key '{key}' in section '{section}'")]
    NoKey {
        /// Section that was searched.
        section: String,
        /// Key that was not found.
        key: String,
    },

    /// Configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A file or directory could not be located.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An operation was asked to do something that does not make sense.
    #[error("Invalid operation: {0}")]
    Invalid(String),

    /// Writing an export (CSV) failed.
    #[error("Export error: {0}")]
    Export(String),
}

fn fmt_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" at {}", p.display()),
        None => String::new(),
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { path: None, source }
    }
}

impl Error {
    /// Creates an I/O error tied to a path.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: Some(path.as_ref().to_path_buf()),
            source,
        }
    }

    /// Creates a parse error.
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Error::Parse(message.into())
    }

    /// Creates a syntax error for an INI line.
    pub fn syntax<S: Into<String>>(line: usize, message: S) -> Self {
        Error::Syntax {
            line,
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config(message.into())
    }

    /// Creates a not-found error.
    pub fn not_found<S: Into<String>>(what: S) -> Self {
        Error::NotFound(what.into())
    }

    /// Creates an invalid-operation error.
    pub fn invalid<S: Into<String>>(message: S) -> Self {
        Error::Invalid(message.into())
    }

    /// Creates an export error.
    pub fn export<S: Into<String>>(message: S) -> Self {
        Error::Export(message.into())
    }

    /// Returns whether this error came from INI syntax rather than I/O or lookups.
    ///
    /// Files that fail with one of these are shown as raw text instead of
    /// being opened in the INI editor.
    pub fn is_ini_syntax(&self) -> bool {
        matches!(
            self,
            Error::MissingSectionHeader { .. }
                | Error::Syntax { .. }
                | Error::DuplicateSection(_)
                | Error::DuplicateKey { .. }
        )
    }
}

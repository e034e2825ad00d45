//! assetdesk core: shared types, traits, errors, and utilities.
//!
//! This crate provides the foundational pieces used across all assetdesk
//! crates. It has no internal assetdesk dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`encoding`]: Legacy text-encoding detection
//! - [`traits`]: Configuration trait
//! - [`util`]: Asset discovery, path resolution, and atomic writes

#![doc = include_str!("../README.md")]

pub mod encoding;
pub mod error;
pub mod traits;
pub mod util;

// Re-export key types at crate root for convenience
pub use encoding::{DecodedText, TextEncoding, decode_best};
pub use error::{Error, Result};
pub use traits::ConfigManager;

// Convenience re-exports from util
pub use util::files::{AssetFile, FilePatterns, SaveReport, find_asset_files, write_with_backup};
pub use util::resolver::{PathResolver, Surroundings};

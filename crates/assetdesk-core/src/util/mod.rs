//! Utility modules for asset discovery, path handling, and safe writes.
//!
//! # Modules
//!
//! - [`files`]: Async asset discovery and atomic writes with backups
//! - [`paths`]: Generic path utilities (binary location, tilde expansion)
//! - [`resolver`]: Resolution of the `Assets` directory

pub mod files;
pub mod paths;
pub mod resolver;

//! # assetdesk-cli
//!
//! Command-line front end for assetdesk:
//! - listing `.ini`/`.txt` files under an `Assets` folder
//! - viewing files as item tables, INI documents or raw text
//! - editing INI sections and keys, saved with a `.bak` backup
//! - exporting item tables to CSV and maintaining header files
//! - configuration management

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;
pub mod error;

pub use cli::{Cli, Command, ConfigAction, ItemsAction};
pub use commands::{Context, run};
pub use config::AppConfig;
pub use error::{Error, Result};

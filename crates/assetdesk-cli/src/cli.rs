//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// assetdesk - browse and edit INI and item files under an Assets folder
#[derive(Parser, Debug)]
#[command(name = "assetdesk", version)]
#[command(about = "Browse and edit INI and item files under an Assets folder", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "ASSETDESK_CONFIG")]
    pub config: Option<String>,

    /// Assets folder (skips discovery)
    #[arg(short, long, global = true)]
    pub assets: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Never ask for the assets folder on the terminal
    #[arg(long, global = true)]
    pub no_prompt: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List .ini/.txt files under the assets folder
    List {
        /// Print JSON instead of one path per line
        #[arg(long)]
        json: bool,
    },

    /// Show a file as an item table, INI document or raw text
    Show {
        /// File to open (absolute, or relative to the assets folder)
        file: String,
        /// Print JSON
        #[arg(long)]
        json: bool,
        /// Show at most this many rows, sections or lines
        #[arg(long)]
        limit: Option<usize>,
    },

    /// List the sections of an INI file
    Sections {
        /// INI file
        file: String,
    },

    /// List the keys of a section with a preview of each value
    Keys {
        /// INI file
        file: String,
        /// Section name
        section: String,
    },

    /// Print a value
    Get {
        /// INI file
        file: String,
        /// Section name
        section: String,
        /// Key name
        key: String,
    },

    /// Set a value (creates the key) and save
    Set {
        /// INI file
        file: String,
        /// Section name
        section: String,
        /// Key name
        key: String,
        /// New value (may span several lines)
        #[arg(required_unless_present = "no_value")]
        value: Option<String>,
        /// Write the key without a value
        #[arg(long, conflicts_with = "value")]
        no_value: bool,
    },

    /// Add an empty section and save
    AddSection {
        /// INI file
        file: String,
        /// Section name
        name: String,
    },

    /// Remove a section and save
    RemoveSection {
        /// INI file
        file: String,
        /// Section name
        name: String,
    },

    /// Remove a key and save
    RemoveKey {
        /// INI file
        file: String,
        /// Section name
        section: String,
        /// Key name
        key: String,
    },

    /// Item table operations
    Items {
        #[command(subcommand)]
        action: ItemsAction,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Item table subcommands.
#[derive(Subcommand, Debug)]
pub enum ItemsAction {
    /// Print the column names and where they came from
    Headers {
        /// Item file
        file: String,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Export the table as CSV in the file's encoding
    Export {
        /// Item file
        file: String,
        /// CSV file to write
        output: PathBuf,
        /// Comma-separated column names to use instead of the current ones
        #[arg(long, value_delimiter = ',')]
        rename: Option<Vec<String>>,
        /// Change a cell before exporting (0-based row); repeatable
        #[arg(long = "set", value_name = "ROW:COLUMN=VALUE")]
        set: Vec<String>,
        /// Append a row of comma-separated values before exporting; repeatable
        #[arg(long = "add-row", value_name = "V1,V2,..")]
        add_row: Vec<String>,
    },

    /// Write the column names to Headers/H_<stem>.ini
    SaveHeader {
        /// Item file
        file: String,
        /// Comma-separated column names to save instead of the current ones
        #[arg(long, value_delimiter = ',')]
        rename: Option<Vec<String>>,
        /// Replace an existing header file
        #[arg(long)]
        force: bool,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,

    /// Get a configuration value by dotted key
    Get {
        /// Dotted key (e.g. `backup`)
        key: String,
    },

    /// Set a configuration value by dotted key
    Set {
        /// Dotted key
        key: String,
        /// New value; comma-separated for list keys such as `encodings`
        value: String,
    },

    /// Create a default configuration file
    Init {
        /// Write to this path instead of the default location
        #[arg(long)]
        file: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration as environment variables
    Export {
        /// Format as `--env KEY=value` for docker
        #[arg(long)]
        docker_env: bool,
    },
}

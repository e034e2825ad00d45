//! INI documents: parsing, editing, and writing.
//!
//! - [`document`]: the ordered in-memory model and its edit operations
//! - [`parser`]: text → [`IniDocument`]
//! - [`writer`]: [`IniDocument`] → text
//!
//! # Example
//!
//! ```rust
//! use assetdesk_content::ini::IniDocument;
//!
//! let mut doc = IniDocument::parse("[Sword]\nDamage = 10\n").unwrap();
//! doc.set("Sword", "damage", Some("12".to_string())).unwrap();
//! doc.add_section("Shield").unwrap();
//!
//! assert_eq!(doc.to_ini_string(), "[Sword]\ndamage = 12\n\n[Shield]\n\n");
//! ```

pub mod document;
pub mod parser;
pub mod writer;

pub use document::{DEFAULT_SECTION, Entries, IniDocument, normalize_key, value_preview};

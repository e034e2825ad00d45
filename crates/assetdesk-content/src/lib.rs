//! Content handling for assetdesk.
//!
//! - [`ini`]: INI document model, parser and writer
//! - [`items`]: pipe-delimited item tables, header files and CSV export
//! - [`asset`]: decoding and classifying asset files, saving INI documents

pub mod asset;
pub mod ini;
pub mod items;

pub use asset::{
    AssetContent, HeaderSource, OpenOptions, OpenedAsset, classify, open_asset, save_ini,
};
pub use ini::IniDocument;
pub use items::ItemTable;

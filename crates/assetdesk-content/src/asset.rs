//! Opening and saving asset files.
//!
//! An asset file is read as bytes, decoded with the best-scoring legacy
//! encoding and classified as an item table, an INI document or plain text,
//! in that order.

use std::fs;
use std::path::{Path, PathBuf};

use assetdesk_core::{Error, Result, SaveReport, TextEncoding, decode_best, write_with_backup};
use serde::Serialize;

use crate::ini::IniDocument;
use crate::items::{
    ItemTable, find_matching_header, generated_headers, looks_like_items, parse_items,
};

/// Where the columns of an item table came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum HeaderSource {
    /// A header file in the headers directory.
    File(PathBuf),
    /// `Unknown <n>` placeholders.
    Generated,
}

/// Classified content of an asset file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum AssetContent {
    /// Pipe-delimited item records.
    Items {
        /// Parsed rows.
        table: ItemTable,
        /// Origin of the column names.
        header_source: HeaderSource,
    },
    /// INI document.
    Ini(IniDocument),
    /// Text that is neither an item table nor valid INI.
    Raw(String),
}

impl AssetContent {
    /// Short name of the content kind.
    pub fn kind(&self) -> &'static str {
        match self {
            AssetContent::Items { .. } => "items",
            AssetContent::Ini(_) => "ini",
            AssetContent::Raw(_) => "raw",
        }
    }
}

/// An asset file after decoding and classification.
#[derive(Debug, Clone, Serialize)]
pub struct OpenedAsset {
    /// File that was read.
    pub path: PathBuf,
    /// Encoding the text was decoded with; used again when saving.
    pub encoding: TextEncoding,
    /// Classified content.
    pub content: AssetContent,
}

/// Options for [`open_asset`].
#[derive(Debug, Clone)]
pub struct OpenOptions {
    /// Encodings to try, in preference order.
    pub encodings: Vec<TextEncoding>,
    /// Directory holding header files, if any.
    pub headers_dir: Option<PathBuf>,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            encodings: TextEncoding::PREFERRED.to_vec(),
            headers_dir: None,
        }
    }
}

impl OpenOptions {
    /// Use header files from `dir`.
    pub fn with_headers_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.headers_dir = Some(dir.into());
        self
    }

    /// Try these encodings instead of the defaults.
    pub fn with_encodings(mut self, encodings: Vec<TextEncoding>) -> Self {
        self.encodings = encodings;
        self
    }
}

/// Read, decode and classify an asset file.
pub fn open_asset(path: &Path, options: &OpenOptions) -> Result<OpenedAsset> {
    let bytes = fs::read(path).map_err(|e| Error::io_with_path(e, path))?;
    let decoded = decode_best(&bytes, &options.encodings);
    log::debug!("{} decoded as {}", path.display(), decoded.encoding);

    let content = classify(path, decoded.text, options);
    log::debug!("{} classified as {}", path.display(), content.kind());

    Ok(OpenedAsset {
        path: path.to_path_buf(),
        encoding: decoded.encoding,
        content,
    })
}

/// Classify decoded text: item table, then INI, then raw text.
pub fn classify(path: &Path, text: String, options: &OpenOptions) -> AssetContent {
    if let Some(content) = detect_items(path, &text, options) {
        return content;
    }

    match IniDocument::parse(&text) {
        Ok(doc) => AssetContent::Ini(doc),
        Err(e) => {
            log::debug!("{} is not valid INI: {e}", path.display());
            AssetContent::Raw(text)
        }
    }
}

fn detect_items(path: &Path, text: &str, options: &OpenOptions) -> Option<AssetContent> {
    if let Some(found) = options
        .headers_dir
        .as_deref()
        .and_then(|dir| find_matching_header(path, text, dir))
    {
        return Some(AssetContent::Items {
            table: parse_items(text, &found.headers),
            header_source: HeaderSource::File(found.path),
        });
    }

    let headers = generated_headers(text)?;
    looks_like_items(text, Some(&headers)).then(|| AssetContent::Items {
        table: parse_items(text, &headers),
        header_source: HeaderSource::Generated,
    })
}

/// Serialize `document`, encode it and write it with a backup.
pub fn save_ini(
    path: &Path,
    document: &IniDocument,
    encoding: TextEncoding,
    backup: bool,
) -> Result<SaveReport> {
    let bytes = encoding.encode(&document.to_ini_string());
    write_with_backup(path, &bytes, backup)
}

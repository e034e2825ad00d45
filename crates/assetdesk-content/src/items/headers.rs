//! Header files describing item table columns.
//!
//! A header file lives in the assets `Headers` directory and holds the
//! column names of one item file as a single comma-separated line. The file
//! `Item.txt` is described by `H_Item.ini`. Client files named `c_<stem>`
//! fall back to the server header `h_<stem>.ini`. File names are compared
//! case-insensitively.

use std::fs;
use std::path::{Path, PathBuf};

use assetdesk_core::{Error, Result, TextEncoding, decode_best, write_with_backup};

use super::parser::{looks_like_items, metadata_columns, unknown_headers};

/// Extension of header files written by [`save_header_file`].
pub const HEADER_EXTENSION: &str = "ini";

/// A header file that fits an item file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch {
    /// Column names, fitted to the item file's metadata column count.
    pub headers: Vec<String>,
    /// Header file they were read from.
    pub path: PathBuf,
}

/// Read the column names from a header file.
pub fn load_header_file(path: &Path) -> Result<Vec<String>> {
    let bytes = fs::read(path).map_err(|e| Error::io_with_path(e, path))?;
    let decoded = decode_best(&bytes, TextEncoding::PREFERRED);
    let first = decoded
        .text
        .trim_start_matches('\u{feff}')
        .lines()
        .next()
        .unwrap_or("");

    let headers = parse_header_line(first);
    if headers.is_empty() {
        return Err(Error::parse(format!(
            "Header file {} has no column names",
            path.display()
        )));
    }
    Ok(headers)
}

/// Split a comma-separated header line, dropping empty names.
pub fn parse_header_line(line: &str) -> Vec<String> {
    line.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

/// Header file stems to try for an item file stem, most specific first.
///
/// ```
/// use assetdesk_content::items::header_candidates;
///
/// assert_eq!(header_candidates("c_Item"), vec!["H_c_Item", "h_item"]);
/// assert_eq!(header_candidates("Skill"), vec!["H_Skill"]);
/// ```
pub fn header_candidates(stem: &str) -> Vec<String> {
    let mut candidates = vec![format!("H_{stem}")];
    if let Some(rest) = stem.to_lowercase().strip_prefix("c_") {
        candidates.push(format!("h_{rest}"));
    }
    candidates
}

/// Truncate or extend `headers` to the announced column count.
///
/// Missing names become `Unknown <index>`. Without a count (or with a
/// count of zero) the headers are returned unchanged.
pub fn fit_to_columns(mut headers: Vec<String>, columns: Option<usize>) -> Vec<String> {
    let Some(columns) = columns.filter(|&c| c > 0) else {
        return headers;
    };
    if headers.len() > columns {
        headers.truncate(columns);
    } else {
        let start = headers.len();
        headers.extend(unknown_headers(start, columns));
    }
    headers
}

/// Files in `headers_dir`, sorted by file name. Any extension can hold a
/// header; only the stem is matched.
fn header_files(headers_dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(headers_dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::debug!("cannot read headers dir {}: {e}", headers_dir.display());
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    files
}

/// Find the header file that describes `item_path`.
///
/// Candidates are tried in [`header_candidates`] order. A header file is
/// accepted only when the item text looks like a table with that many
/// columns. Unreadable header files are skipped with a warning.
pub fn find_matching_header(item_path: &Path, text: &str, headers_dir: &Path) -> Option<HeaderMatch> {
    let stem = item_path.file_stem()?.to_str()?;
    let files = header_files(headers_dir);
    if files.is_empty() {
        return None;
    }
    let columns = metadata_columns(text);

    for candidate in header_candidates(stem) {
        let matching = files.iter().filter(|path| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .is_some_and(|s| s.eq_ignore_ascii_case(&candidate))
        });

        for path in matching {
            let headers = match load_header_file(path) {
                Ok(headers) => fit_to_columns(headers, columns),
                Err(e) => {
                    log::warn!("skipping header file {}: {e}", path.display());
                    continue;
                }
            };
            if looks_like_items(text, Some(&headers)) {
                log::debug!("{} matched header {}", item_path.display(), path.display());
                return Some(HeaderMatch {
                    headers,
                    path: path.clone(),
                });
            }
            log::debug!(
                "header {} does not fit {}",
                path.display(),
                item_path.display()
            );
        }
    }
    None
}

/// Path of the header file written for an item file stem.
pub fn header_file_path(headers_dir: &Path, stem: &str) -> PathBuf {
    headers_dir.join(format!("H_{stem}.{HEADER_EXTENSION}"))
}

/// Write `H_<stem>.ini` with the comma-joined column names.
///
/// The headers directory must already exist. An existing header file is
/// replaced only with `overwrite`, and is kept as a `.bak` backup.
pub fn save_header_file(
    headers_dir: &Path,
    stem: &str,
    headers: &[String],
    overwrite: bool,
) -> Result<PathBuf> {
    if !headers_dir.is_dir() {
        return Err(Error::not_found(format!(
            "headers directory {}",
            headers_dir.display()
        )));
    }
    if headers.is_empty() {
        return Err(Error::invalid("Cannot save an empty header list"));
    }
    if let Some(bad) = headers.iter().find(|h| h.contains([',', '\n', '\r'])) {
        return Err(Error::invalid(format!(
            "Header name '{bad}' must not contain commas or line breaks"
        )));
    }

    let path = header_file_path(headers_dir, stem);
    if path.exists() && !overwrite {
        return Err(Error::invalid(format!(
            "Header file {} already exists",
            path.display()
        )));
    }

    let report = write_with_backup(&path, headers.join(",").as_bytes(), true)?;
    Ok(report.path)
}

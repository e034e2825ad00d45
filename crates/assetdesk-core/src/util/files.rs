//! Asset discovery and atomic writes.
//!
//! Discovery walks the assets directory asynchronously and keeps files
//! whose names match one of the configured glob patterns. Writes go through
//! a temporary sibling file so a failed save never truncates the original,
//! and the previous content is kept as `<name>.bak`.

use std::path::{Path, PathBuf};

use async_walkdir::WalkDir;
use futures::StreamExt;
use glob::{MatchOptions, Pattern};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::util::paths::relative_to;

/// Default file-name patterns for editable assets.
pub const DEFAULT_PATTERNS: &[&str] = &["*.ini", "*.txt"];

/// Suffix appended to the file name for the backup copy.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Suffix appended to the file name for the temporary write target.
pub const TEMP_SUFFIX: &str = ".tmp";

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// A discovered asset file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct AssetFile {
    /// Path relative to the parent of the assets directory (display form).
    pub relative: PathBuf,
    /// Absolute (or as-given) path on disk.
    pub path: PathBuf,
}

/// Case-insensitive file-name filter built from glob patterns.
#[derive(Debug, Clone)]
pub struct FilePatterns {
    patterns: Vec<Pattern>,
}

impl FilePatterns {
    /// Compile the given glob patterns.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Pattern::new(p.as_ref())
                    .map_err(|e| Error::config(format!("Invalid pattern '{}': {e}", p.as_ref())))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Returns whether the file name matches any pattern.
    pub fn matches(&self, file_name: &str) -> bool {
        self.patterns
            .iter()
            .any(|p| p.matches_with(file_name, MATCH_OPTIONS))
    }
}

impl Default for FilePatterns {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_PATTERNS
                .iter()
                .filter_map(|p| Pattern::new(p).ok())
                .collect(),
        }
    }
}

/// Recursively find asset files under `assets_dir`.
///
/// Paths are reported relative to the parent of `assets_dir`, so a file
/// shows up as `Assets/Items/C_Item.txt`. The result is sorted.
pub async fn find_asset_files(assets_dir: &Path, patterns: &FilePatterns) -> Result<Vec<AssetFile>> {
    if !assets_dir.is_dir() {
        return Err(Error::not_found(format!(
            "Assets directory {}",
            assets_dir.display()
        )));
    }

    let base = assets_dir.parent().unwrap_or(assets_dir);
    let mut files = Vec::new();
    let mut walker = WalkDir::new(assets_dir);

    while let Some(entry) = walker.next().await {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                log::warn!("Walk error: {}", e);
                continue;
            }
        };

        let path = entry.path();

        // Skip directories
        if path.is_dir() {
            continue;
        }

        let matched = path
            .file_name()
            .map(|name| patterns.matches(&name.to_string_lossy()))
            .unwrap_or(false);
        if !matched {
            log::trace!("skipping {}", path.display());
            continue;
        }

        files.push(AssetFile {
            relative: relative_to(&path, base),
            path,
        });
    }

    files.sort();
    log::debug!("found {} asset files under {}", files.len(), assets_dir.display());
    Ok(files)
}

/// Outcome of [`write_with_backup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    /// File that was written.
    pub path: PathBuf,
    /// Backup of the previous content, if one was made.
    pub backup: Option<PathBuf>,
}

/// Sibling path formed by appending `suffix` to the file name.
pub fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

/// Write `bytes` to `path`, keeping the old file as `<name>.bak`.
///
/// The content is written to `<name>.tmp` first. Only after that succeeds
/// is the existing file moved to the backup (or copied, if the rename
/// fails) and the temporary file renamed into place. If that last rename
/// fails, a moved-away original is renamed back.
pub fn write_with_backup(path: &Path, bytes: &[u8], backup: bool) -> Result<SaveReport> {
    let tmp = sibling_with_suffix(path, TEMP_SUFFIX);

    if let Err(e) = std::fs::write(&tmp, bytes) {
        let _ = std::fs::remove_file(&tmp);
        return Err(Error::io_with_path(e, &tmp));
    }

    install_with_backup(path, &tmp, backup, |from, to| std::fs::rename(from, to))
}

fn install_with_backup<F>(path: &Path, tmp: &Path, backup: bool, install: F) -> Result<SaveReport>
where
    F: FnOnce(&Path, &Path) -> std::io::Result<()>,
{
    let mut backup_path = None;
    let mut moved_original = false;
    if backup && path.exists() {
        let bak = sibling_with_suffix(path, BACKUP_SUFFIX);
        match std::fs::rename(path, &bak) {
            Ok(()) => moved_original = true,
            Err(e) => {
                log::debug!("rename to backup failed ({e}), copying instead");
                if let Err(e) = std::fs::copy(path, &bak) {
                    let _ = std::fs::remove_file(tmp);
                    return Err(Error::io_with_path(e, &bak));
                }
            }
        }
        backup_path = Some(bak);
    }

    if let Err(e) = install(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        if let Some(bak) = backup_path.as_deref().filter(|_| moved_original) {
            if let Err(restore) = std::fs::rename(bak, path) {
                log::warn!(
                    "could not restore {} from {}: {restore}",
                    path.display(),
                    bak.display()
                );
            }
        }
        return Err(Error::io_with_path(e, path));
    }

    log::info!("saved {}", path.display());
    Ok(SaveReport {
        path: path.to_path_buf(),
        backup: backup_path,
    })
}

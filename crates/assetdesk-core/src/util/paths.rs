//! Generic path utilities.

use std::path::{Path, PathBuf};

/// Directory containing the running executable, if it can be determined.
pub fn binary_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

/// Expand a leading `~` to the user's home directory.
///
/// ```
/// use assetdesk_core::util::paths::expand_tilde;
///
/// assert_eq!(expand_tilde("/abs/Assets"), std::path::PathBuf::from("/abs/Assets"));
/// ```
pub fn expand_tilde(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Walk up from `start` and return the first directory containing `marker`.
pub fn find_dir_with_marker(start: &Path, marker: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(marker).is_dir())
        .map(Path::to_path_buf)
}

/// Express `path` relative to `base`, or return it unchanged when it is not
/// below `base`.
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    path.strip_prefix(base)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}

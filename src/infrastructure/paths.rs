//! Sandbox path helpers.

use std::path::PathBuf;

/// Directory for reelsearch's own files (currently only the trace log).
///
/// Resolves to `/host/.local/share/zellij/reelsearch`, which is
/// `~/.local/share/zellij/reelsearch` when Zellij runs from the home directory.
///
/// ```
/// use reelsearch::infrastructure::get_data_dir;
///
/// assert!(get_data_dir().ends_with(".local/share/zellij/reelsearch"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("reelsearch")
}

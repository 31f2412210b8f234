//! Backup rotation
//!
//! Keeps a bounded number of backup archives per destination. Rotation is
//! best-effort housekeeping: a file that vanishes between listing and
//! deletion is not an error, and running rotation twice in a row is a
//! no-op.

use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

use crate::error::DeployResult;

/// Delete all but the newest `keep` files matching `pattern`.
///
/// Matches are ordered by modification time, newest first. Returns the
/// paths that were handed to the deleter (whether or not each individual
/// delete succeeded). Fewer than `keep` matches is a no-op.
pub fn rotate_backups(pattern: &str, keep: usize) -> DeployResult<Vec<PathBuf>> {
    let mut matches: Vec<(PathBuf, SystemTime)> = Vec::new();
    for entry in glob::glob(pattern)? {
        // Unreadable entries are skipped, same as a concurrent removal.
        let Ok(path) = entry else { continue };
        let Ok(meta) = fs::metadata(&path) else {
            continue;
        };
        if !meta.is_file() {
            continue;
        }
        let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        matches.push((path, modified));
    }

    matches.sort_by(|a, b| b.1.cmp(&a.1));

    let mut deleted = Vec::new();
    for (path, _) in matches.into_iter().skip(keep) {
        // Best-effort: tolerate concurrent removal.
        let _ = fs::remove_file(&path);
        deleted.push(path);
    }
    Ok(deleted)
}

//! Deployment state machines
//!
//! Two deployers share the validation and backup plumbing here. Each runs
//! a fixed forward-only sequence; any fatal error short-circuits the rest
//! and is reported as the step it came from. There is no retry and no
//! rollback beyond the pre-overwrite backup.

mod archive;
mod bundle;

pub use archive::ArchiveDeployer;
pub use bundle::BundleDeployer;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{DeployError, DeployResult};
use crate::input::InputSource;

/// Timestamp component of backup file names, second granularity.
pub(crate) fn backup_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Read the staged file name and resolve it against the staging directory.
///
/// Empty input fails immediately; a name that does not resolve to an
/// existing staged file fails before anything is touched.
pub(crate) fn resolve_staged(
    config: &Config,
    input: &mut dyn InputSource,
    prompt: &str,
) -> DeployResult<PathBuf> {
    let name = input.read_line(prompt)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(DeployError::EmptyInput);
    }
    let staged = config.staging_dir.join(name);
    if !staged.is_file() {
        return Err(DeployError::SourceNotFound { path: staged });
    }
    Ok(staged)
}

/// Ensure the destination directory exists and is writable.
///
/// An absent directory is created (creation failure means the parent is
/// not writable). An existing one is probed with a scratch file, the only
/// check that holds across filesystems.
pub(crate) fn ensure_dest_dir(dest: &Path) -> DeployResult<()> {
    if !dest.exists() {
        return fs::create_dir_all(dest).map_err(|_| DeployError::PermissionDenied {
            path: dest.to_path_buf(),
        });
    }
    let probe = dest.join(".stagehand-probe");
    match fs::File::create(&probe) {
        Ok(_) => {
            let _ = fs::remove_file(&probe);
            Ok(())
        }
        Err(_) => Err(DeployError::PermissionDenied {
            path: dest.to_path_buf(),
        }),
    }
}

/// True when the directory has no entries.
pub(crate) fn dir_is_empty(dir: &Path) -> io::Result<bool> {
    Ok(fs::read_dir(dir)?.next().is_none())
}

/// Remove every entry inside `dir`, leaving `dir` itself in place.
pub(crate) fn clear_dir(dir: &Path) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}

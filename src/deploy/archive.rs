//! Single-file archive deployment
//!
//! Copies a staged archive into a fixed drop directory under its own name.
//! The previous file, if any, is compressed into a per-file backup first.
//! The deployed archive is consumed asynchronously by an external runtime;
//! this deployer's job ends once the copy and ownership are done.

use std::fs;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::{DeployError, DeployResult};
use crate::input::InputSource;
use crate::models::{DeployOutcome, DeployTarget};
use crate::rotate::rotate_backups;
use crate::tools::{Archiver, OwnershipSetter};

use super::{backup_timestamp, ensure_dest_dir, resolve_staged};

/// Deploys single-file archive targets
pub struct ArchiveDeployer<'a> {
    config: &'a Config,
    archiver: &'a dyn Archiver,
    ownership: &'a dyn OwnershipSetter,
}

impl<'a> ArchiveDeployer<'a> {
    pub fn new(
        config: &'a Config,
        archiver: &'a dyn Archiver,
        ownership: &'a dyn OwnershipSetter,
    ) -> Self {
        Self {
            config,
            archiver,
            ownership,
        }
    }

    /// Run one archive deployment against `target`.
    pub fn deploy(
        &self,
        target: &DeployTarget,
        input: &mut dyn InputSource,
    ) -> DeployResult<DeployOutcome> {
        // AwaitingSourceName + Validating
        let staged = resolve_staged(self.config, input, "Staged archive file name")?;
        ensure_dest_dir(&target.dest)?;

        // The file keeps its original name inside the drop directory.
        let file_name = staged
            .file_name()
            .ok_or(DeployError::EmptyInput)?
            .to_os_string();
        let dest_file = target.dest.join(&file_name);

        let mut outcome = DeployOutcome::new(&target.label);

        // BackingUp: only when the same file is already deployed. Rotation
        // leaves room for the incoming snapshot so the retain count holds
        // afterwards.
        if dest_file.is_file() {
            let pattern = format!("{}.*.zip", dest_file.display());
            let keep = self.config.retain_count.saturating_sub(1);
            outcome.rotated = rotate_backups(&pattern, keep)?;

            let backup = PathBuf::from(format!(
                "{}.{}.zip",
                dest_file.display(),
                backup_timestamp()
            ));
            self.archiver
                .archive(&dest_file, &backup)
                .map_err(|e| DeployError::BackupFailed {
                    path: dest_file.clone(),
                    reason: e.to_string(),
                })?;
            outcome.backup = Some(backup);
        }

        // Copying
        fs::copy(&staged, &dest_file).map_err(|e| DeployError::CopyFailed {
            dest: dest_file.clone(),
            reason: e.to_string(),
        })?;

        // SettingOwnership: failure is a warning, the content stands.
        if let Err(e) = self.ownership.set_owner(&target.owner, &dest_file) {
            outcome
                .warnings
                .push(format!("ownership '{}' not applied: {e}", target.owner));
        }

        Ok(outcome)
    }
}

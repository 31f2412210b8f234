//! Bundle deployment
//!
//! Replaces a destination directory wholesale with the contents of a
//! staged bundle zip. Sequence: validate, rotate and snapshot, clear and
//! extract and move, set ownership. The snapshot happens before anything
//! destructive; a failure after the destination is cleared is a
//! non-recoverable partial state the operator remedies from the backup.

use std::fs;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::{DeployError, DeployResult};
use crate::input::InputSource;
use crate::models::{DeployOutcome, DeployTarget};
use crate::rotate::rotate_backups;
use crate::tools::{Archiver, ExtractStatus, Extractor, OwnershipSetter};

use super::{backup_timestamp, clear_dir, dir_is_empty, ensure_dest_dir, resolve_staged};

/// Deploys directory-style bundle targets
pub struct BundleDeployer<'a> {
    config: &'a Config,
    archiver: &'a dyn Archiver,
    extractor: &'a dyn Extractor,
    ownership: &'a dyn OwnershipSetter,
}

impl<'a> BundleDeployer<'a> {
    pub fn new(
        config: &'a Config,
        archiver: &'a dyn Archiver,
        extractor: &'a dyn Extractor,
        ownership: &'a dyn OwnershipSetter,
    ) -> Self {
        Self {
            config,
            archiver,
            extractor,
            ownership,
        }
    }

    /// Run one bundle deployment against `target`.
    pub fn deploy(
        &self,
        target: &DeployTarget,
        input: &mut dyn InputSource,
    ) -> DeployResult<DeployOutcome> {
        // AwaitingSourceName + Validating
        let staged = resolve_staged(self.config, input, "Staged bundle file name")?;
        ensure_dest_dir(&target.dest)?;

        let mut outcome = DeployOutcome::new(&target.label);

        // BackingUp: rotate old snapshots first, then snapshot current
        // content if there is any. When a new snapshot is coming, rotation
        // leaves room for it so the retain count holds afterwards.
        let will_snapshot = !dir_is_empty(&target.dest)?;
        let keep = if will_snapshot {
            self.config.retain_count.saturating_sub(1)
        } else {
            self.config.retain_count
        };
        let pattern = format!("{}_*.zip", target.dest.display());
        outcome.rotated = rotate_backups(&pattern, keep)?;
        if will_snapshot {
            let backup = PathBuf::from(format!(
                "{}_{}.zip",
                target.dest.display(),
                backup_timestamp()
            ));
            self.archiver
                .archive(&target.dest, &backup)
                .map_err(|e| DeployError::BackupFailed {
                    path: target.dest.clone(),
                    reason: e.to_string(),
                })?;
            outcome.backup = Some(backup);
        }

        // Replacing
        clear_dir(&target.dest)?;
        let work = &self.config.work_dir;
        if work.exists() {
            fs::remove_dir_all(work)?;
        }
        fs::create_dir_all(work)?;

        match self.extractor.extract(&staged, work) {
            Ok(ExtractStatus::Clean) => {}
            Ok(ExtractStatus::Warnings(code)) => outcome
                .warnings
                .push(format!("extractor reported warnings (exit {code})")),
            Err(e) => {
                return Err(DeployError::ExtractionFailed {
                    archive: staged,
                    reason: e.to_string(),
                })
            }
        }

        let build_dir = work.join(&self.config.bundle_root);
        if !build_dir.is_dir() {
            return Err(DeployError::ExtractionFailed {
                archive: staged,
                reason: format!(
                    "archive did not contain a '{}' directory",
                    self.config.bundle_root
                ),
            });
        }

        for entry in fs::read_dir(&build_dir)? {
            let entry = entry?;
            let to = target.dest.join(entry.file_name());
            fs::rename(entry.path(), &to).map_err(|e| DeployError::MoveFailed {
                dest: target.dest.clone(),
                reason: e.to_string(),
            })?;
        }

        // SettingOwnership: failure is a warning, the content stands.
        if let Err(e) = self.ownership.set_owner(&target.owner, &target.dest) {
            outcome
                .warnings
                .push(format!("ownership '{}' not applied: {e}", target.owner));
        }

        // Done
        let _ = fs::remove_dir_all(work);
        Ok(outcome)
    }
}

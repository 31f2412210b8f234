//! Configuration for Stagehand
//!
//! One immutable [`Config`] is built at startup and passed by reference into
//! every deployer call; there is no ambient global state. Lookup order:
//!
//! 1. Explicit path from `--config`
//! 2. User config (`~/.config/stagehand/config.toml`)
//! 3. Built-in defaults (no targets; `validate` rejects this, so a real
//!    run always needs a config file)

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{DeployError, DeployResult};
use crate::models::DeployTarget;

/// Immutable runtime configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Shared directory where operators stage artifacts before deployment
    #[serde(default = "default_staging_dir")]
    pub staging_dir: PathBuf,

    /// Fixed scratch directory bundles are extracted into before the move
    #[serde(default = "default_work_dir")]
    pub work_dir: PathBuf,

    /// Maximum number of backup archives kept per destination
    #[serde(default = "default_retain_count")]
    pub retain_count: usize,

    /// Name of the single top-level directory a bundle zip must contain
    #[serde(default = "default_bundle_root")]
    pub bundle_root: String,

    /// Deployment targets offered in the menu, in menu order
    #[serde(default)]
    pub targets: Vec<DeployTarget>,
}

fn default_staging_dir() -> PathBuf {
    PathBuf::from("/srv/staging")
}

fn default_work_dir() -> PathBuf {
    std::env::temp_dir().join("stagehand.extract")
}

fn default_retain_count() -> usize {
    2
}

fn default_bundle_root() -> String {
    "build".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            staging_dir: default_staging_dir(),
            work_dir: default_work_dir(),
            retain_count: default_retain_count(),
            bundle_root: default_bundle_root(),
            targets: Vec::new(),
        }
    }
}

impl Config {
    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> DeployResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from an explicit path, the user config file, or
    /// defaults, in that order. An explicit path that cannot be read is an
    /// error; a missing user config file silently falls through.
    pub fn load(explicit: Option<&Path>) -> DeployResult<Self> {
        if let Some(path) = explicit {
            let content = fs::read_to_string(path)?;
            return Self::from_toml(&content);
        }

        if let Some(path) = Self::user_config_path() {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                return Self::from_toml(&content);
            }
        }

        Ok(Self::default())
    }

    /// Default user-scope config file location
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("stagehand").join("config.toml"))
    }

    /// Reject configurations the deployers cannot act on. Called once at
    /// startup, before the menu is shown.
    pub fn validate(&self) -> DeployResult<()> {
        if self.targets.is_empty() {
            return Err(DeployError::InvalidConfig(
                "no deployment targets configured".to_string(),
            ));
        }
        // Every deployment snapshots before overwriting, so a retain count
        // of zero could never be honored.
        if self.retain_count == 0 {
            return Err(DeployError::InvalidConfig(
                "retain_count must be at least 1".to_string(),
            ));
        }
        for target in &self.targets {
            if target.label.trim().is_empty() {
                return Err(DeployError::InvalidConfig(format!(
                    "target for {} has an empty label",
                    target.dest.display()
                )));
            }
            // Backup archives are named relative to the destination path;
            // the archiver runs from inside the destination, so a relative
            // path would drop the backup into the tree being replaced.
            if !target.dest.is_absolute() {
                return Err(DeployError::InvalidConfig(format!(
                    "target '{}' destination must be an absolute path, got '{}'",
                    target.label,
                    target.dest.display()
                )));
            }
            let owner = target.owner.as_str();
            let valid_owner = match owner.split_once(':') {
                Some((user, group)) => !user.is_empty() && !group.is_empty(),
                None => false,
            };
            if !valid_owner {
                return Err(DeployError::InvalidConfig(format!(
                    "target '{}' has invalid owner spec '{}' (expected user:group)",
                    target.label, owner
                )));
            }
        }
        Ok(())
    }
}

//! Core data types for Stagehand
//!
//! A [`DeployTarget`] is one statically configured destination: where
//! deployed content lands, who owns it afterwards, and which of the two
//! deployment shapes applies. Targets are built once at startup from the
//! configuration file and never change during a run.

use std::path::PathBuf;

use serde::Deserialize;

/// The two deployment shapes Stagehand knows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployMode {
    /// Directory of static build output, delivered as a zip with one
    /// top-level sub-directory; replaces the destination wholesale
    Bundle,
    /// Single archive file copied into a drop directory under its own name
    Archive,
}

impl DeployMode {
    /// Short human label used in the menu
    pub fn describe(&self) -> &'static str {
        match self {
            DeployMode::Bundle => "bundle",
            DeployMode::Archive => "archive",
        }
    }
}

/// One configured deployment destination
#[derive(Debug, Clone, Deserialize)]
pub struct DeployTarget {
    /// Display label shown in the menu and in reports
    pub label: String,
    /// Destination path: the content directory for bundles, the drop
    /// directory for single-file archives
    pub dest: PathBuf,
    /// Ownership spec applied after deployment, `user:group`
    pub owner: String,
    /// Deployment shape
    pub mode: DeployMode,
}

/// Result of one successful deployment
///
/// Fatal failures are `DeployError`s; this type only exists on success and
/// carries the non-fatal leftovers the operator should still see.
#[derive(Debug)]
pub struct DeployOutcome {
    /// Label of the target that was deployed
    pub label: String,
    /// Snapshot created before the destination was overwritten, if the
    /// destination had prior content
    pub backup: Option<PathBuf>,
    /// Old backup archives deleted by rotation during this deployment
    pub rotated: Vec<PathBuf>,
    /// Non-fatal problems (ownership failures, extractor warnings)
    pub warnings: Vec<String>,
}

impl DeployOutcome {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            backup: None,
            rotated: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

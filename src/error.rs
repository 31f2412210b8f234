//! Error types for Stagehand
//!
//! Uses `thiserror` for library errors. Every fatal deployment error names
//! the step that produced it; ownership problems are never fatal and are
//! carried as warnings on the deploy outcome instead.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Stagehand operations
pub type DeployResult<T> = Result<T, DeployError>;

/// Main error type for Stagehand operations
#[derive(Error, Debug)]
pub enum DeployError {
    /// Operator pressed enter without naming a staged file
    #[error("no file name given")]
    EmptyInput,

    /// Named file is not present in the staging directory
    #[error("staged source not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// Destination cannot be created or written
    #[error("destination not writable: {path}")]
    PermissionDenied { path: PathBuf },

    /// Pre-overwrite snapshot could not be created; destination untouched
    #[error("backup of {path} failed: {reason}")]
    BackupFailed { path: PathBuf, reason: String },

    /// Decompression reported a hard failure or produced no build directory
    #[error("extraction of {archive} failed: {reason}")]
    ExtractionFailed { archive: PathBuf, reason: String },

    /// Extracted content could not be moved into place (destination already cleared)
    #[error("could not move extracted content into {dest}: {reason}")]
    MoveFailed { dest: PathBuf, reason: String },

    /// Staged file could not be copied over the destination
    #[error("copy to {dest} failed: {reason}")]
    CopyFailed { dest: PathBuf, reason: String },

    /// Invalid backup glob pattern
    #[error("bad backup pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Configuration file could not be parsed
    #[error("could not parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration rejected at validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

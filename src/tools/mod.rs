//! External tool ports
//!
//! The archive codec and the ownership primitive are external commands
//! with known exit-code contracts, not in-process code. Each capability
//! sits behind a small trait so deployers can be tested with fakes that
//! record call arguments and simulate failure.

mod chown;
mod zip;

pub use chown::ChownSetter;
pub use zip::{UnzipExtractor, ZipArchiver, UNZIP_WARNING_EXIT};

use std::path::Path;

use thiserror::Error;

/// Failure from an external tool invocation
#[derive(Error, Debug)]
pub enum ToolError {
    /// The command could not be launched at all
    #[error("failed to launch {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The command ran and reported failure
    #[error("{tool} exited with status {code}")]
    Failed { tool: &'static str, code: i32 },
}

/// Outcome of an extraction that did not fail outright
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractStatus {
    /// Tool exited clean
    Clean,
    /// Tool completed but reported warnings (tolerated)
    Warnings(i32),
}

/// Compresses a file or directory into a zip archive
pub trait Archiver {
    /// Archive `source` (file or directory) into `dest`. `dest` must not
    /// already exist; the archive holds `source`'s contents, not its
    /// leading path.
    fn archive(&self, source: &Path, dest: &Path) -> Result<(), ToolError>;
}

/// Decompresses a zip archive into a directory
pub trait Extractor {
    /// Extract `archive` into `dest_dir`, creating it if needed.
    /// Warning-grade tool exits are reported, not failed.
    fn extract(&self, archive: &Path, dest_dir: &Path) -> Result<ExtractStatus, ToolError>;
}

/// Applies a `user:group` ownership spec to a path
pub trait OwnershipSetter {
    /// Set ownership of `path` to `owner`, recursing into directories.
    fn set_owner(&self, owner: &str, path: &Path) -> Result<(), ToolError>;
}

/// Verify the archive tools are present and invocable.
///
/// Run before the menu is ever shown; a missing tool is a fatal startup
/// error, not something to discover mid-deployment.
pub fn preflight() -> Result<(), ToolError> {
    zip::check_zip_available()?;
    zip::check_unzip_available()?;
    Ok(())
}

//! Info-ZIP command-line archiver and extractor
//!
//! Shells out to `zip` and `unzip`, which have a graded exit contract:
//! `unzip` exits 0 on success, 1 when it completed with warnings, and 2 or
//! higher on hard failure.

use std::path::Path;
use std::process::{Command, Stdio};

use super::{Archiver, ExtractStatus, Extractor, ToolError};

/// Highest `unzip` exit code still considered warnings-only. Exits above
/// this are fatal.
pub const UNZIP_WARNING_EXIT: i32 = 1;

/// `zip(1)` backed archiver
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipArchiver;

/// `unzip(1)` backed extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct UnzipExtractor;

impl Archiver for ZipArchiver {
    fn archive(&self, source: &Path, dest: &Path) -> Result<(), ToolError> {
        let mut cmd = Command::new("zip");
        if source.is_dir() {
            // Run from inside the directory so the archive holds its
            // contents without the leading destination path.
            cmd.arg("-r").arg("-q").arg(dest).arg(".").current_dir(source);
        } else {
            // -j strips the directory prefix from the single file.
            cmd.arg("-j").arg("-q").arg(dest).arg(source);
        }
        let status = cmd
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| ToolError::Spawn { tool: "zip", source: e })?;

        if status.success() {
            Ok(())
        } else {
            Err(ToolError::Failed {
                tool: "zip",
                code: status.code().unwrap_or(-1),
            })
        }
    }
}

impl Extractor for UnzipExtractor {
    fn extract(&self, archive: &Path, dest_dir: &Path) -> Result<ExtractStatus, ToolError> {
        let status = Command::new("unzip")
            .arg("-o")
            .arg("-q")
            .arg(archive)
            .arg("-d")
            .arg(dest_dir)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| ToolError::Spawn {
                tool: "unzip",
                source: e,
            })?;

        grade_unzip_exit(status.code().unwrap_or(-1))
    }
}

/// Map an `unzip` exit code onto the warning/fatal split.
fn grade_unzip_exit(code: i32) -> Result<ExtractStatus, ToolError> {
    match code {
        0 => Ok(ExtractStatus::Clean),
        c if c > 0 && c <= UNZIP_WARNING_EXIT => Ok(ExtractStatus::Warnings(c)),
        c => Err(ToolError::Failed {
            tool: "unzip",
            code: c,
        }),
    }
}

pub(super) fn check_zip_available() -> Result<(), ToolError> {
    check_tool("zip")
}

pub(super) fn check_unzip_available() -> Result<(), ToolError> {
    check_tool("unzip")
}

fn check_tool(tool: &'static str) -> Result<(), ToolError> {
    // Both tools print version/help info for -v and exit 0.
    Command::new(tool)
        .arg("-v")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| ToolError::Spawn { tool, source: e })
        .and_then(|status| {
            if status.success() {
                Ok(())
            } else {
                Err(ToolError::Failed {
                    tool,
                    code: status.code().unwrap_or(-1),
                })
            }
        })
}

//! Ownership assignment via `chown(1)`

use std::path::Path;
use std::process::{Command, Stdio};

use super::{OwnershipSetter, ToolError};

/// `chown` backed ownership setter, recursive for directories
#[derive(Debug, Clone, Copy, Default)]
pub struct ChownSetter;

impl OwnershipSetter for ChownSetter {
    fn set_owner(&self, owner: &str, path: &Path) -> Result<(), ToolError> {
        let mut cmd = Command::new("chown");
        if path.is_dir() {
            cmd.arg("-R");
        }
        let status = cmd
            .arg(owner)
            .arg(path)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| ToolError::Spawn {
                tool: "chown",
                source: e,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ToolError::Failed {
                tool: "chown",
                code: status.code().unwrap_or(-1),
            })
        }
    }
}

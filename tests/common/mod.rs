//! Common test utilities for Stagehand integration tests.
//!
//! Provides:
//! - `DeployEnv`: isolated staging/destination tree in a tempdir
//! - A pack codec: a stand-in archive format so archiver/extractor
//!   round-trips can be verified without the real zip tools
//! - Recording fakes for the ownership port

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use stagehand::{
    Archiver, Config, DeployMode, DeployTarget, ExtractStatus, Extractor, OwnershipSetter,
    ToolError,
};

/// Serialize files as `relative-path TAB content` lines. Test content must
/// not contain tabs or newlines.
pub fn pack(files: &[(String, String)]) -> String {
    let mut out = String::new();
    for (rel, content) in files {
        out.push_str(rel);
        out.push('\t');
        out.push_str(content);
        out.push('\n');
    }
    out
}

/// Parse the pack format back into (relative path, content) pairs.
pub fn unpack(content: &str) -> Vec<(String, String)> {
    content
        .lines()
        .filter_map(|line| line.split_once('\t'))
        .map(|(rel, content)| (rel.to_string(), content.to_string()))
        .collect()
}

fn collect_files(root: &Path, prefix: &Path, out: &mut Vec<(String, String)>) {
    for entry in fs::read_dir(root).unwrap() {
        let entry = entry.unwrap();
        let path = entry.path();
        let rel = prefix.join(entry.file_name());
        if path.is_dir() {
            collect_files(&path, &rel, out);
        } else {
            let content = fs::read_to_string(&path).unwrap();
            out.push((rel.to_string_lossy().into_owned(), content));
        }
    }
}

/// Snapshot a directory (or single file) as sorted pack entries.
pub fn dir_entries(path: &Path) -> Vec<(String, String)> {
    let mut entries = Vec::new();
    if path.is_dir() {
        collect_files(path, Path::new(""), &mut entries);
    } else {
        entries.push((
            path.file_name().unwrap().to_string_lossy().into_owned(),
            fs::read_to_string(path).unwrap(),
        ));
    }
    entries.sort();
    entries
}

/// Archiver writing the pack format instead of invoking zip.
#[derive(Default)]
pub struct PackArchiver {
    pub fail: bool,
}

impl Archiver for PackArchiver {
    fn archive(&self, source: &Path, dest: &Path) -> Result<(), ToolError> {
        if self.fail {
            return Err(ToolError::Failed {
                tool: "zip",
                code: 15,
            });
        }
        fs::write(dest, pack(&dir_entries(source))).unwrap();
        Ok(())
    }
}

/// Extractor reading the pack format instead of invoking unzip.
#[derive(Default)]
pub struct PackExtractor {
    /// Simulated graded exit; 0 clean, 1 warnings, >=2 fatal
    pub exit_code: i32,
}

impl Extractor for PackExtractor {
    fn extract(&self, archive: &Path, dest_dir: &Path) -> Result<ExtractStatus, ToolError> {
        match self.exit_code {
            0 | 1 => {
                let content = fs::read_to_string(archive).unwrap();
                for (rel, content) in unpack(&content) {
                    let path = dest_dir.join(rel);
                    fs::create_dir_all(path.parent().unwrap()).unwrap();
                    fs::write(&path, content).unwrap();
                }
                if self.exit_code == 0 {
                    Ok(ExtractStatus::Clean)
                } else {
                    Ok(ExtractStatus::Warnings(1))
                }
            }
            code => Err(ToolError::Failed {
                tool: "unzip",
                code,
            }),
        }
    }
}

/// Ownership fake recording every call.
#[derive(Default)]
pub struct RecordingOwner {
    pub calls: RefCell<Vec<(String, PathBuf)>>,
    pub fail: bool,
}

impl OwnershipSetter for RecordingOwner {
    fn set_owner(&self, owner: &str, path: &Path) -> Result<(), ToolError> {
        if self.fail {
            return Err(ToolError::Failed {
                tool: "chown",
                code: 1,
            });
        }
        self.calls
            .borrow_mut()
            .push((owner.to_string(), path.to_path_buf()));
        Ok(())
    }
}

/// Isolated deployment environment: staging dir, one bundle target and one
/// archive target, all under a tempdir.
pub struct DeployEnv {
    pub root: TempDir,
    pub config: Config,
}

impl DeployEnv {
    pub fn new() -> Self {
        Self::with_retain(2)
    }

    pub fn with_retain(retain_count: usize) -> Self {
        let root = TempDir::new().unwrap();
        let staging = root.path().join("staging");
        let bundle_dest = root.path().join("www").join("app");
        let drop_dest = root.path().join("drop");
        fs::create_dir_all(&staging).unwrap();
        fs::create_dir_all(&bundle_dest).unwrap();
        fs::create_dir_all(&drop_dest).unwrap();

        let config = Config {
            staging_dir: staging,
            work_dir: root.path().join("work"),
            retain_count,
            bundle_root: "build".to_string(),
            targets: vec![
                DeployTarget {
                    label: "Web frontend".to_string(),
                    dest: bundle_dest,
                    owner: "www-data:www-data".to_string(),
                    mode: DeployMode::Bundle,
                },
                DeployTarget {
                    label: "Server drop".to_string(),
                    dest: drop_dest,
                    owner: "app:app".to_string(),
                    mode: DeployMode::Archive,
                },
            ],
        };
        Self { root, config }
    }

    pub fn bundle_target(&self) -> &DeployTarget {
        &self.config.targets[0]
    }

    pub fn archive_target(&self) -> &DeployTarget {
        &self.config.targets[1]
    }

    /// Write a staged bundle in the pack format, entries rooted at `build/`.
    pub fn stage_bundle(&self, name: &str, files: &[(&str, &str)]) -> PathBuf {
        let entries: Vec<(String, String)> = files
            .iter()
            .map(|(rel, content)| (format!("build/{rel}"), content.to_string()))
            .collect();
        let path = self.config.staging_dir.join(name);
        fs::write(&path, pack(&entries)).unwrap();
        path
    }

    /// Write an arbitrary staged file.
    pub fn stage_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.config.staging_dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// List backup files next to the bundle destination, sorted by name.
    pub fn bundle_backups(&self) -> Vec<PathBuf> {
        let dest = &self.bundle_target().dest;
        let parent = dest.parent().unwrap();
        let prefix = format!("{}_", dest.file_name().unwrap().to_string_lossy());
        let mut backups: Vec<PathBuf> = fs::read_dir(parent)
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| {
                p.file_name()
                    .map(|n| {
                        let n = n.to_string_lossy();
                        n.starts_with(&prefix) && n.ends_with(".zip")
                    })
                    .unwrap_or(false)
            })
            .collect();
        backups.sort();
        backups
    }
}

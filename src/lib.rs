//! Stagehand - interactive deployment of staged web bundles and server archives
//!
//! Stagehand moves pre-built artifacts from a staging directory onto their
//! fixed destinations, snapshotting whatever is there first and keeping a
//! bounded set of backups per destination.

pub mod config;
pub mod deploy;
pub mod error;
pub mod input;
pub mod menu;
pub mod models;
pub mod rotate;
pub mod tools;

// Re-exports for convenience
pub use config::Config;
pub use deploy::{ArchiveDeployer, BundleDeployer};
pub use error::{DeployError, DeployResult};
pub use input::{ConsoleInput, InputSource, ScriptedInput};
pub use menu::Menu;
pub use models::{DeployMode, DeployOutcome, DeployTarget};
pub use rotate::rotate_backups;
pub use tools::{
    Archiver, ChownSetter, ExtractStatus, Extractor, OwnershipSetter, ToolError, UnzipExtractor,
    ZipArchiver,
};

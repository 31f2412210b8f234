//! Stagehand CLI - interactive staged-artifact deployment
//!
//! Usage: stagehand [--config <PATH>] [-v]
//!
//! Presents a menu of the configured deployment targets and loops until
//! the operator exits. Requires the `zip` and `unzip` tools on PATH.

use std::io::{stdin, stdout};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use is_terminal::IsTerminal;

use stagehand::tools::{ChownSetter, UnzipExtractor, ZipArchiver};
use stagehand::{Config, ConsoleInput, Menu};

/// Stagehand - deploy staged web bundles and server archives
#[derive(Parser, Debug)]
#[command(name = "stagehand")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file (default: ~/.config/stagehand/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !stdin().is_terminal() {
        bail!("stagehand is interactive; run it from a terminal");
    }

    // The archive tools must be invocable before the menu is ever shown.
    stagehand::tools::preflight().context("archive tool preflight failed")?;

    let config = Config::load(cli.config.as_deref()).context("could not load configuration")?;
    config.validate()?;

    if cli.verbose > 0 {
        println!("staging: {}", config.staging_dir.display());
        println!("retain:  {} backups per destination", config.retain_count);
    }

    let archiver = ZipArchiver;
    let extractor = UnzipExtractor;
    let ownership = ChownSetter;
    let menu = Menu::new(&config, &archiver, &extractor, &ownership, cli.verbose);

    let mut input = ConsoleInput;
    menu.run(&mut input, &mut stdout())?;
    Ok(())
}

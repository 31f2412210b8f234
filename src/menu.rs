//! Operator menu
//!
//! One numbered entry per configured target plus an exit entry. Reads one
//! line per round; invalid input reports an error and redisplays.
//! Deployment failures never terminate the loop.

use std::io::{self, Write};

use crate::config::Config;
use crate::deploy::{ArchiveDeployer, BundleDeployer};
use crate::input::InputSource;
use crate::models::{DeployMode, DeployOutcome};
use crate::tools::{Archiver, Extractor, OwnershipSetter};

/// Parsed operator menu choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    /// Zero-based index into the target list
    Target(usize),
    Exit,
    Invalid,
}

/// Map one input line to a choice. Targets are `1..=n`, exit is `n + 1`.
fn parse_choice(line: &str, target_count: usize) -> Choice {
    match line.trim().parse::<usize>() {
        Ok(n) if (1..=target_count).contains(&n) => Choice::Target(n - 1),
        Ok(n) if n == target_count + 1 => Choice::Exit,
        _ => Choice::Invalid,
    }
}

/// The interactive menu loop
pub struct Menu<'a> {
    config: &'a Config,
    archiver: &'a dyn Archiver,
    extractor: &'a dyn Extractor,
    ownership: &'a dyn OwnershipSetter,
    verbose: u8,
}

impl<'a> Menu<'a> {
    pub fn new(
        config: &'a Config,
        archiver: &'a dyn Archiver,
        extractor: &'a dyn Extractor,
        ownership: &'a dyn OwnershipSetter,
        verbose: u8,
    ) -> Self {
        Self {
            config,
            archiver,
            extractor,
            ownership,
            verbose,
        }
    }

    /// Loop until the operator selects exit or the input stream ends.
    pub fn run(&self, input: &mut dyn InputSource, out: &mut dyn Write) -> io::Result<()> {
        loop {
            self.render(out)?;

            let line = match input.read_line("Select") {
                Ok(line) => line,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(()),
                Err(e) => return Err(e),
            };

            match parse_choice(&line, self.config.targets.len()) {
                Choice::Exit => return Ok(()),
                Choice::Invalid => {
                    writeln!(out, "Invalid choice: {}", line.trim())?;
                }
                Choice::Target(index) => self.dispatch(index, input, out)?,
            }
        }
    }

    fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "Stagehand deployment targets:")?;
        for (i, target) in self.config.targets.iter().enumerate() {
            writeln!(
                out,
                "  [{}] {} ({}, {})",
                i + 1,
                target.label,
                target.mode.describe(),
                target.dest.display()
            )?;
        }
        writeln!(out, "  [{}] Exit", self.config.targets.len() + 1)?;
        Ok(())
    }

    fn dispatch(
        &self,
        index: usize,
        input: &mut dyn InputSource,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        let target = &self.config.targets[index];
        writeln!(out, "Deploying {}...", target.label)?;

        let result = match target.mode {
            DeployMode::Bundle => {
                BundleDeployer::new(self.config, self.archiver, self.extractor, self.ownership)
                    .deploy(target, input)
            }
            DeployMode::Archive => {
                ArchiveDeployer::new(self.config, self.archiver, self.ownership)
                    .deploy(target, input)
            }
        };

        match result {
            Ok(outcome) => self.report_success(&outcome, out),
            Err(e) => writeln!(out, "Deployment failed: {e}"),
        }
    }

    fn report_success(&self, outcome: &DeployOutcome, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Deployed {}", outcome.label)?;
        if let Some(backup) = &outcome.backup {
            writeln!(out, "  backup: {}", backup.display())?;
        }
        if self.verbose > 0 {
            for rotated in &outcome.rotated {
                writeln!(out, "  rotated out: {}", rotated.display())?;
            }
        }
        for warning in &outcome.warnings {
            writeln!(out, "  warning: {warning}")?;
        }
        Ok(())
    }
}

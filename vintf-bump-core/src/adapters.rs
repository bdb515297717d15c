//! Default process-backed port implementations.

use crate::ports::CommandRunner;
use anyhow::Context;
use camino::Utf8Path;
use std::process::Command;
use tracing::info;

/// Runs collaborators as child processes, logging each invocation before it
/// starts.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&self, program: &Utf8Path, args: &[&str]) -> anyhow::Result<()> {
        info!("running {} {}", program, args.join(" "));
        let status = Command::new(program.as_std_path())
            .args(args)
            .status()
            .with_context(|| format!("spawn {}", program))?;
        anyhow::ensure!(
            status.success(),
            "{} {} exited with {}",
            program,
            args.join(" "),
            status
        );
        Ok(())
    }
}

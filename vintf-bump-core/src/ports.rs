//! Port traits abstracting external collaborators away from the pipeline.

use camino::Utf8Path;

/// Invokes external helper tools (the kernel-config bump script, `bpmodify`).
///
/// A non-zero exit status is an error; the pipeline never retries.
pub trait CommandRunner {
    fn run(&self, program: &Utf8Path, args: &[&str]) -> anyhow::Result<()>;
}

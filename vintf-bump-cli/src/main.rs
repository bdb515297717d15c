use clap::Parser;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;
use vintf_bump_core::adapters::ShellRunner;
use vintf_bump_core::{Bump, BumpSettings, VersionIdentity};

#[derive(Debug, Parser)]
#[command(
    name = "vintf-bump",
    version,
    about = "Creates the next compatibility matrix."
)]
struct Cli {
    /// VINTF level of the current version (e.g. 202404).
    current_level: String,

    /// VINTF level of the next version (e.g. 202504).
    next_level: String,

    /// Letter of the API level of the current version (e.g. v).
    current_letter: String,

    /// Letter of the API level of the next version (e.g. w).
    next_letter: String,

    /// Android release version number (e.g. 15).
    platform_version: Option<String>,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let current = VersionIdentity::new(cli.current_level, cli.current_letter, cli.platform_version);
    let next = VersionIdentity::new(cli.next_level, cli.next_letter, None);

    let settings = BumpSettings::from_env(current, next)?;
    Bump::new(settings, ShellRunner).run()
}

//! Run configuration for the bump pipeline.

use crate::identity::VersionIdentity;
use anyhow::Context;
use camino::Utf8PathBuf;

/// Immutable configuration for one bump run. `build_top` is resolved once at
/// startup and never changes afterwards.
#[derive(Debug, Clone)]
pub struct BumpSettings {
    /// Root of the checked-out tree (`ANDROID_BUILD_TOP`).
    pub build_top: Utf8PathBuf,
    pub current: VersionIdentity,
    pub next: VersionIdentity,
}

impl BumpSettings {
    /// Resolve the tree root from `ANDROID_BUILD_TOP`. Absence is fatal and
    /// reported before any file is touched.
    pub fn from_env(current: VersionIdentity, next: VersionIdentity) -> anyhow::Result<Self> {
        let build_top = std::env::var("ANDROID_BUILD_TOP")
            .context("ANDROID_BUILD_TOP is not set; run envsetup/lunch first")?;
        Ok(Self {
            build_top: Utf8PathBuf::from(build_top),
            current,
            next,
        })
    }
}

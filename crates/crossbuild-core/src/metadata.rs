//! Version metadata embedded into each build.

use serde::Serialize;

use crate::vcs::VersionControl;

/// `strftime` format of the embedded build time, e.g. `2024-03-01 14:05 +0800`.
pub const BUILD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M %z";

/// Metadata gathered once per run and embedded into every binary it builds.
///
/// `version`, `branch` and `commit_id` may be empty; empty values are left
/// out of the linker flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildMetadata {
    /// Go import path of the package being built.
    pub package: String,
    /// Latest tag.
    pub version: String,
    /// Current branch.
    pub branch: String,
    /// Short hash of the latest commit.
    pub commit_id: String,
    /// Local wall-clock time in [`BUILD_TIME_FORMAT`].
    pub build_time: String,
}

/// Source of the build timestamp.
pub trait Clock {
    /// Current time formatted with [`BUILD_TIME_FORMAT`].
    fn build_time(&self) -> String;
}

/// [`Clock`] reading the local wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn build_time(&self) -> String {
        chrono::Local::now().format(BUILD_TIME_FORMAT).to_string()
    }
}

impl BuildMetadata {
    /// Query `vcs` for tag, branch and commit and `clock` for the build time.
    pub fn gather(
        package: impl Into<String>,
        vcs: &dyn VersionControl,
        clock: &dyn Clock,
    ) -> Self {
        let metadata = Self {
            package: package.into(),
            version: vcs.last_tag(),
            branch: vcs.branch(),
            commit_id: vcs.last_commit_id(),
            build_time: clock.build_time(),
        };
        tracing::debug!(
            package = %metadata.package,
            version = %metadata.version,
            branch = %metadata.branch,
            commit = %metadata.commit_id,
            "gathered build metadata"
        );
        metadata
    }
}

//! Sequential, fail-fast build driver.

use std::path::{Path, PathBuf};

use crossbuild_targets::PlatformPair;
use serde::Serialize;

use crate::error::Result;
use crate::ldflags::LinkerFlagSet;
use crate::toolchain::{Compiler, Invocation};

/// Outcome of a host or multi-target build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Artifacts produced, in build order.
    pub completed: Vec<PathBuf>,
    /// Target whose build failed; later targets were not attempted.
    pub failed: Option<PlatformPair>,
    /// The host build exited non-zero.
    pub host_failed: bool,
}

impl BuildReport {
    /// Report for a host build that succeeded or not.
    pub fn host(ok: bool) -> Self {
        Self {
            host_failed: !ok,
            ..Self::default()
        }
    }

    /// Whether every requested build succeeded.
    pub fn is_success(&self) -> bool {
        self.failed.is_none() && !self.host_failed
    }
}

/// Drives a [`Compiler`] with a fixed set of linker flags.
pub struct Orchestrator<'a> {
    compiler: &'a mut dyn Compiler,
    ldflags: String,
    output_dir: Option<PathBuf>,
}

impl<'a> Orchestrator<'a> {
    pub fn new(compiler: &'a mut dyn Compiler, flags: &LinkerFlagSet) -> Self {
        Self {
            compiler,
            ldflags: flags.render(),
            output_dir: None,
        }
    }

    /// Place cross-compiled artifacts in `dir` instead of the working directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Build once for the host platform. Returns whether the compiler succeeded.
    pub fn build_single(&mut self) -> Result<bool> {
        let invocation = Invocation {
            target: None,
            ldflags: self.ldflags.clone(),
            output: None,
        };
        tracing::info!("building for host platform");
        self.compiler.compile(&invocation)
    }

    /// Build each pair in order, stopping at the first failure.
    ///
    /// `on_built` is called with the artifact path after each successful
    /// build. Artifacts already produced are left in place when a later
    /// target fails.
    pub fn build_multiple(
        &mut self,
        pairs: &[PlatformPair],
        prefix: &str,
        mut on_built: impl FnMut(&Path),
    ) -> Result<BuildReport> {
        let mut report = BuildReport::default();

        for pair in pairs {
            let name = pair.output_name(prefix);
            let output = match &self.output_dir {
                Some(dir) => dir.join(name),
                None => PathBuf::from(name),
            };
            let invocation = Invocation {
                target: Some(pair.clone()),
                ldflags: self.ldflags.clone(),
                output: Some(output.clone()),
            };

            tracing::info!(platform = %pair, output = %output.display(), "building");
            if !self.compiler.compile(&invocation)? {
                tracing::warn!(
                    platform = %pair,
                    completed = report.completed.len(),
                    "build failed, skipping remaining targets"
                );
                report.failed = Some(pair.clone());
                return Ok(report);
            }

            on_built(&output);
            report.completed.push(output);
        }

        Ok(report)
    }
}

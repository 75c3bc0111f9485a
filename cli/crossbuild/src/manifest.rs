//! `crossbuild.toml` manifest parsing and project configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// File name searched for from the working directory upward.
pub const MANIFEST_NAME: &str = "crossbuild.toml";

/// The top-level manifest structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrossbuildManifest {
    /// Build settings.
    #[serde(default)]
    pub build: BuildConfig,
}

/// `[build]` section. Every field is optional; command-line flags win.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildConfig {
    /// Output filename prefix.
    #[serde(default)]
    pub prefix: Option<String>,
    /// Compiler executable.
    #[serde(default)]
    pub compiler: Option<String>,
    /// Package holding the version variables, relative to the import path.
    #[serde(default)]
    pub symbol_package: Option<String>,
    /// Directory for cross-compiled artifacts.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// GOOS/GOARCH pairs built when none are given on the command line.
    #[serde(default)]
    pub targets: Vec<String>,
}

impl CrossbuildManifest {
    /// Search upward from `start_dir` for a `crossbuild.toml` file, parse and
    /// return it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_NAME);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: CrossbuildManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing crossbuild.toml")
    }
}

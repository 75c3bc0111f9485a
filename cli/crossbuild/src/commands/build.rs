//! `crossbuild [GOOS/GOARCH...]` — gather metadata, validate targets, build.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use crossbuild_core::{
    resolve_package, BuildMetadata, BuildReport, Compiler, GitCli, GoToolchain, Invocation,
    LinkerField, LinkerFlagSet, Orchestrator, SystemClock, DEFAULT_SYMBOL_PACKAGE,
};
use crossbuild_targets::{parse_pairs, PlatformPair};

use crate::manifest::CrossbuildManifest;

/// Message for any malformed or unsupported target token.
pub const INVALID_PAIRS: &str = "Arguments are not valid GOOS/GOARCH pairs, use -h for help";

const DEFAULT_COMPILER: &str = "go";

/// Command-line options for a build.
#[derive(Debug, Default)]
pub struct BuildOptions {
    /// Raw `os/arch` tokens; empty builds for the host unless the manifest
    /// lists default targets.
    pub pairs: Vec<String>,
    /// Output filename prefix override.
    pub prefix: Option<String>,
    /// Print compiler command lines instead of running them.
    pub dry_run: bool,
}

/// Everything a build needs once the collaborators have been queried.
pub struct Prepared {
    pub toolchain: GoToolchain,
    pub metadata: BuildMetadata,
    pub flags: LinkerFlagSet,
}

/// Resolve the package and gather metadata for the project in `project_dir`.
pub fn prepare(project_dir: &Path, manifest: Option<&CrossbuildManifest>) -> Result<Prepared> {
    let build = manifest.map(|m| &m.build);
    let compiler = build
        .and_then(|b| b.compiler.as_deref())
        .unwrap_or(DEFAULT_COMPILER);
    let symbol_package = build
        .and_then(|b| b.symbol_package.as_deref())
        .unwrap_or(DEFAULT_SYMBOL_PACKAGE);

    let toolchain = GoToolchain::new(compiler, project_dir);
    let package = resolve_package(&toolchain)?;
    let git = GitCli::new(project_dir);
    let metadata = BuildMetadata::gather(package, &git, &SystemClock);
    let flags = LinkerFlagSet::from_metadata(&metadata, symbol_package);
    if !flags.contains(LinkerField::Version) {
        tracing::info!("no tag found, version is not embedded");
    }

    Ok(Prepared {
        toolchain,
        metadata,
        flags,
    })
}

/// Validate every token up front. The specific offender is only logged.
pub fn validate_pairs(tokens: &[String]) -> Result<Vec<PlatformPair>> {
    parse_pairs(tokens).map_err(|e| {
        tracing::debug!("rejected target: {e}");
        anyhow::anyhow!(INVALID_PAIRS)
    })
}

/// Output prefix: flag, then manifest, then the package name.
pub fn output_prefix(
    flag: Option<&str>,
    manifest: Option<&CrossbuildManifest>,
    package: &str,
) -> String {
    flag.or_else(|| manifest.and_then(|m| m.build.prefix.as_deref()))
        .map(str::to_string)
        .unwrap_or_else(|| package_name(package).to_string())
}

/// Last segment of an import path, skipping a `/vN` major-version suffix.
fn package_name(package: &str) -> &str {
    let mut segments = package.rsplit('/');
    let last = segments.next().unwrap_or(package);
    match segments.next() {
        Some(parent) if !parent.is_empty() && is_major_version(last) => parent,
        _ => last,
    }
}

fn is_major_version(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

/// Run the build.
pub fn run(
    project_dir: &Path,
    manifest: Option<&CrossbuildManifest>,
    options: &BuildOptions,
) -> Result<()> {
    let prepared = prepare(project_dir, manifest)?;

    let tokens = if options.pairs.is_empty() {
        manifest.map(|m| m.build.targets.clone()).unwrap_or_default()
    } else {
        options.pairs.clone()
    };
    let pairs = validate_pairs(&tokens)?;

    let prefix = output_prefix(
        options.prefix.as_deref(),
        manifest,
        &prepared.metadata.package,
    );
    let output_dir = manifest.and_then(|m| m.build.output_dir.clone());

    let Prepared {
        mut toolchain,
        flags,
        ..
    } = prepared;

    if options.dry_run {
        let mut compiler = DryRun {
            program: toolchain.program().to_string(),
        };
        execute(&mut compiler, &flags, &pairs, &prefix, output_dir)?;
    } else {
        // Host builds ignore output-dir.
        if let Some(dir) = output_dir.as_ref().filter(|_| !pairs.is_empty()) {
            let dir = project_dir.join(dir);
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        execute(&mut toolchain, &flags, &pairs, &prefix, output_dir)?;
    }

    Ok(())
}

/// Host build when `pairs` is empty, otherwise one build per pair.
///
/// A failed compiler run stops the sequence but is not an error; the
/// returned report says how far it got.
pub fn execute(
    compiler: &mut dyn Compiler,
    flags: &LinkerFlagSet,
    pairs: &[PlatformPair],
    prefix: &str,
    output_dir: Option<PathBuf>,
) -> Result<BuildReport> {
    let mut orchestrator = Orchestrator::new(compiler, flags);

    if pairs.is_empty() {
        let ok = orchestrator.build_single()?;
        if ok {
            println!("Build finished.");
        } else {
            tracing::warn!("host build failed");
        }
        return Ok(BuildReport::host(ok));
    }

    if let Some(dir) = output_dir {
        orchestrator = orchestrator.with_output_dir(dir);
    }

    let report = orchestrator.build_multiple(pairs, prefix, |artifact| {
        println!("Build finished: {}", artifact.display());
    })?;

    if report.is_success() {
        println!("All build finished.");
    }
    Ok(report)
}

/// Prints each invocation instead of running it.
struct DryRun {
    program: String,
}

impl Compiler for DryRun {
    fn compile(&mut self, invocation: &Invocation) -> crossbuild_core::Result<bool> {
        println!("{}", invocation.command_line(&self.program));
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ScriptedCompiler {
        results: Vec<bool>,
        calls: Vec<Invocation>,
    }

    impl Compiler for ScriptedCompiler {
        fn compile(&mut self, invocation: &Invocation) -> crossbuild_core::Result<bool> {
            let ok = self.results.get(self.calls.len()).copied().unwrap_or(true);
            self.calls.push(invocation.clone());
            Ok(ok)
        }
    }

    fn flags() -> LinkerFlagSet {
        let metadata = BuildMetadata {
            package: "github.com/m3ng9i/ran".into(),
            version: String::new(),
            branch: "main".into(),
            commit_id: "abc123f".into(),
            build_time: "2024-03-01 14:05 +0800".into(),
        };
        LinkerFlagSet::from_metadata(&metadata, DEFAULT_SYMBOL_PACKAGE)
    }

    #[test]
    fn invalid_tokens_use_fixed_message() {
        for bad in ["linux-amd64", "linux/mips", "a/b/c", ""] {
            let err = validate_pairs(&[bad.to_string()]).unwrap_err();
            assert_eq!(err.to_string(), INVALID_PAIRS, "token {bad:?}");
        }
    }

    #[test]
    fn validate_pairs_lowercases() {
        let pairs = validate_pairs(&["Windows/386".to_string()]).unwrap();
        assert_eq!(pairs[0].to_string(), "windows/386");
    }

    #[test]
    fn prefix_precedence() {
        let manifest = CrossbuildManifest::default();
        assert_eq!(output_prefix(None, None, "github.com/m3ng9i/ran"), "ran");
        assert_eq!(output_prefix(None, Some(&manifest), "ran"), "ran");
        assert_eq!(output_prefix(Some("srv"), None, "github.com/m3ng9i/ran"), "srv");

        let mut manifest = CrossbuildManifest::default();
        manifest.build.prefix = Some("fromfile".into());
        assert_eq!(
            output_prefix(None, Some(&manifest), "github.com/m3ng9i/ran"),
            "fromfile"
        );
        assert_eq!(
            output_prefix(Some("flag"), Some(&manifest), "github.com/m3ng9i/ran"),
            "flag"
        );
    }

    #[test]
    fn default_prefix_skips_major_version_suffix() {
        assert_eq!(output_prefix(None, None, "github.com/foo/bar/v2"), "bar");
        assert_eq!(output_prefix(None, None, "example.com/tool/v10"), "tool");
        assert_eq!(output_prefix(None, None, "example.com/tool/version"), "version");
        assert_eq!(output_prefix(None, None, "example.com/tool/v2beta"), "v2beta");
        assert_eq!(output_prefix(None, None, "v3"), "v3");
    }

    #[test]
    fn execute_host_build() {
        let mut compiler = ScriptedCompiler {
            results: vec![true],
            calls: Vec::new(),
        };
        let report = execute(&mut compiler, &flags(), &[], "ran", None).unwrap();
        assert!(report.is_success());
        assert_eq!(compiler.calls.len(), 1);
        assert!(compiler.calls[0].target.is_none());
    }

    #[test]
    fn execute_host_build_failure_is_reported() {
        let mut compiler = ScriptedCompiler {
            results: vec![false],
            calls: Vec::new(),
        };
        let report = execute(&mut compiler, &flags(), &[], "ran", None).unwrap();
        assert!(!report.is_success());
        assert!(report.host_failed);
        assert_eq!(compiler.calls.len(), 1);
    }

    #[test]
    fn execute_stops_after_failure() {
        let mut compiler = ScriptedCompiler {
            results: vec![true, false, true],
            calls: Vec::new(),
        };
        let pairs = validate_pairs(&[
            "linux/amd64".to_string(),
            "linux/arm".to_string(),
            "darwin/arm64".to_string(),
        ])
        .unwrap();
        let report = execute(
            &mut compiler,
            &flags(),
            &pairs,
            "ran",
            Some(PathBuf::from("dist")),
        )
        .unwrap();

        assert_eq!(compiler.calls.len(), 2);
        assert_eq!(report.completed, vec![Path::new("dist").join("ran_linux_amd64")]);
        assert_eq!(report.failed.unwrap().to_string(), "linux/arm");
    }

    #[test]
    fn dry_run_always_succeeds() {
        let mut compiler = DryRun {
            program: "go".into(),
        };
        let pairs = validate_pairs(&["windows/amd64".to_string()]).unwrap();
        let report = execute(&mut compiler, &flags(), &pairs, "ran", None).unwrap();
        assert_eq!(report.completed, vec![PathBuf::from("ran_windows_amd64.exe")]);
    }
}

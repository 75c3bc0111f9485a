//! crossbuild — Go binary builder.
//!
//! Builds the Go package in the working directory for the host or for a list
//! of GOOS/GOARCH pairs, embedding tag, branch, commit and build time through
//! `-ldflags -X`.

mod commands;
mod manifest;

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use commands::build::BuildOptions;
use manifest::CrossbuildManifest;

const EXAMPLES: &str = "\
Examples:

    1. Build binary for current OS and architecture:

        crossbuild

    2. Build binary for windows/386:

        crossbuild windows/386

    3. Build binaries for windows/386 and linux/386:

        crossbuild windows/386 linux/386

    4. Build binaries for linux/386 and linux/amd64:

        crossbuild linux/386 linux/amd64";

#[derive(Parser)]
#[command(name = "crossbuild", version, about = "Go binary builder", after_help = EXAMPLES)]
struct Cli {
    /// Target pairs to build (e.g., windows/386 linux/amd64); host if omitted
    #[arg(value_name = "GOOS/GOARCH")]
    pairs: Vec<String>,
    /// Output filename prefix (default: last segment of the package path)
    #[arg(long)]
    prefix: Option<String>,
    /// List supported GOOS/GOARCH pairs and exit
    #[arg(long)]
    list_targets: bool,
    /// Print the build metadata and linker flags without building
    #[arg(long, conflicts_with = "list_targets")]
    print_flags: bool,
    /// Emit JSON for --list-targets and --print-flags
    #[arg(long)]
    json: bool,
    /// Print compiler commands instead of running them
    #[arg(long)]
    dry_run: bool,
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if is_stray_flag(&e) => {
            eprintln!("error: {}", commands::build::INVALID_PAIRS);
            process::exit(1);
        }
        Err(e) => e.exit(),
    };
    init_logging(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// An unknown `-x` style token is reported like any other bad target.
fn is_stray_flag(err: &clap::Error) -> bool {
    err.kind() == clap::error::ErrorKind::UnknownArgument
}

/// Log to stderr. `RUST_LOG` overrides the level chosen by `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.list_targets {
        return commands::targets::list(cli.json);
    }

    let cwd = std::env::current_dir()?;
    let (manifest, project_dir) = load_manifest_optional(&cwd)?;
    let project_dir = project_dir.unwrap_or(cwd);
    tracing::debug!(dir = %project_dir.display(), manifest = manifest.is_some(), "project");

    if cli.print_flags {
        return commands::flags::run(&project_dir, manifest.as_ref(), cli.json);
    }

    let options = BuildOptions {
        pairs: cli.pairs,
        prefix: cli.prefix,
        dry_run: cli.dry_run,
    };
    commands::build::run(&project_dir, manifest.as_ref(), &options)
}

/// Try to load a manifest from the current directory upward. Returns (None, None) if not found.
fn load_manifest_optional(
    cwd: &Path,
) -> anyhow::Result<(Option<CrossbuildManifest>, Option<PathBuf>)> {
    match CrossbuildManifest::find_and_load(cwd)? {
        Some((manifest, dir)) => Ok((Some(manifest), Some(dir))),
        None => Ok((None, None)),
    }
}

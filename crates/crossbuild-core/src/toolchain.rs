//! Go toolchain collaborators: package resolution and compilation.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use crossbuild_targets::PlatformPair;

use crate::error::{BuildError, Result};

/// Resolves the import path of the package in the working directory.
pub trait PackageResolver {
    /// Import path, e.g. `github.com/m3ng9i/ran`, or empty if unknown.
    fn package_name(&self) -> String;
}

/// Runs one compiler invocation and reports whether it succeeded.
pub trait Compiler {
    /// Run `invocation` to completion. `Ok(false)` means the compiler ran and
    /// exited non-zero; `Err` means it could not be started.
    fn compile(&mut self, invocation: &Invocation) -> Result<bool>;
}

/// A single `go build` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Cross-compilation target; `None` builds for the host.
    pub target: Option<PlatformPair>,
    /// Rendered `-ldflags` value.
    pub ldflags: String,
    /// Output path passed with `-o`; `None` lets the compiler choose.
    pub output: Option<PathBuf>,
}

impl Invocation {
    /// Environment overrides for the child process.
    pub fn env(&self) -> Vec<(&'static str, String)> {
        match &self.target {
            Some(pair) => vec![
                ("GOOS", pair.os().to_string()),
                ("GOARCH", pair.arch().to_string()),
            ],
            None => Vec::new(),
        }
    }

    /// Arguments after the compiler executable.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec!["build".to_string()];
        if !self.ldflags.is_empty() {
            args.push("-ldflags".into());
            args.push(self.ldflags.clone());
        }
        if let Some(output) = &self.output {
            args.push("-o".into());
            args.push(output.display().to_string());
        }
        args
    }

    /// Full command line for `program`, quoted so it can be pasted into a
    /// POSIX shell.
    pub fn command_line(&self, program: &str) -> String {
        let mut parts: Vec<String> = self
            .env()
            .into_iter()
            .map(|(k, v)| format!("{k}={}", shell_quote(&v)))
            .collect();
        parts.push(shell_quote(program));
        parts.extend(self.args().iter().map(|arg| shell_quote(arg)));
        parts.join(" ")
    }
}

/// Double-quote `arg` unless it only holds characters a shell leaves alone.
fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c));
    if plain {
        return arg.to_string();
    }

    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    for c in arg.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Return the package import path, failing if the resolver reports none.
pub fn resolve_package(resolver: &dyn PackageResolver) -> Result<String> {
    let name = resolver.package_name();
    if name.is_empty() {
        return Err(BuildError::MissingPackage);
    }
    tracing::debug!(package = %name, "resolved package");
    Ok(name)
}

/// The `go` command line tool, run from a fixed directory.
#[derive(Debug, Clone)]
pub struct GoToolchain {
    program: String,
    dir: PathBuf,
}

impl GoToolchain {
    /// Use the executable `program` (normally `go`) inside `dir`.
    pub fn new(program: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            dir: dir.into(),
        }
    }

    /// The compiler executable.
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl PackageResolver for GoToolchain {
    fn package_name(&self) -> String {
        let output = Command::new(&self.program)
            .arg("list")
            .current_dir(&self.dir)
            .stdin(Stdio::null())
            .output();
        match output {
            Ok(output) => {
                if !output.status.success() {
                    tracing::debug!(
                        "{} list exited with {}: {}",
                        self.program,
                        output.status,
                        String::from_utf8_lossy(&output.stderr).trim()
                    );
                }
                String::from_utf8_lossy(&output.stdout).trim().to_string()
            }
            Err(e) => {
                tracing::warn!("failed to execute {}: {e}", self.program);
                String::new()
            }
        }
    }
}

impl Compiler for GoToolchain {
    fn compile(&mut self, invocation: &Invocation) -> Result<bool> {
        tracing::debug!("running {}", invocation.command_line(&self.program));
        let status = Command::new(&self.program)
            .args(invocation.args())
            .envs(invocation.env())
            .current_dir(&self.dir)
            .status()
            .map_err(|source| BuildError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        if !status.success() {
            tracing::debug!("{} exited with {status}", self.program);
        }
        Ok(status.success())
    }
}

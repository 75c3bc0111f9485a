//! Version control queries.
//!
//! Every query is best effort: a repository without tags, a detached
//! checkout or a missing `git` executable all yield an empty string, and the
//! corresponding linker directive is simply left out.

use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Source of the version metadata embedded into a build.
pub trait VersionControl {
    /// Most recent tag reachable from HEAD, or empty.
    fn last_tag(&self) -> String;
    /// Current branch name, or empty.
    fn branch(&self) -> String;
    /// Abbreviated hash of the latest commit, or empty.
    fn last_commit_id(&self) -> String;
}

/// [`VersionControl`] backed by the `git` command line.
#[derive(Debug, Clone)]
pub struct GitCli {
    dir: PathBuf,
}

impl GitCli {
    /// Query the repository containing `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Run `git -C <dir> <args>` and return trimmed stdout.
    ///
    /// Stdout is returned even when git exits non-zero; git prints nothing
    /// there on failure.
    fn query(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.dir)
            .args(args)
            .stdin(Stdio::null())
            .output();

        match output {
            Ok(output) => {
                if !output.status.success() {
                    tracing::debug!(
                        "git {} exited with {}: {}",
                        args.join(" "),
                        output.status,
                        String::from_utf8_lossy(&output.stderr).trim()
                    );
                }
                String::from_utf8_lossy(&output.stdout).trim().to_string()
            }
            Err(e) => {
                tracing::warn!("failed to execute git: {e}");
                String::new()
            }
        }
    }
}

impl VersionControl for GitCli {
    fn last_tag(&self) -> String {
        self.query(&["describe", "--abbrev=0", "--tags"])
    }

    fn branch(&self) -> String {
        self.query(&["rev-parse", "--abbrev-ref", "HEAD"])
    }

    fn last_commit_id(&self) -> String {
        self.query(&["log", "--pretty=format:%h", "-1"])
    }
}

//! Build orchestration for crossbuild.
//!
//! Gathers version metadata from git, turns it into `-ldflags -X` directives
//! and drives `go build` once per requested target:
//!
//! 1. resolve the package import path (`go list`)
//! 2. gather tag, branch, commit and build time
//! 3. render the linker flag set
//! 4. invoke the compiler for the host, or for each target pair in order,
//!    stopping at the first failure

pub mod error;
pub mod ldflags;
pub mod metadata;
pub mod orchestrator;
pub mod toolchain;
pub mod vcs;

pub use error::{BuildError, Result};
pub use ldflags::{LinkerField, LinkerFlag, LinkerFlagSet, DEFAULT_SYMBOL_PACKAGE};
pub use metadata::{BuildMetadata, Clock, SystemClock, BUILD_TIME_FORMAT};
pub use orchestrator::{BuildReport, Orchestrator};
pub use toolchain::{resolve_package, Compiler, GoToolchain, Invocation, PackageResolver};
pub use vcs::{GitCli, VersionControl};

//! Build orchestration errors.

use thiserror::Error;

/// Errors that can occur while preparing or running a build.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The build tool reported no import path for the working directory.
    #[error("Can not get package name, you must run this command under a go import path.")]
    MissingPackage,

    /// A collaborator process could not be started.
    #[error("failed to execute {program}: {source}")]
    Spawn {
        /// The executable that failed to start.
        program: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

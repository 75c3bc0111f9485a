//! Target platform definitions for crossbuild.
//!
//! A target is a `GOOS/GOARCH` pair. Only the combinations listed in the
//! static [`COMPATIBILITY_TABLE`] are accepted:
//! - **Table:** operating system → supported architectures
//! - **Pair:** a validated (os, arch) combination
//! - **Parse:** command-line tokens of the form `os/arch`

pub mod error;
pub mod parse;
pub mod platform;
pub mod table;

pub use error::{Result, TargetError};
pub use parse::{parse_pair, parse_pairs};
pub use platform::PlatformPair;
pub use table::{architectures, is_valid_pair, operating_systems, COMPATIBILITY_TABLE};

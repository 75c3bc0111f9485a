//! Validated GOOS/GOARCH pair.

use std::fmt;

use serde::Serialize;

use crate::error::{Result, TargetError};
use crate::table::is_valid_pair;

/// A supported operating-system/architecture combination.
///
/// Components are stored lowercase. A `PlatformPair` can only be built
/// through [`PlatformPair::new`] or [`crate::parse_pair`], both of which reject
/// combinations missing from the compatibility table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PlatformPair {
    os: String,
    arch: String,
}

impl PlatformPair {
    /// Validate and construct a pair.
    pub fn new(os: &str, arch: &str) -> Result<Self> {
        let os = os.to_ascii_lowercase();
        let arch = arch.to_ascii_lowercase();
        if !is_valid_pair(&os, &arch) {
            return Err(TargetError::Unsupported { os, arch });
        }
        Ok(Self { os, arch })
    }

    /// Target operating system (`GOOS`).
    pub fn os(&self) -> &str {
        &self.os
    }

    /// Target architecture (`GOARCH`).
    pub fn arch(&self) -> &str {
        &self.arch
    }

    /// Whether the target produces Windows executables.
    pub fn is_windows(&self) -> bool {
        self.os == "windows"
    }

    /// Output binary name for this target: `{prefix}_{os}_{arch}`, with an
    /// `.exe` suffix on Windows.
    pub fn output_name(&self, prefix: &str) -> String {
        let mut name = format!("{prefix}_{}_{}", self.os, self.arch);
        if self.is_windows() {
            name.push_str(".exe");
        }
        name
    }
}

impl fmt::Display for PlatformPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_case() {
        let p = PlatformPair::new("Linux", "AMD64").unwrap();
        assert_eq!(p.os(), "linux");
        assert_eq!(p.arch(), "amd64");
        assert_eq!(p.to_string(), "linux/amd64");
    }

    #[test]
    fn new_rejects_unsupported() {
        let err = PlatformPair::new("linux", "mips").unwrap_err();
        assert_eq!(
            err,
            TargetError::Unsupported {
                os: "linux".into(),
                arch: "mips".into()
            }
        );
    }

    #[test]
    fn windows_output_has_exe_suffix() {
        let p = PlatformPair::new("windows", "386").unwrap();
        assert!(p.is_windows());
        assert_eq!(p.output_name("ran"), "ran_windows_386.exe");
    }

    #[test]
    fn non_windows_output_has_no_suffix() {
        let p = PlatformPair::new("linux", "amd64").unwrap();
        assert_eq!(p.output_name("ran"), "ran_linux_amd64");
        let p = PlatformPair::new("darwin", "arm64").unwrap();
        assert_eq!(p.output_name("tool"), "tool_darwin_arm64");
    }

    #[test]
    fn serializes_as_object() {
        let p = PlatformPair::new("plan9", "386").unwrap();
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["os"], "plan9");
        assert_eq!(json["arch"], "386");
    }
}

//! Static GOOS → GOARCH compatibility table.
//!
//! Learn more at <https://golang.org/doc/install/source>.

/// Supported architectures per operating system.
pub const COMPATIBILITY_TABLE: &[(&str, &[&str])] = &[
    ("darwin", &["386", "amd64", "arm", "arm64"]),
    ("dragonfly", &["amd64"]),
    ("freebsd", &["386", "amd64", "arm"]),
    ("linux", &["386", "amd64", "arm", "arm64", "ppc64", "ppc64le"]),
    ("netbsd", &["386", "amd64", "arm"]),
    ("openbsd", &["386", "amd64", "arm"]),
    ("plan9", &["386", "amd64"]),
    ("solaris", &["amd64"]),
    ("windows", &["386", "amd64"]),
];

/// Architectures supported for `os`, or `None` if the OS is unknown.
///
/// The lookup is case-insensitive.
pub fn architectures(os: &str) -> Option<&'static [&'static str]> {
    let os = os.to_ascii_lowercase();
    COMPATIBILITY_TABLE
        .iter()
        .find(|(name, _)| *name == os)
        .map(|(_, archs)| *archs)
}

/// All operating systems in the table, in table order.
pub fn operating_systems() -> impl Iterator<Item = &'static str> {
    COMPATIBILITY_TABLE.iter().map(|(os, _)| *os)
}

/// Check whether `os`/`arch` is a valid GOOS/GOARCH combination.
///
/// Both components are lowercased before the lookup, so `("LINUX", "AMD64")`
/// is accepted.
pub fn is_valid_pair(os: &str, arch: &str) -> bool {
    let arch = arch.to_ascii_lowercase();
    architectures(os).is_some_and(|archs| archs.contains(&arch.as_str()))
}

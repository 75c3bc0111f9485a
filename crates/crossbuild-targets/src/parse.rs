//! Parsing of `os/arch` command-line tokens.

use crate::error::{Result, TargetError};
use crate::platform::PlatformPair;

/// Parse a single `os/arch` token.
///
/// The token is lowercased first. It must contain exactly one `/`; anything
/// else is [`TargetError::Malformed`]. An unknown combination is
/// [`TargetError::Unsupported`].
pub fn parse_pair(token: &str) -> Result<PlatformPair> {
    let lowered = token.to_ascii_lowercase();
    let mut parts = lowered.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(os), Some(arch), None) => PlatformPair::new(os, arch),
        _ => Err(TargetError::Malformed {
            token: token.to_string(),
        }),
    }
}

/// Parse every token, failing on the first invalid one.
///
/// Nothing is returned unless all tokens are valid, so callers can validate
/// the whole request before doing any work.
pub fn parse_pairs<I, S>(tokens: I) -> Result<Vec<PlatformPair>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|t| parse_pair(t.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_token() {
        let p = parse_pair("windows/amd64").unwrap();
        assert_eq!(p.os(), "windows");
        assert_eq!(p.arch(), "amd64");
    }

    #[test]
    fn parses_uppercase_token() {
        let p = parse_pair("LINUX/PPC64LE").unwrap();
        assert_eq!(p.to_string(), "linux/ppc64le");
    }

    #[test]
    fn rejects_missing_separator() {
        assert!(matches!(
            parse_pair("linux-amd64"),
            Err(TargetError::Malformed { .. })
        ));
    }

    #[test]
    fn rejects_extra_separator() {
        assert!(matches!(
            parse_pair("linux/amd64/v2"),
            Err(TargetError::Malformed { .. })
        ));
    }

    #[test]
    fn empty_component_is_unsupported() {
        assert!(matches!(
            parse_pair("linux/"),
            Err(TargetError::Unsupported { .. })
        ));
        assert!(matches!(
            parse_pair("/amd64"),
            Err(TargetError::Unsupported { .. })
        ));
    }

    #[test]
    fn parse_pairs_keeps_order() {
        let pairs = parse_pairs(["windows/386", "linux/amd64"]).unwrap();
        let names: Vec<String> = pairs.iter().map(|p| p.to_string()).collect();
        assert_eq!(names, vec!["windows/386", "linux/amd64"]);
    }

    #[test]
    fn parse_pairs_fails_on_any_bad_token() {
        let err = parse_pairs(["linux/amd64", "linux/mips", "windows/386"]).unwrap_err();
        assert_eq!(
            err,
            TargetError::Unsupported {
                os: "linux".into(),
                arch: "mips".into()
            }
        );
    }

    #[test]
    fn parse_pairs_empty_input() {
        let pairs = parse_pairs(Vec::<String>::new()).unwrap();
        assert!(pairs.is_empty());
    }
}

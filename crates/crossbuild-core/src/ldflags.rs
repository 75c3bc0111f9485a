//! `-ldflags` substitution directives.

use std::fmt;

use crate::metadata::BuildMetadata;

/// Package, relative to the module import path, that declares the
/// `_version_`, `_branch_`, `_commitId_` and `_buildTime_` variables.
pub const DEFAULT_SYMBOL_PACKAGE: &str = "global";

/// A metadata field that can be embedded into the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkerField {
    Version,
    Branch,
    CommitId,
    BuildTime,
}

impl LinkerField {
    /// Name of the Go variable the field is written to.
    pub fn symbol(self) -> &'static str {
        match self {
            LinkerField::Version => "_version_",
            LinkerField::Branch => "_branch_",
            LinkerField::CommitId => "_commitId_",
            LinkerField::BuildTime => "_buildTime_",
        }
    }
}

/// One `-X 'importpath.name=value'` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkerFlag {
    /// Fully qualified symbol, e.g. `github.com/m3ng9i/ran/global._version_`.
    pub symbol: String,
    pub field: LinkerField,
    pub value: String,
}

impl fmt::Display for LinkerFlag {
    // The go tool splits -ldflags on spaces and honours either quote
    // character, without escapes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quote = if self.value.contains('\'') { '"' } else { '\'' };
        write!(f, "-X {quote}{}={}{quote}", self.symbol, self.value)
    }
}

/// Ordered directives: version, branch, commit, build time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkerFlagSet {
    flags: Vec<LinkerFlag>,
}

impl LinkerFlagSet {
    /// Build the directive set for `metadata`.
    ///
    /// Empty version, branch and commit values are omitted. The build time
    /// directive is always present.
    pub fn from_metadata(metadata: &BuildMetadata, symbol_package: &str) -> Self {
        let prefix = format!("{}/{}", metadata.package, symbol_package);
        let fields = [
            (LinkerField::Version, &metadata.version),
            (LinkerField::Branch, &metadata.branch),
            (LinkerField::CommitId, &metadata.commit_id),
        ];

        let mut flags: Vec<LinkerFlag> = fields
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(field, value)| LinkerFlag {
                symbol: format!("{prefix}.{}", field.symbol()),
                field,
                value: value.clone(),
            })
            .collect();

        flags.push(LinkerFlag {
            symbol: format!("{prefix}.{}", LinkerField::BuildTime.symbol()),
            field: LinkerField::BuildTime,
            value: metadata.build_time.clone(),
        });

        Self { flags }
    }

    /// The directives in order.
    pub fn flags(&self) -> &[LinkerFlag] {
        &self.flags
    }

    /// Whether a directive for `field` is present.
    pub fn contains(&self, field: LinkerField) -> bool {
        self.flags.iter().any(|f| f.field == field)
    }

    /// Value of the `-ldflags` argument: every directive joined by a space.
    pub fn render(&self) -> String {
        self.flags
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(version: &str, branch: &str, commit: &str) -> BuildMetadata {
        BuildMetadata {
            package: "github.com/m3ng9i/ran".into(),
            version: version.into(),
            branch: branch.into(),
            commit_id: commit.into(),
            build_time: "2024-03-01 14:05 +0800".into(),
        }
    }

    #[test]
    fn full_metadata_yields_four_directives_in_order() {
        let set = LinkerFlagSet::from_metadata(
            &metadata("v1.2.3", "main", "abc123f"),
            DEFAULT_SYMBOL_PACKAGE,
        );
        let fields: Vec<LinkerField> = set.flags().iter().map(|f| f.field).collect();
        assert_eq!(
            fields,
            vec![
                LinkerField::Version,
                LinkerField::Branch,
                LinkerField::CommitId,
                LinkerField::BuildTime,
            ]
        );
        assert_eq!(set.flags()[0].value, "v1.2.3");
        assert_eq!(
            set.flags()[2].symbol,
            "github.com/m3ng9i/ran/global._commitId_"
        );
    }

    #[test]
    fn empty_tag_omits_version() {
        let set =
            LinkerFlagSet::from_metadata(&metadata("", "main", "abc123f"), DEFAULT_SYMBOL_PACKAGE);
        assert_eq!(set.flags().len(), 3);
        assert!(!set.contains(LinkerField::Version));
        assert!(set.contains(LinkerField::Branch));
        assert!(set.contains(LinkerField::CommitId));
        assert!(set.contains(LinkerField::BuildTime));
    }

    #[test]
    fn build_time_is_always_present() {
        let set = LinkerFlagSet::from_metadata(&metadata("", "", ""), DEFAULT_SYMBOL_PACKAGE);
        assert_eq!(set.flags().len(), 1);
        assert_eq!(set.flags()[0].field, LinkerField::BuildTime);
    }

    #[test]
    fn render_joins_quoted_directives() {
        let set =
            LinkerFlagSet::from_metadata(&metadata("v1.0", "", "abc"), DEFAULT_SYMBOL_PACKAGE);
        assert_eq!(
            set.render(),
            "-X 'github.com/m3ng9i/ran/global._version_=v1.0' \
             -X 'github.com/m3ng9i/ran/global._commitId_=abc' \
             -X 'github.com/m3ng9i/ran/global._buildTime_=2024-03-01 14:05 +0800'"
        );
    }

    #[test]
    fn value_with_apostrophe_uses_double_quotes() {
        let set = LinkerFlagSet::from_metadata(&metadata("", "it's", ""), DEFAULT_SYMBOL_PACKAGE);
        assert_eq!(
            set.flags()[0].to_string(),
            "-X \"github.com/m3ng9i/ran/global._branch_=it's\""
        );
        // The build time keeps single quotes.
        assert_eq!(
            set.flags()[1].to_string(),
            "-X 'github.com/m3ng9i/ran/global._buildTime_=2024-03-01 14:05 +0800'"
        );
    }

    #[test]
    fn custom_symbol_package() {
        let set = LinkerFlagSet::from_metadata(&metadata("v1", "", ""), "internal/buildinfo");
        assert_eq!(
            set.flags()[0].symbol,
            "github.com/m3ng9i/ran/internal/buildinfo._version_"
        );
    }
}

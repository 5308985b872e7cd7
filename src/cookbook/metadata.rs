//! Cookbook metadata model and the format strategy interface.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use semver::Version;

use crate::error::{LarderError, Result};
use crate::version::parse_version;

use super::dsl::DslMetadataParser;
use super::json::JsonMetadataParser;

/// Version constraint attached to a declared dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyConstraint {
    /// Any installed version will do.
    Unconstrained,
    /// A constraint expression, parsed only when verified.
    Constraint(String),
}

impl DependencyConstraint {
    /// The constraint text, if there is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Unconstrained => None,
            Self::Constraint(c) => Some(c),
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        matches!(self, Self::Unconstrained)
    }
}

impl From<&str> for DependencyConstraint {
    /// Blank text means no constraint.
    fn from(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() {
            Self::Unconstrained
        } else {
            Self::Constraint(s.to_string())
        }
    }
}

impl fmt::Display for DependencyConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unconstrained => f.write_str("(any version)"),
            Self::Constraint(c) => f.write_str(c),
        }
    }
}

/// Name, version and declared dependencies of one installed cookbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookbookMetadata {
    /// Declared name; may be empty as read from disk.
    pub name: String,
    pub version: Version,
    pub dependencies: BTreeMap<String, DependencyConstraint>,
}

impl CookbookMetadata {
    /// Metadata with no dependencies.
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            version,
            dependencies: BTreeMap::new(),
        }
    }

    /// Add a dependency. An empty constraint means "any version".
    pub fn with_dependency(mut self, name: impl Into<String>, constraint: &str) -> Self {
        self.dependencies
            .insert(name.into(), DependencyConstraint::from(constraint));
        self
    }
}

/// Parse a metadata version, reporting failures against the metadata file.
pub(crate) fn metadata_version(raw: &str, source: &Path) -> Result<Version> {
    parse_version(raw).map_err(|e| LarderError::MetadataParseError {
        path: source.to_path_buf(),
        message: e.to_string(),
    })
}

/// Turns the contents of one metadata file into [`CookbookMetadata`].
pub trait MetadataParser {
    /// Parse `content`, read from `source`.
    ///
    /// The returned name is whatever the file declares, possibly empty.
    fn parse(&self, content: &str, source: &Path) -> Result<CookbookMetadata>;
}

/// The metadata file formats a cookbook directory may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataFormat {
    /// `metadata.rb` statements.
    Dsl,
    /// `metadata.json`.
    Json,
}

impl MetadataFormat {
    /// Formats in the order a cookbook directory is searched.
    pub const SEARCH_ORDER: [MetadataFormat; 2] = [MetadataFormat::Dsl, MetadataFormat::Json];

    /// File name holding metadata in this format.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Dsl => "metadata.rb",
            Self::Json => "metadata.json",
        }
    }

    /// The parser for this format.
    pub fn parser(&self) -> &'static dyn MetadataParser {
        match self {
            Self::Dsl => &DslMetadataParser,
            Self::Json => &JsonMetadataParser,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_constraint_is_unconstrained() {
        assert!(DependencyConstraint::from("").is_unconstrained());
        assert!(DependencyConstraint::from("  ").is_unconstrained());
    }

    #[test]
    fn constraint_text_is_trimmed() {
        let c = DependencyConstraint::from(" >= 1.0 ");
        assert_eq!(c.as_str(), Some(">= 1.0"));
        assert_eq!(c.to_string(), ">= 1.0");
    }

    #[test]
    fn builder_adds_dependencies() {
        let m = CookbookMetadata::new("web", Version::new(1, 0, 0))
            .with_dependency("nginx", "~> 2.0")
            .with_dependency("apt", "");

        assert_eq!(m.dependencies.len(), 2);
        assert!(m.dependencies["apt"].is_unconstrained());
        assert_eq!(m.dependencies["nginx"].as_str(), Some("~> 2.0"));
    }

    #[test]
    fn search_order_prefers_dsl() {
        assert_eq!(MetadataFormat::SEARCH_ORDER[0].file_name(), "metadata.rb");
        assert_eq!(MetadataFormat::SEARCH_ORDER[1].file_name(), "metadata.json");
    }

    #[test]
    fn bad_version_is_metadata_parse_error() {
        let result = metadata_version("x.y", Path::new("/c/apt/metadata.json"));
        assert!(matches!(
            result,
            Err(LarderError::MetadataParseError { .. })
        ));
    }
}

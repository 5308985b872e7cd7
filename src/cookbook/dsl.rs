//! `metadata.rb` parsing.
//!
//! Only the statements that matter for dependency checks are read:
//!
//! ```text
//! name    'web'
//! version '1.4.0'
//! depends 'nginx', '~> 2.0'
//! depends "apt"
//! ```
//!
//! Arguments must be quoted string literals; parentheses around them are
//! allowed. Every other statement (maintainer, recipes, supports, ...) is
//! ignored, as are statements whose arguments are not literals.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{LarderError, Result};

use super::metadata::{metadata_version, CookbookMetadata, DependencyConstraint, MetadataParser};

/// A `name`, `version` or `depends` statement followed by quoted arguments.
static STATEMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^\s*(name|version|depends)\b\s*\(?\s*((?:'[^']*'|"[^"]*")(?:\s*,\s*(?:'[^']*'|"[^"]*"))*)"#,
    )
    .expect("STATEMENT_REGEX must compile")
});

/// One quoted string literal.
static LITERAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"'([^']*)'|"([^"]*)""#).expect("LITERAL_REGEX must compile")
});

const DEFAULT_VERSION: &str = "0.0.0";

/// Parses the `metadata.rb` statement form.
#[derive(Debug, Clone, Copy, Default)]
pub struct DslMetadataParser;

impl MetadataParser for DslMetadataParser {
    fn parse(&self, content: &str, source: &Path) -> Result<CookbookMetadata> {
        let mut name = String::new();
        let mut version = None;
        let mut dependencies = BTreeMap::new();

        for (index, line) in content.lines().enumerate() {
            let Some(caps) = STATEMENT_REGEX.captures(line) else {
                continue;
            };
            let args = literals(&caps[2]);

            match &caps[1] {
                "name" => name = args[0].clone(),
                "version" => version = Some(args[0].clone()),
                _ => {
                    let constraint = match args.as_slice() {
                        [_] => DependencyConstraint::Unconstrained,
                        [_, constraint] => DependencyConstraint::from(constraint.as_str()),
                        _ => {
                            return Err(LarderError::MetadataParseError {
                                path: source.to_path_buf(),
                                message: format!(
                                    "line {}: dependency '{}' has more than one constraint",
                                    index + 1,
                                    args[0]
                                ),
                            })
                        }
                    };
                    dependencies.insert(args[0].clone(), constraint);
                }
            }
        }

        let version = metadata_version(version.as_deref().unwrap_or(DEFAULT_VERSION), source)?;

        Ok(CookbookMetadata {
            name,
            version,
            dependencies,
        })
    }
}

/// The contents of every quoted literal in `args`, in order.
///
/// The statement regex guarantees at least one.
fn literals(args: &str) -> Vec<String> {
    LITERAL_REGEX
        .captures_iter(args)
        .map(|c| {
            c.get(1)
                .or_else(|| c.get(2))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default()
        })
        .collect()
}

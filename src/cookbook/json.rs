//! `metadata.json` parsing.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{LarderError, Result};

use super::metadata::{metadata_version, CookbookMetadata, DependencyConstraint, MetadataParser};

/// Version assumed when metadata does not declare one.
const DEFAULT_VERSION: &str = "0.0.0";

#[derive(Debug, Deserialize)]
struct RawMetadata {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    dependencies: Option<BTreeMap<String, Value>>,
}

/// Parses the serialized `metadata.json` form.
///
/// Dependency values are constraint strings. An empty list, an empty string
/// or `null` all mean the dependency is unconstrained; some tools write `[]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMetadataParser;

impl MetadataParser for JsonMetadataParser {
    fn parse(&self, content: &str, source: &Path) -> Result<CookbookMetadata> {
        let parse_error = |message: String| LarderError::MetadataParseError {
            path: source.to_path_buf(),
            message,
        };

        let raw: RawMetadata =
            serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?;

        let version = metadata_version(raw.version.as_deref().unwrap_or(DEFAULT_VERSION), source)?;

        let mut dependencies = BTreeMap::new();
        for (name, value) in raw.dependencies.unwrap_or_default() {
            let constraint = match &value {
                Value::String(s) => DependencyConstraint::from(s.as_str()),
                Value::Null => DependencyConstraint::Unconstrained,
                Value::Array(items) if items.is_empty() => DependencyConstraint::Unconstrained,
                other => {
                    return Err(parse_error(format!(
                        "unsupported constraint for dependency '{name}': {other}"
                    )))
                }
            };
            dependencies.insert(name, constraint);
        }

        Ok(CookbookMetadata {
            name: raw.name.unwrap_or_default(),
            version,
            dependencies,
        })
    }
}

//! Structured file loading.
//!
//! Environment layers and settings files are read into a [`Node`] tree
//! before any merging takes place. JSON is the default format; files ending
//! in `.yml` or `.yaml` are read as YAML.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::config::node::Node;
use crate::error::{LarderError, Result};

/// Serialized formats a layer may be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    /// Pick the format from a file extension. Anything unrecognised is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml") => {
                FileFormat::Yaml
            }
            _ => FileFormat::Json,
        }
    }
}

/// Load a file as a configuration tree.
///
/// # Errors
///
/// Returns `Io` if the file cannot be read.
/// Returns `ConfigParseError` if the contents are not valid for the format.
/// Returns `ConfigValidationError` if the top level is not a mapping.
pub fn load_tree(path: &Path) -> Result<Node> {
    let content = fs::read_to_string(path)?;
    parse_tree(&content, path)
}

/// Parse file contents into a configuration tree.
///
/// # Arguments
///
/// * `content` - The raw file contents
/// * `source_path` - Path used to pick the format and for error reporting
pub fn parse_tree(content: &str, source_path: &Path) -> Result<Node> {
    if content.trim().is_empty() {
        return Ok(Node::empty_mapping());
    }

    let parse_error = |message: String| LarderError::ConfigParseError {
        path: source_path.to_path_buf(),
        message,
    };

    let value: Value = match FileFormat::from_path(source_path) {
        FileFormat::Json => serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?,
        FileFormat::Yaml => serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?,
    };

    let node = Node::from(value);
    if !node.is_mapping() {
        return Err(LarderError::ConfigValidationError {
            message: format!("{}: top level must be a mapping", source_path.display()),
        });
    }
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn format_from_extension() {
        assert_eq!(FileFormat::from_path(Path::new("a.json")), FileFormat::Json);
        assert_eq!(FileFormat::from_path(Path::new("a.yml")), FileFormat::Yaml);
        assert_eq!(FileFormat::from_path(Path::new("a.YAML")), FileFormat::Yaml);
        assert_eq!(FileFormat::from_path(Path::new("noext")), FileFormat::Json);
    }

    #[test]
    fn parses_json() {
        let node = parse_tree(r#"{"name": "prod"}"#, Path::new("prod.json")).unwrap();
        assert_eq!(node.get("name").and_then(Node::as_str), Some("prod"));
    }

    #[test]
    fn parses_yaml() {
        let node = parse_tree(
            "name: prod\ncookbook_versions:\n  apt: '= 1.0.0'\n",
            Path::new("prod.yml"),
        )
        .unwrap();
        assert_eq!(
            node.get("cookbook_versions")
                .and_then(|v| v.get("apt"))
                .and_then(Node::as_str),
            Some("= 1.0.0")
        );
    }

    #[test]
    fn yaml_tilde_is_no_override() {
        let node = parse_tree("description: ~\n", Path::new("prod.yaml")).unwrap();
        assert_eq!(node.get("description"), Some(&Node::NoOverride));
    }

    #[test]
    fn empty_file_is_empty_mapping() {
        let node = parse_tree("  \n", Path::new("empty.json")).unwrap();
        assert_eq!(node, Node::empty_mapping());
    }

    #[test]
    fn invalid_json_reports_path() {
        let result = parse_tree("{ not json", Path::new("/envs/broken.json"));
        match result {
            Err(LarderError::ConfigParseError { path, .. }) => {
                assert_eq!(path, PathBuf::from("/envs/broken.json"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn non_mapping_root_is_rejected() {
        let result = parse_tree("[1, 2]", Path::new("list.json"));
        assert!(matches!(
            result,
            Err(LarderError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn load_tree_reads_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("env.json");
        fs::write(&path, r#"{"description": "test"}"#).unwrap();

        let node = load_tree(&path).unwrap();

        assert_eq!(node.get("description").and_then(Node::as_str), Some("test"));
    }

    #[test]
    fn load_tree_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let result = load_tree(&temp.path().join("missing.json"));
        assert!(matches!(result, Err(LarderError::Io(_))));
    }
}

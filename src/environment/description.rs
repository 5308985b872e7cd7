//! Typed view of a resolved environment.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Node;
use crate::error::{LarderError, Result};
use crate::version::{Constraint, VersionError};

/// Where a cookbook should be fetched from, overriding the default source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CookbookLocation {
    /// Git repository URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git: Option<String>,

    /// Git branch, tag or commit.
    #[serde(default, rename = "ref", skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,

    /// Sub-directory of the repository holding the cookbook.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rel: Option<String>,

    /// Local filesystem path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Any other keys, kept verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl CookbookLocation {
    /// Short human-readable description of the source.
    pub fn describe(&self) -> String {
        if let Some(git) = &self.git {
            let mut out = format!("git {git}");
            if let Some(git_ref) = &self.git_ref {
                out.push_str(&format!(" @ {git_ref}"));
            }
            if let Some(rel) = &self.rel {
                out.push_str(&format!(" ({rel})"));
            }
            out
        } else if let Some(path) = &self.path {
            format!("path {path}")
        } else {
            "custom".to_string()
        }
    }
}

/// One cookbook pinned by an environment.
#[derive(Debug, Clone, PartialEq)]
pub struct CookbookEntry {
    pub name: String,
    pub version_specifier: String,
    pub location: Option<CookbookLocation>,
}

impl CookbookEntry {
    /// Parse the version specifier as a constraint.
    pub fn constraint(&self) -> std::result::Result<Constraint, VersionError> {
        Constraint::parse(&self.version_specifier)
    }
}

/// The effective environment after all `parent` layers are merged.
///
/// Keys other than the ones modelled here (attributes, `json_class`, ...)
/// are kept in `extra` so the environment can be written back out intact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentDescription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Desired version specifier per cookbook.
    #[serde(default)]
    pub cookbook_versions: BTreeMap<String, String>,

    /// Source overrides per cookbook.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub cookbook_locations: BTreeMap<String, CookbookLocation>,

    /// Parent reference of the top layer, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl EnvironmentDescription {
    /// Build the typed view from a (merged) tree.
    ///
    /// Unset markers are dropped first, so a key that was only ever nulled
    /// out is treated as absent.
    pub fn from_tree(tree: &Node) -> Result<Self> {
        serde_json::from_value(Value::from(tree.without_unset())).map_err(|e| {
            LarderError::ConfigValidationError {
                message: format!("invalid environment: {e}"),
            }
        })
    }

    /// Cookbooks pinned by this environment, sorted by name.
    pub fn cookbooks(&self) -> Vec<CookbookEntry> {
        self.cookbook_versions
            .iter()
            .map(|(name, specifier)| CookbookEntry {
                name: name.clone(),
                version_specifier: specifier.clone(),
                location: self.cookbook_locations.get(name).cloned(),
            })
            .collect()
    }

    /// Look up a single cookbook.
    pub fn cookbook(&self, name: &str) -> Option<CookbookEntry> {
        self.cookbook_versions.get(name).map(|specifier| CookbookEntry {
            name: name.to_string(),
            version_specifier: specifier.clone(),
            location: self.cookbook_locations.get(name).cloned(),
        })
    }

    /// Render as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| LarderError::Other(e.into()))
    }

    /// Render as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| LarderError::Other(e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn env(v: Value) -> EnvironmentDescription {
        EnvironmentDescription::from_tree(&Node::from(v)).unwrap()
    }

    #[test]
    fn reads_known_fields() {
        let e = env(json!({
            "name": "prod",
            "description": "Production",
            "cookbook_versions": { "apt": "= 2.0.0" },
            "cookbook_locations": { "apt": { "git": "https://example.com/apt.git", "ref": "v2.0.0" } }
        }));

        assert_eq!(e.name.as_deref(), Some("prod"));
        assert_eq!(e.description.as_deref(), Some("Production"));
        assert_eq!(e.cookbook_versions["apt"], "= 2.0.0");
        assert_eq!(
            e.cookbook_locations["apt"].git_ref.as_deref(),
            Some("v2.0.0")
        );
    }

    #[test]
    fn missing_fields_default() {
        let e = env(json!({}));
        assert!(e.name.is_none());
        assert!(e.cookbook_versions.is_empty());
        assert!(e.cookbook_locations.is_empty());
    }

    #[test]
    fn unset_fields_are_absent() {
        let e = env(json!({ "name": null, "cookbook_versions": { "apt": null, "git": "= 1.0" } }));
        assert!(e.name.is_none());
        assert_eq!(e.cookbook_versions.len(), 1);
    }

    #[test]
    fn extra_keys_are_retained() {
        let e = env(json!({ "json_class": "Chef::Environment", "default_attributes": { "x": 1 } }));
        assert_eq!(e.extra["json_class"], "Chef::Environment");

        let out = serde_json::to_value(&e).unwrap();
        assert_eq!(out["default_attributes"]["x"], 1);
    }

    #[test]
    fn wrong_type_is_validation_error() {
        let result = EnvironmentDescription::from_tree(&Node::from(json!({ "cookbook_versions": ["apt"] })));
        assert!(matches!(
            result,
            Err(LarderError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn cookbooks_are_sorted_with_locations() {
        let e = env(json!({
            "cookbook_versions": { "zsh": "= 1.0.0", "apt": "~> 2.0" },
            "cookbook_locations": { "zsh": { "path": "../zsh" } }
        }));

        let books = e.cookbooks();

        assert_eq!(books.len(), 2);
        assert_eq!(books[0].name, "apt");
        assert!(books[0].location.is_none());
        assert_eq!(books[1].name, "zsh");
        assert_eq!(
            books[1].location.as_ref().map(CookbookLocation::describe),
            Some("path ../zsh".to_string())
        );
    }

    #[test]
    fn entry_constraint_parses_specifier() {
        let e = env(json!({ "cookbook_versions": { "apt": "~> 2.0", "bad": "latest" } }));
        assert!(e.cookbook("apt").unwrap().constraint().is_ok());
        assert!(e.cookbook("bad").unwrap().constraint().is_err());
        assert!(e.cookbook("missing").is_none());
    }

    #[test]
    fn renders_json_and_yaml() {
        let e = env(json!({ "name": "prod", "cookbook_versions": { "apt": "= 2.0.0" } }));

        let rendered: Value = serde_json::from_str(&e.to_json_pretty().unwrap()).unwrap();
        assert_eq!(rendered["cookbook_versions"]["apt"], "= 2.0.0");
        assert!(e.to_yaml().unwrap().contains("name: prod"));
    }

    #[test]
    fn describe_git_location() {
        let location = CookbookLocation {
            git: Some("git@example.com:apt.git".into()),
            git_ref: Some("v1".into()),
            rel: Some("cookbooks/apt".into()),
            ..Default::default()
        };
        assert_eq!(
            location.describe(),
            "git git@example.com:apt.git @ v1 (cookbooks/apt)"
        );
    }
}

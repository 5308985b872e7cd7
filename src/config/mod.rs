//! Configuration trees, layering and tool settings.
//!
//! - Tree representation with an explicit "no value" marker in [`node`]
//! - Deep merging in [`merger`]
//! - File parsing (JSON / YAML) in [`loader`]
//! - Tool settings in [`settings`]
//!
//! # Example
//!
//! ```
//! use larder::config::{deep_merge, Node};
//! use serde_json::json;
//!
//! let parent = Node::from(json!({ "name": "base", "description": "shared" }));
//! let child = Node::from(json!({ "name": "prod", "description": null }));
//!
//! let merged = serde_json::Value::from(deep_merge(&parent, &child));
//! assert_eq!(merged["name"], "prod");
//! assert_eq!(merged["description"], "shared");
//! ```

pub mod loader;
pub mod merger;
pub mod node;
pub mod settings;

pub use loader::{load_tree, parse_tree, FileFormat};
pub use merger::{deep_merge, merge_all};
pub use node::Node;
pub use settings::{load_settings, load_settings_from, OutputSetting, Settings, SettingsPaths};

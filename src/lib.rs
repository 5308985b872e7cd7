//! Larder - Chef environment resolution and cookbook dependency checks.
//!
//! Larder resolves layered environment descriptions, where each file may
//! name a `parent` it extends, into one effective environment. It also reads
//! the metadata of installed cookbooks and reports every declared dependency
//! that the installed set fails to satisfy.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Layer loading, deep merge, and tool settings
//! - [`cookbook`] - Cookbook metadata formats and reader
//! - [`environment`] - Environment inheritance resolution
//! - [`error`] - Error types and result aliases
//! - [`ui`] - Terminal output
//! - [`verify`] - Dependency verification and violation reports
//! - [`version`] - Versions and version constraints
//!
//! # Example
//!
//! ```
//! use larder::config::{deep_merge, Node};
//! use serde_json::json;
//!
//! let parent = Node::from(json!({ "cookbook_versions": { "apt": "= 1.0.0", "git": "= 2.0.0" } }));
//! let child = Node::from(json!({ "cookbook_versions": { "apt": "= 1.1.0" } }));
//!
//! let merged = serde_json::Value::from(deep_merge(&parent, &child));
//! assert_eq!(merged["cookbook_versions"]["apt"], "= 1.1.0");
//! assert_eq!(merged["cookbook_versions"]["git"], "= 2.0.0");
//! ```
//!
//! For file-based resolution, see the integration tests.

pub mod cli;
pub mod config;
pub mod cookbook;
pub mod environment;
pub mod error;
pub mod ui;
pub mod verify;
pub mod version;

pub use error::{LarderError, Result};

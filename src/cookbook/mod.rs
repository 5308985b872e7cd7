//! Installed cookbook metadata.
//!
//! A cookbook directory carries its metadata in one of two formats,
//! `metadata.rb` or `metadata.json`. Each format has a [`MetadataParser`]
//! strategy, selected by [`MetadataFormat`]; both produce the same
//! [`CookbookMetadata`]. [`MetadataReader`] picks the format for a directory
//! and reconciles the declared name with the directory name.
//!
//! # Example
//!
//! ```no_run
//! use larder::cookbook::MetadataReader;
//! use std::path::Path;
//!
//! let mut reader = MetadataReader::new();
//! let cookbooks = reader.scan(Path::new("vendor/cookbooks")).unwrap();
//! for mismatch in reader.mismatches() {
//!     eprintln!("{}", mismatch);
//! }
//! println!("{} cookbooks installed", cookbooks.len());
//! ```

pub mod dsl;
pub mod json;
pub mod metadata;
pub mod reader;

pub use dsl::DslMetadataParser;
pub use json::JsonMetadataParser;
pub use metadata::{CookbookMetadata, DependencyConstraint, MetadataFormat, MetadataParser};
pub use reader::{MetadataReader, NameMismatch};

//! Error types for Larder operations.
//!
//! This module defines [`LarderError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `LarderError` for fatal conditions that abort resolution or verification
//! - Dependency violations and cookbook name mismatches are *not* errors; they are
//!   returned as data (see [`crate::verify::ViolationReport`])
//! - Use `anyhow::Error` (via `LarderError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

use crate::version::VersionError;

/// Core error type for Larder operations.
#[derive(Debug, Error)]
pub enum LarderError {
    /// The environment file passed to the resolver does not exist.
    #[error("Environment file '{path}' does not exist")]
    EnvironmentNotFound { path: PathBuf },

    /// A `parent` reference points at a file that does not exist.
    #[error("Parent environment '{parent}' referenced by '{referenced_by}' does not exist")]
    ParentNotFound {
        parent: PathBuf,
        referenced_by: PathBuf,
    },

    /// The inheritance chain is deeper than the configured bound.
    #[error("Environment inheritance exceeds maximum depth of {max_depth}: {chain}")]
    DepthExceeded { max_depth: usize, chain: String },

    /// Failed to parse a structured file.
    #[error("Failed to parse {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Structurally valid file with unusable contents.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// A cookbook directory holds neither recognised metadata file.
    #[error("Metadata file not found in {dir}: tried {candidates:?}")]
    MetadataNotFound {
        dir: PathBuf,
        candidates: Vec<PathBuf>,
    },

    /// A metadata file exists but could not be understood.
    #[error("Failed to read cookbook metadata {path}: {message}")]
    MetadataParseError { path: PathBuf, message: String },

    /// A dependency constraint in cookbook metadata is malformed.
    #[error("Could not parse version constraint for dependency '{dependency}' of cookbook '{cookbook}': {source}")]
    InvalidConstraint {
        cookbook: String,
        dependency: String,
        #[source]
        source: VersionError,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Larder operations.
pub type Result<T> = std::result::Result<T, LarderError>;

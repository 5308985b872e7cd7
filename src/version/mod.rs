//! Cookbook versions and version constraints.
//!
//! Cookbook versions are frequently written with fewer than three components
//! (`"1.2"`, `"3"`). [`parse_version`] normalizes them to a full
//! [`semver::Version`] by filling the missing components with zero.
//!
//! Constraints follow the operator set used by cookbook metadata and
//! environment files, including the pessimistic `~>` operator. See
//! [`Constraint`].
//!
//! # Example
//!
//! ```
//! use larder::version::{parse_version, Constraint};
//!
//! let constraint = Constraint::parse("~> 1.2").unwrap();
//! assert!(constraint.satisfies(&parse_version("1.2.5").unwrap()));
//! assert!(!constraint.satisfies(&parse_version("2.0").unwrap()));
//! ```

pub mod constraint;

pub use constraint::{Constraint, Operator};

use semver::{BuildMetadata, Prerelease, Version};
use thiserror::Error;

/// Errors raised by the version library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    /// The string is not a version.
    #[error("invalid version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },

    /// The string is not a version constraint.
    #[error("invalid version constraint '{constraint}': {reason}")]
    InvalidConstraint { constraint: String, reason: String },
}

/// Parse a cookbook version, padding missing minor/patch components with `0`.
///
/// - `"1.2.3"` -> `1.2.3`
/// - `"1.2"` -> `1.2.0`
/// - `"1"` -> `1.0.0`
/// - `"1.2-rc.1"` -> `1.2.0-rc.1`
/// - `"2016.06.01"` -> `2016.6.1`
pub fn parse_version(s: &str) -> Result<Version, VersionError> {
    parse_with_precision(s).map(|(version, _)| version)
}

/// Parse a version and report how many numeric components were written.
pub(crate) fn parse_with_precision(s: &str) -> Result<(Version, usize), VersionError> {
    let s = s.trim();
    let invalid = |reason: String| VersionError::InvalidVersion {
        version: s.to_string(),
        reason,
    };

    if s.is_empty() {
        return Err(invalid("empty version".to_string()));
    }

    let split = s.find(['-', '+']).unwrap_or(s.len());
    let (core, suffix) = s.split_at(split);

    let parts: Vec<&str> = core.split('.').collect();
    let precision = parts.len();
    if precision > 3 {
        return Err(invalid(format!(
            "expected at most 3 components, found {precision}"
        )));
    }

    // Components are parsed individually so `06` reads as `6`.
    let mut numbers = [0u64; 3];
    for (slot, part) in numbers.iter_mut().zip(&parts) {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid(format!("invalid component '{part}'")));
        }
        *slot = part
            .parse()
            .map_err(|e| invalid(format!("invalid component '{part}': {e}")))?;
    }

    let (pre, build) = match suffix.strip_prefix('-') {
        Some(rest) => match rest.split_once('+') {
            Some((pre, build)) => (Some(pre), Some(build)),
            None => (Some(rest), None),
        },
        None => (None, suffix.strip_prefix('+')),
    };

    let mut version = Version::new(numbers[0], numbers[1], numbers[2]);
    if let Some(pre) = pre {
        if pre.is_empty() {
            return Err(invalid("empty prerelease".to_string()));
        }
        version.pre = Prerelease::new(pre).map_err(|e| invalid(e.to_string()))?;
    }
    if let Some(build) = build {
        if build.is_empty() {
            return Err(invalid("empty build metadata".to_string()));
        }
        version.build = BuildMetadata::new(build).map_err(|e| invalid(e.to_string()))?;
    }

    Ok((version, precision))
}

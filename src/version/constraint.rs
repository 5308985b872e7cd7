//! Single-operator version constraints.
//!
//! Supported forms, with optional whitespace after the operator:
//!
//! | Constraint | Meaning |
//! |---|---|
//! | `= 1.2.3` or `1.2.3` | exactly `1.2.3` |
//! | `!= 1.2.3` | anything but `1.2.3` |
//! | `> 1.2`, `>= 1.2`, `< 1.2`, `<= 1.2` | ordered comparison |
//! | `~> 1.2` | `>= 1.2.0, < 2.0.0` |
//! | `~> 1.2.3` | `>= 1.2.3, < 1.3.0` |

use std::fmt;

use semver::Version;

use super::{parse_with_precision, VersionError};

/// A version comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `=`
    Eq,
    /// `!=`
    NotEq,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `>=`
    GtEq,
    /// `<=`
    LtEq,
    /// `~>`
    Pessimistic,
}

impl Operator {
    /// The operator as written in a constraint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::GtEq => ">=",
            Self::LtEq => "<=",
            Self::Pessimistic => "~>",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed version constraint that can be checked against concrete versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    op: Operator,
    version: Version,
    /// Number of numeric components written (1..=3); drives the `~>` upper bound.
    precision: usize,
    raw: String,
}

impl Constraint {
    /// Parse a constraint string such as `">= 1.0"` or `"~> 2.4.1"`.
    pub fn parse(constraint: &str) -> Result<Self, VersionError> {
        let raw = constraint.trim();
        let invalid = |reason: String| VersionError::InvalidConstraint {
            constraint: raw.to_string(),
            reason,
        };

        if raw.is_empty() {
            return Err(invalid("empty constraint".to_string()));
        }

        let (op, version_str) = split_operator(raw);
        let version_str = version_str.trim();
        if version_str.is_empty() {
            return Err(invalid("missing version".to_string()));
        }

        let (version, precision) = parse_with_precision(version_str).map_err(|e| match e {
            VersionError::InvalidVersion { reason, .. } => {
                invalid(format!("invalid version '{version_str}': {reason}"))
            }
            other => other,
        })?;

        Ok(Self {
            op,
            version,
            precision,
            raw: raw.to_string(),
        })
    }

    /// The comparison operator.
    pub fn operator(&self) -> Operator {
        self.op
    }

    /// The version the operator compares against.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// The constraint as originally written (trimmed).
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Check whether `target` satisfies this constraint.
    ///
    /// A prerelease target only satisfies a release constraint through `<`
    /// or `<=`, or when the constraint version is `0.0.0`.
    pub fn satisfies(&self, target: &Version) -> bool {
        if self.excludes_prerelease(target) {
            return false;
        }

        match self.op {
            Operator::Eq => target == &self.version,
            Operator::NotEq => target != &self.version,
            Operator::Gt => target > &self.version,
            Operator::Lt => target < &self.version,
            Operator::GtEq => target >= &self.version,
            Operator::LtEq => target <= &self.version,
            Operator::Pessimistic => self.satisfies_pessimistic(target),
        }
    }

    fn excludes_prerelease(&self, target: &Version) -> bool {
        !target.pre.is_empty()
            && self.version.pre.is_empty()
            && !matches!(self.op, Operator::Lt | Operator::LtEq)
            && self.version != Version::new(0, 0, 0)
    }

    fn satisfies_pessimistic(&self, target: &Version) -> bool {
        let min = &self.version;
        // An upper bound past u64::MAX leaves the range open.
        let max = if self.precision < 3 {
            min.major.checked_add(1).map(|major| Version::new(major, 0, 0))
        } else if !min.pre.is_empty() {
            min.patch
                .checked_add(1)
                .map(|patch| Version::new(min.major, min.minor, patch))
        } else {
            min.minor
                .checked_add(1)
                .map(|minor| Version::new(min.major, minor, 0))
        };

        match max {
            Some(max) => target >= min && target < &max,
            None => target >= min,
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Split the leading operator off a constraint. A bare version means `=`.
fn split_operator(s: &str) -> (Operator, &str) {
    // Two-character operators must be tried before their one-character prefixes.
    const OPERATORS: [(&str, Operator); 7] = [
        ("~>", Operator::Pessimistic),
        (">=", Operator::GtEq),
        ("<=", Operator::LtEq),
        ("!=", Operator::NotEq),
        ("=", Operator::Eq),
        (">", Operator::Gt),
        ("<", Operator::Lt),
    ];

    for (token, op) in OPERATORS {
        if let Some(rest) = s.strip_prefix(token) {
            return (op, rest);
        }
    }
    (Operator::Eq, s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        crate::version::parse_version(s).unwrap()
    }

    #[test]
    fn parses_operator_with_space() {
        let c = Constraint::parse(">= 1.0").unwrap();
        assert_eq!(c.operator(), Operator::GtEq);
        assert_eq!(c.version(), &Version::new(1, 0, 0));
        assert_eq!(c.as_str(), ">= 1.0");
    }

    #[test]
    fn parses_operator_without_space() {
        let c = Constraint::parse("<2.1.3").unwrap();
        assert_eq!(c.operator(), Operator::Lt);
        assert_eq!(c.version(), &Version::new(2, 1, 3));
    }

    #[test]
    fn bare_version_means_equal() {
        let c = Constraint::parse("1.4.2").unwrap();
        assert_eq!(c.operator(), Operator::Eq);
        assert!(c.satisfies(&v("1.4.2")));
        assert!(!c.satisfies(&v("1.4.3")));
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(
            Constraint::parse("   "),
            Err(VersionError::InvalidConstraint { .. })
        ));
    }

    #[test]
    fn rejects_missing_version() {
        let err = Constraint::parse(">=").unwrap_err();
        assert!(err.to_string().contains("missing version"));
    }

    #[test]
    fn rejects_doubled_operator() {
        let err = Constraint::parse(">> 1.0").unwrap_err();
        assert!(matches!(err, VersionError::InvalidConstraint { .. }));
        assert!(err.to_string().contains(">> 1.0"));
    }

    #[test]
    fn rejects_non_numeric_version() {
        assert!(Constraint::parse("~> abc").is_err());
    }

    #[test]
    fn ordered_comparisons() {
        assert!(Constraint::parse("> 1.0").unwrap().satisfies(&v("1.0.1")));
        assert!(!Constraint::parse("> 1.0").unwrap().satisfies(&v("1.0")));
        assert!(Constraint::parse("<= 1.0").unwrap().satisfies(&v("1.0")));
        assert!(!Constraint::parse("< 1.0").unwrap().satisfies(&v("1.0")));
        assert!(Constraint::parse(">= 1.0").unwrap().satisfies(&v("1.0")));
        assert!(!Constraint::parse(">= 1.0").unwrap().satisfies(&v("0.9")));
    }

    #[test]
    fn not_equal() {
        let c = Constraint::parse("!= 2.0.0").unwrap();
        assert!(c.satisfies(&v("2.0.1")));
        assert!(!c.satisfies(&v("2.0")));
    }

    #[test]
    fn pessimistic_two_components_bounds_major() {
        let c = Constraint::parse("~> 1.2").unwrap();
        assert!(c.satisfies(&v("1.2.0")));
        assert!(c.satisfies(&v("1.2.5")));
        assert!(c.satisfies(&v("1.9.0")));
        assert!(!c.satisfies(&v("1.1.9")));
        assert!(!c.satisfies(&v("2.0.0")));
    }

    #[test]
    fn pessimistic_three_components_bounds_minor() {
        let c = Constraint::parse("~> 1.2.3").unwrap();
        assert!(c.satisfies(&v("1.2.3")));
        assert!(c.satisfies(&v("1.2.99")));
        assert!(!c.satisfies(&v("1.3.0")));
        assert!(!c.satisfies(&v("1.2.2")));
    }

    #[test]
    fn pessimistic_single_component_bounds_major() {
        let c = Constraint::parse("~> 2").unwrap();
        assert!(c.satisfies(&v("2.7.1")));
        assert!(!c.satisfies(&v("3.0.0")));
    }

    #[test]
    fn pessimistic_rejects_prerelease_target() {
        let c = Constraint::parse("~> 1.2").unwrap();
        assert!(!c.satisfies(&v("1.3.0-beta.1")));
    }

    #[test]
    fn prerelease_target_fails_release_lower_bounds() {
        let beta = v("2.0.0-beta");
        assert!(!Constraint::parse(">= 1.0").unwrap().satisfies(&beta));
        assert!(!Constraint::parse("> 1.0").unwrap().satisfies(&beta));
        assert!(!Constraint::parse("!= 1.0").unwrap().satisfies(&beta));
        assert!(Constraint::parse(">= 2.0.0-alpha").unwrap().satisfies(&beta));
    }

    #[test]
    fn prerelease_target_passes_upper_bounds() {
        assert!(Constraint::parse("< 2.0").unwrap().satisfies(&v("1.0.0-beta")));
        assert!(Constraint::parse("<= 1.0").unwrap().satisfies(&v("1.0.0-beta")));
    }

    #[test]
    fn zero_constraint_admits_prerelease() {
        assert!(Constraint::parse(">= 0.0.0").unwrap().satisfies(&v("1.0.0-beta")));
        assert!(Constraint::parse(">= 0").unwrap().satisfies(&v("0.1.0-rc.1")));
    }

    #[test]
    fn pessimistic_at_u64_max_has_no_upper_bound() {
        let c = Constraint::parse("~> 18446744073709551615.0").unwrap();
        assert!(c.satisfies(&Version::new(u64::MAX, 1, 0)));
        assert!(c.satisfies(&Version::new(u64::MAX, u64::MAX, u64::MAX)));
        assert!(!c.satisfies(&Version::new(u64::MAX - 1, 9, 0)));

        let c = Constraint::parse("~> 1.18446744073709551615.0").unwrap();
        assert!(c.satisfies(&Version::new(1, u64::MAX, 7)));
    }

    #[test]
    fn leading_zero_constraint() {
        let c = Constraint::parse(">= 2016.06.01").unwrap();
        assert_eq!(c.version(), &Version::new(2016, 6, 1));
        assert!(c.satisfies(&v("2016.6.1")));
        assert!(!c.satisfies(&v("2016.05.30")));
    }

    #[test]
    fn display_uses_original_text() {
        let c = Constraint::parse("  ~>1.2 ").unwrap();
        assert_eq!(c.to_string(), "~>1.2");
    }
}

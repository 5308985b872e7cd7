//! Dependency violations and the report that collects them.

use std::collections::BTreeMap;
use std::fmt;

use semver::Version;
use tracing::warn;

/// One declared dependency the installed cookbooks do not satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The dependency is not installed at all.
    Missing {
        cookbook: String,
        version: Version,
        dependency: String,
    },
    /// The dependency is installed at a version outside the constraint.
    Unsatisfied {
        cookbook: String,
        version: Version,
        dependency: String,
        constraint: String,
        installed: Version,
    },
}

impl Violation {
    /// The cookbook declaring the dependency.
    pub fn cookbook(&self) -> &str {
        match self {
            Self::Missing { cookbook, .. } | Self::Unsatisfied { cookbook, .. } => cookbook,
        }
    }

    /// The dependency that is not satisfied.
    pub fn dependency(&self) -> &str {
        match self {
            Self::Missing { dependency, .. } | Self::Unsatisfied { dependency, .. } => dependency,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing {
                cookbook,
                version,
                dependency,
            } => write!(
                f,
                "{cookbook}-{version} depends on {dependency} which was not installed!"
            ),
            Self::Unsatisfied {
                cookbook,
                version,
                dependency,
                constraint,
                installed,
            } => write!(
                f,
                "{cookbook}-{version} depends on {dependency} {constraint} but {dependency} is {installed}!"
            ),
        }
    }
}

/// Outcome of a verification pass.
///
/// Cookbooks without an entry have all their dependencies satisfied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViolationReport {
    violations: BTreeMap<String, Vec<Violation>>,
}

impl ViolationReport {
    /// True when no violation was recorded.
    pub fn is_success(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of cookbooks with at least one violation.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations recorded for `cookbook`.
    pub fn get(&self, cookbook: &str) -> Option<&[Violation]> {
        self.violations.get(cookbook).map(Vec::as_slice)
    }

    /// The message for `cookbook`: its violations, one per line.
    pub fn message(&self, cookbook: &str) -> Option<String> {
        self.get(cookbook).map(join_messages)
    }

    /// Cookbook name to message, for every cookbook with violations.
    pub fn messages(&self) -> BTreeMap<String, String> {
        self.violations
            .iter()
            .map(|(name, violations)| (name.clone(), join_messages(violations)))
            .collect()
    }

    /// Cookbooks with violations, in name order.
    pub fn cookbooks(&self) -> impl Iterator<Item = &str> {
        self.violations.keys().map(String::as_str)
    }

    /// All violations, ordered by cookbook then dependency.
    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.violations.values().flatten()
    }
}

impl fmt::Display for ViolationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for violation in self.iter() {
            writeln!(f, "{violation}")?;
        }
        Ok(())
    }
}

fn join_messages(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Accumulates violations during a verification pass.
#[derive(Debug, Default)]
pub struct ViolationReportBuilder {
    violations: BTreeMap<String, Vec<Violation>>,
}

impl ViolationReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation and log it.
    pub fn record(&mut self, violation: Violation) {
        warn!("{}", violation);
        self.violations
            .entry(violation.cookbook().to_string())
            .or_default()
            .push(violation);
    }

    /// Freeze the collected violations into a report.
    pub fn build(self) -> ViolationReport {
        ViolationReport {
            violations: self.violations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing(cookbook: &str, dependency: &str) -> Violation {
        Violation::Missing {
            cookbook: cookbook.into(),
            version: Version::new(1, 0, 0),
            dependency: dependency.into(),
        }
    }

    #[test]
    fn missing_message() {
        assert_eq!(
            missing("web", "apt").to_string(),
            "web-1.0.0 depends on apt which was not installed!"
        );
    }

    #[test]
    fn unsatisfied_message() {
        let v = Violation::Unsatisfied {
            cookbook: "web".into(),
            version: Version::new(1, 0, 0),
            dependency: "nginx".into(),
            constraint: ">= 2.0".into(),
            installed: Version::new(1, 9, 3),
        };
        assert_eq!(
            v.to_string(),
            "web-1.0.0 depends on nginx >= 2.0 but nginx is 1.9.3!"
        );
        assert_eq!(v.cookbook(), "web");
        assert_eq!(v.dependency(), "nginx");
    }

    #[test]
    fn empty_report_is_success() {
        let report = ViolationReportBuilder::new().build();
        assert!(report.is_success());
        assert!(report.is_empty());
        assert_eq!(report.to_string(), "");
    }

    #[test]
    fn violations_group_by_cookbook() {
        let mut builder = ViolationReportBuilder::new();
        builder.record(missing("web", "apt"));
        builder.record(missing("web", "git"));
        builder.record(missing("db", "apt"));
        let report = builder.build();

        assert!(!report.is_success());
        assert_eq!(report.len(), 2);
        assert_eq!(report.get("web").map(<[Violation]>::len), Some(2));
        assert_eq!(
            report.message("web").unwrap(),
            "web-1.0.0 depends on apt which was not installed!\nweb-1.0.0 depends on git which was not installed!"
        );
        assert!(report.get("app").is_none());
    }

    #[test]
    fn iteration_is_ordered_by_cookbook() {
        let mut builder = ViolationReportBuilder::new();
        builder.record(missing("web", "apt"));
        builder.record(missing("db", "apt"));
        let report = builder.build();

        let cookbooks: Vec<_> = report.cookbooks().collect();
        assert_eq!(cookbooks, vec!["db", "web"]);
        assert_eq!(report.iter().next().map(Violation::cookbook), Some("db"));
        assert_eq!(report.messages().len(), 2);
        assert_eq!(report.to_string().lines().count(), 2);
    }
}

//! Dependency verification across installed cookbooks.

use std::collections::BTreeMap;
use std::path::Path;

use semver::Version;
use tracing::{debug, warn};

use crate::cookbook::{CookbookMetadata, DependencyConstraint, MetadataReader, NameMismatch};
use crate::error::{LarderError, Result};
use crate::version::Constraint;

use super::report::{Violation, ViolationReport, ViolationReportBuilder};

/// Result of verifying an installed cookbook tree.
#[derive(Debug, Clone)]
pub struct InstalledVerification {
    /// Number of cookbooks read.
    pub cookbooks: usize,
    /// Cookbooks whose declared name differs from their directory.
    pub mismatches: Vec<NameMismatch>,
    pub report: ViolationReport,
}

impl InstalledVerification {
    pub fn is_success(&self) -> bool {
        self.report.is_success()
    }
}

/// Checks every declared dependency against the installed versions.
///
/// Every cookbook is checked even after a violation is found; violations
/// are returned in the report, not as errors. A constraint that cannot be
/// parsed aborts the pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct DependencyVerifier;

impl DependencyVerifier {
    pub fn new() -> Self {
        Self
    }

    /// Verify a complete set of installed cookbooks.
    ///
    /// Checks run in cookbook name order, then dependency name order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConstraint` when a dependency constraint is malformed.
    pub fn verify(&self, cookbooks: &[CookbookMetadata]) -> Result<ViolationReport> {
        let mut installed: BTreeMap<&str, &CookbookMetadata> = BTreeMap::new();
        for cookbook in cookbooks {
            if let Some(previous) = installed.insert(cookbook.name.as_str(), cookbook) {
                warn!(
                    "Cookbook {} is installed more than once ({} and {}); using {}",
                    cookbook.name, previous.version, cookbook.version, cookbook.version
                );
            }
        }

        let versions: BTreeMap<&str, &Version> = installed
            .iter()
            .map(|(name, cookbook)| (*name, &cookbook.version))
            .collect();

        let mut builder = ViolationReportBuilder::new();

        for (name, cookbook) in &installed {
            for (dependency, constraint) in &cookbook.dependencies {
                let Some(&available) = versions.get(dependency.as_str()) else {
                    builder.record(Violation::Missing {
                        cookbook: name.to_string(),
                        version: cookbook.version.clone(),
                        dependency: dependency.clone(),
                    });
                    continue;
                };

                let DependencyConstraint::Constraint(text) = constraint else {
                    continue;
                };

                let parsed = Constraint::parse(text).map_err(|source| {
                    warn!(
                        "Could not parse version constraint '{}' for dependency '{}' of cookbook '{}'",
                        text, dependency, name
                    );
                    LarderError::InvalidConstraint {
                        cookbook: name.to_string(),
                        dependency: dependency.clone(),
                        source,
                    }
                })?;

                if parsed.satisfies(available) {
                    debug!("{} {} satisfied by {}", dependency, text, available);
                } else {
                    builder.record(Violation::Unsatisfied {
                        cookbook: name.to_string(),
                        version: cookbook.version.clone(),
                        dependency: dependency.clone(),
                        constraint: text.clone(),
                        installed: available.clone(),
                    });
                }
            }
        }

        Ok(builder.build())
    }

    /// Read every cookbook under `root` and verify them together.
    pub fn verify_installed(&self, root: &Path) -> Result<InstalledVerification> {
        let mut reader = MetadataReader::new();
        let cookbooks = reader.scan(root)?;
        let report = self.verify(&cookbooks)?;

        Ok(InstalledVerification {
            cookbooks: cookbooks.len(),
            mismatches: reader.mismatches().to_vec(),
            report,
        })
    }
}

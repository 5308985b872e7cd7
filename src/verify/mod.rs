//! Verification that installed cookbooks satisfy each other's dependencies.
//!
//! [`DependencyVerifier`] builds a name-to-version map from the installed
//! cookbooks and checks every declared dependency against it. Problems are
//! collected into a [`ViolationReport`]; the pass fails only when a
//! constraint itself is malformed.
//!
//! # Example
//!
//! ```
//! use larder::cookbook::CookbookMetadata;
//! use larder::verify::DependencyVerifier;
//! use semver::Version;
//!
//! let cookbooks = vec![
//!     CookbookMetadata::new("web", Version::new(1, 0, 0)).with_dependency("nginx", ">= 2.0"),
//!     CookbookMetadata::new("nginx", Version::new(1, 9, 0)),
//! ];
//!
//! let report = DependencyVerifier::new().verify(&cookbooks).unwrap();
//! assert!(!report.is_success());
//! assert_eq!(
//!     report.message("web").unwrap(),
//!     "web-1.0.0 depends on nginx >= 2.0 but nginx is 1.9.0!"
//! );
//! ```

pub mod report;
pub mod verifier;

pub use report::{Violation, ViolationReport, ViolationReportBuilder};
pub use verifier::{DependencyVerifier, InstalledVerification};

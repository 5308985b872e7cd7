//! Integration tests for reading and verifying installed cookbooks.

use larder::cookbook::{DependencyConstraint, MetadataReader};
use larder::verify::{DependencyVerifier, Violation};
use semver::Version;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, dir: &str, file: &str, content: &str) {
    let path = root.join(dir);
    fs::create_dir_all(&path).unwrap();
    fs::write(path.join(file), content).unwrap();
}

fn installed_tree() -> TempDir {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "web",
        "metadata.rb",
        r#"
name             "web"
maintainer       "Ops"
version          "1.4.0"

depends "nginx", "~> 2.0"
depends "apt"
depends("openssl", ">= 1.0")
"#,
    );
    write(
        temp.path(),
        "nginx",
        "metadata.json",
        r#"{"name": "nginx", "version": "2.7.1", "dependencies": {"apt": []}}"#,
    );
    write(temp.path(), "apt", "metadata.rb", "name 'apt'\nversion '3.0'\n");
    write(
        temp.path(),
        "openssl-fork",
        "metadata.rb",
        "name 'openssl'\nversion '0.9.8'\n",
    );
    temp
}

#[test]
fn reads_both_metadata_formats() {
    let temp = installed_tree();
    let mut reader = MetadataReader::new();

    let cookbooks = reader.scan(temp.path()).unwrap();

    let names: Vec<_> = cookbooks.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["apt", "nginx", "openssl", "web"]);

    let web = &cookbooks[3];
    assert_eq!(web.version, Version::new(1, 4, 0));
    assert_eq!(
        web.dependencies["nginx"],
        DependencyConstraint::Constraint("~> 2.0".into())
    );
    assert!(web.dependencies["apt"].is_unconstrained());
    assert!(cookbooks[1].dependencies["apt"].is_unconstrained());
    assert_eq!(cookbooks[0].version, Version::new(3, 0, 0));

    assert_eq!(reader.mismatches().len(), 1);
    assert_eq!(reader.mismatches()[0].directory_name, "openssl-fork");
}

#[test]
fn verifies_installed_tree() {
    let temp = installed_tree();

    let outcome = DependencyVerifier::new()
        .verify_installed(temp.path())
        .unwrap();

    assert_eq!(outcome.cookbooks, 4);
    assert_eq!(outcome.mismatches.len(), 1);
    assert!(!outcome.is_success());

    let violations: Vec<&Violation> = outcome.report.iter().collect();
    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations[0].to_string(),
        "web-1.4.0 depends on openssl >= 1.0 but openssl is 0.9.8!"
    );
}

#[test]
fn fixing_the_tree_clears_the_report() {
    let temp = installed_tree();
    write(
        temp.path(),
        "openssl-fork",
        "metadata.rb",
        "name 'openssl'\nversion '1.1.1'\n",
    );

    let outcome = DependencyVerifier::new()
        .verify_installed(temp.path())
        .unwrap();

    assert!(outcome.is_success());
    assert_eq!(outcome.report.to_string(), "");
}

#[test]
fn date_style_versions_verify() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "web",
        "metadata.rb",
        "name 'web'\nversion '2016.06.01'\ndepends 'apt', '>= 2016.06.01'\n",
    );
    write(
        temp.path(),
        "apt",
        "metadata.json",
        r#"{"name": "apt", "version": "2016.07.04"}"#,
    );

    let outcome = DependencyVerifier::new()
        .verify_installed(temp.path())
        .unwrap();

    assert_eq!(outcome.cookbooks, 2);
    assert!(outcome.is_success());
}

//! Environment inheritance resolution.
//!
//! An environment file may name a `parent` environment. The parent is
//! resolved first (recursively) and the child is deep-merged on top of it.
//!
//! A parent reference is used as written when it names an existing file.
//! Otherwise it is joined onto the configured parent directory, or onto the
//! directory of the file that referenced it.
//!
//! Recursion is bounded only by a depth counter. A cyclic chain is reported
//! once it exceeds the bound, with the visited files listed in the error.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{deep_merge, load_tree, Node, Settings};
use crate::error::{LarderError, Result};

use super::description::EnvironmentDescription;

/// Default bound on `parent` hops.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Key naming the parent layer.
const PARENT_KEY: &str = "parent";

/// Resolves an environment's `parent` chain into one effective environment.
///
/// # Example
///
/// ```no_run
/// use larder::environment::EnvironmentResolver;
/// use std::path::Path;
///
/// let resolver = EnvironmentResolver::new().with_max_depth(5);
/// let env = resolver.resolve(Path::new("environments/production.json")).unwrap();
/// for cookbook in env.cookbooks() {
///     println!("{} {}", cookbook.name, cookbook.version_specifier);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct EnvironmentResolver {
    max_depth: usize,
    parent_env_dir: Option<PathBuf>,
}

impl EnvironmentResolver {
    /// Create a resolver with default settings.
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            parent_env_dir: None,
        }
    }

    /// Create a resolver from tool settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            max_depth: settings.max_depth,
            parent_env_dir: settings.parent_env_dir.clone(),
        }
    }

    /// Set the maximum number of `parent` hops.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Resolve relative parent references against `dir` instead of the
    /// referencing file's directory.
    pub fn with_parent_env_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.parent_env_dir = Some(dir.into());
        self
    }

    /// Get the maximum inheritance depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Get the parent directory override, if any.
    pub fn parent_env_dir(&self) -> Option<&Path> {
        self.parent_env_dir.as_deref()
    }

    /// Resolve the environment at `path` into its typed, effective form.
    pub fn resolve(&self, path: &Path) -> Result<EnvironmentDescription> {
        let tree = self.resolve_tree(path)?;
        EnvironmentDescription::from_tree(&tree)
    }

    /// Resolve the environment at `path` into a merged tree.
    ///
    /// Unset markers that no ancestor filled in are left in the tree.
    pub fn resolve_tree(&self, path: &Path) -> Result<Node> {
        self.expand(path, None, &mut Vec::new())
    }

    fn expand(
        &self,
        path: &Path,
        referenced_by: Option<&Path>,
        chain: &mut Vec<PathBuf>,
    ) -> Result<Node> {
        let depth = chain.len();
        chain.push(path.to_path_buf());

        if depth > self.max_depth {
            return Err(LarderError::DepthExceeded {
                max_depth: self.max_depth,
                chain: format_chain(chain),
            });
        }

        if !path.is_file() {
            return Err(match referenced_by {
                None => LarderError::EnvironmentNotFound {
                    path: path.to_path_buf(),
                },
                Some(child) => LarderError::ParentNotFound {
                    parent: path.to_path_buf(),
                    referenced_by: child.to_path_buf(),
                },
            });
        }

        debug!("Loading environment layer {} (depth {})", path.display(), depth);
        let layer = load_tree(path)?;

        let reference = match layer.get(PARENT_KEY) {
            None | Some(Node::NoOverride) => return Ok(layer),
            Some(node) => node.as_str().ok_or_else(|| LarderError::ConfigValidationError {
                message: format!("{}: 'parent' must be a string", path.display()),
            })?,
        };

        let parent_path = self.locate_parent(reference, path);
        debug!(
            "{} inherits from {}",
            path.display(),
            parent_path.display()
        );

        let parent = self.expand(&parent_path, Some(path), chain)?;
        Ok(deep_merge(&parent, &layer))
    }

    fn locate_parent(&self, reference: &str, referenced_by: &Path) -> PathBuf {
        let literal = PathBuf::from(reference);
        if literal.exists() {
            return literal;
        }

        let base = match &self.parent_env_dir {
            Some(dir) => dir.clone(),
            None => referenced_by
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        };
        base.join(reference)
    }
}

impl Default for EnvironmentResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn format_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

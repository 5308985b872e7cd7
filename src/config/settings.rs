//! Tool settings.
//!
//! Settings are layered the same way environments are, using the same merger:
//!
//! 1. User settings (`~/.larder/config.yml`)
//! 2. Project settings (`.larder.yml` in the working directory), or the file
//!    passed with `--config`
//!
//! Command-line flags override whatever the merged settings say.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::loader::load_tree;
use crate::config::merger::merge_all;
use crate::environment::DEFAULT_MAX_DEPTH;
use crate::error::{LarderError, Result};

/// Project settings file name.
pub const PROJECT_SETTINGS_FILE: &str = ".larder.yml";

/// Output verbosity as written in a settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputSetting {
    Verbose,
    #[default]
    Normal,
    Quiet,
    Silent,
}

/// Merged tool settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Maximum number of `parent` hops when resolving an environment.
    pub max_depth: usize,

    /// Directory relative `parent` references are resolved against.
    ///
    /// When unset, a parent is looked up next to the file referencing it.
    pub parent_env_dir: Option<PathBuf>,

    /// Output verbosity used when no flag is given.
    pub default_output: OutputSetting,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            parent_env_dir: None,
            default_output: OutputSetting::default(),
        }
    }
}

/// Settings file locations in merge order.
#[derive(Debug, Clone, Default)]
pub struct SettingsPaths {
    /// User settings: ~/.larder/config.yml
    pub user_global: Option<PathBuf>,

    /// Project settings: ./.larder.yml (or an explicit file)
    pub project: Option<PathBuf>,
}

impl SettingsPaths {
    /// Discover settings files for the given working directory.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            user_global: Self::find_user_global(),
            project: existing(project_root.join(PROJECT_SETTINGS_FILE)),
        }
    }

    fn find_user_global() -> Option<PathBuf> {
        existing(dirs::home_dir()?.join(".larder").join("config.yml"))
    }

    /// Returns all existing settings paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.user_global.iter().chain(self.project.iter()).collect()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Discover, load and merge settings.
///
/// An `explicit` settings file replaces the project settings file and must exist.
pub fn load_settings(project_root: &Path, explicit: Option<&Path>) -> Result<Settings> {
    let mut paths = SettingsPaths::discover(project_root);

    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(LarderError::ConfigValidationError {
                message: format!("Settings file '{}' does not exist", path.display()),
            });
        }
        paths.project = Some(path.to_path_buf());
    }

    load_settings_from(&paths)
}

/// Load and merge the settings files named in `paths`.
pub fn load_settings_from(paths: &SettingsPaths) -> Result<Settings> {
    let layers = paths
        .all_existing()
        .into_iter()
        .map(|path| {
            tracing::debug!("Loading settings from {}", path.display());
            load_tree(path)
        })
        .collect::<Result<Vec<_>>>()?;

    let merged = merge_all(&layers).without_unset();

    serde_json::from_value(Value::from(merged)).map_err(|e| LarderError::ConfigValidationError {
        message: format!("invalid settings: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.max_depth, 10);
        assert!(settings.parent_env_dir.is_none());
        assert_eq!(settings.default_output, OutputSetting::Normal);
    }

    #[test]
    fn no_files_yields_defaults() {
        let settings = load_settings_from(&SettingsPaths::default()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn project_overrides_user() {
        let temp = TempDir::new().unwrap();
        let user = temp.path().join("user.yml");
        let project = temp.path().join("project.yml");
        fs::write(&user, "max_depth: 3\nparent_env_dir: /envs\n").unwrap();
        fs::write(&project, "max_depth: 5\ndefault_output: quiet\n").unwrap();

        let settings = load_settings_from(&SettingsPaths {
            user_global: Some(user),
            project: Some(project),
        })
        .unwrap();

        assert_eq!(settings.max_depth, 5);
        assert_eq!(settings.parent_env_dir, Some(PathBuf::from("/envs")));
        assert_eq!(settings.default_output, OutputSetting::Quiet);
    }

    #[test]
    fn null_in_project_keeps_user_value() {
        let temp = TempDir::new().unwrap();
        let user = temp.path().join("user.yml");
        let project = temp.path().join("project.yml");
        fs::write(&user, "parent_env_dir: /envs\n").unwrap();
        fs::write(&project, "parent_env_dir: ~\n").unwrap();

        let settings = load_settings_from(&SettingsPaths {
            user_global: Some(user),
            project: Some(project),
        })
        .unwrap();

        assert_eq!(settings.parent_env_dir, Some(PathBuf::from("/envs")));
    }

    #[test]
    fn discovers_project_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROJECT_SETTINGS_FILE), "max_depth: 2\n").unwrap();

        let paths = SettingsPaths::discover(temp.path());

        assert_eq!(paths.project, Some(temp.path().join(PROJECT_SETTINGS_FILE)));
    }

    #[test]
    fn explicit_file_must_exist() {
        let temp = TempDir::new().unwrap();
        let result = load_settings(temp.path(), Some(&temp.path().join("nope.yml")));
        assert!(matches!(
            result,
            Err(LarderError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn invalid_field_type_is_reported() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("project.yml");
        fs::write(&project, "max_depth: lots\n").unwrap();

        let result = load_settings_from(&SettingsPaths {
            user_global: None,
            project: Some(project),
        });

        match result {
            Err(LarderError::ConfigValidationError { message }) => {
                assert!(message.contains("invalid settings"));
            }
            other => panic!("Expected ConfigValidationError, got {:?}", other),
        }
    }
}

//! Reading metadata from installed cookbook directories.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{LarderError, Result};

use super::metadata::{CookbookMetadata, MetadataFormat};

/// A cookbook whose declared name differs from its directory name.
///
/// The declared name is kept; this is reported, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMismatch {
    pub directory: PathBuf,
    pub declared: String,
    pub directory_name: String,
}

impl fmt::Display for NameMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cookbook name from metadata does not match the directory name! metadata: '{}', cookbook directory name: '{}'",
            self.declared, self.directory_name
        )
    }
}

/// Reads [`CookbookMetadata`] from cookbook directories.
///
/// Name mismatches encountered along the way are collected and available
/// from [`MetadataReader::mismatches`].
#[derive(Debug, Default)]
pub struct MetadataReader {
    mismatches: Vec<NameMismatch>,
}

impl MetadataReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the metadata file in `dir`, in [`MetadataFormat::SEARCH_ORDER`].
    pub fn locate(dir: &Path) -> Result<(MetadataFormat, PathBuf)> {
        let candidates: Vec<(MetadataFormat, PathBuf)> = MetadataFormat::SEARCH_ORDER
            .iter()
            .map(|format| (*format, dir.join(format.file_name())))
            .collect();

        match candidates.iter().find(|(_, path)| path.is_file()) {
            Some(found) => Ok(found.clone()),
            None => Err(LarderError::MetadataNotFound {
                dir: dir.to_path_buf(),
                candidates: candidates.into_iter().map(|(_, path)| path).collect(),
            }),
        }
    }

    /// Read the metadata of the cookbook installed in `dir`.
    ///
    /// An empty declared name falls back to the directory name.
    pub fn read(&mut self, dir: &Path) -> Result<CookbookMetadata> {
        let (format, path) = Self::locate(dir)?;
        debug!("Reading {:?} metadata from {}", format, path.display());

        let content = fs::read_to_string(&path)?;
        let mut metadata = format.parser().parse(&content, &path)?;

        let directory_name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if metadata.name != directory_name {
            if metadata.name.is_empty() {
                info!(
                    "Cookbook {} has no name specified in {}",
                    directory_name,
                    format.file_name()
                );
                metadata.name = directory_name;
            } else {
                let mismatch = NameMismatch {
                    directory: dir.to_path_buf(),
                    declared: metadata.name.clone(),
                    directory_name,
                };
                warn!("{}", mismatch);
                self.mismatches.push(mismatch);
            }
        }

        Ok(metadata)
    }

    /// Read every cookbook directly under `root`, ordered by directory name.
    ///
    /// Plain files under `root` are skipped.
    pub fn scan(&mut self, root: &Path) -> Result<Vec<CookbookMetadata>> {
        if !root.is_dir() {
            return Err(LarderError::ConfigValidationError {
                message: format!("Cookbook directory '{}' does not exist", root.display()),
            });
        }

        let mut cookbook_dirs = Vec::new();
        for entry in fs::read_dir(root)? {
            let path = entry?.path();
            if path.is_dir() {
                cookbook_dirs.push(path);
            }
        }
        cookbook_dirs.sort();

        cookbook_dirs.iter().map(|dir| self.read(dir)).collect()
    }

    /// Name mismatches seen so far.
    pub fn mismatches(&self) -> &[NameMismatch] {
        &self.mismatches
    }
}

//! Scaffold file writer
//!
//! Creates the output directory layout and writes generated files into it.

use crate::error::{Error, Result, ResultExt};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::info;

/// Directories created for every scaffold, relative to the output root
pub const SCAFFOLD_DIRS: [&str; 3] = ["schemas", "routes", "tests"];

/// A rendered file, path relative to the output root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
}

impl GeneratedFile {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Writes generated files below one output directory
#[derive(Debug, Clone)]
pub struct ScaffoldWriter {
    root: PathBuf,
    overwrite: bool,
}

impl ScaffoldWriter {
    /// Create a writer for the given output directory; existing files are overwritten
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            overwrite: true,
        }
    }

    /// Refuse to replace files that already exist
    #[must_use]
    pub fn keep_existing(mut self) -> Self {
        self.overwrite = false;
        self
    }

    /// Get the output directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a generated file is written to
    pub fn target(&self, file: &GeneratedFile) -> Result<PathBuf> {
        let escapes = file.path.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if escapes {
            return Err(Error::Other(format!(
                "Generated file path '{}' must stay inside the output directory",
                file.path.display()
            )));
        }
        Ok(self.root.join(&file.path))
    }

    /// Create the directory layout and write every file
    pub fn write(&self, files: &[GeneratedFile]) -> Result<Vec<PathBuf>> {
        for dir in SCAFFOLD_DIRS {
            let path = self.root.join(dir);
            fs::create_dir_all(&path)
                .with_context(|| format!("Failed to create directory {}", path.display()))?;
        }

        let mut written = Vec::with_capacity(files.len());
        for file in files {
            let target = self.target(file)?;

            if !self.overwrite && target.exists() {
                return Err(Error::Other(format!(
                    "Refusing to overwrite existing file {}",
                    target.display()
                )));
            }
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {}", parent.display()))?;
            }

            fs::write(&target, &file.contents)
                .with_context(|| format!("Failed to write {}", target.display()))?;
            info!(path = %target.display(), "Wrote file");
            written.push(target);
        }

        Ok(written)
    }
}

/// Write files below `output_dir`, overwriting existing ones
pub fn write_scaffold(output_dir: impl AsRef<Path>, files: &[GeneratedFile]) -> Result<Vec<PathBuf>> {
    ScaffoldWriter::new(output_dir.as_ref()).write(files)
}

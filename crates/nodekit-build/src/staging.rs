// SPDX-FileCopyrightText: 2026 Nodekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Invocation-scoped staging directory.
//!
//! Everything that goes into a package is first copied here. The directory
//! is a [`TempDir`], so it disappears when the `StagingArea` is dropped,
//! whichever way the build ends.

use std::fs;
use std::path::{Path, PathBuf};

use nodekit_core::NodekitError;
use tempfile::TempDir;
use walkdir::WalkDir;

pub struct StagingArea {
    dir: TempDir,
}

impl StagingArea {
    /// Create a fresh staging directory under `root`, or the system temp dir.
    pub fn create(root: Option<&Path>) -> Result<Self, NodekitError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("nodekit-stage-");
        let dir = match root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(|e| NodekitError::environment("failed to create staging directory", e))?;

        tracing::debug!(path = %dir.path().display(), "created staging directory");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Copy a single file to `name` inside the stage. Returns false when the
    /// source does not exist.
    pub fn copy_file(&self, source: &Path, name: &str) -> Result<bool, NodekitError> {
        if !source.is_file() {
            return Ok(false);
        }
        let target = self.path().join(name);
        if let Some(parent) = target.parent() {
            create_dir(parent)?;
        }
        fs::copy(source, &target).map_err(|e| {
            NodekitError::environment(format!("failed to stage {}", source.display()), e)
        })?;
        Ok(true)
    }

    /// Recursively copy the regular files under `source` into `name` inside
    /// the stage. Symlinks are not followed. Returns the number of files
    /// copied.
    pub fn copy_tree(&self, source: &Path, name: &str) -> Result<usize, NodekitError> {
        let target_root = self.path().join(name);
        let mut copied = 0;

        for entry in WalkDir::new(source).follow_links(false) {
            let entry = entry.map_err(|e| walk_error(source, e))?;
            let relative = entry
                .path()
                .strip_prefix(source)
                .map_err(|e| NodekitError::Internal(e.to_string()))?;
            let target = target_root.join(relative);

            let file_type = entry.file_type();
            if file_type.is_dir() {
                create_dir(&target)?;
            } else if file_type.is_file() {
                fs::copy(entry.path(), &target).map_err(|e| {
                    NodekitError::environment(
                        format!("failed to stage {}", entry.path().display()),
                        e,
                    )
                })?;
                copied += 1;
            } else {
                tracing::debug!(path = %entry.path().display(), "skipping non-regular file");
            }
        }
        Ok(copied)
    }

    /// Every staged regular file, relative to the stage root, sorted.
    pub fn files(&self) -> Result<Vec<PathBuf>, NodekitError> {
        let mut files = Vec::new();
        for entry in WalkDir::new(self.path()).sort_by_file_name() {
            let entry = entry.map_err(|e| walk_error(self.path(), e))?;
            if entry.file_type().is_file() {
                let relative = entry
                    .path()
                    .strip_prefix(self.path())
                    .map_err(|e| NodekitError::Internal(e.to_string()))?;
                files.push(relative.to_path_buf());
            }
        }
        files.sort();
        Ok(files)
    }

    /// Remove the directory now, reporting failure instead of ignoring it.
    pub fn close(self) -> Result<(), NodekitError> {
        let path = self.path().to_path_buf();
        self.dir.close().map_err(|e| {
            NodekitError::environment(
                format!("failed to remove staging directory {}", path.display()),
                e,
            )
        })
    }
}

fn create_dir(path: &Path) -> Result<(), NodekitError> {
    fs::create_dir_all(path)
        .map_err(|e| NodekitError::environment(format!("failed to create {}", path.display()), e))
}

fn walk_error(root: &Path, e: walkdir::Error) -> NodekitError {
    let message = format!("failed to walk {}", root.display());
    match e.into_io_error() {
        Some(io) => NodekitError::environment(message, io),
        None => NodekitError::Internal(format!("{message}: filesystem loop")),
    }
}

// SPDX-FileCopyrightText: 2026 Nodekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Writing `.nodepkg` archives (gzip-compressed tar).
//!
//! Entries are relative to the staging root with no wrapper directory.
//! Headers are written in deterministic mode, so identical staged trees
//! produce identical bytes.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use nodekit_core::NodekitError;
use tar::HeaderMode;

/// Archive `files` (relative to `root`) into `dest` and return its size.
///
/// The archive is written to a temporary sibling of `dest` and renamed into
/// place, so `dest` is either the complete new archive or untouched.
pub fn write_package(root: &Path, files: &[PathBuf], dest: &Path) -> Result<u64, NodekitError> {
    let parent = dest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let tmp = tempfile::Builder::new()
        .prefix(".nodepkg-")
        .suffix(".partial")
        .tempfile_in(parent)
        .map_err(|e| {
            NodekitError::environment(format!("failed to create {}", parent.display()), e)
        })?;

    {
        let encoder = GzEncoder::new(BufWriter::new(tmp.as_file()), Compression::default());
        let mut builder = tar::Builder::new(encoder);
        builder.mode(HeaderMode::Deterministic);
        builder.follow_symlinks(false);

        for relative in files {
            builder
                .append_path_with_name(root.join(relative), relative)
                .map_err(|e| {
                    NodekitError::environment(format!("failed to archive {}", relative.display()), e)
                })?;
        }

        let encoder = builder
            .into_inner()
            .map_err(|e| NodekitError::environment("failed to finish tar stream", e))?;
        let mut writer = encoder
            .finish()
            .map_err(|e| NodekitError::environment("failed to finish gzip stream", e))?;
        writer
            .flush()
            .map_err(|e| NodekitError::environment("failed to flush package", e))?;
    }

    tmp.as_file()
        .sync_all()
        .map_err(|e| NodekitError::environment("failed to sync package", e))?;
    tmp.persist(dest).map_err(|e| {
        NodekitError::environment(format!("failed to write {}", dest.display()), e.error)
    })?;

    let size = fs::metadata(dest)
        .map_err(|e| NodekitError::environment(format!("failed to stat {}", dest.display()), e))?
        .len();
    tracing::debug!(path = %dest.display(), size, entries = files.len(), "wrote package");
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::list_entries;

    fn stage_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("dist")).unwrap();
        fs::write(dir.path().join("dist/index.js"), "exports.run = () => 1;").unwrap();
        fs::write(dir.path().join("plugin.manifest.json"), "{}").unwrap();
        dir
    }

    fn files() -> Vec<PathBuf> {
        vec![
            PathBuf::from("dist/index.js"),
            PathBuf::from("plugin.manifest.json"),
        ]
    }

    #[test]
    fn entries_are_relative_without_wrapper() {
        let stage = stage_tree();
        let out = tempfile::tempdir().unwrap();
        let dest = out.path().join("x-1.0.0.nodepkg");

        let size = write_package(stage.path(), &files(), &dest).unwrap();
        assert!(size > 0);
        assert_eq!(
            list_entries(&dest).unwrap(),
            vec!["dist/index.js", "plugin.manifest.json"]
        );
    }

    #[test]
    fn identical_trees_give_identical_bytes() {
        let stage = stage_tree();
        let out = tempfile::tempdir().unwrap();
        let first = out.path().join("a.nodepkg");
        let second = out.path().join("b.nodepkg");

        write_package(stage.path(), &files(), &first).unwrap();
        write_package(stage.path(), &files(), &second).unwrap();
        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    }

    #[test]
    fn failed_write_leaves_no_partial_file() {
        let stage = stage_tree();
        let out = tempfile::tempdir().unwrap();
        let dest = out.path().join("broken.nodepkg");
        let missing = vec![PathBuf::from("does-not-exist.js")];

        assert!(write_package(stage.path(), &missing, &dest).is_err());
        assert!(!dest.exists());
        assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
    }
}

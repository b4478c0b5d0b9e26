// SPDX-FileCopyrightText: 2026 Nodekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reading built packages back: listing, extraction and manifest access.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use nodekit_core::NodekitError;
use nodekit_plugin::{
    ExecutionContext, ExecutionResult, PluginManifest, PluginNode, parse_manifest,
};
use serde_json::{Map, Value};
use tar::Archive;

use crate::naming::PACKAGE_EXTENSION;

fn open(package: &Path) -> Result<Archive<GzDecoder<File>>, NodekitError> {
    let file = File::open(package).map_err(|e| {
        NodekitError::environment(format!("failed to open package {}", package.display()), e)
    })?;
    Ok(Archive::new(GzDecoder::new(file)))
}

fn read_error(package: &Path, e: std::io::Error) -> NodekitError {
    NodekitError::environment(format!("failed to read package {}", package.display()), e)
}

/// Paths of the regular files in a package, in archive order.
pub fn list_entries(package: &Path) -> Result<Vec<String>, NodekitError> {
    let mut archive = open(package)?;
    let mut names = Vec::new();
    for entry in archive.entries().map_err(|e| read_error(package, e))? {
        let entry = entry.map_err(|e| read_error(package, e))?;
        if entry.header().entry_type().is_file() {
            let path = entry.path().map_err(|e| read_error(package, e))?;
            names.push(path.to_string_lossy().replace('\\', "/"));
        }
    }
    Ok(names)
}

/// Raw bytes of one entry, or `None` when the package has no such file.
pub fn read_entry(package: &Path, name: &str) -> Result<Option<Vec<u8>>, NodekitError> {
    let mut archive = open(package)?;
    for entry in archive.entries().map_err(|e| read_error(package, e))? {
        let mut entry = entry.map_err(|e| read_error(package, e))?;
        let matches = entry
            .path()
            .map_err(|e| read_error(package, e))?
            .to_string_lossy()
            == name;
        if matches {
            let mut bytes = Vec::new();
            entry
                .read_to_end(&mut bytes)
                .map_err(|e| read_error(package, e))?;
            return Ok(Some(bytes));
        }
    }
    Ok(None)
}

/// Parse and validate the manifest stored in a package.
pub fn read_manifest(package: &Path, manifest_file: &str) -> Result<PluginManifest, NodekitError> {
    let bytes = read_entry(package, manifest_file)?.ok_or_else(|| {
        NodekitError::MissingArtifact(format!(
            "package {} has no {manifest_file}",
            package.display()
        ))
    })?;
    let text = String::from_utf8(bytes).map_err(|e| {
        NodekitError::MalformedInput(format!("{manifest_file} is not UTF-8: {e}"))
    })?;
    parse_manifest(&text)
}

/// Unpack a package into `dest`, creating it if needed.
pub fn extract(package: &Path, dest: &Path) -> Result<(), NodekitError> {
    fs::create_dir_all(dest).map_err(|e| {
        NodekitError::environment(format!("failed to create {}", dest.display()), e)
    })?;
    open(package)?
        .unpack(dest)
        .map_err(|e| read_error(package, e))
}

/// A plugin loaded from a package file.
#[derive(Debug, Clone)]
pub struct PackagedPlugin {
    manifest: PluginManifest,
    path: PathBuf,
}

impl PackagedPlugin {
    pub fn open(package: &Path, manifest_file: &str) -> Result<Self, NodekitError> {
        Ok(Self {
            manifest: read_manifest(package, manifest_file)?,
            path: package.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PluginNode for PackagedPlugin {
    fn manifest(&self) -> &PluginManifest {
        &self.manifest
    }

    /// A package is catalog data; its compiled code runs in the host, so an
    /// in-process execution always reports failure.
    fn execute(
        &mut self,
        _inputs: &Map<String, Value>,
        ctx: &ExecutionContext,
    ) -> Result<ExecutionResult, NodekitError> {
        tracing::debug!(
            node_type = %self.manifest.node_type,
            node_id = %ctx.node_id,
            "execute called on packaged plugin"
        );
        Ok(ExecutionResult::failure(format!(
            "plugin `{}` is packaged at {} and runs in the host, not in-process",
            self.manifest.node_type,
            self.path.display()
        )))
    }
}

/// Load every `.nodepkg` directly inside `dir`, in file name order.
///
/// Packages that cannot be read are skipped with a warning.
pub fn load_packages(dir: &Path, manifest_file: &str) -> Result<Vec<PackagedPlugin>, NodekitError> {
    let read_dir = fs::read_dir(dir).map_err(|e| {
        NodekitError::environment(format!("failed to list {}", dir.display()), e)
    })?;

    let mut paths: Vec<PathBuf> = read_dir
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == PACKAGE_EXTENSION))
        .collect();
    paths.sort();

    let mut plugins = Vec::with_capacity(paths.len());
    for path in paths {
        match PackagedPlugin::open(&path, manifest_file) {
            Ok(plugin) => plugins.push(plugin),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping unreadable package"),
        }
    }
    Ok(plugins)
}

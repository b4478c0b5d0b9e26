// SPDX-FileCopyrightText: 2026 Nodekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Whole-project checks for a plugin source tree.
//!
//! Unlike manifest validation, project checks distinguish errors (the project
//! cannot be built or installed) from warnings (recommended files absent).

use std::path::Path;

use nodekit_config::model::ProjectConfig;
use nodekit_core::NodekitError;
use serde::Serialize;

use crate::manifest::{load_descriptor, read_manifest_document};
use crate::validate::validate_document;

/// Well-known file names inside a plugin project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub manifest_file: String,
    pub descriptor_file: String,
    pub registry_file: String,
    pub entry_file: String,
    /// Package the descriptor must depend on.
    pub sdk_package: String,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self::from_config(&ProjectConfig::default())
    }
}

impl ProjectLayout {
    pub fn from_config(config: &ProjectConfig) -> Self {
        Self {
            manifest_file: config.manifest_file.clone(),
            descriptor_file: config.descriptor_file.clone(),
            registry_file: config.registry_file.clone(),
            entry_file: config.entry_file.clone(),
            sdk_package: config.sdk_package.clone(),
        }
    }
}

const RECOMMENDED: [&str; 3] = ["tsconfig.json", ".gitignore", "tests/"];

/// Result of [`check_project`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ProjectReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check a plugin project directory for completeness.
///
/// Only a missing directory is an `Err`; every other problem lands in the
/// report.
pub fn check_project(dir: &Path, layout: &ProjectLayout) -> Result<ProjectReport, NodekitError> {
    if !dir.is_dir() {
        return Err(NodekitError::MissingArtifact(format!(
            "Plugin directory not found: {}",
            dir.display()
        )));
    }

    let mut report = ProjectReport::default();

    for file in [
        layout.descriptor_file.as_str(),
        layout.manifest_file.as_str(),
        layout.registry_file.as_str(),
        layout.entry_file.as_str(),
        "README.md",
    ] {
        if !dir.join(file).is_file() {
            report.errors.push(format!("Missing required file: {file}"));
        }
    }

    for file in RECOMMENDED {
        if !dir.join(file).exists() {
            report
                .warnings
                .push(format!("Recommended file missing: {file}"));
        }
    }

    let descriptor_path = dir.join(&layout.descriptor_file);
    if descriptor_path.is_file() {
        check_descriptor(&descriptor_path, layout, &mut report);
    }

    let manifest_path = dir.join(&layout.manifest_file);
    if manifest_path.is_file() {
        match read_manifest_document(&manifest_path).and_then(|doc| validate_document(&doc)) {
            Ok(validation) => report.errors.extend(
                validation
                    .errors
                    .into_iter()
                    .map(|e| format!("manifest: {e}")),
            ),
            Err(e) => report.errors.push(format!("manifest: {e}")),
        }
    }

    tracing::debug!(
        dir = %dir.display(),
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "project check complete"
    );
    Ok(report)
}

fn check_descriptor(path: &Path, layout: &ProjectLayout, report: &mut ProjectReport) {
    let descriptor = match load_descriptor(path) {
        Ok(descriptor) => descriptor,
        Err(e) => {
            report.errors.push(e.to_string());
            return;
        }
    };

    match descriptor.dependency(&layout.sdk_package) {
        None => report.errors.push(format!(
            "Missing {} dependency in {}",
            layout.sdk_package, layout.descriptor_file
        )),
        Some(requirement) => {
            if semver::VersionReq::parse(requirement).is_err() {
                report.warnings.push(format!(
                    "{} requirement `{requirement}` is not a valid semver range",
                    layout.sdk_package
                ));
            }
        }
    }
}

// SPDX-FileCopyrightText: 2026 Nodekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `nodekit validate` command implementation.
//!
//! Runs the project checks and prints every error and warning. Exits with
//! an error when at least one check failed; warnings alone do not fail.

use std::path::Path;

use nodekit_config::NodekitConfig;
use nodekit_core::NodekitError;
use nodekit_plugin::{ProjectLayout, check_project};

use crate::output::Printer;

pub fn run_validate(
    config: &NodekitConfig,
    printer: &Printer,
    dir: &Path,
) -> Result<(), NodekitError> {
    let layout = ProjectLayout::from_config(&config.project);
    let report = check_project(dir, &layout)?;

    printer.heading(&format!("Validating {}", dir.display()));
    for error in &report.errors {
        printer.fail(error);
    }
    for warning in &report.warnings {
        printer.warn(warning);
    }

    if report.is_ok() {
        printer.ok(format!(
            "plugin is valid ({} warning{})",
            report.warnings.len(),
            if report.warnings.len() == 1 { "" } else { "s" }
        ));
        Ok(())
    } else {
        Err(NodekitError::Validation {
            errors: report.errors,
        })
    }
}

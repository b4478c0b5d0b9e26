// SPDX-FileCopyrightText: 2026 Nodekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `nodekit inspect` command implementation.

use std::path::Path;

use nodekit_build::{list_entries, read_manifest};
use nodekit_config::NodekitConfig;
use nodekit_core::NodekitError;

use crate::output::{Printer, format_size};

pub fn run_inspect(
    config: &NodekitConfig,
    printer: &Printer,
    package: &Path,
) -> Result<(), NodekitError> {
    let manifest = read_manifest(package, &config.project.manifest_file)?;
    let entries = list_entries(package)?;
    let size = std::fs::metadata(package)
        .map(|m| m.len())
        .map_err(|e| NodekitError::environment(format!("failed to stat {}", package.display()), e))?;

    printer.heading(&format!("{} {}", manifest.name, manifest.version));
    printer.detail(format!("display name: {}", manifest.display_name));
    printer.detail(format!("node type:    {}", manifest.node_type));
    printer.detail(format!("category:     {}", manifest.category));
    printer.detail(format!("author:       {}", manifest.author));
    printer.detail(format!(
        "ports:        {} input, {} output",
        manifest.input_ports().len(),
        manifest.output_ports().len()
    ));
    if !manifest.tags.is_empty() {
        printer.detail(format!("tags:         {}", manifest.tags.join(", ")));
    }
    printer.detail(format!("size:         {}", format_size(size)));
    printer.detail(format!("files ({}):", entries.len()));
    for entry in &entries {
        printer.detail(format!("  {entry}"));
    }
    Ok(())
}

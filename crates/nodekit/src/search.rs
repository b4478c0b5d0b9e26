// SPDX-FileCopyrightText: 2026 Nodekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `nodekit search` command implementation.
//!
//! Loads every package in a directory into a registry and queries it.

use std::path::Path;

use nodekit_build::load_packages;
use nodekit_config::NodekitConfig;
use nodekit_core::{NodeCategory, NodekitError};
use nodekit_plugin::{PluginManifest, PluginRegistry};

use crate::output::Printer;

pub fn run_search(
    config: &NodekitConfig,
    printer: &Printer,
    dir: &Path,
    query: &str,
    category: Option<NodeCategory>,
    popular: bool,
) -> Result<(), NodekitError> {
    let mut registry = PluginRegistry::new();
    for plugin in load_packages(dir, &config.project.manifest_file)? {
        registry.register_plugin(&plugin)?;
    }

    let results = filter(&registry, query, category, popular);
    if results.is_empty() {
        printer.warn(format!("no plugins match `{query}` in {}", dir.display()));
        return Ok(());
    }

    printer.heading(&format!(
        "{} of {} plugin(s)",
        results.len(),
        registry.len()
    ));
    for manifest in results {
        printer.ok(format!(
            "{} ({}) {}",
            manifest.display_name, manifest.node_type, manifest.version
        ));
        printer.detail(&manifest.description);
    }
    Ok(())
}

fn filter<'a>(
    registry: &'a PluginRegistry,
    query: &str,
    category: Option<NodeCategory>,
    popular: bool,
) -> Vec<&'a PluginManifest> {
    registry
        .search(query)
        .into_iter()
        .filter(|m| category.is_none_or(|c| m.category == c))
        .filter(|m| !popular || m.is_popular)
        .collect()
}

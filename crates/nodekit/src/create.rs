// SPDX-FileCopyrightText: 2026 Nodekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `nodekit create` command implementation.

use std::path::PathBuf;

use nodekit_config::NodekitConfig;
use nodekit_core::{NodeCategory, NodekitError};
use nodekit_plugin::{ProjectLayout, ScaffoldOptions, sanitize_plugin_name, scaffold_plugin};

use crate::output::Printer;

pub struct CreateArgs {
    pub name: String,
    pub author: String,
    pub description: String,
    pub category: NodeCategory,
    pub output: PathBuf,
    pub scope: String,
    pub with_tests: bool,
}

pub fn run_create(
    config: &NodekitConfig,
    printer: &Printer,
    args: CreateArgs,
) -> Result<(), NodekitError> {
    let name = sanitize_plugin_name(&args.name);
    if name != args.name {
        printer.detail(format!("using plugin name `{name}`"));
    }

    let options = ScaffoldOptions {
        name,
        author: args.author,
        description: args.description,
        category: args.category,
        output_dir: args.output,
        scope: args.scope.trim_start_matches('@').to_string(),
        include_tests: args.with_tests,
    };
    let dir = scaffold_plugin(&options, &ProjectLayout::from_config(&config.project))?;

    printer.ok(format!("Plugin `{}` created", options.name));
    printer.detail(format!("location: {}", dir.display()));
    printer.detail("next: npm install && nodekit build");
    Ok(())
}

// SPDX-FileCopyrightText: 2026 Nodekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin manifests, their validation, and the in-memory plugin registry.
//!
//! A plugin is described by a `plugin.manifest.json` document: identity,
//! category, and port topology. This crate parses and validates those
//! documents, indexes them in a [`PluginRegistry`] keyed by node type, checks
//! whole plugin projects, and scaffolds new ones.

pub mod execution;
pub mod lifecycle;
pub mod manifest;
pub mod node;
pub mod project;
pub mod registry;
pub mod scaffold;
pub mod validate;

pub use execution::{ExecutionContext, ExecutionResult};
pub use lifecycle::PluginNode;
pub use manifest::{
    PluginManifest, PortDefinition, ProjectDescriptor, load_descriptor, load_manifest,
    parse_manifest,
};
pub use node::NodeRegistryItem;
pub use project::{ProjectLayout, ProjectReport, check_project};
pub use registry::PluginRegistry;
pub use scaffold::{ScaffoldOptions, sanitize_plugin_name, scaffold_plugin};
pub use validate::{ValidationReport, validate, validate_document};

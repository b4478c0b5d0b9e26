// SPDX-FileCopyrightText: 2026 Nodekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Build and package pipeline for nodekit plugins.
//!
//! [`BuildPipeline`] compiles a plugin project through a [`Compiler`],
//! validates its manifest, stages the distributable files and writes a
//! `<name>-<version>.nodepkg` archive. The [`package`] module reads such
//! archives back.

pub mod archive;
pub mod compiler;
pub mod naming;
pub mod package;
pub mod pipeline;
pub mod staging;

pub use compiler::{CommandCompiler, CompileOutput, Compiler};
pub use naming::{PACKAGE_EXTENSION, package_file_name, sanitize_name};
pub use package::{PackagedPlugin, extract, list_entries, load_packages, read_manifest};
pub use pipeline::{BuildArtifact, BuildOptions, BuildOutcome, BuildPipeline, BuildStage};

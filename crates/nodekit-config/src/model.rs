// SPDX-FileCopyrightText: 2026 Nodekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the nodekit plugin SDK.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level nodekit configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NodekitConfig {
    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,

    /// Build/package pipeline switches.
    #[serde(default)]
    pub build: BuildConfig,

    /// External compiler invocation.
    #[serde(default)]
    pub compiler: CompilerConfig,

    /// Plugin project layout (well-known file names).
    #[serde(default)]
    pub project: ProjectConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Build/package pipeline configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Keep the previous compiler output directory instead of deleting it.
    #[serde(default)]
    pub skip_clean: bool,

    /// Stop after compiling; do not create a package.
    #[serde(default)]
    pub compile_only: bool,

    /// Compiler output directory, relative to the project root.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Directory the package is written to. `None` means the project root.
    #[serde(default)]
    pub package_dir: Option<String>,

    /// Parent directory for per-build staging directories.
    /// `None` means the system temp directory.
    #[serde(default)]
    pub staging_dir: Option<String>,

    /// Number of package entries shown in the build report.
    #[serde(default = "default_report_limit")]
    pub report_limit: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            skip_clean: false,
            compile_only: false,
            output_dir: default_output_dir(),
            package_dir: None,
            staging_dir: None,
            report_limit: default_report_limit(),
        }
    }
}

fn default_output_dir() -> String {
    "dist".to_string()
}

fn default_report_limit() -> usize {
    10
}

/// External compiler configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CompilerConfig {
    /// Program to execute.
    #[serde(default = "default_compiler_program")]
    pub program: String,

    /// Arguments passed to the program.
    #[serde(default = "default_compiler_args")]
    pub args: Vec<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            program: default_compiler_program(),
            args: default_compiler_args(),
        }
    }
}

fn default_compiler_program() -> String {
    "npx".to_string()
}

fn default_compiler_args() -> Vec<String> {
    vec!["tsc".to_string()]
}

/// Well-known file names inside a plugin project.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Manifest file name.
    #[serde(default = "default_manifest_file")]
    pub manifest_file: String,

    /// Project descriptor file name (fallback name/version source).
    #[serde(default = "default_descriptor_file")]
    pub descriptor_file: String,

    /// Registry descriptor file name.
    #[serde(default = "default_registry_file")]
    pub registry_file: String,

    /// Source entry point, relative to the project root.
    #[serde(default = "default_entry_file")]
    pub entry_file: String,

    /// Package name of the SDK that plugin projects must depend on.
    #[serde(default = "default_sdk_package")]
    pub sdk_package: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            manifest_file: default_manifest_file(),
            descriptor_file: default_descriptor_file(),
            registry_file: default_registry_file(),
            entry_file: default_entry_file(),
            sdk_package: default_sdk_package(),
        }
    }
}

fn default_manifest_file() -> String {
    "plugin.manifest.json".to_string()
}

fn default_descriptor_file() -> String {
    "package.json".to_string()
}

fn default_registry_file() -> String {
    "plugin.registry.json".to_string()
}

fn default_entry_file() -> String {
    "src/index.ts".to_string()
}

fn default_sdk_package() -> String {
    "@nodekit/sdk".to_string()
}

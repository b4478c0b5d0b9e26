// SPDX-FileCopyrightText: 2026 Nodekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./nodekit.toml` > `~/.config/nodekit/nodekit.toml` > `/etc/nodekit/nodekit.toml`
//! with environment variable overrides via `NODEKIT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::NodekitConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/nodekit/nodekit.toml`
/// 3. `~/.config/nodekit/nodekit.toml`
/// 4. `./nodekit.toml`
/// 5. `NODEKIT_*` environment variables
pub fn load_config() -> Result<NodekitConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string layered over the defaults only.
pub fn load_config_from_str(toml_content: &str) -> Result<NodekitConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(NodekitConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<NodekitConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(NodekitConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(NodekitConfig::default()))
        .merge(Toml::file("/etc/nodekit/nodekit.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("nodekit/nodekit.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("nodekit.toml"))
        .merge(env_provider())
}

/// Environment provider mapping `NODEKIT_<SECTION>_<KEY>` to `section.key`.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `NODEKIT_BUILD_SKIP_CLEAN` is `build.skip_clean`.
fn env_provider() -> Env {
    Env::prefixed("NODEKIT_").map(|key| {
        let mapped = key
            .as_str()
            .replacen("log_", "log.", 1)
            .replacen("build_", "build.", 1)
            .replacen("compiler_", "compiler.", 1)
            .replacen("project_", "project.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_map_to_sections() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("NODEKIT_BUILD_SKIP_CLEAN", "true");
            jail.set_env("NODEKIT_COMPILER_PROGRAM", "tsc");
            jail.set_env("NODEKIT_PROJECT_MANIFEST_FILE", "manifest.json");
            let config = load_config_from_path(Path::new("missing.toml"))?;
            assert!(config.build.skip_clean);
            assert_eq!(config.compiler.program, "tsc");
            assert_eq!(config.project.manifest_file, "manifest.json");
            Ok(())
        });
    }

    #[test]
    fn local_file_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "nodekit.toml",
                r#"
[build]
output_dir = "out"
report_limit = 3
"#,
            )?;
            let config = load_config()?;
            assert_eq!(config.build.output_dir, "out");
            assert_eq!(config.build.report_limit, 3);
            assert_eq!(config.compiler.args, vec!["tsc"]);
            Ok(())
        });
    }
}

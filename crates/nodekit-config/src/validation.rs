// SPDX-FileCopyrightText: 2026 Nodekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use std::path::{Component, Path};

use crate::diagnostic::ConfigError;
use crate::model::NodekitConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every violation instead of failing fast.
pub fn validate_config(config: &NodekitConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.log.level.to_ascii_lowercase().as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log.level `{}` is not one of: {}",
                config.log.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.compiler.program.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "compiler.program must not be empty".to_string(),
        });
    }

    if config.build.output_dir.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "build.output_dir must not be empty".to_string(),
        });
    } else if !is_contained_dir(&config.build.output_dir) {
        errors.push(ConfigError::Validation {
            message: format!(
                "build.output_dir `{}` must be a relative path inside the project root",
                config.build.output_dir
            ),
        });
    }

    if config.build.report_limit == 0 {
        errors.push(ConfigError::Validation {
            message: "build.report_limit must be at least 1".to_string(),
        });
    }

    let project = &config.project;
    for (key, value) in [
        ("project.manifest_file", &project.manifest_file),
        ("project.descriptor_file", &project.descriptor_file),
        ("project.registry_file", &project.registry_file),
        ("project.entry_file", &project.entry_file),
    ] {
        if value.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("{key} must not be empty"),
            });
        } else if is_nested(key, value) {
            errors.push(ConfigError::Validation {
                message: format!("{key} `{value}` must be a top-level file name"),
            });
        }
    }

    if project.manifest_file == project.descriptor_file {
        errors.push(ConfigError::Validation {
            message: "project.manifest_file and project.descriptor_file must differ".to_string(),
        });
    }

    if project.sdk_package.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "project.sdk_package must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// True when `dir` names a subdirectory: only plain components, no `.`,
/// `..` or root.
pub fn is_contained_dir(dir: &str) -> bool {
    let mut components = Path::new(dir).components().peekable();
    components.peek().is_some() && components.all(|c| matches!(c, Component::Normal(_)))
}

/// Metadata files are packaged from the project root, so they cannot live in
/// subdirectories. The entry file is a source path and may.
fn is_nested(key: &str, value: &str) -> bool {
    key != "project.entry_file" && (value.contains('/') || value.contains('\\'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(config: &NodekitConfig) -> Vec<String> {
        validate_config(config)
            .unwrap_err()
            .into_iter()
            .map(|e| e.to_string())
            .collect()
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&NodekitConfig::default()).is_ok());
    }

    #[test]
    fn unknown_log_level_fails() {
        let mut config = NodekitConfig::default();
        config.log.level = "verbose".to_string();
        assert!(messages(&config)[0].contains("log.level"));
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = NodekitConfig::default();
        config.compiler.program = " ".to_string();
        config.build.report_limit = 0;
        config.project.registry_file = "meta/plugin.registry.json".to_string();
        let msgs = messages(&config);
        assert_eq!(msgs.len(), 3);
        assert!(msgs[0].contains("compiler.program"));
        assert!(msgs[1].contains("report_limit"));
        assert!(msgs[2].contains("top-level"));
    }

    #[test]
    fn absolute_output_dir_fails() {
        let mut config = NodekitConfig::default();
        config.build.output_dir = "/tmp/dist".to_string();
        assert!(messages(&config)[0].contains("relative"));
    }

    #[test]
    fn output_dir_must_stay_below_project_root() {
        for dir in [".", "./", "..", "../elsewhere", "dist/../.."] {
            let mut config = NodekitConfig::default();
            config.build.output_dir = dir.to_string();
            let msgs = messages(&config);
            assert_eq!(msgs.len(), 1, "{dir}");
            assert!(msgs[0].contains("inside the project root"), "{dir}");
        }
    }

    #[test]
    fn nested_output_dir_is_accepted() {
        let mut config = NodekitConfig::default();
        config.build.output_dir = "build/dist".to_string();
        assert!(validate_config(&config).is_ok());
        assert!(is_contained_dir("dist"));
        assert!(!is_contained_dir(""));
    }

    #[test]
    fn nested_entry_file_is_allowed() {
        let mut config = NodekitConfig::default();
        config.project.entry_file = "src/plugin/main.ts".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn identical_manifest_and_descriptor_fail() {
        let mut config = NodekitConfig::default();
        config.project.descriptor_file = config.project.manifest_file.clone();
        assert!(messages(&config)[0].contains("must differ"));
    }
}

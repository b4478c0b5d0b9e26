// SPDX-FileCopyrightText: 2026 Nodekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the nodekit plugin SDK.

use thiserror::Error;

/// The primary error type used across manifest validation, the build
/// pipeline, the registry and the CLI.
#[derive(Debug, Error)]
pub enum NodekitError {
    /// A manifest failed one or more structural invariants.
    #[error("manifest validation failed: {}", .errors.join("; "))]
    Validation { errors: Vec<String> },

    /// The input document has a shape that cannot be inspected at all
    /// (not an object, `ports` not a list, ...).
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The external compiler exited unsuccessfully. `diagnostics` is the
    /// captured compiler output, unmodified.
    #[error("compilation failed ({}):\n{diagnostics}", describe_status(.status))]
    CompileFailure {
        status: Option<i32>,
        diagnostics: String,
    },

    /// A required file, the staged file set, or the final archive is absent.
    #[error("{0}")]
    MissingArtifact(String),

    /// Filesystem or process environment failure.
    #[error("{message}: {source}")]
    Environment {
        message: String,
        source: std::io::Error,
    },

    /// A call argument is structurally invalid (e.g. blank registry key).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Project scaffolding failed.
    #[error("scaffold error: {message}")]
    Scaffold {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl NodekitError {
    /// Wraps an I/O error with a description of what was being attempted.
    pub fn environment(message: impl Into<String>, source: std::io::Error) -> Self {
        NodekitError::Environment {
            message: message.into(),
            source,
        }
    }
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_lists_every_message() {
        let err = NodekitError::Validation {
            errors: vec!["Plugin name is required".into(), "Author is required".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("Plugin name is required"));
        assert!(msg.contains("Author is required"));
    }

    #[test]
    fn compile_failure_preserves_diagnostics_verbatim() {
        let diagnostics = "src/index.ts(3,1): error TS1005: ';' expected.\n";
        let err = NodekitError::CompileFailure {
            status: Some(2),
            diagnostics: diagnostics.to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("exit code 2"));
        assert!(msg.ends_with(diagnostics));
    }

    #[test]
    fn environment_error_attaches_cause() {
        let err = NodekitError::environment(
            "failed to remove dist",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "failed to remove dist: denied");
        assert!(std::error::Error::source(&err).is_some());
    }
}

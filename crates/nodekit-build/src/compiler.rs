// SPDX-FileCopyrightText: 2026 Nodekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The compile step, behind a trait so tests can substitute it.

use std::path::Path;
use std::process::Command;

use nodekit_config::model::CompilerConfig;
use nodekit_core::NodekitError;

/// Exit status and captured output of one compiler run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOutput {
    /// Exit code, or `None` when the process was killed by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CompileOutput {
    /// A successful run with no output.
    pub fn success() -> Self {
        Self {
            status: Some(0),
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.status == Some(0)
    }

    /// stdout followed by stderr, unmodified.
    pub fn diagnostics(&self) -> String {
        match (self.stdout.is_empty(), self.stderr.is_empty()) {
            (_, true) => self.stdout.clone(),
            (true, false) => self.stderr.clone(),
            (false, false) => format!("{}\n{}", self.stdout, self.stderr),
        }
    }
}

/// Turns a plugin source tree into compiled output.
pub trait Compiler {
    /// Compile the project rooted at `project_dir`, blocking until done.
    ///
    /// A compiler that ran and failed returns `Ok` with a non-zero status;
    /// `Err` is reserved for failing to run it at all.
    fn compile(&self, project_dir: &Path) -> Result<CompileOutput, NodekitError>;

    /// Short human-readable description for logs.
    fn describe(&self) -> String {
        "compiler".to_string()
    }
}

/// Runs an external program (by default `npx tsc`) in the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandCompiler {
    program: String,
    args: Vec<String>,
}

impl CommandCompiler {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &CompilerConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone())
    }
}

impl Compiler for CommandCompiler {
    fn compile(&self, project_dir: &Path) -> Result<CompileOutput, NodekitError> {
        tracing::debug!(
            program = %self.program,
            args = ?self.args,
            dir = %project_dir.display(),
            "spawning compiler"
        );
        let output = Command::new(&self.program)
            .args(&self.args)
            .current_dir(project_dir)
            .output()
            .map_err(|e| {
                NodekitError::environment(format!("failed to run `{}`", self.describe()), e)
            })?;

        Ok(CompileOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn describe(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

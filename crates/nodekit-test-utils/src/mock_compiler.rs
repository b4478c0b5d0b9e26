// SPDX-FileCopyrightText: 2026 Nodekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock compiler for deterministic pipeline tests.
//!
//! `MockCompiler` implements `Compiler` without spawning anything: on success
//! it writes pre-configured files into the project's output directory, on
//! failure it returns the configured status and diagnostics.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use nodekit_build::{CompileOutput, Compiler};
use nodekit_core::NodekitError;

pub struct MockCompiler {
    output_dir: String,
    files: Vec<(String, String)>,
    failure: Option<CompileOutput>,
    calls: AtomicUsize,
}

impl MockCompiler {
    /// A compiler that emits `dist/index.js`.
    pub fn new() -> Self {
        Self {
            output_dir: "dist".to_string(),
            files: vec![(
                "index.js".to_string(),
                "\"use strict\";\nexports.default = class Node {};\n".to_string(),
            )],
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// A compiler that exits with `status` and prints `stderr`.
    pub fn failing(status: i32, stderr: &str) -> Self {
        Self {
            failure: Some(CompileOutput {
                status: Some(status),
                stdout: String::new(),
                stderr: stderr.to_string(),
            }),
            ..Self::new()
        }
    }

    /// Also emit `relative` (inside the output directory) with `content`.
    pub fn with_file(mut self, relative: &str, content: &str) -> Self {
        self.files.push((relative.to_string(), content.to_string()));
        self
    }

    /// Emit nothing at all.
    pub fn without_output(mut self) -> Self {
        self.files.clear();
        self
    }

    /// Write into a different output directory than `dist`.
    pub fn with_output_dir(mut self, dir: &str) -> Self {
        self.output_dir = dir.to_string();
        self
    }

    /// How many times `compile` ran.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler for MockCompiler {
    fn compile(&self, project_dir: &Path) -> Result<CompileOutput, NodekitError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(failure) = &self.failure {
            return Ok(failure.clone());
        }

        let out = project_dir.join(&self.output_dir);
        for (relative, content) in &self.files {
            let path = out.join(relative);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| NodekitError::environment("mock compiler mkdir", e))?;
            }
            std::fs::write(&path, content)
                .map_err(|e| NodekitError::environment("mock compiler write", e))?;
        }

        Ok(CompileOutput {
            stdout: format!("compiled {} file(s)", self.files.len()),
            ..CompileOutput::success()
        })
    }

    fn describe(&self) -> String {
        "mock-compiler".to_string()
    }
}

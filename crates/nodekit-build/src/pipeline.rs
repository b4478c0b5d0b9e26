// SPDX-FileCopyrightText: 2026 Nodekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The build/package pipeline.
//!
//! Stages run strictly in order and the first failure halts the build:
//!
//! ```text
//! Clean -> Compile -> VerifyRequiredFiles -> ValidateManifest -> StageFiles
//!       -> NamePackage -> Archive -> VerifyArtifact -> Report
//! ```
//!
//! The staging directory is owned by the run and removed on every exit path.
//! The package is renamed into place only once fully written.

use std::fs;
use std::path::{Path, PathBuf};

use nodekit_config::NodekitConfig;
use nodekit_config::validation::is_contained_dir;
use nodekit_core::NodekitError;
use nodekit_plugin::ProjectLayout;
use nodekit_plugin::manifest::{load_descriptor, manifest_from_document, read_manifest_document};
use strum::Display;

use crate::archive::write_package;
use crate::compiler::Compiler;
use crate::naming::resolve_package_name;
use crate::package::list_entries;
use crate::staging::StagingArea;

/// Optional project files copied into the package when present.
const OPTIONAL_FILES: [&str; 3] = ["README.md", "icon.svg", "icon.png"];

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum BuildStage {
    Clean,
    Compile,
    VerifyRequiredFiles,
    ValidateManifest,
    StageFiles,
    NamePackage,
    Archive,
    VerifyArtifact,
    Report,
}

/// Switches controlling one build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Keep the previous compiler output instead of deleting it first.
    pub skip_clean: bool,
    /// Stop after a successful compile.
    pub compile_only: bool,
    /// Compiler output directory, relative to the project root.
    pub output_dir: String,
    /// Where the package is written. Defaults to the project root; relative
    /// paths are resolved against it.
    pub package_dir: Option<PathBuf>,
    /// Parent of the staging directory. Defaults to the system temp dir.
    pub staging_root: Option<PathBuf>,
    /// How many archived files the report lists before summarising.
    pub report_limit: usize,
    pub layout: ProjectLayout,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self::from_config(&NodekitConfig::default())
    }
}

impl BuildOptions {
    pub fn from_config(config: &NodekitConfig) -> Self {
        Self {
            skip_clean: config.build.skip_clean,
            compile_only: config.build.compile_only,
            output_dir: config.build.output_dir.clone(),
            package_dir: config.build.package_dir.as_ref().map(PathBuf::from),
            staging_root: config.build.staging_dir.as_ref().map(PathBuf::from),
            report_limit: config.build.report_limit,
            layout: ProjectLayout::from_config(&config.project),
        }
    }
}

/// A package produced by a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildArtifact {
    /// File name, `<sanitized-name>-<version>.nodepkg`.
    pub package_name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
    /// Archived files in archive order.
    pub files: Vec<String>,
}

impl BuildArtifact {
    /// The first `limit` files and how many were left out.
    pub fn preview(&self, limit: usize) -> (&[String], usize) {
        let shown = limit.min(self.files.len());
        (&self.files[..shown], self.files.len() - shown)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    Packaged(BuildArtifact),
    /// `compile_only` run; nothing was packaged.
    Compiled { output_dir: PathBuf },
}

type StageObserver<'a> = Box<dyn Fn(BuildStage) + 'a>;

/// Turns a plugin project into a package.
pub struct BuildPipeline<'a> {
    compiler: &'a dyn Compiler,
    options: BuildOptions,
    observer: Option<StageObserver<'a>>,
}

impl<'a> BuildPipeline<'a> {
    pub fn new(compiler: &'a dyn Compiler, options: BuildOptions) -> Self {
        Self {
            compiler,
            options,
            observer: None,
        }
    }

    /// Call `observer` as each stage begins.
    pub fn on_stage(mut self, observer: impl Fn(BuildStage) + 'a) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Run every stage against `project_dir`.
    pub fn run(&self, project_dir: &Path) -> Result<BuildOutcome, NodekitError> {
        let mut stage = BuildStage::Clean;
        let result = self.run_stages(project_dir, &mut stage);
        match &result {
            Ok(BuildOutcome::Packaged(artifact)) => tracing::info!(
                package = %artifact.package_name,
                size_bytes = artifact.size_bytes,
                files = artifact.files.len(),
                "build complete"
            ),
            Ok(BuildOutcome::Compiled { output_dir }) => {
                tracing::info!(output = %output_dir.display(), "compile complete")
            }
            Err(e) => tracing::error!(stage = %stage, error = %e, "build failed"),
        }
        result
    }

    fn enter(&self, current: &mut BuildStage, next: BuildStage) {
        *current = next;
        tracing::debug!(stage = %next, "entering stage");
        if let Some(observer) = &self.observer {
            observer(next);
        }
    }

    fn run_stages(
        &self,
        project_dir: &Path,
        stage: &mut BuildStage,
    ) -> Result<BuildOutcome, NodekitError> {
        let options = &self.options;
        let layout = &options.layout;
        if !is_contained_dir(&options.output_dir) {
            return Err(NodekitError::InvalidArgument(format!(
                "output directory `{}` must be a relative path inside the project",
                options.output_dir
            )));
        }
        let output_dir = project_dir.join(&options.output_dir);

        self.enter(stage, BuildStage::Clean);
        if options.skip_clean {
            tracing::debug!("clean skipped");
        } else if output_dir.exists() {
            fs::remove_dir_all(&output_dir).map_err(|e| {
                NodekitError::environment(format!("failed to clean {}", output_dir.display()), e)
            })?;
        }

        self.enter(stage, BuildStage::Compile);
        tracing::info!(compiler = %self.compiler.describe(), "compiling");
        let compiled = self.compiler.compile(project_dir)?;
        if !compiled.succeeded() {
            return Err(NodekitError::CompileFailure {
                status: compiled.status,
                diagnostics: compiled.diagnostics(),
            });
        }
        if options.compile_only {
            return Ok(BuildOutcome::Compiled { output_dir });
        }

        self.enter(stage, BuildStage::VerifyRequiredFiles);
        let manifest_path = project_dir.join(&layout.manifest_file);
        let descriptor_path = project_dir.join(&layout.descriptor_file);
        for (path, name) in [
            (&manifest_path, &layout.manifest_file),
            (&descriptor_path, &layout.descriptor_file),
        ] {
            if !path.is_file() {
                return Err(NodekitError::MissingArtifact(format!(
                    "Required file missing: {name}"
                )));
            }
        }

        self.enter(stage, BuildStage::ValidateManifest);
        let manifest = manifest_from_document(read_manifest_document(&manifest_path)?)?;
        let descriptor = load_descriptor(&descriptor_path)?;

        self.enter(stage, BuildStage::StageFiles);
        let staging = StagingArea::create(options.staging_root.as_deref())?;
        if output_dir.is_dir() {
            let copied = staging.copy_tree(&output_dir, &options.output_dir)?;
            tracing::debug!(copied, "staged compiler output");
        } else {
            tracing::warn!(dir = %output_dir.display(), "compiler produced no output directory");
        }
        let allow_list = [
            layout.descriptor_file.as_str(),
            layout.manifest_file.as_str(),
            layout.registry_file.as_str(),
        ]
        .into_iter()
        .chain(OPTIONAL_FILES);
        for name in allow_list {
            staging.copy_file(&project_dir.join(name), name)?;
        }
        let files = staging.files()?;
        if files.is_empty() {
            return Err(NodekitError::MissingArtifact(format!(
                "No files to package in {}",
                project_dir.display()
            )));
        }

        self.enter(stage, BuildStage::NamePackage);
        let package_name = resolve_package_name(&manifest, Some(&descriptor));
        let package_dir = match &options.package_dir {
            Some(dir) => project_dir.join(dir),
            None => project_dir.to_path_buf(),
        };
        fs::create_dir_all(&package_dir).map_err(|e| {
            NodekitError::environment(format!("failed to create {}", package_dir.display()), e)
        })?;
        let package_path = package_dir.join(&package_name);

        self.enter(stage, BuildStage::Archive);
        let size_bytes = write_package(staging.path(), &files, &package_path)?;
        staging.close()?;

        self.enter(stage, BuildStage::VerifyArtifact);
        if size_bytes == 0 || !package_path.is_file() {
            return Err(NodekitError::MissingArtifact(format!(
                "Failed to create package: {}",
                package_path.display()
            )));
        }

        self.enter(stage, BuildStage::Report);
        let artifact = BuildArtifact {
            files: list_entries(&package_path)?,
            package_name,
            path: package_path,
            size_bytes,
        };
        let (shown, remaining) = artifact.preview(options.report_limit);
        for file in shown {
            tracing::debug!(file = %file, "packaged");
        }
        if remaining > 0 {
            tracing::debug!(remaining, "more files packaged");
        }
        Ok(BuildOutcome::Packaged(artifact))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::CompileOutput;
    use std::cell::RefCell;
    use tracing_test::traced_test;

    struct ExitCode(i32);

    impl Compiler for ExitCode {
        fn compile(&self, _project_dir: &Path) -> Result<CompileOutput, NodekitError> {
            Ok(CompileOutput {
                status: Some(self.0),
                stdout: String::new(),
                stderr: "error TS2304: Cannot find name 'foo'.".to_string(),
            })
        }
    }

    #[test]
    fn preview_splits_at_limit() {
        let artifact = BuildArtifact {
            package_name: "x-1.0.0.nodepkg".to_string(),
            path: PathBuf::from("x-1.0.0.nodepkg"),
            size_bytes: 10,
            files: (0..12).map(|i| format!("dist/{i}.js")).collect(),
        };
        let (shown, remaining) = artifact.preview(10);
        assert_eq!(shown.len(), 10);
        assert_eq!(remaining, 2);
        assert_eq!(artifact.preview(50).1, 0);
    }

    #[test]
    fn stage_names_are_snake_case() {
        assert_eq!(BuildStage::VerifyRequiredFiles.to_string(), "verify_required_files");
    }

    #[test]
    #[traced_test]
    fn compile_failure_halts_and_logs_stage() {
        let project = tempfile::tempdir().unwrap();
        let seen = RefCell::new(Vec::new());
        let compiler = ExitCode(2);
        let pipeline = BuildPipeline::new(&compiler, BuildOptions::default())
            .on_stage(|stage| seen.borrow_mut().push(stage));

        match pipeline.run(project.path()).unwrap_err() {
            NodekitError::CompileFailure {
                status,
                diagnostics,
            } => {
                assert_eq!(status, Some(2));
                assert_eq!(diagnostics, "error TS2304: Cannot find name 'foo'.");
            }
            other => panic!("expected CompileFailure, got {other:?}"),
        }
        assert_eq!(*seen.borrow(), vec![BuildStage::Clean, BuildStage::Compile]);
        assert!(logs_contain("build failed"));
        assert!(logs_contain("compile"));
    }

    #[test]
    fn output_dir_outside_project_is_rejected_before_clean() {
        let project = tempfile::tempdir().unwrap();
        std::fs::write(project.path().join("plugin.manifest.json"), "{}").unwrap();
        std::fs::create_dir_all(project.path().join("src")).unwrap();
        std::fs::write(project.path().join("src/index.ts"), "").unwrap();

        for dir in [".", "..", "../elsewhere", ""] {
            let seen = RefCell::new(Vec::new());
            let compiler = ExitCode(0);
            let options = BuildOptions {
                output_dir: dir.to_string(),
                ..BuildOptions::default()
            };
            let err = BuildPipeline::new(&compiler, options)
                .on_stage(|stage| seen.borrow_mut().push(stage))
                .run(project.path())
                .unwrap_err();
            assert!(matches!(err, NodekitError::InvalidArgument(_)), "{dir}: {err:?}");
            assert!(seen.borrow().is_empty(), "{dir}");
        }
        assert!(project.path().join("plugin.manifest.json").is_file());
        assert!(project.path().join("src/index.ts").is_file());
    }

    #[test]
    fn clean_removes_previous_output() {
        let project = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(project.path().join("dist")).unwrap();
        std::fs::write(project.path().join("dist/stale.js"), "old").unwrap();

        let compiler = ExitCode(1);
        let _ = BuildPipeline::new(&compiler, BuildOptions::default()).run(project.path());
        assert!(!project.path().join("dist").exists());
    }
}

// SPDX-FileCopyrightText: 2026 Nodekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `nodekit build` command implementation.

use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use nodekit_build::{BuildOptions, BuildOutcome, BuildPipeline, CommandCompiler};
use nodekit_config::NodekitConfig;
use nodekit_core::NodekitError;

use crate::output::{Printer, format_size};

pub struct BuildArgs {
    pub skip_clean: bool,
    pub compile_only: bool,
    pub out: Option<PathBuf>,
}

pub fn run_build(
    config: &NodekitConfig,
    printer: &Printer,
    dir: &Path,
    args: BuildArgs,
) -> Result<(), NodekitError> {
    let mut options = BuildOptions::from_config(config);
    options.skip_clean |= args.skip_clean;
    options.compile_only |= args.compile_only;
    if let Some(out) = args.out {
        options.package_dir = Some(out);
    }
    let report_limit = options.report_limit;

    let compiler = CommandCompiler::from_config(&config.compiler);
    let spinner = stage_spinner(printer);
    let outcome = BuildPipeline::new(&compiler, options)
        .on_stage(|stage| spinner.set_message(stage.to_string()))
        .run(dir);
    spinner.finish_and_clear();

    match outcome? {
        BuildOutcome::Compiled { output_dir } => {
            printer.ok("Compiled (packaging skipped)");
            printer.detail(format!("output: {}", output_dir.display()));
        }
        BuildOutcome::Packaged(artifact) => {
            printer.ok(format!("Built {}", artifact.package_name));
            printer.detail(format!("path: {}", artifact.path.display()));
            printer.detail(format!("size: {}", format_size(artifact.size_bytes)));
            printer.detail(format!("files ({}):", artifact.files.len()));
            let (shown, remaining) = artifact.preview(report_limit);
            for file in shown {
                printer.detail(format!("  {file}"));
            }
            if remaining > 0 {
                printer.detail(format!("  ... and {remaining} more"));
            }
        }
    }
    Ok(())
}

fn stage_spinner(printer: &Printer) -> ProgressBar {
    if !printer.color() {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

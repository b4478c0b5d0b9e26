// SPDX-FileCopyrightText: 2026 Nodekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! nodekit - create, validate and package automation plugins.
//!
//! This is the binary entry point for the nodekit CLI.

mod build;
mod create;
mod inspect;
mod output;
mod search;
mod validate;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nodekit_core::NodeCategory;

use crate::output::Printer;

/// nodekit - create, validate and package automation plugins.
#[derive(Parser, Debug)]
#[command(name = "nodekit", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Scaffold a new plugin project.
    Create {
        /// Plugin name; free text is turned into a lowercase hyphenated name.
        name: String,
        #[arg(long, default_value = "Anonymous")]
        author: String,
        #[arg(long, default_value = "A nodekit plugin")]
        description: String,
        #[arg(long, default_value = "action")]
        category: NodeCategory,
        /// Parent directory; the project lands in `<output>/<category>/<name>`.
        #[arg(long, short, default_value = ".")]
        output: PathBuf,
        /// npm scope for the package name, without the `@`.
        #[arg(long, default_value = "nodekit")]
        scope: String,
        /// Also generate a starter test suite.
        #[arg(long)]
        with_tests: bool,
    },
    /// Check a plugin project for errors and warnings.
    Validate {
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// Compile a plugin project and package it.
    Build {
        #[arg(default_value = ".")]
        dir: PathBuf,
        /// Keep the previous compiler output.
        #[arg(long)]
        skip_clean: bool,
        /// Compile without packaging.
        #[arg(long)]
        compile_only: bool,
        /// Directory to write the package to.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Show the manifest and contents of a package.
    Inspect { package: PathBuf },
    /// Search the packages in a directory.
    Search {
        /// Matched against display name, description and tags.
        #[arg(default_value = "")]
        query: String,
        /// Directory holding `.nodepkg` files.
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        #[arg(long)]
        category: Option<NodeCategory>,
        /// Only list packages flagged as popular.
        #[arg(long)]
        popular: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => nodekit_config::load_and_validate_path(path),
        None => nodekit_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            nodekit_config::render_errors(&errors);
            std::process::exit(2);
        }
    };

    init_tracing(&config.log.level);
    let printer = Printer::new(cli.plain);

    let result = match cli.command {
        Commands::Create {
            name,
            author,
            description,
            category,
            output,
            scope,
            with_tests,
        } => create::run_create(
            &config,
            &printer,
            create::CreateArgs {
                name,
                author,
                description,
                category,
                output,
                scope,
                with_tests,
            },
        ),
        Commands::Validate { dir } => validate::run_validate(&config, &printer, &dir),
        Commands::Build {
            dir,
            skip_clean,
            compile_only,
            out,
        } => build::run_build(
            &config,
            &printer,
            &dir,
            build::BuildArgs {
                skip_clean,
                compile_only,
                out,
            },
        ),
        Commands::Inspect { package } => inspect::run_inspect(&config, &printer, &package),
        Commands::Search {
            query,
            dir,
            category,
            popular,
        } => search::run_search(&config, &printer, &dir, &query, category, popular),
    };

    if let Err(e) = result {
        printer.error(&e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so command output stays pipeable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("nodekit={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

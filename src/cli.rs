use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Dependency graph analysis for JavaScript/TypeScript projects.
///
/// dep-tracer extracts imports and exports from every source file, resolves
/// them into a file/package graph, and reports circular imports, central
/// files, and isolated files.
#[derive(Parser, Debug)]
#[command(
    name = "dep-tracer",
    version,
    about,
    long_about = None,
    propagate_version = true,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the dependency graph and report cycles, central files, and isolated files.
    Analyze {
        /// Path to the project root to analyze.
        path: PathBuf,

        /// Output results as JSON instead of human-readable text.
        #[arg(long)]
        json: bool,

        /// Number of central files to report (overrides `top_central` in dep-tracer.toml).
        #[arg(long)]
        top: Option<usize>,

        /// Entry point for the active-file trace, relative to the project root.
        /// Repeatable; overrides `entry_points` in dep-tracer.toml.
        #[arg(long = "entry", value_name = "FILE")]
        entries: Vec<PathBuf>,

        /// Enable debug logging on stderr.
        #[arg(short, long)]
        verbose: bool,

        /// Only log errors.
        #[arg(short, long, conflicts_with = "verbose")]
        quiet: bool,
    },

    /// Print the dependency graph as `{nodes, edges}` JSON.
    Graph {
        /// Path to the project root to scan.
        path: PathBuf,

        /// Enable debug logging on stderr.
        #[arg(short, long)]
        verbose: bool,

        /// Only log errors.
        #[arg(short, long, conflicts_with = "verbose")]
        quiet: bool,
    },
}

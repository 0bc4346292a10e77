use std::time::Instant;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use path_clean::PathClean;

use dep_tracer::cli::{Cli, Commands};
use dep_tracer::config::DepTracerConfig;
use dep_tracer::export::export_graph;
use dep_tracer::logging::init_logger;
use dep_tracer::output::{AnalysisOutput, RunSummary, print_analysis, print_json};
use dep_tracer::pipeline;
use dep_tracer::query::{AnalysisOptions, default_entry_point};
use dep_tracer::source::SourceFile;
use dep_tracer::walker::load_sources;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            json,
            top,
            entries,
            verbose,
            quiet,
        } => {
            init_logger(verbose, quiet);
            let start = Instant::now();
            let root = path
                .canonicalize()
                .with_context(|| format!("cannot open project root {}", path.display()))?;
            let config = DepTracerConfig::load(&root);
            let loaded = load_sources(&root, &config)?;
            let entry_points = select_entry_points(&root, &entries, &config, &loaded.sources);

            let options = AnalysisOptions {
                top_central: top.unwrap_or(config.top_central),
                entry_points,
            };
            let run = pipeline::run(loaded.sources, &options);

            let summary = RunSummary {
                file_count: run.graph.file_count(),
                package_count: run.graph.package_count(),
                edge_count: run.graph.edge_count(),
                unresolved_imports: run.gaps.len(),
                skipped: loaded.skipped.len(),
                failed: run.failures.len(),
                elapsed_secs: start.elapsed().as_secs_f64(),
            };
            let output = AnalysisOutput {
                summary: &summary,
                report: &run.report,
                gaps: &run.gaps,
                failures: &run.failures,
                skipped: &loaded.skipped,
            };
            print_analysis(&root, &output, json);
        }
        Commands::Graph {
            path,
            verbose,
            quiet,
        } => {
            init_logger(verbose, quiet);
            let root = path
                .canonicalize()
                .with_context(|| format!("cannot open project root {}", path.display()))?;
            let config = DepTracerConfig::load(&root);
            let loaded = load_sources(&root, &config)?;
            let options = AnalysisOptions {
                top_central: config.top_central,
                ..AnalysisOptions::default()
            };
            let run = pipeline::run(loaded.sources, &options);
            print_json(&export_graph(&run.graph));
        }
    }

    Ok(())
}

/// Entry points for the active-file trace: `--entry` flags, else the config's
/// `entry_points`, else the first conventional entry file that was scanned.
fn select_entry_points(
    root: &Path,
    flags: &[PathBuf],
    config: &DepTracerConfig,
    sources: &[SourceFile],
) -> Vec<PathBuf> {
    let requested: Vec<PathBuf> = if !flags.is_empty() {
        flags.to_vec()
    } else {
        config.entry_points.iter().map(PathBuf::from).collect()
    };
    if !requested.is_empty() {
        return requested.iter().map(|p| root.join(p).clean()).collect();
    }

    match default_entry_point(root, sources.iter().map(|s| s.path.as_path())) {
        Some(entry) => {
            tracing::debug!("using entry point {}", entry.display());
            vec![entry]
        }
        None => Vec::new(),
    }
}

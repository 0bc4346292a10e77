use std::path::Path;

use serde::Serialize;

use crate::graph::builder::ResolutionGap;
use crate::pipeline::ExtractFailure;
use crate::query::AnalysisReport;
use crate::walker::SkippedFile;

/// Aggregate statistics produced by an analysis run.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub file_count: usize,
    pub package_count: usize,
    /// Per-binding import edges, file and package targets.
    pub edge_count: usize,
    /// Path imports that matched no scanned file.
    pub unresolved_imports: usize,
    /// Files that could not be read.
    pub skipped: usize,
    /// Files that were read but produced no records.
    pub failed: usize,
    /// Wall-clock time for the run in seconds.
    pub elapsed_secs: f64,
}

/// Everything `analyze` reports: the counts, the analysis, and the
/// best-effort problem lists behind the counts.
#[derive(Serialize)]
pub struct AnalysisOutput<'a> {
    pub summary: &'a RunSummary,
    pub report: &'a AnalysisReport,
    /// Path imports that matched no scanned file.
    pub gaps: &'a [ResolutionGap],
    /// Files read but not extracted.
    pub failures: &'a [ExtractFailure],
    /// Files that could not be read.
    pub skipped: &'a [SkippedFile],
}

/// Print the output of an `analyze` run.
///
/// - `json = true`: one pretty-printed object on stdout.
/// - `json = false`: a cargo-style summary followed by the report sections,
///   paths shown relative to `root`.
///
/// Skipped and failed counts are written to **stderr** so that stdout stays
/// clean for downstream consumers.
pub fn print_analysis(root: &Path, output: &AnalysisOutput<'_>, json: bool) {
    if json {
        print_json(output);
        return;
    }

    let summary = output.summary;
    let report = output.report;

    println!(
        "Analyzed {} files in {:.2}s",
        summary.file_count, summary.elapsed_secs
    );
    println!(
        "  {} import edges, {} packages, {} unresolved",
        summary.edge_count, summary.package_count, summary.unresolved_imports
    );
    if summary.skipped > 0 || summary.failed > 0 {
        eprintln!(
            "  {} files skipped (unreadable), {} files without records",
            summary.skipped, summary.failed
        );
    }

    for gap in output.gaps {
        println!(
            "  unresolved: {} in {}",
            gap.specifier,
            relative(root, &gap.file)
        );
    }

    println!();
    println!("Circular dependencies: {}", report.cycles.len());
    for cycle in &report.cycles {
        let chain: Vec<String> = cycle.iter().map(|p| relative(root, p)).collect();
        println!("  {}", chain.join(" -> "));
    }

    println!();
    println!("Central files:");
    for entry in &report.central {
        println!("  {:>6.1}  {}", entry.score, relative(root, &entry.file));
    }

    println!();
    println!("Isolated files: {}", report.isolated.len());
    for entry in &report.isolated {
        println!(
            "  {:>6.1}  {}  ({})",
            entry.connections,
            relative(root, &entry.file),
            entry.reason.as_str()
        );
    }

    if let Some(activity) = &report.activity {
        let entries: Vec<String> = activity.entry_points.iter().map(|p| relative(root, p)).collect();
        println!();
        println!(
            "Active files: {} (from {})",
            activity.active.len(),
            entries.join(", ")
        );
        println!("Inactive files: {}", activity.inactive.len());
        for file in &activity.inactive {
            println!("  {}", relative(root, file));
        }
        for missing in &activity.missing_entry_points {
            eprintln!("  entry point not found: {}", relative(root, missing));
        }
    }
}

/// Print any serializable value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("error serialising output: {e}"),
    }
}

fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

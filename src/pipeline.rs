use std::collections::BTreeMap;
use std::path::PathBuf;

use rayon::prelude::*;
use serde::Serialize;

use crate::graph::DependencyGraph;
use crate::graph::builder::{ResolutionGap, build};
use crate::parser::{Extraction, try_extract};
use crate::query::{AnalysisOptions, AnalysisReport, analyze};
use crate::source::SourceFile;

/// A file that stayed in the graph but yielded no records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractFailure {
    pub file: PathBuf,
    pub reason: String,
}

/// Everything one run produces.
pub struct AnalysisRun {
    pub graph: DependencyGraph,
    pub report: AnalysisReport,
    pub gaps: Vec<ResolutionGap>,
    pub failures: Vec<ExtractFailure>,
}

/// Extract every file in parallel, then build and analyze the graph.
///
/// Extraction is the only parallel phase. Results are gathered into a map
/// sorted by path before building, so the outcome does not depend on thread
/// scheduling or on the order of `sources`.
pub fn run(sources: Vec<SourceFile>, options: &AnalysisOptions) -> AnalysisRun {
    let extracted: Vec<(PathBuf, Result<Extraction, String>)> = sources
        .into_par_iter()
        .map(|source| {
            let result = try_extract(&source.path, &source.text).map_err(|e| e.to_string());
            (source.path, result)
        })
        .collect();

    let mut per_file: BTreeMap<PathBuf, Extraction> = BTreeMap::new();
    let mut failures = Vec::new();
    for (path, result) in extracted {
        let extraction = match result {
            Ok(extraction) => extraction,
            Err(reason) => {
                tracing::warn!(file = %path.display(), "{reason}");
                failures.push(ExtractFailure {
                    file: path.clone(),
                    reason,
                });
                Extraction::default()
            }
        };
        per_file.insert(path, extraction);
    }
    failures.sort_by(|a, b| a.file.cmp(&b.file));

    let built = build(&per_file);
    let report = analyze(&built.graph, options);
    tracing::debug!(
        files = built.graph.file_count(),
        packages = built.graph.package_count(),
        edges = built.graph.edge_count(),
        gaps = built.gaps.len(),
        "graph built"
    );

    AnalysisRun {
        graph: built.graph,
        report,
        gaps: built.gaps,
        failures,
    }
}

pub mod active;
pub mod central;
pub mod circular;
pub mod isolated;

use std::path::PathBuf;

use serde::Serialize;

use crate::graph::DependencyGraph;

pub use active::{ActivityReport, active_files, default_entry_point};
pub use central::{CentralFile, central_files};
pub use circular::find_cycles;
pub use isolated::{IsolatedFile, IsolationReason, isolated_files};

/// Number of central files reported when no limit is configured.
pub const DEFAULT_TOP_CENTRAL: usize = 10;

/// Knobs for one analysis pass. Passed in, never stored on the graph.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub top_central: usize,
    /// Roots of the active-file trace. Empty skips the trace.
    pub entry_points: Vec<PathBuf>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            top_central: DEFAULT_TOP_CENTRAL,
            entry_points: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub cycles: Vec<Vec<PathBuf>>,
    pub central: Vec<CentralFile>,
    pub isolated: Vec<IsolatedFile>,
    /// Present only when entry points were given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<ActivityReport>,
}

/// Run cycle detection, centrality and isolation over a built graph, plus the
/// active-file trace when `options.entry_points` is non-empty.
///
/// Package nodes take no part: every query reads the file-level adjacency
/// only.
pub fn analyze(graph: &DependencyGraph, options: &AnalysisOptions) -> AnalysisReport {
    AnalysisReport {
        cycles: find_cycles(&graph.direct),
        central: central_files(&graph.direct, &graph.indirect, options.top_central),
        isolated: isolated_files(&graph.direct, &graph.indirect),
        activity: (!options.entry_points.is_empty())
            .then(|| active_files(&graph.direct, &options.entry_points)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::build;
    use crate::parser::extract;
    use std::collections::BTreeMap;
    use std::path::Path;

    fn graph_of(files: &[(&str, &str)]) -> DependencyGraph {
        let per_file: BTreeMap<_, _> = files
            .iter()
            .map(|(path, text)| (PathBuf::from(path), extract(Path::new(path), text)))
            .collect();
        build(&per_file).graph
    }

    #[test]
    fn test_two_file_project() {
        let graph = graph_of(&[
            ("/p/a.js", "import { x } from './b';"),
            ("/p/b.js", "export const x = 1;"),
        ]);
        let report = analyze(&graph, &AnalysisOptions::default());
        assert!(report.cycles.is_empty());
        assert_eq!(
            report.central,
            vec![CentralFile {
                file: "/p/b.js".into(),
                score: 1.0
            }]
        );
        assert_eq!(report.isolated.len(), 2);
        assert!(
            report
                .isolated
                .iter()
                .all(|i| i.reason == IsolationReason::FewConnections)
        );
    }

    #[test]
    fn test_mutual_import_reports_cycle() {
        let graph = graph_of(&[
            ("/p/a.js", "import b from './b';\nexport default 1;"),
            ("/p/b.js", "import a from './a';\nexport default 2;"),
        ]);
        let report = analyze(&graph, &AnalysisOptions::default());
        assert_eq!(
            report.cycles,
            vec![vec![
                PathBuf::from("/p/a.js"),
                PathBuf::from("/p/b.js"),
                PathBuf::from("/p/a.js")
            ]]
        );
    }

    #[test]
    fn test_shared_utility_is_most_central() {
        let mut files: Vec<(String, String)> = (0..10)
            .map(|i| {
                (
                    format!("/p/pages/page{i}.js"),
                    "import { fmt } from '../util';\nimport React from 'react';".to_string(),
                )
            })
            .collect();
        files.push(("/p/util.js".into(), "export function fmt() {}".into()));
        let borrowed: Vec<(&str, &str)> =
            files.iter().map(|(p, t)| (p.as_str(), t.as_str())).collect();

        let graph = graph_of(&borrowed);
        let report = analyze(&graph, &AnalysisOptions::default());
        assert_eq!(report.central[0].file, PathBuf::from("/p/util.js"));
        assert_eq!(report.central[0].score, 10.0);
        assert!(
            report.central.iter().all(|c| c.file != PathBuf::from("react")),
            "packages never rank"
        );
    }

    #[test]
    fn test_top_central_is_honoured() {
        let graph = graph_of(&[
            ("/p/a.js", "import './b';\nimport './c';\nimport './d';"),
            ("/p/b.js", ""),
            ("/p/c.js", ""),
            ("/p/d.js", ""),
        ]);
        let options = AnalysisOptions {
            top_central: 2,
            ..AnalysisOptions::default()
        };
        let report = analyze(&graph, &options);
        assert_eq!(report.central.len(), 2);
    }

    #[test]
    fn test_isolation_consistency() {
        let graph = graph_of(&[
            ("/p/main.js", "import a from './a';\nimport b from './b';\nimport c from './c';"),
            ("/p/a.js", "import b from './b';"),
            ("/p/b.js", "import c from './c';"),
            ("/p/c.js", "import a from './a';"),
        ]);
        let report = analyze(&graph, &AnalysisOptions::default());
        for file in &report.isolated {
            assert!(
                file.connections < 2.0 || file.incoming == 0.0,
                "{:?} should not be isolated",
                file.file
            );
        }
        assert!(report.isolated.iter().any(|i| i.file == PathBuf::from("/p/main.js")));
    }

    #[test]
    fn test_entry_points_enable_activity_trace() {
        let graph = graph_of(&[
            ("/p/index.js", "import App from './App';"),
            ("/p/App.js", "import { fmt } from './util';\nexport default 1;"),
            ("/p/util.js", "export const fmt = 1;"),
            ("/p/legacy.js", "import { fmt } from './util';"),
        ]);
        let without = analyze(&graph, &AnalysisOptions::default());
        assert!(without.activity.is_none());

        let options = AnalysisOptions {
            entry_points: vec![PathBuf::from("/p/index.js")],
            ..AnalysisOptions::default()
        };
        let activity = analyze(&graph, &options).activity.unwrap();
        assert_eq!(activity.active.len(), 3);
        assert_eq!(activity.inactive, vec![PathBuf::from("/p/legacy.js")]);
    }

    #[test]
    fn test_empty_graph_yields_empty_report() {
        let report = analyze(&DependencyGraph::new(), &AnalysisOptions::default());
        assert!(report.cycles.is_empty());
        assert!(report.central.is_empty());
        assert!(report.isolated.is_empty());
    }
}

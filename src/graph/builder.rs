use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

use serde::Serialize;

use crate::language::SourceLanguage;
use crate::parser::{Extraction, ImportKind};
use crate::resolver::{ResolvedTarget, resolve};

use super::DependencyGraph;
use super::edge::ImportEdge;

/// A path import that matched no scanned file. Counted, never turned into an edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionGap {
    pub file: PathBuf,
    pub specifier: String,
    pub kind: ImportKind,
}

/// The graph of one run together with the imports it could not place.
pub struct BuildOutput {
    pub graph: DependencyGraph,
    pub gaps: Vec<ResolutionGap>,
}

/// Assemble the dependency graph from every file's extraction.
///
/// The map's keys are the scanned files and double as the resolver's
/// candidate set, so building must wait until every extraction is in. Files
/// are added in key order and imports in record order, which makes the graph
/// identical across runs over the same input.
pub fn build(per_file: &BTreeMap<PathBuf, Extraction>) -> BuildOutput {
    let mut graph = DependencyGraph::new();
    let mut gaps = Vec::new();

    for path in per_file.keys() {
        graph.add_file(path.clone(), SourceLanguage::from_path(path));
    }
    let known_files: HashSet<PathBuf> = per_file.keys().cloned().collect();

    for (file, extraction) in per_file {
        for import in &extraction.imports {
            let edge = ImportEdge {
                kind: import.kind,
                specifier: import.raw_specifier.clone(),
                label: import.bound_names.join(", "),
            };

            match resolve(file, &import.raw_specifier, &known_files) {
                Some(ResolvedTarget::File(target)) => {
                    graph.add_file_import(file, &target, edge);
                    let renders_with_props = import
                        .bound_names
                        .iter()
                        .any(|name| extraction.prop_targets.contains(name));
                    if renders_with_props {
                        graph.add_indirect(file, &target);
                    }
                }
                Some(ResolvedTarget::Package(specifier)) => {
                    graph.add_package_import(file, &specifier, edge);
                }
                None => {
                    tracing::debug!(
                        file = %file.display(),
                        specifier = %import.raw_specifier,
                        "unresolved import"
                    );
                    gaps.push(ResolutionGap {
                        file: file.clone(),
                        specifier: import.raw_specifier.clone(),
                        kind: import.kind,
                    });
                }
            }
        }
    }

    BuildOutput { graph, gaps }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node::GraphNode;
    use crate::parser::extract;
    use petgraph::visit::{EdgeRef, IntoEdgeReferences};
    use std::path::Path;

    fn records(files: &[(&str, &str)]) -> BTreeMap<PathBuf, Extraction> {
        files
            .iter()
            .map(|(path, text)| (PathBuf::from(path), extract(Path::new(path), text)))
            .collect()
    }

    #[test]
    fn test_named_import_creates_labeled_edge() {
        let input = records(&[
            ("/p/a.js", "import { x } from './b';"),
            ("/p/b.js", "export const x = 1;"),
        ]);
        let out = build(&input);
        let graph = &out.graph;
        assert_eq!(graph.file_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.has_direct_edge(Path::new("/p/a.js"), Path::new("/p/b.js")));

        let e = graph.graph.edge_references().next().unwrap();
        assert_eq!(e.weight().label, "x");
        assert_eq!(e.weight().kind, ImportKind::Named);
        assert!(out.gaps.is_empty());
    }

    #[test]
    fn test_missing_relative_import_is_a_gap() {
        let input = records(&[("/p/a.js", "import thing from './missing';")]);
        let out = build(&input);
        assert_eq!(out.graph.edge_count(), 0);
        assert_eq!(
            out.gaps,
            vec![ResolutionGap {
                file: "/p/a.js".into(),
                specifier: "./missing".into(),
                kind: ImportKind::Default,
            }]
        );
        assert_eq!(out.graph.graph.node_count(), 1, "no node fabricated for the gap");
    }

    #[test]
    fn test_package_shared_by_three_files() {
        let input = records(&[
            ("/p/a.js", "import _ from 'lodash';"),
            ("/p/b.js", "const _ = require('lodash');"),
            ("/p/c.js", "import { map } from 'lodash';"),
        ]);
        let out = build(&input);
        let graph = &out.graph;
        assert_eq!(graph.package_count(), 1);
        let pkg = graph.package_index["lodash"];
        assert_eq!(
            graph.graph.edges_directed(pkg, petgraph::Direction::Incoming).count(),
            3
        );
        assert!(matches!(&graph.graph[pkg], GraphNode::Package(p) if p.specifier == "lodash"));
        assert_eq!(graph.packages.len(), 1);
        assert_eq!(graph.package_edges.len(), 3);
    }

    #[test]
    fn test_no_dangling_file_edges() {
        let input = records(&[
            ("/p/a.js", "import b from './b';\nimport c from './c';\nimport d from '../outside/d';"),
            ("/p/b.js", "import a from './a';"),
        ]);
        let out = build(&input);
        let graph = &out.graph;
        for e in graph.graph.edge_references() {
            if let GraphNode::File(f) = &graph.graph[e.target()] {
                assert!(input.contains_key(&f.path), "edge to unscanned {:?}", f.path);
            }
        }
        assert_eq!(out.gaps.len(), 2);
    }

    #[test]
    fn test_prop_flow_creates_indirect_edge() {
        let input = records(&[
            (
                "/p/Page.jsx",
                "import Chart from './Chart';\nimport Title from './Title';\n\
                 export default () => <div><Title /><Chart rows={rows} /></div>;",
            ),
            ("/p/Chart.jsx", "export default () => null;"),
            ("/p/Title.jsx", "export default () => null;"),
        ]);
        let out = build(&input);
        assert_eq!(
            out.graph.indirect.get(Path::new("/p/Page.jsx")),
            Some(&vec![PathBuf::from("/p/Chart.jsx")])
        );
    }

    #[test]
    fn test_namespace_member_tag_creates_indirect_edge() {
        let input = records(&[
            (
                "/p/Page.jsx",
                "import * as UI from './ui';\nexport default () => <UI.Card data={x} />;",
            ),
            ("/p/ui.js", "export const Card = () => null;"),
        ]);
        let out = build(&input);
        assert_eq!(
            out.graph.indirect.get(Path::new("/p/Page.jsx")),
            Some(&vec![PathBuf::from("/p/ui.js")])
        );
    }

    #[test]
    fn test_index_resolution_through_builder() {
        let input = records(&[
            ("/p/app.ts", "import { Button } from './components';"),
            ("/p/components/index.ts", "export const Button = 1;"),
        ]);
        let out = build(&input);
        assert!(out.graph.has_direct_edge(
            Path::new("/p/app.ts"),
            Path::new("/p/components/index.ts")
        ));
    }
}

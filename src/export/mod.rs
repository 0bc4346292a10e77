pub mod model;

use petgraph::visit::{EdgeRef, IntoEdgeReferences};

use crate::graph::DependencyGraph;

pub use model::{EdgeExport, GraphExport, NodeExport};

/// Flatten the graph into `{nodes, edges}` lists.
///
/// Nodes come out in insertion order (files in path order, then packages as
/// first imported) and edges in the order they were added, so the export of
/// the same input is byte-identical across runs.
pub fn export_graph(graph: &DependencyGraph) -> GraphExport {
    let nodes = graph
        .graph
        .node_indices()
        .map(|idx| {
            let node = &graph.graph[idx];
            NodeExport {
                id: node.id(),
                node_type: node.type_name(),
                name: node.name(),
            }
        })
        .collect();

    let edges = graph
        .graph
        .edge_references()
        .map(|e| EdgeExport {
            source: graph.graph[e.source()].id(),
            target: graph.graph[e.target()].id(),
            edge_type: e.weight().kind.as_str(),
            label: e.weight().label.clone(),
        })
        .collect();

    GraphExport { nodes, edges }
}

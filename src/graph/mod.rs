pub mod builder;
pub mod edge;
pub mod node;

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use petgraph::Directed;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};

use crate::language::SourceLanguage;
use crate::resolver::package_name;

use edge::ImportEdge;
use node::{FileInfo, GraphNode, PackageInfo};

/// The dependency graph of one analysis run.
///
/// Per-binding edges live in the petgraph `StableGraph`. The adjacency maps
/// are the deduplicated file-level views the analyses read; all of them are
/// ordered so iteration never depends on hashing.
pub struct DependencyGraph {
    /// File and package nodes joined by one edge per import record.
    pub graph: StableGraph<GraphNode, ImportEdge, Directed>,
    /// Maps file paths to their node indices for O(1) lookup.
    pub file_index: HashMap<PathBuf, NodeIndex>,
    /// Maps package specifiers to their node indices.
    pub package_index: HashMap<String, NodeIndex>,
    /// File → imported files, deduplicated, in first-import order. Every scanned
    /// file has an entry, possibly empty.
    pub direct: BTreeMap<PathBuf, Vec<PathBuf>>,
    /// File → files it renders with expression props (prop-flow signal).
    pub indirect: BTreeMap<PathBuf, Vec<PathBuf>>,
    /// Every package specifier imported anywhere.
    pub packages: BTreeSet<String>,
    /// File → package specifiers it imports, deduplicated.
    pub package_edges: BTreeMap<PathBuf, Vec<String>>,
}

impl DependencyGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            graph: StableGraph::new(),
            file_index: HashMap::new(),
            package_index: HashMap::new(),
            direct: BTreeMap::new(),
            indirect: BTreeMap::new(),
            packages: BTreeSet::new(),
            package_edges: BTreeMap::new(),
        }
    }

    /// Add a file node. Returns the existing index if the path was already added.
    pub fn add_file(&mut self, path: PathBuf, language: Option<SourceLanguage>) -> NodeIndex {
        if let Some(&existing) = self.file_index.get(&path) {
            return existing;
        }
        let idx = self.graph.add_node(GraphNode::File(FileInfo {
            path: path.clone(),
            language,
        }));
        self.direct.entry(path.clone()).or_default();
        self.file_index.insert(path, idx);
        idx
    }

    /// Add a package node once per specifier. Returns the node index.
    pub fn add_package(&mut self, specifier: &str) -> NodeIndex {
        if let Some(&existing) = self.package_index.get(specifier) {
            return existing;
        }
        let idx = self.graph.add_node(GraphNode::Package(PackageInfo {
            specifier: specifier.to_owned(),
            name: package_name(specifier).to_owned(),
        }));
        self.packages.insert(specifier.to_owned());
        self.package_index.insert(specifier.to_owned(), idx);
        idx
    }

    /// Add a file → file import edge.
    ///
    /// Both files must already be nodes; otherwise nothing is added and `None`
    /// is returned, so an edge can never dangle.
    pub fn add_file_import(&mut self, from: &Path, to: &Path, edge: ImportEdge) -> Option<EdgeIndex> {
        let from_idx = *self.file_index.get(from)?;
        let to_idx = *self.file_index.get(to)?;
        let targets = self.direct.entry(from.to_path_buf()).or_default();
        if !targets.iter().any(|t| t == to) {
            targets.push(to.to_path_buf());
        }
        Some(self.graph.add_edge(from_idx, to_idx, edge))
    }

    /// Add a file → package import edge, creating the package node if needed.
    pub fn add_package_import(&mut self, from: &Path, specifier: &str, edge: ImportEdge) -> Option<EdgeIndex> {
        let from_idx = *self.file_index.get(from)?;
        let pkg_idx = self.add_package(specifier);
        let specs = self.package_edges.entry(from.to_path_buf()).or_default();
        if !specs.iter().any(|s| s == specifier) {
            specs.push(specifier.to_owned());
        }
        Some(self.graph.add_edge(from_idx, pkg_idx, edge))
    }

    /// Record a prop-flow (indirect) dependency between two scanned files.
    pub fn add_indirect(&mut self, from: &Path, to: &Path) -> bool {
        if !self.file_index.contains_key(from) || !self.file_index.contains_key(to) {
            return false;
        }
        let targets = self.indirect.entry(from.to_path_buf()).or_default();
        if targets.iter().any(|t| t == to) {
            return false;
        }
        targets.push(to.to_path_buf());
        true
    }

    /// Whether `from` directly imports `to`.
    pub fn has_direct_edge(&self, from: &Path, to: &Path) -> bool {
        self.direct
            .get(from)
            .is_some_and(|targets| targets.iter().any(|t| t == to))
    }

    /// Number of file nodes in the graph.
    pub fn file_count(&self) -> usize {
        self.file_index.len()
    }

    /// Number of package nodes in the graph.
    pub fn package_count(&self) -> usize {
        self.package_index.len()
    }

    /// Number of per-binding import edges (file and package targets).
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ImportKind;
    use petgraph::visit::EdgeRef;

    fn edge(label: &str) -> ImportEdge {
        ImportEdge {
            kind: ImportKind::Named,
            specifier: "./x".into(),
            label: label.into(),
        }
    }

    #[test]
    fn test_add_duplicate_file_returns_same_index() {
        let mut graph = DependencyGraph::new();
        let idx1 = graph.add_file(PathBuf::from("/p/app.ts"), Some(SourceLanguage::TypeScript));
        let idx2 = graph.add_file(PathBuf::from("/p/app.ts"), Some(SourceLanguage::TypeScript));
        assert_eq!(idx1, idx2, "duplicate add_file should return the same index");
        assert_eq!(graph.file_count(), 1);
        assert!(graph.direct.contains_key(Path::new("/p/app.ts")));
    }

    #[test]
    fn test_multiple_edges_same_pair_dedup_in_direct() {
        let mut graph = DependencyGraph::new();
        let a = graph.add_file(PathBuf::from("/p/a.js"), None);
        let b = graph.add_file(PathBuf::from("/p/b.js"), None);
        graph.add_file_import(Path::new("/p/a.js"), Path::new("/p/b.js"), edge("x"));
        graph.add_file_import(Path::new("/p/a.js"), Path::new("/p/b.js"), edge("y"));
        assert_eq!(graph.edge_count(), 2, "one edge per binding");
        assert_eq!(graph.graph.edges(a).filter(|e| e.target() == b).count(), 2);
        assert_eq!(graph.direct[Path::new("/p/a.js")], vec![PathBuf::from("/p/b.js")]);
    }

    #[test]
    fn test_edge_to_unknown_file_is_refused() {
        let mut graph = DependencyGraph::new();
        graph.add_file(PathBuf::from("/p/a.js"), None);
        let added = graph.add_file_import(Path::new("/p/a.js"), Path::new("/p/ghost.js"), edge("x"));
        assert!(added.is_none());
        assert_eq!(graph.edge_count(), 0);
        assert!(!graph.has_direct_edge(Path::new("/p/a.js"), Path::new("/p/ghost.js")));
    }

    #[test]
    fn test_package_node_is_shared() {
        let mut graph = DependencyGraph::new();
        graph.add_file(PathBuf::from("/p/a.js"), None);
        graph.add_file(PathBuf::from("/p/b.js"), None);
        graph.add_package_import(Path::new("/p/a.js"), "@org/ui/button", edge("Button"));
        graph.add_package_import(Path::new("/p/b.js"), "@org/ui/button", edge("Button"));
        assert_eq!(graph.package_count(), 1);
        assert_eq!(graph.edge_count(), 2);
        let idx = graph.package_index["@org/ui/button"];
        match &graph.graph[idx] {
            GraphNode::Package(p) => assert_eq!(p.name, "@org/ui"),
            other => panic!("expected package node, got {other:?}"),
        }
    }

    #[test]
    fn test_indirect_deduplicates() {
        let mut graph = DependencyGraph::new();
        graph.add_file(PathBuf::from("/p/a.js"), None);
        graph.add_file(PathBuf::from("/p/b.js"), None);
        assert!(graph.add_indirect(Path::new("/p/a.js"), Path::new("/p/b.js")));
        assert!(!graph.add_indirect(Path::new("/p/a.js"), Path::new("/p/b.js")));
        assert_eq!(graph.indirect[Path::new("/p/a.js")].len(), 1);
    }
}

use serde::Serialize;

/// Serializable snapshot of the whole dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphExport {
    pub nodes: Vec<NodeExport>,
    pub edges: Vec<EdgeExport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeExport {
    /// File path or package specifier.
    pub id: String,
    /// `"file"` or `"package"`.
    #[serde(rename = "type")]
    pub node_type: &'static str,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeExport {
    /// Id of the importing file.
    pub source: String,
    /// Id of the imported file or package.
    pub target: String,
    /// The import kind, e.g. `"named"` or `"commonjs"`.
    #[serde(rename = "type")]
    pub edge_type: &'static str,
    pub label: String,
}

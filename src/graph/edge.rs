use crate::parser::ImportKind;

/// A directed import edge from a file to a file or package node.
///
/// One edge per import record, so a pair of nodes may be joined by several
/// edges carrying different bindings.
#[derive(Debug, Clone)]
pub struct ImportEdge {
    pub kind: ImportKind,
    /// The raw specifier as written in the importing file.
    pub specifier: String,
    /// Bound names joined with `", "`; empty for side-effect and unbound imports.
    pub label: String,
}

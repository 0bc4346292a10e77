use std::path::PathBuf;

use crate::language::SourceLanguage;

/// Metadata about a scanned source file.
#[derive(Debug, Clone)]
pub struct FileInfo {
    /// Absolute path to the file; the node's identity.
    pub path: PathBuf,
    /// `None` for files with an extension the extractor does not know.
    pub language: Option<SourceLanguage>,
}

/// Metadata about an external package import.
/// Package internals are never indexed; package nodes are terminal.
#[derive(Debug, Clone)]
pub struct PackageInfo {
    /// The raw specifier as imported (e.g. `"lodash/merge"`); the node's identity.
    pub specifier: String,
    /// Canonical package name (e.g. `"lodash"`, `"@org/utils"`).
    pub name: String,
}

/// A node in the dependency graph.
#[derive(Debug, Clone)]
pub enum GraphNode {
    File(FileInfo),
    Package(PackageInfo),
}

impl GraphNode {
    /// The identity string: the file path or the package specifier.
    pub fn id(&self) -> String {
        match self {
            GraphNode::File(f) => f.path.to_string_lossy().into_owned(),
            GraphNode::Package(p) => p.specifier.clone(),
        }
    }

    /// Short display name: the file's basename or the package name.
    pub fn name(&self) -> String {
        match self {
            GraphNode::File(f) => f
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| f.path.to_string_lossy().into_owned()),
            GraphNode::Package(p) => p.name.clone(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            GraphNode::File(_) => "file",
            GraphNode::Package(_) => "package",
        }
    }
}

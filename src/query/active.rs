use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Entry points tried, in order, when none is configured. Relative to the
/// project root, without extension.
pub const DEFAULT_ENTRY_STEMS: &[&str] = &["src/index", "src/app", "src/main", "index", "app", "main"];

/// Extensions tried for each stem in [`DEFAULT_ENTRY_STEMS`].
const ENTRY_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx"];

/// Files split by whether an entry point transitively imports them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityReport {
    /// Entry points that are scanned files; the roots of the trace.
    pub entry_points: Vec<PathBuf>,
    /// Requested entry points that matched no scanned file.
    pub missing_entry_points: Vec<PathBuf>,
    /// Every file reachable from an entry point, entry points included.
    pub active: Vec<PathBuf>,
    /// Every other scanned file.
    pub inactive: Vec<PathBuf>,
}

/// Trace direct imports breadth-first from `entry_points`.
///
/// Only file → file edges are followed; packages are never part of either
/// list. Both lists are in path order.
pub fn active_files(direct: &BTreeMap<PathBuf, Vec<PathBuf>>, entry_points: &[PathBuf]) -> ActivityReport {
    let (known, missing): (Vec<&PathBuf>, Vec<&PathBuf>) =
        entry_points.iter().partition(|entry| direct.contains_key(*entry));

    let mut reached: BTreeSet<&PathBuf> = BTreeSet::new();
    let mut queue: VecDeque<&PathBuf> = VecDeque::new();
    for &entry in &known {
        if reached.insert(entry) {
            queue.push_back(entry);
        }
    }

    while let Some(file) = queue.pop_front() {
        for dep in direct.get(file).into_iter().flatten() {
            if reached.insert(dep) {
                queue.push_back(dep);
            }
        }
    }

    let inactive = direct
        .keys()
        .filter(|file| !reached.contains(file))
        .cloned()
        .collect();

    ActivityReport {
        entry_points: known.into_iter().cloned().collect(),
        missing_entry_points: missing.into_iter().cloned().collect(),
        active: reached.into_iter().cloned().collect(),
        inactive,
    }
}

/// The first conventional entry point under `root` that is among `files`.
pub fn default_entry_point<'a>(root: &Path, files: impl IntoIterator<Item = &'a Path>) -> Option<PathBuf> {
    let files: BTreeSet<&Path> = files.into_iter().collect();
    DEFAULT_ENTRY_STEMS
        .iter()
        .flat_map(|stem| {
            ENTRY_EXTENSIONS
                .iter()
                .map(move |ext| root.join(format!("{stem}.{ext}")))
        })
        .find(|candidate| files.contains(candidate.as_path()))
}

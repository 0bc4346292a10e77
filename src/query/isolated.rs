use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use serde::Serialize;

use super::central::INDIRECT_WEIGHT;

/// Why a file was flagged as isolated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IsolationReason {
    /// Fewer than two weighted connections in total.
    #[serde(rename = "few connections")]
    FewConnections,
    /// Enough connections, but nothing depends on it.
    #[serde(rename = "no dependents")]
    NoDependents,
}

impl IsolationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            IsolationReason::FewConnections => "few connections",
            IsolationReason::NoDependents => "no dependents",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IsolatedFile {
    pub file: PathBuf,
    /// `incoming + outgoing`.
    pub connections: f64,
    pub incoming: f64,
    pub outgoing: f64,
    pub reason: IsolationReason,
}

#[derive(Default)]
struct Counts {
    incoming: f64,
    outgoing: f64,
}

/// Flag files with low connectivity: total weighted connections below 2, or no
/// incoming edges at all.
///
/// Direct edges count 1 and indirect edges [`INDIRECT_WEIGHT`]. Every file that
/// appears as a key of `direct` is considered. The result is sorted by
/// `connections` ascending; equal totals keep path order.
pub fn isolated_files(
    direct: &BTreeMap<PathBuf, Vec<PathBuf>>,
    indirect: &BTreeMap<PathBuf, Vec<PathBuf>>,
) -> Vec<IsolatedFile> {
    let mut counts: HashMap<&PathBuf, Counts> =
        direct.keys().map(|file| (file, Counts::default())).collect();

    let weighted = direct
        .iter()
        .map(|(file, deps)| (file, deps, 1.0))
        .chain(indirect.iter().map(|(file, deps)| (file, deps, INDIRECT_WEIGHT)));

    for (file, deps, weight) in weighted {
        if let Some(c) = counts.get_mut(file) {
            c.outgoing += deps.len() as f64 * weight;
        }
        for dep in deps {
            if let Some(c) = counts.get_mut(dep) {
                c.incoming += weight;
            }
        }
    }

    let mut isolated: Vec<IsolatedFile> = direct
        .keys()
        .filter_map(|file| {
            let c = &counts[file];
            let total = c.incoming + c.outgoing;
            let reason = if total < 2.0 {
                IsolationReason::FewConnections
            } else if c.incoming == 0.0 {
                IsolationReason::NoDependents
            } else {
                return None;
            };
            Some(IsolatedFile {
                file: file.clone(),
                connections: total,
                incoming: c.incoming,
                outgoing: c.outgoing,
                reason,
            })
        })
        .collect();

    isolated.sort_by(|a, b| a.connections.total_cmp(&b.connections));
    isolated
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adjacency(edges: &[(&str, &[&str])]) -> BTreeMap<PathBuf, Vec<PathBuf>> {
        edges
            .iter()
            .map(|(from, tos)| (PathBuf::from(from), tos.iter().map(PathBuf::from).collect()))
            .collect()
    }

    #[test]
    fn test_two_files_both_few_connections() {
        let direct = adjacency(&[("/p/a.js", &["/p/b.js"]), ("/p/b.js", &[])]);
        let isolated = isolated_files(&direct, &BTreeMap::new());
        assert_eq!(isolated.len(), 2);

        let b = isolated.iter().find(|i| i.file == PathBuf::from("/p/b.js")).unwrap();
        assert_eq!(b.incoming, 1.0);
        assert_eq!(b.connections, 1.0);
        assert_eq!(b.reason, IsolationReason::FewConnections);
    }

    #[test]
    fn test_entry_point_has_no_dependents() {
        // main imports three modules that import each other in a ring.
        let direct = adjacency(&[
            ("/p/main.js", &["/p/x.js", "/p/y.js", "/p/z.js"]),
            ("/p/x.js", &["/p/y.js"]),
            ("/p/y.js", &["/p/z.js"]),
            ("/p/z.js", &["/p/x.js"]),
        ]);
        let isolated = isolated_files(&direct, &BTreeMap::new());
        assert_eq!(isolated.len(), 1);
        assert_eq!(isolated[0].file, PathBuf::from("/p/main.js"));
        assert_eq!(isolated[0].reason, IsolationReason::NoDependents);
        assert_eq!(isolated[0].incoming, 0.0);
        assert_eq!(isolated[0].outgoing, 3.0);
    }

    #[test]
    fn test_no_dependents_reason_implies_zero_incoming() {
        let direct = adjacency(&[
            ("/p/a.js", &["/p/b.js", "/p/c.js"]),
            ("/p/b.js", &["/p/c.js"]),
            ("/p/c.js", &[]),
            ("/p/d.js", &["/p/a.js", "/p/b.js"]),
        ]);
        let indirect = adjacency(&[("/p/d.js", &["/p/c.js"])]);
        for file in isolated_files(&direct, &indirect) {
            if file.reason == IsolationReason::NoDependents {
                assert_eq!(file.incoming, 0.0, "{:?}", file.file);
            }
        }
    }

    #[test]
    fn test_indirect_connections_are_half_weight() {
        let direct = adjacency(&[("/p/a.js", &[]), ("/p/b.js", &[])]);
        let indirect = adjacency(&[("/p/a.js", &["/p/b.js"])]);
        let isolated = isolated_files(&direct, &indirect);
        let a = isolated.iter().find(|i| i.file == PathBuf::from("/p/a.js")).unwrap();
        let b = isolated.iter().find(|i| i.file == PathBuf::from("/p/b.js")).unwrap();
        assert_eq!(a.outgoing, 0.5);
        assert_eq!(b.incoming, 0.5);
    }

    #[test]
    fn test_sorted_ascending_by_connections() {
        let direct = adjacency(&[
            ("/p/a.js", &["/p/b.js", "/p/c.js", "/p/d.js"]),
            ("/p/b.js", &[]),
            ("/p/c.js", &[]),
            ("/p/d.js", &[]),
            ("/p/lonely.js", &[]),
        ]);
        let isolated = isolated_files(&direct, &BTreeMap::new());
        let totals: Vec<f64> = isolated.iter().map(|i| i.connections).collect();
        let mut sorted = totals.clone();
        sorted.sort_by(f64::total_cmp);
        assert_eq!(totals, sorted);
        assert_eq!(isolated[0].file, PathBuf::from("/p/lonely.js"));
    }

    #[test]
    fn test_empty_graph() {
        assert!(isolated_files(&BTreeMap::new(), &BTreeMap::new()).is_empty());
    }
}

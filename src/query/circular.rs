use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

/// Detect circular imports with a depth-first search over file → file edges.
///
/// The search restarts from every unvisited file in path order. The visited
/// set is global; the recursion stack belongs to one traversal. Meeting a node
/// that is on the active stack records the path from that node's position to
/// the current node, closed by repeating the first node: `[a, b, c, a]`.
///
/// Every file that sits on some cycle shows up in at least one reported
/// cycle, but not every simple cycle is reported: once a file is visited it is
/// never entered again, so a cycle that is only reachable through an already
/// finished file is missed (`a -> [b, c]`, `b -> c`, `c -> a` yields
/// `[a, b, c, a]` only, never `[a, c, a]`). Reported cycles can share nodes
/// and are not deduplicated.
pub fn find_cycles(direct: &BTreeMap<PathBuf, Vec<PathBuf>>) -> Vec<Vec<PathBuf>> {
    let mut cycles = Vec::new();
    let mut visited: HashSet<&PathBuf> = HashSet::new();

    for root in direct.keys() {
        if visited.contains(root) {
            continue;
        }

        // Explicit stack of (node, next neighbour index) so deep import chains
        // cannot overflow the call stack.
        let mut frames: Vec<(&PathBuf, usize)> = vec![(root, 0)];
        let mut path: Vec<&PathBuf> = vec![root];
        let mut on_stack: HashSet<&PathBuf> = HashSet::from([root]);
        visited.insert(root);

        while let Some(frame) = frames.last_mut() {
            let node = frame.0;
            let neighbours = direct.get(node).map(Vec::as_slice).unwrap_or(&[]);

            let Some(next) = neighbours.get(frame.1) else {
                on_stack.remove(node);
                path.pop();
                frames.pop();
                continue;
            };
            frame.1 += 1;

            if on_stack.contains(next) {
                if let Some(start) = path.iter().position(|p| *p == next) {
                    let mut cycle: Vec<PathBuf> = path[start..].iter().map(|p| (*p).clone()).collect();
                    cycle.push(next.clone());
                    cycles.push(cycle);
                }
            } else if visited.insert(next) {
                on_stack.insert(next);
                path.push(next);
                frames.push((next, 0));
            }
        }
    }

    cycles
}

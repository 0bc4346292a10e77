use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use serde::Serialize;

/// Weight of a prop-flow (indirect) dependency relative to a real import.
pub const INDIRECT_WEIGHT: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CentralFile {
    pub file: PathBuf,
    pub score: f64,
}

/// Rank files by weighted in-degree: 1 per importing file, 0.5 per file that
/// renders it with props.
///
/// Returns at most `top_n` entries, highest score first. Equal scores keep the
/// order in which the files were first seen as a target (direct edges in
/// source-file order, then indirect edges).
pub fn central_files(
    direct: &BTreeMap<PathBuf, Vec<PathBuf>>,
    indirect: &BTreeMap<PathBuf, Vec<PathBuf>>,
    top_n: usize,
) -> Vec<CentralFile> {
    let mut scores: Vec<CentralFile> = Vec::new();
    let mut position: HashMap<&PathBuf, usize> = HashMap::new();

    let weighted = direct
        .values()
        .flatten()
        .map(|target| (target, 1.0))
        .chain(indirect.values().flatten().map(|target| (target, INDIRECT_WEIGHT)));

    for (target, weight) in weighted {
        let idx = *position.entry(target).or_insert_with(|| {
            scores.push(CentralFile {
                file: target.clone(),
                score: 0.0,
            });
            scores.len() - 1
        });
        scores[idx].score += weight;
    }

    // `sort_by` is stable, so ties stay in first-encountered order.
    scores.sort_by(|a, b| b.score.total_cmp(&a.score));
    scores.truncate(top_n);
    scores
}

//! Near-duplicate collapsing for requirement lists. Comparison is exact by
//! character: no case folding, no whitespace collapsing. Quadratic per
//! category, which is fine for lists of tens of items.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

/// Candidates scoring above this ratio against an already-kept string are
/// discarded as duplicates.
pub const SIMILARITY_THRESHOLD: f64 = 0.9;

/// Symmetric, length-normalized matching-block ratio between two strings:
/// `2 * matched / (len(a) + len(b))`, with matched characters found by
/// recursive longest-matching-block decomposition.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let matched = matched_len(&a, &b, 0, a.len(), 0, b.len());
    2.0 * matched as f64 / (a.len() + b.len()) as f64
}

fn matched_len(a: &[char], b: &[char], alo: usize, ahi: usize, blo: usize, bhi: usize) -> usize {
    let (i, j, size) = longest_match(a, b, alo, ahi, blo, bhi);
    if size == 0 {
        return 0;
    }
    size + matched_len(a, b, alo, i, blo, j) + matched_len(a, b, i + size, ahi, j + size, bhi)
}

/// Earliest longest common block between `a[alo..ahi]` and `b[blo..bhi]`.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
    for j in blo..bhi {
        positions.entry(b[j]).or_default().push(j);
    }

    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0usize);
    // run length of the common block ending at each position of b
    let mut runs: HashMap<usize, usize> = HashMap::new();
    for i in alo..ahi {
        let mut next_runs: HashMap<usize, usize> = HashMap::new();
        if let Some(js) = positions.get(&a[i]) {
            for &j in js {
                let prev = if j == 0 {
                    0
                } else {
                    runs.get(&(j - 1)).copied().unwrap_or(0)
                };
                let len = prev + 1;
                next_runs.insert(j, len);
                if len > best_size {
                    best_i = i + 1 - len;
                    best_j = j + 1 - len;
                    best_size = len;
                }
            }
        }
        runs = next_runs;
    }
    (best_i, best_j, best_size)
}

/// Collapse near-duplicates within each category independently, keeping the
/// first occurrence. Output order and the category keys are preserved.
pub fn deduplicate(categories: &BTreeMap<String, Vec<String>>) -> BTreeMap<String, Vec<String>> {
    let mut deduplicated = BTreeMap::new();
    for (category, items) in categories {
        let mut kept: Vec<String> = Vec::new();
        for item in items {
            let duplicate = kept
                .iter()
                .any(|seen| similarity_ratio(item, seen) > SIMILARITY_THRESHOLD);
            if !duplicate {
                kept.push(item.clone());
            }
        }
        if kept.len() < items.len() {
            debug!(
                category = %category,
                dropped = items.len() - kept.len(),
                "collapsed near-duplicate requirements"
            );
        }
        deduplicated.insert(category.clone(), kept);
    }
    deduplicated
}

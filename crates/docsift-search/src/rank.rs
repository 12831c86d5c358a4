//! Score normalization and per-document deduplication. Pure functions:
//! no I/O, no failure modes, empty in means empty out.

use docsift_core::types::{Origin, RawHit, ScoredResult};
use std::collections::HashMap;

/// Rescale one raw hit sequence onto the 0-100 display range. The scale
/// is relative to this sequence only and must never mix origins:
///
/// - `Semantic` raw scores are cosine similarities, multiplied by 100.
///   Values above 1.0 pass through un-clamped (store bug surfaces as a
///   score above 100 instead of being masked here).
/// - `Keyword` raw scores are unbounded BM25 values, divided by the
///   sequence maximum. A non-positive maximum skips rescaling so raw
///   scores pass through unchanged.
pub fn normalize(hits: Vec<RawHit>) -> Vec<ScoredResult> {
    let max_raw = hits
        .iter()
        .map(|h| h.raw_score)
        .fold(f32::NEG_INFINITY, f32::max);
    hits.into_iter()
        .map(|hit| {
            let normalized = match hit.origin {
                Origin::Semantic => hit.raw_score * 100.0,
                Origin::Keyword if max_raw > 0.0 => hit.raw_score / max_raw * 100.0,
                Origin::Keyword => hit.raw_score,
            };
            ScoredResult::from_hit(hit, normalized)
        })
        .collect()
}

/// Collapse multi-chunk hits to one result per document: the chunk with
/// the highest normalized score wins, ties going to the lowest chunk_id.
/// Retained results keep their own rank position from the input, so the
/// output order is a subsequence of the input order. Idempotent.
pub fn deduplicate(results: Vec<ScoredResult>) -> Vec<ScoredResult> {
    let mut best_index: HashMap<String, usize> = HashMap::new();
    for (i, result) in results.iter().enumerate() {
        match best_index.get(&result.doc_id) {
            Some(&j) => {
                let current = &results[j];
                let better = result.normalized_score > current.normalized_score
                    || (result.normalized_score == current.normalized_score
                        && result.chunk_id < current.chunk_id);
                if better {
                    best_index.insert(result.doc_id.clone(), i);
                }
            }
            None => {
                best_index.insert(result.doc_id.clone(), i);
            }
        }
    }
    let mut keep: Vec<usize> = best_index.into_values().collect();
    keep.sort_unstable();
    let mut kept = keep.into_iter();
    let mut next = kept.next();
    results
        .into_iter()
        .enumerate()
        .filter_map(|(i, r)| {
            if next == Some(i) {
                next = kept.next();
                Some(r)
            } else {
                None
            }
        })
        .collect()
}

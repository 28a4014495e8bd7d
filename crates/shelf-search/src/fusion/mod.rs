//! Merging lexical and semantic result sets into one ranked list.
//!
//! Deduplication compares only `similarity_score` (missing treated as 0):
//! when the same document arrives from both paths, the semantic instance
//! wins whenever its score is strictly higher, otherwise the first-seen
//! (lexical) instance is kept. Lexical relevance is deliberately not part
//! of the comparison — it is the combination policy, not an oversight.

pub mod hybrid;

use std::collections::HashMap;

use serde::Serialize;
use shelf_core::model::Document;

/// A document scored by one or both retrieval paths.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredResult {
    pub document: Document,
    /// Lexical relevance (`base weight × search_priority`); absent on
    /// semantic-only hits.
    pub relevance: Option<i64>,
    /// Cosine similarity in `[0, 1]`; absent on lexical-only hits.
    pub similarity_score: Option<f32>,
}

impl ScoredResult {
    /// The score used for dedup comparison and final ordering.
    #[must_use]
    pub fn similarity_or_zero(&self) -> f32 {
        self.similarity_score.unwrap_or(0.0)
    }
}

/// Merge, deduplicate, and order lexical and semantic result sets.
///
/// Output ordering is `similarity_score` descending with missing scores as
/// 0, via a stable sort — semantic hits first, then pure-lexical hits in
/// the relative order the lexical path produced them. Each document
/// identifier appears at most once.
#[must_use]
pub fn fuse(lexical: Vec<ScoredResult>, semantic: Vec<ScoredResult>) -> Vec<ScoredResult> {
    let mut first_seen: Vec<i64> = Vec::new();
    let mut by_id: HashMap<i64, ScoredResult> = HashMap::new();

    for result in lexical.into_iter().chain(semantic) {
        let id = result.document.id;
        match by_id.entry(id) {
            std::collections::hash_map::Entry::Vacant(entry) => {
                first_seen.push(id);
                entry.insert(result);
            }
            std::collections::hash_map::Entry::Occupied(mut entry) => {
                if result.similarity_or_zero() > entry.get().similarity_or_zero() {
                    entry.insert(result);
                }
            }
        }
    }

    let mut fused: Vec<ScoredResult> = first_seen
        .into_iter()
        .filter_map(|id| by_id.remove(&id))
        .collect();

    fused.sort_by(|a, b| {
        b.similarity_or_zero()
            .partial_cmp(&a.similarity_or_zero())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    fused
}

//! Cosine-similarity ranking of a query vector against a fitted matrix.

use super::vectorizer::FittedIndex;

/// A semantic hit: row index into the fitted corpus snapshot plus its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SemanticHit {
    pub row: usize,
    /// Cosine similarity in `[0, 1]`.
    pub score: f32,
}

/// Rank every corpus row against `query_vector` by cosine similarity.
///
/// Rows are sorted by score descending with ties keeping corpus order
/// (stable sort), truncated to `top_k`, and filtered to scores strictly
/// above `floor` so near-zero noise matches never surface.
#[must_use]
pub fn rank_rows(
    index: &FittedIndex,
    query_vector: &[f32],
    top_k: usize,
    floor: f32,
) -> Vec<SemanticHit> {
    let mut scored: Vec<SemanticHit> = index
        .matrix()
        .iter()
        .enumerate()
        .map(|(row, weights)| SemanticHit {
            row,
            score: cosine_similarity(query_vector, weights).unwrap_or(0.0),
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored.truncate(top_k);
    scored.retain(|hit| hit.score > floor);

    scored
}

/// Cosine similarity between two equal-length vectors, clamped to `[0, 1]`.
///
/// Returns `None` when the vectors differ in length, are empty, or either
/// norm is zero — callers treat that as similarity 0.
fn cosine_similarity(left: &[f32], right: &[f32]) -> Option<f32> {
    if left.len() != right.len() || left.is_empty() {
        return None;
    }

    let mut dot = 0.0_f32;
    let mut left_norm_sq = 0.0_f32;
    let mut right_norm_sq = 0.0_f32;

    for (a, b) in left.iter().zip(right.iter()) {
        dot += a * b;
        left_norm_sq += a * a;
        right_norm_sq += b * b;
    }

    let denom = left_norm_sq.sqrt() * right_norm_sq.sqrt();
    if denom <= f32::EPSILON {
        return None;
    }

    Some((dot / denom).clamp(0.0, 1.0))
}

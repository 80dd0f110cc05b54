//! Similarity scoring and ranking
//!
//! Pure functions over in-memory vectors; the pipeline's core. Errors are
//! raised immediately on invalid input and never converted into partial
//! results, since a silently wrong ranking is worse than a visible failure.

use crate::embedding::EmbeddingVector;
use crate::error::{JobMatcherError, Result};
use crate::jobs::posting::{JobPosting, ScoredPosting};

/// Cosine similarity between two embedding vectors.
///
/// Returns a raw cosine in [-1, 1]. A zero vector has undefined direction;
/// similarity against it is defined as 0.0 rather than an error.
pub fn score(reference: &[f32], candidate: &[f32]) -> Result<f32> {
    if reference.len() != candidate.len() {
        return Err(JobMatcherError::DimensionMismatch {
            expected: reference.len(),
            actual: candidate.len(),
        });
    }

    let dot: f32 = reference.iter().zip(candidate).map(|(x, y)| x * y).sum();
    let norm_ref = reference.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_cand = candidate.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_ref == 0.0 || norm_cand == 0.0 {
        return Ok(0.0);
    }

    Ok(dot / (norm_ref * norm_cand))
}

/// Score every candidate against the reference and sort descending.
///
/// Equal scores keep their original fetch order. One malformed candidate
/// vector fails the whole call; callers wanting partial tolerance must
/// pre-filter their candidates.
pub fn rank(
    reference: &EmbeddingVector,
    candidates: Vec<(JobPosting, EmbeddingVector)>,
) -> Result<Vec<ScoredPosting>> {
    let mut scored = Vec::with_capacity(candidates.len());

    for (posting, embedding) in candidates {
        let similarity = score(reference, &embedding)?;
        scored.push(ScoredPosting {
            posting,
            score: similarity,
            rank: 0,
        });
    }

    // sort_by is stable, so ties preserve input order
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    for (i, entry) in scored.iter_mut().enumerate() {
        entry.rank = i + 1;
    }

    Ok(scored)
}

/// First `n` entries of a ranked list, fewer if the list is shorter.
pub fn top_n(ranked: Vec<ScoredPosting>, n: usize) -> Vec<ScoredPosting> {
    let mut out = ranked;
    out.truncate(n);
    out
}

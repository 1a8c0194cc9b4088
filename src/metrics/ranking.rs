//! Ranking metrics for top-k recommendation.
//!
//! A prediction is a ranked list of item indices (best first); the ground
//! truth for a user is the set of items that user is known to find relevant.

use std::collections::HashSet;
use std::hash::Hash;

/// Reciprocal Rank: 1/rank of the first ranked item that is relevant.
///
/// Ranks are 1-based. Returns 0.0 if no ranked item is relevant, which
/// includes an empty relevant set.
///
/// # Examples
///
/// ```
/// use aprender_climf::metrics::ranking::reciprocal_rank;
///
/// let ranking = vec![5, 3, 1, 4, 2];
///
/// assert!((reciprocal_rank(&ranking, &[5]) - 1.0).abs() < 1e-6);      // rank 1 → 1/1
/// assert!((reciprocal_rank(&ranking, &[1, 3]) - 0.5).abs() < 1e-6);   // 3 at rank 2 → 1/2
/// assert!((reciprocal_rank(&ranking, &[99]) - 0.0).abs() < 1e-6);     // not found → 0
/// assert!((reciprocal_rank(&ranking, &[]) - 0.0).abs() < 1e-6);       // nothing relevant → 0
/// ```
#[must_use]
pub fn reciprocal_rank<T: Eq + Hash>(ranking: &[T], relevant: &[T]) -> f32 {
    if relevant.is_empty() {
        return 0.0;
    }
    let relevant: HashSet<&T> = relevant.iter().collect();
    ranking
        .iter()
        .position(|item| relevant.contains(item))
        .map_or(0.0, |i| 1.0 / (i + 1) as f32)
}

/// Mean Reciprocal Rank (MRR) over multiple users.
///
/// `predicted_rankings[u]` is the ranked item list for user `u` and
/// `relevant_items[u]` that user's relevant items. The result is the
/// arithmetic mean of [`reciprocal_rank`] over users, always in `[0, 1]`.
///
/// Returns 0.0 when there are no users or the two inputs disagree in length.
///
/// # Examples
///
/// ```
/// use aprender_climf::metrics::ranking::mean_reciprocal_rank;
///
/// let predicted = vec![
///     vec![1, 2, 3],  // first relevant at rank 1
///     vec![2, 1, 3],  // first relevant at rank 2
///     vec![3, 2, 1],  // first relevant at rank 3
/// ];
/// let relevant = vec![vec![1], vec![1], vec![1]];
///
/// let score = mean_reciprocal_rank(&predicted, &relevant);
/// // MRR = (1/1 + 1/2 + 1/3) / 3 ≈ 0.611
/// assert!((score - 0.611).abs() < 0.01);
/// ```
#[must_use]
pub fn mean_reciprocal_rank<T: Eq + Hash>(
    predicted_rankings: &[Vec<T>],
    relevant_items: &[Vec<T>],
) -> f32 {
    if predicted_rankings.is_empty() || predicted_rankings.len() != relevant_items.len() {
        return 0.0;
    }

    let rr_sum: f32 = predicted_rankings
        .iter()
        .zip(relevant_items)
        .map(|(ranking, relevant)| reciprocal_rank(ranking, relevant))
        .sum();

    rr_sum / predicted_rankings.len() as f32
}


#[cfg(test)]
#[path = "tests_ranking_contract.rs"]
mod tests_ranking_contract;

//! Ranked output
//!
//! Zips score vectors back to identities and sorts best first.

use crate::activity::IdentityIndex;
use ndarray::Array1;
use serde::Serialize;
use std::hash::Hash;

/// One entry of a ranked list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked<I> {
    pub score: f64,
    pub identity: I,
}

/// Rank every identity by its score, highest first
///
/// The order among equal scores is unspecified.
pub fn rank<I>(
    scores: &Array1<f64>,
    index: &IdentityIndex<I>,
    limit: Option<usize>,
) -> Vec<Ranked<I>>
where
    I: Ord + Hash + Clone,
{
    let mut ranked: Vec<Ranked<I>> = scores
        .iter()
        .zip(index.iter())
        .map(|(&score, identity)| Ranked {
            score,
            identity: identity.clone(),
        })
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));

    if let Some(limit) = limit {
        ranked.truncate(limit);
    }

    ranked
}

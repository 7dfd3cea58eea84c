//! Mutual reinforcement engine
//!
//! Alternates expertise and quality through the credit-weighted adjacency
//! matrix for a fixed number of rounds:
//!
//! ```text
//! E = Q · Aᵗ
//! Q = E · A        (uses the E of this same round)
//! E = E / sum(E)
//! Q = Q / sum(Q)
//! ```
//!
//! With a binary matrix this is Kleinberg's HITS: E plays the hub vector,
//! Q the authority vector.

use crate::adjacency::AdjacencyMatrix;
use ndarray::Array1;
use spear_common::errors::{Result, ScoreVector, SpearError};
use tracing::{debug, trace};

/// Final score vectors of one run
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreVectors {
    /// Expertise per user id
    pub expertise: Array1<f64>,

    /// Quality per resource id
    pub quality: Array1<f64>,

    /// Rounds performed
    pub iterations: usize,

    /// L1 change of the expertise vector in the last round
    pub residual: f64,
}

/// Fixed-budget power iteration over an adjacency matrix
#[derive(Debug, Clone, Copy)]
pub struct MutualReinforcement {
    iterations: usize,
}

impl MutualReinforcement {
    pub fn new(iterations: usize) -> Self {
        Self { iterations }
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Run every round and return the final vectors
    pub fn run(&self, matrix: &AdjacencyMatrix) -> Result<ScoreVectors> {
        if self.iterations == 0 {
            return Err(SpearError::validation(
                "iterations",
                "iterations must be a positive integer",
            ));
        }

        // Overwritten by the first round; only there to be defined.
        let mut expertise: Array1<f64> = Array1::ones(matrix.users());
        let mut quality: Array1<f64> = Array1::ones(matrix.resources());
        let mut residual = f64::INFINITY;

        for iteration in 0..self.iterations {
            let next_expertise = matrix.expertise_step(&quality);
            let next_quality = matrix.quality_step(&next_expertise);

            let next_expertise = normalize(next_expertise, ScoreVector::Expertise, iteration)?;
            let next_quality = normalize(next_quality, ScoreVector::Quality, iteration)?;

            residual = (&next_expertise - &expertise).mapv(f64::abs).sum();
            expertise = next_expertise;
            quality = next_quality;

            trace!(iteration, residual, "Reinforcement round complete");
        }

        debug!(
            iterations = self.iterations,
            residual,
            "Mutual reinforcement finished"
        );

        Ok(ScoreVectors {
            expertise,
            quality,
            iterations: self.iterations,
            residual,
        })
    }
}

/// Divide by the L1 sum so the vector sums to one
fn normalize(
    mut scores: Array1<f64>,
    vector: ScoreVector,
    iteration: usize,
) -> Result<Array1<f64>> {
    let sum = scores.sum();
    if sum == 0.0 {
        return Err(SpearError::DegenerateNormalization {
            vector,
            iteration,
            sum,
        });
    }
    scores /= sum;
    Ok(scores)
}

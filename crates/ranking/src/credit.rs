//! Credit score transform
//!
//! Replaces every stored edge weight `x` with `C(x)`. Zero is fixed to zero:
//! `C` is never evaluated there, whatever it would return.

use crate::adjacency::AdjacencyMatrix;
use tracing::warn;

/// Default credit function, `C(x) = x^0.5`
pub fn sqrt_credit(raw: f64) -> f64 {
    raw.sqrt()
}

/// `C(x) = 1`; ranking with it reproduces classical HITS
pub fn hits_credit(_raw: f64) -> f64 {
    1.0
}

/// Apply `credit` to every nonzero weight of `matrix`
///
/// Non-finite results are kept as-is and counted in a warning.
pub fn apply_credit<C>(matrix: &mut AdjacencyMatrix, mut credit: C)
where
    C: FnMut(f64) -> f64,
{
    let mut non_finite = 0usize;

    for weight in matrix.weights_mut() {
        if *weight == 0.0 {
            continue;
        }
        *weight = credit(*weight);
        if !weight.is_finite() {
            non_finite += 1;
        }
    }

    if non_finite > 0 {
        warn!(
            non_finite,
            "Credit function produced non-finite weights; scores will not be meaningful"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqrt_credit() {
        let mut matrix = AdjacencyMatrix::from_cells(2, 2, vec![((0, 0), 4.0), ((1, 1), 9.0)]);
        apply_credit(&mut matrix, sqrt_credit);

        assert_eq!(matrix.get(0, 0), 2.0);
        assert_eq!(matrix.get(1, 1), 3.0);
        assert_eq!(matrix.get(0, 1), 0.0);
    }

    #[test]
    fn test_stored_zero_is_never_transformed() {
        let mut matrix = AdjacencyMatrix::from_cells(1, 2, vec![((0, 0), 0.0), ((0, 1), 5.0)]);
        let mut calls = Vec::new();
        apply_credit(&mut matrix, |raw| {
            calls.push(raw);
            raw + 100.0
        });

        assert_eq!(calls, vec![5.0]);
        assert_eq!(matrix.get(0, 0), 0.0);
        assert_eq!(matrix.get(0, 1), 105.0);
    }

    #[test]
    fn test_hits_credit_binarizes() {
        let mut matrix = AdjacencyMatrix::from_cells(2, 1, vec![((0, 0), 7.0), ((1, 0), 3.0)]);
        apply_credit(&mut matrix, hits_credit);

        assert_eq!(matrix.get(0, 0), 1.0);
        assert_eq!(matrix.get(1, 0), 1.0);
    }

    #[test]
    fn test_non_finite_weights_are_kept() {
        let mut matrix = AdjacencyMatrix::from_cells(1, 1, vec![((0, 0), 2.0)]);
        apply_credit(&mut matrix, |_| f64::INFINITY);
        assert!(matrix.get(0, 0).is_infinite());
    }
}

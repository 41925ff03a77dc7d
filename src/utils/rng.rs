//! Seeded random generators for synthetic data.
//!
//! Everything random in the crate goes through an explicit `ChaCha8Rng` so a
//! run can be replayed from its seed.

use ndarray::{Array1, Array2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

/// Create the crate RNG from an explicit seed, or from OS entropy when `None`.
pub fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Matrix of standard-normal samples.
pub fn random_normal_matrix<R: Rng + ?Sized>(rng: &mut R, rows: usize, cols: usize) -> Array2<f64> {
    Array2::from_shape_simple_fn((rows, cols), || rng.sample(StandardNormal))
}

/// Vector of standard-normal samples.
pub fn random_normal_vector<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Array1<f64> {
    Array1::from_shape_simple_fn(len, || rng.sample(StandardNormal))
}

/// One-hot label matrix with one uniformly drawn class per row.
///
/// With zero classes the result has no columns and no hot entries.
pub fn one_hot_labels<R: Rng + ?Sized>(rng: &mut R, rows: usize, classes: usize) -> Array2<f64> {
    let mut labels = Array2::zeros((rows, classes));
    if classes == 0 {
        return labels;
    }
    for mut row in labels.rows_mut() {
        row[rng.gen_range(0..classes)] = 1.0;
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = seeded_rng(Some(42));
        let mut rng2 = seeded_rng(Some(42));

        assert_eq!(
            random_normal_vector(&mut rng1, 100),
            random_normal_vector(&mut rng2, 100)
        );
    }

    #[test]
    fn test_random_normal_matrix_shape() {
        let mut rng = seeded_rng(Some(12345));
        let matrix = random_normal_matrix(&mut rng, 20, 10);
        assert_eq!(matrix.dim(), (20, 10));
        assert!(matrix.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn test_one_hot_labels_rows() {
        let mut rng = seeded_rng(Some(67890));
        let labels = one_hot_labels(&mut rng, 50, 7);

        assert_eq!(labels.dim(), (50, 7));
        for row in labels.rows() {
            assert_eq!(row.sum(), 1.0);
            assert_eq!(row.iter().filter(|&&v| v == 1.0).count(), 1);
        }
    }

    #[test]
    fn test_one_hot_labels_zero_classes() {
        let mut rng = seeded_rng(Some(11111));
        let labels = one_hot_labels(&mut rng, 4, 0);
        assert_eq!(labels.dim(), (4, 0));
    }
}

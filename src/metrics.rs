//! Evaluation helpers.

/// Absolute tolerance under which two prediction values count as equal.
pub const EPSILON: f64 = 1e-5;

/// Approximate equality at [`EPSILON`].
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Percentage of predictions matching their targets (within [`EPSILON`]).
///
/// # Panics
///
/// Panics when the two slices have different lengths.
///
/// # Examples
///
/// ```
/// use rust_ml_toolkit::metrics::accuracy;
///
/// let predictions = [1.0, 0.0, 1.0, 1.0];
/// let targets = [1.0, 0.0, 0.0, 1.0];
/// assert_eq!(accuracy(&predictions, &targets), 75.0);
/// ```
pub fn accuracy(predictions: &[f64], targets: &[f64]) -> f64 {
    assert_eq!(
        predictions.len(),
        targets.len(),
        "predictions set and targets set are not the same size"
    );

    let correct = predictions
        .iter()
        .zip(targets.iter())
        .filter(|(p, t)| approx_equal(**p, **t))
        .count();
    correct as f64 / predictions.len() as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_correct() {
        assert_eq!(accuracy(&[1.0, -1.0, 1.0], &[1.0, -1.0, 1.0]), 100.0);
    }

    #[test]
    fn test_partially_correct() {
        assert_eq!(accuracy(&[1.0, 1.0], &[1.0, -1.0]), 50.0);
    }

    #[test]
    fn test_within_tolerance_counts() {
        assert_eq!(accuracy(&[1.0 + 1e-7], &[1.0]), 100.0);
        assert_eq!(accuracy(&[1.0 + 1e-3], &[1.0]), 0.0);
    }

    #[test]
    #[should_panic(expected = "predictions set and targets set are not the same size")]
    fn test_length_mismatch_panics() {
        accuracy(&[1.0, 2.0], &[1.0]);
    }
}

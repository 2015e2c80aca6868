//! Activation functions shared across the models.

/// Sigmoid: `1 / (1 + exp(-x))`.
///
/// # Examples
///
/// ```
/// use rust_ml_toolkit::utils::activations::sigmoid;
///
/// assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
/// assert!(sigmoid(10.0) > 0.99);
/// assert!(sigmoid(-10.0) < 0.01);
/// ```
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Softmax over a score vector, with the max-subtraction trick so large
/// scores do not overflow `exp`.
///
/// Returns a probability vector of the same length summing to 1. Panics on
/// an empty input.
///
/// # Examples
///
/// ```
/// use rust_ml_toolkit::utils::activations::softmax;
///
/// let probs = softmax(&[1.0, 1.0]);
/// assert!((probs[0] - 0.5).abs() < 1e-12);
/// assert!((probs[1] - 0.5).abs() < 1e-12);
/// ```
pub fn softmax(z: &[f64]) -> Vec<f64> {
    assert!(!z.is_empty(), "softmax of an empty score vector");

    let max = z.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = z.iter().map(|&v| (v - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|v| v / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigmoid_midpoint_and_symmetry() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!((sigmoid(2.0) + sigmoid(-2.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_softmax_sums_to_one() {
        let probs = softmax(&[0.3, -1.2, 4.0]);
        let sum: f64 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_softmax_prefers_largest_score() {
        let probs = softmax(&[1.0, 3.0, 2.0]);
        assert!(probs[1] > probs[2] && probs[2] > probs[0]);
    }

    #[test]
    fn test_softmax_stable_for_large_scores() {
        let probs = softmax(&[1000.0, 1000.0]);
        assert!((probs[0] - 0.5).abs() < 1e-12);
        assert!(probs.iter().all(|p| p.is_finite()));
    }

    #[test]
    #[should_panic(expected = "softmax of an empty score vector")]
    fn test_softmax_empty_panics() {
        softmax(&[]);
    }
}

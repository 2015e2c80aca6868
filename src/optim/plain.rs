//! Plain steepest-descent update rule.

use crate::optim::{Objective, UpdateRule};

/// The textbook gradient-descent step, without side state:
///
/// ```text
/// point = point - learning_rate * gradient(point)
/// ```
///
/// # Examples
///
/// ```
/// use rust_ml_toolkit::optim::{Objective, PlainUpdate, UpdateRule};
///
/// let f = Objective::from_gradient(3, |x| x.to_vec());
/// let mut rule = PlainUpdate::new();
/// let mut point = vec![1.0, 2.0, 3.0];
///
/// rule.update(&mut point, &f, 0.1);
/// assert!((point[0] - 0.9).abs() < 1e-12);
/// assert!((point[1] - 1.8).abs() < 1e-12);
/// assert!((point[2] - 2.7).abs() < 1e-12);
/// ```
#[derive(Debug, Default)]
pub struct PlainUpdate;

impl PlainUpdate {
    /// Create the rule.
    pub fn new() -> Self {
        Self
    }
}

impl UpdateRule for PlainUpdate {
    /// # Panics
    ///
    /// Panics when the gradient length differs from the point length.
    fn update(&mut self, point: &mut [f64], objective: &Objective, learning_rate: f64) {
        let gradient = objective.gradient(point);
        assert_eq!(
            gradient.len(),
            point.len(),
            "gradient length does not match point length"
        );

        for (p, g) in point.iter_mut().zip(gradient.iter()) {
            *p -= learning_rate * g;
        }
    }

    /// No state to restore.
    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_gradient(size: usize) -> Objective {
        Objective::from_gradient(size, |x| x.to_vec())
    }

    #[test]
    fn test_single_step() {
        let f = identity_gradient(2);
        let mut rule = PlainUpdate::new();
        let mut point = vec![1.0, -1.0];

        rule.update(&mut point, &f, 0.5);
        assert_eq!(point, vec![0.5, -0.5]);
    }

    #[test]
    fn test_step_decreases_convex_quadratic() {
        // f(a) = a^2: a single step from any non-stationary start must
        // strictly decrease f for a small enough learning rate.
        let f = Objective::new(1, |x| vec![x[0] * x[0]], |x| vec![2.0 * x[0]]);
        let mut rule = PlainUpdate::new();

        for start in [-7.0, -0.3, 0.8, 12.0] {
            let mut point = vec![start];
            rule.update(&mut point, &f, 0.1);
            assert!(f.evaluate(&point)[0] < f.evaluate(&[start])[0]);
        }
    }

    #[test]
    fn test_reset_is_a_no_op() {
        let f = identity_gradient(1);
        let mut rule = PlainUpdate::new();
        let mut point = vec![4.0];

        rule.update(&mut point, &f, 0.25);
        rule.reset();
        rule.update(&mut point, &f, 0.25);
        assert!((point[0] - 2.25).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "gradient length does not match point length")]
    fn test_bad_gradient_length_panics() {
        let f = Objective::from_gradient(2, |_| vec![1.0]);
        let mut rule = PlainUpdate::new();
        let mut point = vec![0.0, 0.0];
        rule.update(&mut point, &f, 0.1);
    }
}

//! Momentum update rule.

use crate::optim::{Objective, UpdateRule};

/// Gradient descent with momentum.
///
/// The rule accumulates an exponentially decaying velocity and steps along
/// it:
///
/// ```text
/// velocity = gamma * velocity + learning_rate * gradient(point)
/// point    = point - velocity
/// ```
///
/// `gamma` in `[0, 1)` controls how much of the previous velocity survives
/// each step; with `gamma = 0` the rule degenerates to [`crate::optim::PlainUpdate`].
/// The velocity is seeded from a caller-supplied start vector, and `reset`
/// restores that start vector by value, so a rule instance can be reused
/// across runs. One instance must not be shared between concurrent runs.
///
/// # Examples
///
/// ```
/// use rust_ml_toolkit::optim::{MomentumUpdate, Objective, UpdateRule};
///
/// let f = Objective::from_gradient(1, |_| vec![1.0]);
/// let mut rule = MomentumUpdate::new(0.9, vec![0.0]);
/// let mut point = vec![1.0];
///
/// rule.update(&mut point, &f, 0.1); // velocity 0.1, point 0.9
/// rule.update(&mut point, &f, 0.1); // velocity 0.19, point 0.71
/// assert!((point[0] - 0.71).abs() < 1e-12);
/// ```
pub struct MomentumUpdate {
    gamma: f64,
    start_velocity: Vec<f64>,
    velocity: Vec<f64>,
}

impl MomentumUpdate {
    /// Create the rule from its decay factor and start velocity.
    ///
    /// The start velocity must have the same length as the parameter vectors
    /// the rule will update (usually all zeros).
    pub fn new(gamma: f64, start_velocity: Vec<f64>) -> Self {
        let velocity = start_velocity.clone();
        Self {
            gamma,
            start_velocity,
            velocity,
        }
    }

    /// The current velocity vector.
    pub fn velocity(&self) -> &[f64] {
        &self.velocity
    }
}

impl UpdateRule for MomentumUpdate {
    /// # Panics
    ///
    /// Panics when the velocity length differs from the point length, or the
    /// gradient length differs from the point length.
    fn update(&mut self, point: &mut [f64], objective: &Objective, learning_rate: f64) {
        assert_eq!(
            self.velocity.len(),
            point.len(),
            "velocity length does not match point length"
        );
        let gradient = objective.gradient(point);
        assert_eq!(
            gradient.len(),
            point.len(),
            "gradient length does not match point length"
        );

        for ((v, g), p) in self
            .velocity
            .iter_mut()
            .zip(gradient.iter())
            .zip(point.iter_mut())
        {
            *v = self.gamma * *v + learning_rate * g;
            *p -= *v;
        }
    }

    /// Restore the velocity to the caller-supplied start vector.
    fn reset(&mut self) {
        self.velocity.copy_from_slice(&self.start_velocity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optim::PlainUpdate;

    fn constant_gradient() -> Objective {
        Objective::from_gradient(1, |_| vec![2.0])
    }

    #[test]
    fn test_velocity_accumulates() {
        let f = constant_gradient();
        let mut rule = MomentumUpdate::new(0.5, vec![0.0]);
        let mut point = vec![0.0];

        rule.update(&mut point, &f, 0.1); // v = 0.2
        assert!((rule.velocity()[0] - 0.2).abs() < 1e-12);
        rule.update(&mut point, &f, 0.1); // v = 0.5 * 0.2 + 0.2 = 0.3
        assert!((rule.velocity()[0] - 0.3).abs() < 1e-12);
        assert!((point[0] + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_gamma_zero_matches_plain_update() {
        let f = Objective::new(1, |x| vec![x[0] * x[0]], |x| vec![2.0 * x[0]]);
        let mut momentum = MomentumUpdate::new(0.0, vec![0.0]);
        let mut plain = PlainUpdate::new();

        let mut a = vec![3.0];
        let mut b = vec![3.0];
        for _ in 0..10 {
            momentum.update(&mut a, &f, 0.1);
            plain.update(&mut b, &f, 0.1);
        }
        assert!((a[0] - b[0]).abs() < 1e-12);
    }

    #[test]
    fn test_reset_restores_start_velocity_by_value() {
        let f = constant_gradient();
        let start = vec![0.25];
        let mut rule = MomentumUpdate::new(0.9, start.clone());
        let mut point = vec![1.0];

        rule.update(&mut point, &f, 0.1);
        rule.update(&mut point, &f, 0.1);
        assert_ne!(rule.velocity(), start.as_slice());

        rule.reset();
        assert_eq!(rule.velocity(), start.as_slice());
    }

    #[test]
    #[should_panic(expected = "velocity length does not match point length")]
    fn test_velocity_dimension_mismatch_panics() {
        let f = Objective::from_gradient(2, |x| x.to_vec());
        let mut rule = MomentumUpdate::new(0.9, vec![0.0]);
        let mut point = vec![1.0, 2.0];
        rule.update(&mut point, &f, 0.1);
    }
}

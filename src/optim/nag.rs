//! Nesterov-accelerated gradient update rule.

use crate::optim::{Objective, UpdateRule};

/// Nesterov-accelerated gradient (NAG).
///
/// Like momentum, but the gradient is evaluated at the look-ahead point the
/// accumulated velocity is already carrying us toward, which corrects the
/// step before it overshoots:
///
/// ```text
/// lookahead = point - gamma * velocity
/// velocity  = gamma * velocity + learning_rate * gradient(lookahead)
/// point     = point - velocity
/// ```
///
/// With `gamma = 0` the look-ahead point coincides with `point` and the rule
/// degenerates to [`crate::optim::PlainUpdate`]. `reset` restores the
/// caller-supplied start velocity by value. One instance must not be shared
/// between concurrent runs.
pub struct NagUpdate {
    gamma: f64,
    start_velocity: Vec<f64>,
    velocity: Vec<f64>,
}

impl NagUpdate {
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

impl UpdateRule for NagUpdate {
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

        for v in self.velocity.iter_mut() {
            *v *= self.gamma;
        }
        let lookahead: Vec<f64> = point
            .iter()
            .zip(self.velocity.iter())
            .map(|(p, v)| p - v)
            .collect();
        let gradient = objective.gradient(&lookahead);
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
            *v += learning_rate * g;
            *p -= *v;
        }
    }

    /// Restore the velocity to the caller-supplied start vector.
    fn reset(&mut self) {
        self.velocity.copy_from_slice(&self.start_velocity);
    }
}

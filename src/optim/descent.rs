//! The gradient-descent loop.

use crate::optim::{EpochProvider, UpdateRule};

/// Elementwise absolute tolerance under which a gradient counts as zero for
/// the convergence probe.
pub const GRADIENT_TOLERANCE: f64 = 1e-7;

/// The driving optimization loop.
///
/// Combines an [`EpochProvider`] and an [`UpdateRule`] with the loop's
/// hyperparameters. A run moves through three states: *running* while the
/// epoch count is below `max_steps`, *converged* when an entire epoch
/// applies no update (every step's gradient was approximately zero, or the
/// provider yielded no steps), and *terminated* when the epoch cap is
/// reached first. Either way [`GradientDescent::optimize`] returns the final
/// parameter vector.
///
/// Each `optimize` call is independent: the update rule is reset at both
/// ends of the run, and the instance holds no other state across calls.
/// Because the rule carries mutable state during a run, one
/// `GradientDescent` instance must not be shared between concurrent runs.
///
/// # Examples
///
/// ```
/// use rust_ml_toolkit::optim::{BatchProvider, GradientDescent, Objective, PlainUpdate};
///
/// // f(a) = a^2; a learning rate of 0.5 lands on the minimum in one step
/// // and the zero-gradient probe stops the loop on the next epoch.
/// let f = Objective::from_gradient(1, |x| vec![2.0 * x[0]]);
/// let mut descent = GradientDescent::new(BatchProvider::new(f), PlainUpdate::new(), 0.5, 100);
/// assert_eq!(descent.optimize(&[1.0]), vec![0.0]);
/// ```
///
/// With `max_steps` of zero the loop never runs and the start point comes
/// back unchanged:
///
/// ```
/// use rust_ml_toolkit::optim::{BatchProvider, GradientDescent, Objective, PlainUpdate};
///
/// let f = Objective::from_gradient(1, |x| vec![2.0 * x[0]]);
/// let mut descent = GradientDescent::new(BatchProvider::new(f), PlainUpdate::new(), 0.5, 0);
/// assert_eq!(descent.optimize(&[3.0]), vec![3.0]);
/// ```
pub struct GradientDescent<P, U> {
    epoch_provider: P,
    update_rule: U,
    learning_rate: f64,
    max_steps: usize,
    check_interval: usize,
}

impl<P: EpochProvider, U: UpdateRule> GradientDescent<P, U> {
    /// Create a loop with the given provider, rule, learning rate, and epoch
    /// cap. The zero-gradient check interval defaults to every epoch.
    pub fn new(epoch_provider: P, update_rule: U, learning_rate: f64, max_steps: usize) -> Self {
        Self {
            epoch_provider,
            update_rule,
            learning_rate,
            max_steps,
            check_interval: 1,
        }
    }

    /// Only probe for zero gradients on epochs whose index is a multiple of
    /// `check_interval`. A value of zero behaves as 1 (probe every epoch).
    ///
    /// On the other epochs updates are applied without the probe, even when
    /// every gradient is zero; convergence is then only detected on the next
    /// probed epoch.
    pub fn with_check_interval(mut self, check_interval: usize) -> Self {
        self.check_interval = check_interval;
        self
    }

    /// Run the loop from `start_point` and return the final parameter
    /// vector.
    ///
    /// Per epoch, every step objective's gradient is evaluated at the
    /// current point; steps whose gradient is approximately zero (elementwise
    /// within [`GRADIENT_TOLERANCE`]) are skipped on probed epochs, all other
    /// steps go through the update rule followed by the provider's
    /// `after_step` callback. An epoch that applies no step at all means
    /// convergence and returns immediately, without the `on_epoch_end`
    /// callback.
    ///
    /// # Panics
    ///
    /// Panics when `start_point`'s length does not match the step
    /// objectives' expected input size (a programmer error, consistent with
    /// [`crate::optim::Objective`]).
    pub fn optimize(&mut self, start_point: &[f64]) -> Vec<f64> {
        self.update_rule.reset();
        let check_interval = self.check_interval.max(1);
        let mut point = start_point.to_vec();

        // One probe evaluation, only to size the zero vector the skip rule
        // compares against.
        let zero_dimension = self
            .epoch_provider
            .step_objectives()
            .first()
            .map(|thunk| thunk().gradient(&point).len());

        let mut epoch = 0;
        while epoch < self.max_steps {
            let mut step_taken = false;
            for thunk in self.epoch_provider.step_objectives() {
                let objective = thunk();
                let gradient = objective.gradient(&point);
                if epoch % check_interval == 0 && is_approximately_zero(&gradient, zero_dimension) {
                    continue;
                }
                self.update_rule
                    .update(&mut point, &objective, self.learning_rate);
                self.epoch_provider.after_step(&point);
                step_taken = true;
            }
            if !step_taken {
                // Converged: nothing moved in this whole epoch.
                break;
            }
            self.epoch_provider.on_epoch_end(&point);
            epoch += 1;
        }

        self.update_rule.reset();
        point
    }
}

fn is_approximately_zero(gradient: &[f64], dimension: Option<usize>) -> bool {
    dimension == Some(gradient.len()) && gradient.iter().all(|g| g.abs() <= GRADIENT_TOLERANCE)
}

//! Gradient-descent optimization engine.
//!
//! The engine separates three concerns behind small traits so any
//! combination can drive the same loop:
//!
//! - [`Objective`]: a caller-supplied function bundle (value and gradient at
//!   a point)
//! - [`UpdateRule`]: how a gradient moves the parameter vector (plain
//!   descent, momentum, Nesterov acceleration)
//! - [`EpochProvider`]: which per-step objectives one pass over the training
//!   data consists of (full batch, mini-batches, per-example stochastic)
//!
//! [`GradientDescent`] drives the loop: it iterates the provider's step
//! sequence each epoch, applies the update rule, skips steps whose gradient
//! is already approximately zero, and stops on convergence (an epoch with no
//! applied step) or after `max_steps` epochs.
//!
//! # Example
//!
//! ```
//! use rust_ml_toolkit::optim::{BatchProvider, GradientDescent, Objective, PlainUpdate};
//!
//! // Minimize f(a) = a^2 from a = 5.
//! let f = Objective::new(1, |x| vec![x[0] * x[0]], |x| vec![2.0 * x[0]]);
//! let mut descent = GradientDescent::new(BatchProvider::new(f), PlainUpdate::new(), 0.1, 1000);
//! let minimum = descent.optimize(&[5.0]);
//! assert!(minimum[0].abs() < 1e-6);
//! ```

pub mod descent;
pub mod momentum;
pub mod nag;
pub mod objective;
pub mod plain;
pub mod providers;

pub use descent::{GradientDescent, GRADIENT_TOLERANCE};
pub use momentum::MomentumUpdate;
pub use nag::NagUpdate;
pub use objective::Objective;
pub use plain::PlainUpdate;
pub use providers::{BatchProvider, EpochProvider, MiniBatchProvider, ObjectiveThunk, StochasticProvider};

/// Strategy for turning a gradient into an in-place parameter update.
///
/// Implementations own whatever per-run state the strategy needs (momentum
/// rules carry a velocity vector); `reset` returns that state to its
/// starting value so the same rule instance can serve a fresh optimization
/// run. [`GradientDescent::optimize`] resets the rule both before the first
/// step and after the last, so a rule is always left clean.
///
/// Because rules carry mutable state, one rule instance must not be shared
/// between concurrent optimization runs.
pub trait UpdateRule {
    /// Mutate `point` in place, one step against `objective`.
    ///
    /// The objective is passed rather than a precomputed gradient because
    /// rules may evaluate it somewhere other than `point` (Nesterov
    /// acceleration evaluates at a look-ahead point).
    fn update(&mut self, point: &mut [f64], objective: &Objective, learning_rate: f64);

    /// Restore the rule's state for a fresh optimization run.
    fn reset(&mut self);
}

impl<U: UpdateRule + ?Sized> UpdateRule for Box<U> {
    fn update(&mut self, point: &mut [f64], objective: &Objective, learning_rate: f64) {
        (**self).update(point, objective, learning_rate);
    }

    fn reset(&mut self) {
        (**self).reset();
    }
}

impl<U: UpdateRule + ?Sized> UpdateRule for &mut U {
    fn update(&mut self, point: &mut [f64], objective: &Objective, learning_rate: f64) {
        (**self).update(point, objective, learning_rate);
    }

    fn reset(&mut self) {
        (**self).reset();
    }
}

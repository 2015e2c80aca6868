//! Perceptron trained with per-example stochastic updates.

use std::cell::RefCell;
use std::rc::Rc;

use nalgebra::DMatrix;

use crate::dataset::SupervisedDataSet;
use crate::error::ModelError;
use crate::models::{affine_scores, trained_weights, SupervisedModel};
use crate::optim::{GradientDescent, Objective, PlainUpdate, StochasticProvider};
use crate::utils::linalg::{dataset_matrices, write_row_major};
use crate::utils::SimpleRng;

const DEFAULT_LEARNING_RATE: f64 = 1.0;
const DEFAULT_MAX_STEPS: usize = 100;
const DEFAULT_SEED: u64 = 42;

/// Classic perceptron over `{-1, 1}` targets.
///
/// A step's gradient is zero when the current prediction for the example
/// already agrees in sign with its target (elementwise), and `-target · xi`
/// per output column otherwise, which is the perceptron correction step.
///
/// The sign test reads a cached prediction matrix `WᵀX` covering the whole
/// dataset. That cache is *derived* from the optimized vector, not part of
/// it, so the provider's `after_step` hook recomputes it after every
/// accepted update; the lazy step construction of
/// [`crate::optim::EpochProvider`] guarantees later steps in the same epoch
/// see the refreshed predictions.
///
/// On linearly separable data every example is eventually predicted with the
/// correct sign, all step gradients become zero, and the engine's
/// convergence probe stops the run.
pub struct Perceptron {
    weights: Option<DMatrix<f64>>,
    /// Step size handed to the engine.
    pub learning_rate: f64,
    /// Epoch cap handed to the engine.
    pub max_steps: usize,
    /// Seed for weight initialization and the stochastic visit order.
    pub seed: u64,
}

impl Default for Perceptron {
    fn default() -> Self {
        Self {
            weights: None,
            learning_rate: DEFAULT_LEARNING_RATE,
            max_steps: DEFAULT_MAX_STEPS,
            seed: DEFAULT_SEED,
        }
    }
}

impl Perceptron {
    /// Create an untrained perceptron with default hyperparameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// The fitted `(n+1) x t` weight matrix, if the model has been trained.
    pub fn weights(&self) -> Option<&DMatrix<f64>> {
        self.weights.as_ref()
    }
}

impl SupervisedModel for Perceptron {
    fn train<D: SupervisedDataSet + ?Sized>(&mut self, dataset: &D) -> Result<(), ModelError> {
        if dataset.data_points().is_empty() {
            return Err(ModelError::DatasetEmpty);
        }

        let (x, y) = dataset_matrices(dataset, true);
        let weight_rows = x.nrows();
        let weight_cols = y.nrows();
        let point_count = x.ncols();

        let mut rng = SimpleRng::new(self.seed);
        let start: Vec<f64> = (0..weight_rows * weight_cols)
            .map(|_| rng.next_f64() / 100.0 + 0.1)
            .collect();

        let cache = Rc::new(RefCell::new(DMatrix::from_row_slice(
            weight_rows,
            weight_cols,
            &start,
        )));
        let x = Rc::new(x);
        let y = Rc::new(y);
        // Predictions for the whole dataset under the current weights.
        let predictions = Rc::new(RefCell::new(cache.borrow().transpose() * x.as_ref()));

        let generator = {
            let predictions = Rc::clone(&predictions);
            let x = Rc::clone(&x);
            move |index: usize| {
                let xi: Vec<f64> = x.column(index).iter().copied().collect();
                let truth: Vec<f64> = y.column(index).iter().copied().collect();
                // Snapshot taken when the step is reached, not when the
                // epoch's sequence is built.
                let predicted: Vec<f64> =
                    predictions.borrow().column(index).iter().copied().collect();
                Objective::from_gradient(weight_rows * weight_cols, move |_| {
                    let agrees = predicted
                        .iter()
                        .zip(truth.iter())
                        .all(|(p, t)| p * t > 0.0);
                    if agrees {
                        return vec![0.0; weight_rows * weight_cols];
                    }
                    let mut gradient = vec![0.0; weight_rows * weight_cols];
                    for r in 0..weight_rows {
                        for c in 0..weight_cols {
                            gradient[r * weight_cols + c] = -truth[c] * xi[r];
                        }
                    }
                    gradient
                })
            }
        };

        let provider = StochasticProvider::new(point_count, SimpleRng::new(rng.next_u64()), generator)
            .with_after_step_hook({
                let cache = Rc::clone(&cache);
                let predictions = Rc::clone(&predictions);
                move |weights| {
                    write_row_major(&mut cache.borrow_mut(), weights);
                    *predictions.borrow_mut() = cache.borrow().transpose() * x.as_ref();
                }
            });

        let mut descent =
            GradientDescent::new(provider, PlainUpdate::new(), self.learning_rate, self.max_steps);
        let trained = descent.optimize(&start);

        self.weights = Some(DMatrix::from_row_slice(weight_rows, weight_cols, &trained));
        Ok(())
    }

    /// The sign of each output score: 1 for positive, -1 for negative, 0 for
    /// an exact zero score.
    fn predict(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        let weights = trained_weights(self.weights.as_ref())?;
        let scores = affine_scores(weights, features)?;
        Ok(scores
            .into_iter()
            .map(|s| {
                if s > 0.0 {
                    1.0
                } else if s < 0.0 {
                    -1.0
                } else {
                    0.0
                }
            })
            .collect())
    }
}

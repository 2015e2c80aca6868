//! Logistic regression trained with per-example stochastic gradient descent.

use std::cell::RefCell;
use std::rc::Rc;

use nalgebra::DMatrix;

use crate::dataset::SupervisedDataSet;
use crate::error::ModelError;
use crate::models::{affine_scores, trained_weights, SupervisedModel};
use crate::optim::{GradientDescent, Objective, PlainUpdate, StochasticProvider};
use crate::utils::activations::sigmoid;
use crate::utils::linalg::{dataset_matrices, write_row_major};
use crate::utils::SimpleRng;

const DEFAULT_LEARNING_RATE: f64 = 0.01;
const DEFAULT_MAX_STEPS: usize = 1000;
const DEFAULT_SEED: u64 = 42;

/// Logistic regression over one or more sigmoid outputs.
///
/// Weights form an `(n+1) x t` matrix (bias in the last row, one column per
/// target dimension). Training runs the gradient-descent engine with a
/// stochastic epoch provider: each step's objective is the cross-entropy
/// gradient of a single example,
///
/// ```text
/// dL/dW(column c) = (sigmoid(Wᵀxi)[c] - yi[c]) * xi
/// ```
///
/// The gradient closures read the weight matrix from a shared cache rather
/// than from the engine's flat vector; the provider's `after_step` hook
/// writes each accepted update back into that cache, so later steps in the
/// same epoch see the current weights.
///
/// [`SupervisedModel::predict`] returns the raw affine scores `Wᵀ[x, 1]`;
/// apply [`sigmoid`] and a threshold at the call site to get class
/// probabilities and decisions.
pub struct LogisticRegression {
    weights: Option<DMatrix<f64>>,
    /// Step size handed to the engine.
    pub learning_rate: f64,
    /// Epoch cap handed to the engine.
    pub max_steps: usize,
    /// Seed for weight initialization and the stochastic visit order.
    pub seed: u64,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self {
            weights: None,
            learning_rate: DEFAULT_LEARNING_RATE,
            max_steps: DEFAULT_MAX_STEPS,
            seed: DEFAULT_SEED,
        }
    }
}

impl LogisticRegression {
    /// Create an untrained model with default hyperparameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// The fitted `(n+1) x t` weight matrix, if the model has been trained.
    pub fn weights(&self) -> Option<&DMatrix<f64>> {
        self.weights.as_ref()
    }
}

impl SupervisedModel for LogisticRegression {
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
            .map(|_| rng.next_f64() + 0.01)
            .collect();

        let cache = Rc::new(RefCell::new(DMatrix::from_row_slice(
            weight_rows,
            weight_cols,
            &start,
        )));
        let x = Rc::new(x);
        let y = Rc::new(y);

        let generator = {
            let cache = Rc::clone(&cache);
            move |index: usize| {
                let xi: Vec<f64> = x.column(index).iter().copied().collect();
                let yi: Vec<f64> = y.column(index).iter().copied().collect();
                let cache = Rc::clone(&cache);
                Objective::from_gradient(weight_rows * weight_cols, move |_| {
                    let weights = cache.borrow();
                    let mut gradient = vec![0.0; weight_rows * weight_cols];
                    for c in 0..weight_cols {
                        let mut score = 0.0;
                        for r in 0..weight_rows {
                            score += weights[(r, c)] * xi[r];
                        }
                        let error = sigmoid(score) - yi[c];
                        for r in 0..weight_rows {
                            gradient[r * weight_cols + c] = error * xi[r];
                        }
                    }
                    gradient
                })
            }
        };

        let provider = StochasticProvider::new(point_count, SimpleRng::new(rng.next_u64()), generator)
            .with_after_step_hook({
                let cache = Rc::clone(&cache);
                move |weights| write_row_major(&mut cache.borrow_mut(), weights)
            });

        let mut descent =
            GradientDescent::new(provider, PlainUpdate::new(), self.learning_rate, self.max_steps);
        let trained = descent.optimize(&start);

        self.weights = Some(DMatrix::from_row_slice(weight_rows, weight_cols, &trained));
        Ok(())
    }

    fn predict(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        let weights = trained_weights(self.weights.as_ref())?;
        affine_scores(weights, features)
    }
}

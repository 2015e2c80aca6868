//! Softmax (multinomial logistic) regression trained with per-example
//! stochastic gradient descent.

use std::cell::RefCell;
use std::rc::Rc;

use nalgebra::DMatrix;

use crate::dataset::SupervisedDataSet;
use crate::error::ModelError;
use crate::models::{affine_scores, trained_weights, SupervisedModel};
use crate::optim::{GradientDescent, Objective, PlainUpdate, StochasticProvider};
use crate::utils::activations::softmax;
use crate::utils::linalg::{dataset_matrices, write_row_major};
use crate::utils::SimpleRng;

const DEFAULT_LEARNING_RATE: f64 = 0.05;
const DEFAULT_MAX_STEPS: usize = 1000;
const DEFAULT_SEED: u64 = 42;

/// Softmax regression over one-hot target vectors.
///
/// Weights form an `(n+1) x t` matrix with one column per class. Each
/// stochastic step descends the cross-entropy gradient of a single example,
/// the outer product of its features with its probability error:
///
/// ```text
/// dL/dW = xi ⊗ (softmax(Wᵀxi) - yi)
/// ```
///
/// As in [`crate::models::LogisticRegression`], gradient closures read a
/// shared weight cache that the provider's `after_step` hook keeps in sync
/// with the engine's parameter vector.
///
/// [`SupervisedModel::predict`] returns the class probability vector.
pub struct SoftmaxRegression {
    weights: Option<DMatrix<f64>>,
    /// Step size handed to the engine.
    pub learning_rate: f64,
    /// Epoch cap handed to the engine.
    pub max_steps: usize,
    /// Seed for the stochastic visit order.
    pub seed: u64,
}

impl Default for SoftmaxRegression {
    fn default() -> Self {
        Self {
            weights: None,
            learning_rate: DEFAULT_LEARNING_RATE,
            max_steps: DEFAULT_MAX_STEPS,
            seed: DEFAULT_SEED,
        }
    }
}

impl SoftmaxRegression {
    /// Create an untrained model with default hyperparameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// The fitted `(n+1) x t` weight matrix, if the model has been trained.
    pub fn weights(&self) -> Option<&DMatrix<f64>> {
        self.weights.as_ref()
    }
}

impl SupervisedModel for SoftmaxRegression {
    fn train<D: SupervisedDataSet + ?Sized>(&mut self, dataset: &D) -> Result<(), ModelError> {
        if dataset.data_points().is_empty() {
            return Err(ModelError::DatasetEmpty);
        }

        let (x, y) = dataset_matrices(dataset, true);
        let weight_rows = x.nrows();
        let weight_cols = y.nrows();
        let point_count = x.ncols();

        // Deterministic ramp start; the stochastic visit order supplies the
        // symmetry breaking.
        let start: Vec<f64> = (0..weight_rows * weight_cols)
            .map(|i| (i + 1) as f64)
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
                    let mut scores = vec![0.0; weight_cols];
                    for (c, score) in scores.iter_mut().enumerate() {
                        for r in 0..weight_rows {
                            *score += weights[(r, c)] * xi[r];
                        }
                    }
                    let probabilities = softmax(&scores);

                    let mut gradient = vec![0.0; weight_rows * weight_cols];
                    for r in 0..weight_rows {
                        for c in 0..weight_cols {
                            gradient[r * weight_cols + c] = xi[r] * (probabilities[c] - yi[c]);
                        }
                    }
                    gradient
                })
            }
        };

        let provider = StochasticProvider::new(point_count, SimpleRng::new(self.seed), generator)
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

    /// Class probabilities for one feature vector.
    fn predict(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        let weights = trained_weights(self.weights.as_ref())?;
        let scores = affine_scores(weights, features)?;
        Ok(softmax(&scores))
    }
}

//! Linear regression via the normal equations.

use nalgebra::DMatrix;

use crate::dataset::SupervisedDataSet;
use crate::error::ModelError;
use crate::models::{affine_scores, trained_weights, SupervisedModel};
use crate::utils::linalg::dataset_matrices;

/// Least-squares linear regression solved in closed form.
///
/// Training builds the design matrix `X` (one row per point, plus a constant
/// bias column) and solves `(XᵀX) w = Xᵀy` by LU decomposition. Each target
/// dimension gets its own weight column, so multi-output regression comes
/// for free.
///
/// A singular system (duplicated or linearly dependent feature columns,
/// fewer points than features) surfaces as
/// [`ModelError::MaybeInaccurate`].
#[derive(Debug, Default)]
pub struct LinearRegression {
    weights: Option<DMatrix<f64>>,
}

impl LinearRegression {
    /// Create an untrained model.
    pub fn new() -> Self {
        Self::default()
    }

    /// The fitted `(n+1) x t` weight matrix (bias in the last row), if the
    /// model has been trained.
    pub fn weights(&self) -> Option<&DMatrix<f64>> {
        self.weights.as_ref()
    }
}

impl SupervisedModel for LinearRegression {
    fn train<D: SupervisedDataSet + ?Sized>(&mut self, dataset: &D) -> Result<(), ModelError> {
        if dataset.data_points().is_empty() {
            return Err(ModelError::DatasetEmpty);
        }

        // x is Xᵀ ((n+1) x m), y is Yᵀ (t x m).
        let (x, y) = dataset_matrices(dataset, true);
        let lhs = &x * x.transpose();
        let rhs = &x * y.transpose();
        let weights = lhs.lu().solve(&rhs).ok_or(ModelError::MaybeInaccurate)?;

        self.weights = Some(weights);
        Ok(())
    }

    fn predict(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        let weights = trained_weights(self.weights.as_ref())?;
        affine_scores(weights, features)
    }
}

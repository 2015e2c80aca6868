//! Model implementations and the model-level traits.
//!
//! Gradient-trained models (logistic regression, softmax regression, the
//! perceptron) are thin layers over the [`crate::optim`] engine: each
//! supplies per-step gradient closures, an epoch provider, and the lifecycle
//! hooks that keep its weight-matrix cache in sync with the engine's flat
//! parameter vector. Linear regression solves its normal equations in closed
//! form, and k-nearest-neighbors and k-means do not use the engine at all.

use nalgebra::{DMatrix, DVector};

use crate::dataset::{SupervisedDataSet, UnsupervisedDataSet};
use crate::error::ModelError;

pub mod kmeans;
pub mod knn;
pub mod linear_regression;
pub mod logistic_regression;
pub mod perceptron;
pub mod softmax;

pub use kmeans::{Cluster, KMeans};
pub use knn::{KNearestNeighbors, KnnWeighting};
pub use linear_regression::LinearRegression;
pub use logistic_regression::LogisticRegression;
pub use perceptron::Perceptron;
pub use softmax::SoftmaxRegression;

/// A model trained on feature/target pairs that predicts targets for new
/// feature vectors.
pub trait SupervisedModel {
    /// Fit the model to a dataset.
    fn train<D: SupervisedDataSet + ?Sized>(&mut self, dataset: &D) -> Result<(), ModelError>;

    /// Predict the target vector for one feature vector.
    fn predict(&self, features: &[f64]) -> Result<Vec<f64>, ModelError>;
}

/// A model that groups unlabeled data points into clusters.
pub trait UnsupervisedModel {
    /// Partition the dataset's points into clusters.
    fn clustering<'a, D: UnsupervisedDataSet + ?Sized>(
        &mut self,
        dataset: &'a D,
    ) -> Result<Vec<Cluster<'a, D::Point>>, ModelError>;
}

/// Weights of a trained linear model, or the not-trained error.
pub(crate) fn trained_weights(weights: Option<&DMatrix<f64>>) -> Result<&DMatrix<f64>, ModelError> {
    weights.ok_or_else(|| {
        ModelError::IncompatibleDataAndModel("model has not been trained yet".to_string())
    })
}

/// `Wᵀ · [features, 1]` for an `(n+1) x t` weight matrix, checking the
/// feature count against the model's expectation.
pub(crate) fn affine_scores(weights: &DMatrix<f64>, features: &[f64]) -> Result<Vec<f64>, ModelError> {
    let expected = weights.nrows() - 1;
    if features.len() != expected {
        return Err(ModelError::IncompatibleDataAndModel(format!(
            "model expects {} features but got {} features",
            expected,
            features.len()
        )));
    }

    let mut augmented = features.to_vec();
    augmented.push(1.0);
    let scores = weights.transpose() * DVector::from_vec(augmented);
    Ok(scores.iter().copied().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affine_scores_appends_bias() {
        // One feature, two outputs; second weight row is the bias.
        let weights = DMatrix::from_row_slice(2, 2, &[2.0, -1.0, 0.5, 3.0]);
        let scores = affine_scores(&weights, &[4.0]).unwrap();
        assert_eq!(scores, vec![8.5, -1.0]);
    }

    #[test]
    fn test_affine_scores_rejects_wrong_feature_count() {
        let weights = DMatrix::from_row_slice(3, 1, &[1.0, 1.0, 1.0]);
        let err = affine_scores(&weights, &[1.0]).unwrap_err();
        assert_eq!(
            err,
            ModelError::IncompatibleDataAndModel(
                "model expects 2 features but got 1 features".to_string()
            )
        );
    }

    #[test]
    fn test_trained_weights_rejects_untrained_model() {
        let err = trained_weights(None).unwrap_err();
        assert!(matches!(err, ModelError::IncompatibleDataAndModel(_)));
    }
}

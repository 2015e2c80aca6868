//! Linear-algebra glue between datasets, weight matrices, and the flat
//! parameter vectors the optimization engine works on.
//!
//! Gradient-trained models keep their weights as an `(n+1) x t` matrix (one
//! column per output) but the engine only sees a flat vector; the flatten /
//! write-back pair here fixes the layout to row-major so both sides agree.

use nalgebra::DMatrix;

use crate::dataset::{SupervisedDataPoint, SupervisedDataSet};

/// Convert a supervised dataset into feature and target matrices with one
/// column per data point.
///
/// The feature matrix is `n x m` (`(n+1) x m` when `bias_column` is set, the
/// extra row holding the constant 1), the target matrix `t x m`.
///
/// # Panics
///
/// Panics on an empty dataset, or when a data point reports a feature or
/// target vector whose length differs from the first point's.
pub fn dataset_matrices<D>(dataset: &D, bias_column: bool) -> (DMatrix<f64>, DMatrix<f64>)
where
    D: SupervisedDataSet + ?Sized,
{
    let points = dataset.data_points();
    assert!(!points.is_empty(), "cannot build matrices from an empty dataset");

    let features: Vec<Vec<f64>> = points.iter().map(|p| p.features()).collect();
    let targets: Vec<Vec<f64>> = points.iter().map(|p| p.target()).collect();
    let feature_count = features[0].len();
    let target_count = targets[0].len();
    for (f, t) in features.iter().zip(targets.iter()) {
        assert_eq!(f.len(), feature_count, "ragged feature vectors in dataset");
        assert_eq!(t.len(), target_count, "ragged target vectors in dataset");
    }

    let rows = if bias_column { feature_count + 1 } else { feature_count };
    let x = DMatrix::from_fn(rows, points.len(), |r, c| {
        if bias_column && r == feature_count {
            1.0
        } else {
            features[c][r]
        }
    });
    let y = DMatrix::from_fn(target_count, points.len(), |r, c| targets[c][r]);
    (x, y)
}

/// Flatten a matrix into a row-major vector.
pub fn flatten_row_major(m: &DMatrix<f64>) -> Vec<f64> {
    let mut out = Vec::with_capacity(m.nrows() * m.ncols());
    for r in 0..m.nrows() {
        for c in 0..m.ncols() {
            out.push(m[(r, c)]);
        }
    }
    out
}

/// Write a row-major vector back into a matrix of matching size.
///
/// # Panics
///
/// Panics when `data` does not hold exactly `nrows * ncols` elements.
pub fn write_row_major(m: &mut DMatrix<f64>, data: &[f64]) {
    assert_eq!(
        data.len(),
        m.nrows() * m.ncols(),
        "flat vector length does not match matrix size"
    );
    for r in 0..m.nrows() {
        for c in 0..m.ncols() {
            m[(r, c)] = data[r * m.ncols() + c];
        }
    }
}

/// p-norm distance between two points: `(sum |a_i - b_i|^p)^(1/p)`.
///
/// # Panics
///
/// Panics when the points have different lengths or `p` is not positive.
pub fn p_norm_distance(a: &[f64], b: &[f64], p: f64) -> f64 {
    assert_eq!(a.len(), b.len(), "distance between points of different dimension");
    assert!(p > 0.0, "p-norm requires a positive p");

    let sum: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs().powf(p))
        .sum();
    sum.powf(1.0 / p)
}

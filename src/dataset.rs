//! Data-point and dataset abstractions consumed by the models.
//!
//! Models are generic over these traits so callers can train directly on
//! their own domain types (a survey answer, a pixel, a sensor reading)
//! without converting to an intermediate representation first. The
//! [`LabeledPoint`] and [`UnlabeledPoint`] value types cover the common case
//! of data that is already plain vectors.

/// A data point with features and a known target, for supervised training.
///
/// Both accessors return owned vectors so implementations may compute their
/// representation on demand.
pub trait SupervisedDataPoint {
    /// Feature vector of this point.
    fn features(&self) -> Vec<f64>;

    /// Target vector of this point (one element per output dimension).
    fn target(&self) -> Vec<f64>;
}

/// An ordered collection of supervised data points.
pub trait SupervisedDataSet {
    /// The concrete data-point type stored in this dataset.
    type Point: SupervisedDataPoint;

    /// All data points, in a stable order.
    fn data_points(&self) -> &[Self::Point];
}

/// A data point with features only, for unsupervised learning.
pub trait UnsupervisedDataPoint {
    /// Feature vector of this point.
    fn features(&self) -> Vec<f64>;
}

/// An ordered collection of unsupervised data points.
pub trait UnsupervisedDataSet {
    /// The concrete data-point type stored in this dataset.
    type Point: UnsupervisedDataPoint;

    /// All data points, in a stable order.
    fn data_points(&self) -> &[Self::Point];
}

impl<P: SupervisedDataPoint> SupervisedDataSet for Vec<P> {
    type Point = P;

    fn data_points(&self) -> &[P] {
        self
    }
}

impl<P: SupervisedDataPoint> SupervisedDataSet for [P] {
    type Point = P;

    fn data_points(&self) -> &[P] {
        self
    }
}

impl<P: UnsupervisedDataPoint> UnsupervisedDataSet for Vec<P> {
    type Point = P;

    fn data_points(&self) -> &[P] {
        self
    }
}

impl<P: UnsupervisedDataPoint> UnsupervisedDataSet for [P] {
    type Point = P;

    fn data_points(&self) -> &[P] {
        self
    }
}

/// A plain feature/target pair.
///
/// # Examples
///
/// ```
/// use rust_ml_toolkit::dataset::{LabeledPoint, SupervisedDataSet};
///
/// let data = vec![LabeledPoint::new(vec![1.0, 2.0], vec![0.5])];
/// assert_eq!(data.data_points().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledPoint {
    features: Vec<f64>,
    target: Vec<f64>,
}

impl LabeledPoint {
    /// Create a labeled point from its feature and target vectors.
    pub fn new(features: Vec<f64>, target: Vec<f64>) -> Self {
        Self { features, target }
    }
}

impl SupervisedDataPoint for LabeledPoint {
    fn features(&self) -> Vec<f64> {
        self.features.clone()
    }

    fn target(&self) -> Vec<f64> {
        self.target.clone()
    }
}

/// A plain feature vector without a target.
#[derive(Debug, Clone, PartialEq)]
pub struct UnlabeledPoint {
    features: Vec<f64>,
}

impl UnlabeledPoint {
    /// Create an unlabeled point from its feature vector.
    pub fn new(features: Vec<f64>) -> Self {
        Self { features }
    }
}

impl UnsupervisedDataPoint for UnlabeledPoint {
    fn features(&self) -> Vec<f64> {
        self.features.clone()
    }
}

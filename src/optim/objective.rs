//! Objective functions for the gradient-descent engine.
//!
//! An [`Objective`] bundles a point-to-gradient mapping (and optionally the
//! forward point-to-value mapping) behind a fixed input dimensionality.
//! Gradients are supplied by the caller, exact or approximate; the engine
//! performs no differentiation of its own and never calls [`Objective::evaluate`].

use std::rc::Rc;

type PointFn = dyn Fn(&[f64]) -> Vec<f64>;

/// An immutable objective-function bundle.
///
/// The closures are stored reference-counted, so cloning an `Objective` is
/// cheap and shares the underlying functions. Both closures must be
/// referentially transparent in the evaluation point: the engine may call
/// `gradient` any number of times at the same point and expects the same
/// answer (closures may still read caches that the *provider* updates
/// between steps).
///
/// # Examples
///
/// ```
/// use rust_ml_toolkit::optim::Objective;
///
/// // f(a) = a^2 with its exact gradient.
/// let f = Objective::new(1, |x| vec![x[0] * x[0]], |x| vec![2.0 * x[0]]);
/// assert_eq!(f.evaluate(&[3.0]), vec![9.0]);
/// assert_eq!(f.gradient(&[3.0]), vec![6.0]);
/// ```
#[derive(Clone)]
pub struct Objective {
    input_size: usize,
    mapper: Option<Rc<PointFn>>,
    gradient: Rc<PointFn>,
}

impl Objective {
    /// Create an objective from its forward mapping and gradient.
    pub fn new<M, G>(input_size: usize, mapper: M, gradient: G) -> Self
    where
        M: Fn(&[f64]) -> Vec<f64> + 'static,
        G: Fn(&[f64]) -> Vec<f64> + 'static,
    {
        Self {
            input_size,
            mapper: Some(Rc::new(mapper)),
            gradient: Rc::new(gradient),
        }
    }

    /// Create an objective from a gradient alone.
    ///
    /// Model training only needs gradients; the forward mapping is for
    /// callers that want to inspect objective values.
    pub fn from_gradient<G>(input_size: usize, gradient: G) -> Self
    where
        G: Fn(&[f64]) -> Vec<f64> + 'static,
    {
        Self {
            input_size,
            mapper: None,
            gradient: Rc::new(gradient),
        }
    }

    /// Dimensionality of the points this objective is evaluated at.
    pub fn input_size(&self) -> usize {
        self.input_size
    }

    /// Forward computation at `point`.
    ///
    /// # Panics
    ///
    /// Panics when `point` has the wrong length, or when the objective was
    /// built with [`Objective::from_gradient`] and has no forward mapping.
    pub fn evaluate(&self, point: &[f64]) -> Vec<f64> {
        assert_eq!(
            point.len(),
            self.input_size,
            "objective input size mismatch: expected {}, got {}",
            self.input_size,
            point.len()
        );
        match &self.mapper {
            Some(mapper) => mapper(point),
            None => panic!("objective has no forward mapping"),
        }
    }

    /// Gradient of the loss with respect to `point`, same length as `point`.
    ///
    /// # Panics
    ///
    /// Panics when `point` has the wrong length.
    pub fn gradient(&self, point: &[f64]) -> Vec<f64> {
        assert_eq!(
            point.len(),
            self.input_size,
            "objective input size mismatch: expected {}, got {}",
            self.input_size,
            point.len()
        );
        (self.gradient)(point)
    }
}

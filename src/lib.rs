//! Rust ML Toolkit
//!
//! A small machine-learning toolkit: a family of classic model trainers
//! (linear regression, logistic regression, perceptron, softmax regression,
//! k-nearest-neighbors, k-means) built on a shared gradient-descent
//! optimization engine.
//!
//! # Modules
//!
//! - `optim`: the gradient-descent engine (objectives, update rules, epoch
//!   providers, and the driving loop)
//! - `models`: model implementations and the supervised/unsupervised model traits
//! - `dataset`: data-point and dataset abstractions consumed by the models
//! - `config`: training configuration loaded from JSON
//! - `metrics`: evaluation helpers (accuracy)
//! - `utils`: shared utilities (RNG, activation functions, linear algebra glue)

pub mod config;
pub mod dataset;
pub mod error;
pub mod metrics;
pub mod models;
pub mod optim;
pub mod utils;

pub use error::ModelError;

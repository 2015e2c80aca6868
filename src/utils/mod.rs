//! Shared utilities for the toolkit
//!
//! This module provides the seeded random number generator, activation
//! functions, and the linear-algebra glue between datasets, weight matrices,
//! and the flat parameter vectors the optimization engine works on.

pub mod activations;
pub mod linalg;
pub mod rng;

pub use rng::SimpleRng;

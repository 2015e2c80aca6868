//! k-nearest-neighbors classification.

use std::collections::HashMap;

use crate::dataset::{SupervisedDataPoint, SupervisedDataSet};
use crate::error::ModelError;
use crate::models::SupervisedModel;
use crate::utils::linalg::p_norm_distance;

/// How a neighbor's vote is weighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnnWeighting {
    /// Every neighbor counts once.
    MajorityVoting,
    /// A neighbor's vote counts its p-norm distance from the query point.
    DistanceWeighted,
}

/// k-nearest-neighbors: training memorizes the dataset, prediction votes
/// among the `k` closest stored points.
///
/// Distances use the p-norm selected by `norm` (2 for Euclidean). Votes are
/// tallied per target dimension, so vector-valued labels vote independently
/// per component; ties keep the earliest label to reach the winning tally.
pub struct KNearestNeighbors {
    memory: Vec<(Vec<f64>, Vec<f64>)>,
    /// Number of neighbors consulted per prediction.
    pub k: usize,
    /// The p of the p-norm used as the distance.
    pub norm: f64,
    /// Vote weighting strategy.
    pub weighting: KnnWeighting,
}

impl KNearestNeighbors {
    /// Create a model consulting `k` neighbors under the Euclidean norm
    /// with majority voting.
    pub fn new(k: usize) -> Self {
        Self {
            memory: Vec::new(),
            k,
            norm: 2.0,
            weighting: KnnWeighting::MajorityVoting,
        }
    }

    /// Number of memorized data points.
    pub fn len(&self) -> usize {
        self.memory.len()
    }

    /// Whether the model has memorized any data yet.
    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }
}

impl SupervisedModel for KNearestNeighbors {
    /// Memorize the dataset. Training again adds to the memory rather than
    /// replacing it.
    fn train<D: SupervisedDataSet + ?Sized>(&mut self, dataset: &D) -> Result<(), ModelError> {
        let points = dataset.data_points();
        if points.is_empty() {
            return Err(ModelError::DatasetEmpty);
        }
        self.memory
            .extend(points.iter().map(|p| (p.features(), p.target())));
        Ok(())
    }

    fn predict(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        if self.memory.is_empty() {
            return Err(ModelError::IncompatibleDataAndModel(
                "model has not been trained yet".to_string(),
            ));
        }
        let feature_count = self.memory[0].0.len();
        if features.len() != feature_count {
            return Err(ModelError::IncompatibleDataAndModel(format!(
                "model expects {} features but got {} features",
                feature_count,
                features.len()
            )));
        }
        if self.k == 0 || self.k > self.memory.len() {
            return Err(ModelError::IncompatibleDataAndModel(format!(
                "cannot take {} neighbors from {} stored data points",
                self.k,
                self.memory.len()
            )));
        }

        let mut by_distance: Vec<(f64, usize)> = self
            .memory
            .iter()
            .enumerate()
            .map(|(index, (neighbor, _))| (p_norm_distance(features, neighbor, self.norm), index))
            .collect();
        by_distance.sort_by(|a, b| a.0.total_cmp(&b.0));
        let neighbors = &by_distance[..self.k];

        let mut chosen = self.memory[neighbors[0].1].1.clone();
        let target_count = chosen.len();
        let mut tallies: Vec<HashMap<u64, f64>> = vec![HashMap::new(); target_count];
        let mut best = vec![0.0; target_count];

        for &(_, index) in neighbors {
            let (neighbor_features, neighbor_target) = &self.memory[index];
            let weight = match self.weighting {
                KnnWeighting::MajorityVoting => 1.0,
                KnnWeighting::DistanceWeighted => {
                    p_norm_distance(features, neighbor_features, self.norm)
                }
            };
            for d in 0..target_count {
                let label = neighbor_target[d];
                let tally = tallies[d].entry(label.to_bits()).or_insert(0.0);
                *tally += weight;
                if *tally > best[d] {
                    best[d] = *tally;
                    chosen[d] = label;
                }
            }
        }

        Ok(chosen)
    }
}

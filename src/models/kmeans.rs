//! k-means clustering.

use crate::dataset::{UnsupervisedDataPoint, UnsupervisedDataSet};
use crate::error::ModelError;
use crate::models::UnsupervisedModel;
use crate::utils::linalg::p_norm_distance;
use crate::utils::SimpleRng;

// Centers closer than this, elementwise, count as unchanged.
const CENTER_TOLERANCE: f64 = 1e-7;

/// One cluster of a [`KMeans`] run: a center and the dataset points assigned
/// to it.
pub struct Cluster<'a, P> {
    center: Vec<f64>,
    members: Vec<&'a P>,
}

impl<'a, P> Cluster<'a, P> {
    /// The cluster's center.
    pub fn center(&self) -> &[f64] {
        &self.center
    }

    /// The dataset points assigned to this cluster.
    pub fn members(&self) -> &[&'a P] {
        &self.members
    }
}

/// Lloyd's k-means.
///
/// Centers are initialized to `cluster_count` distinct data points drawn
/// from a seeded permutation, then assignment and recentering alternate
/// until the old and new center sets agree within an absolute tolerance.
/// A cluster that loses all members keeps its previous center.
pub struct KMeans {
    /// Number of clusters to form.
    pub cluster_count: usize,
    rng: SimpleRng,
}

impl KMeans {
    /// Create a clusterer; `seed` fixes the center initialization.
    pub fn new(cluster_count: usize, seed: u64) -> Self {
        Self {
            cluster_count,
            rng: SimpleRng::new(seed),
        }
    }
}

impl UnsupervisedModel for KMeans {
    fn clustering<'a, D: UnsupervisedDataSet + ?Sized>(
        &mut self,
        dataset: &'a D,
    ) -> Result<Vec<Cluster<'a, D::Point>>, ModelError> {
        let points = dataset.data_points();
        if points.is_empty() {
            return Err(ModelError::DatasetEmpty);
        }
        if self.cluster_count == 0 || self.cluster_count > points.len() {
            return Err(ModelError::IncompatibleDataAndModel(format!(
                "cannot split {} data points into {} clusters",
                points.len(),
                self.cluster_count
            )));
        }

        let features: Vec<Vec<f64>> = points.iter().map(|p| p.features()).collect();
        let order = self.rng.permutation(points.len());
        let mut centers: Vec<Vec<f64>> = order[..self.cluster_count]
            .iter()
            .map(|&i| features[i].clone())
            .collect();
        let mut assignments: Vec<Vec<usize>> = vec![Vec::new(); self.cluster_count];

        loop {
            let old_centers = centers.clone();

            for members in assignments.iter_mut() {
                members.clear();
            }
            for (index, point) in features.iter().enumerate() {
                assignments[nearest_center(point, &centers)].push(index);
            }

            for (center, members) in centers.iter_mut().zip(assignments.iter()) {
                if members.is_empty() {
                    continue;
                }
                let mut sum = vec![0.0; center.len()];
                for &index in members {
                    for (s, v) in sum.iter_mut().zip(features[index].iter()) {
                        *s += v;
                    }
                }
                for s in sum.iter_mut() {
                    *s /= members.len() as f64;
                }
                *center = sum;
            }

            if same_center_set(&centers, &old_centers) {
                break;
            }
        }

        Ok(centers
            .into_iter()
            .zip(assignments)
            .map(|(center, members)| Cluster {
                center,
                members: members.into_iter().map(|index| &points[index]).collect(),
            })
            .collect())
    }
}

fn nearest_center(point: &[f64], centers: &[Vec<f64>]) -> usize {
    let mut best = 0;
    let mut best_distance = p_norm_distance(point, &centers[0], 2.0);
    for (index, center) in centers.iter().enumerate().skip(1) {
        let distance = p_norm_distance(point, center, 2.0);
        if distance < best_distance {
            best = index;
            best_distance = distance;
        }
    }
    best
}

fn same_center(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b.iter())
            .all(|(x, y)| (x - y).abs() <= CENTER_TOLERANCE)
}

fn center_inside_set(center: &[f64], set: &[Vec<f64>]) -> bool {
    set.iter().any(|other| same_center(center, other))
}

// Set-wise comparison: center identity does not matter, only that the two
// collections describe the same locations.
fn same_center_set(a: &[Vec<f64>], b: &[Vec<f64>]) -> bool {
    a.len() == b.len()
        && a.iter().all(|center| center_inside_set(center, b))
        && b.iter().all(|center| center_inside_set(center, a))
}

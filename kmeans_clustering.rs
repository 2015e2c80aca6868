use rust_ml_toolkit::dataset::UnlabeledPoint;
use rust_ml_toolkit::models::{KMeans, UnsupervisedModel};
use rust_ml_toolkit::utils::SimpleRng;

// Demo: cluster synthetic 2-D blobs with k-means.
const CLUSTER_COUNT: usize = 3;
const POINTS_PER_BLOB: usize = 40;
const SEED: u64 = 42;

fn synthetic_blobs(rng: &mut SimpleRng) -> Vec<UnlabeledPoint> {
    let blob_centers = [(0.0, 0.0), (8.0, 8.0), (-7.0, 6.0)];
    let mut points = Vec::with_capacity(CLUSTER_COUNT * POINTS_PER_BLOB);
    for &(cx, cy) in &blob_centers {
        for _ in 0..POINTS_PER_BLOB {
            let x = cx + rng.gen_range_f64(-1.0, 1.0);
            let y = cy + rng.gen_range_f64(-1.0, 1.0);
            points.push(UnlabeledPoint::new(vec![x, y]));
        }
    }
    points
}

fn main() {
    let mut rng = SimpleRng::new(SEED);
    let points = synthetic_blobs(&mut rng);

    let mut model = KMeans::new(CLUSTER_COUNT, SEED);
    let clusters = model.clustering(&points).expect("clustering failed");

    for (index, cluster) in clusters.iter().enumerate() {
        let center = cluster.center();
        println!(
            "cluster {}: center = ({:.2}, {:.2}), members = {}",
            index,
            center[0],
            center[1],
            cluster.members().len()
        );
    }
}

//! Provider behavior observed through the full optimization loop.

use std::cell::RefCell;
use std::rc::Rc;

use rust_ml_toolkit::optim::{
    EpochProvider, GradientDescent, MiniBatchProvider, Objective, PlainUpdate, StochasticProvider,
};
use rust_ml_toolkit::utils::SimpleRng;

#[test]
fn test_mini_batch_partitions_ten_points_into_four_windows() {
    let windows = Rc::new(RefCell::new(Vec::new()));
    let record = Rc::clone(&windows);
    let provider = MiniBatchProvider::new(10, 3, move |indices| {
        record.borrow_mut().push(indices.to_vec());
        Objective::from_gradient(1, |_| vec![1.0])
    });

    let mut descent = GradientDescent::new(provider, PlainUpdate::new(), 0.1, 1);
    descent.optimize(&[0.0]);

    // The dimensionality probe builds the first window once more up front.
    let seen = windows.borrow();
    assert_eq!(seen[0], vec![0, 1, 2]);
    assert_eq!(
        seen[1..],
        [vec![0, 1, 2], vec![3, 4, 5], vec![6, 7, 8], vec![9]]
    );
}

#[test]
fn test_stochastic_epochs_visit_every_example_once() {
    let visits = Rc::new(RefCell::new(Vec::new()));
    let record = Rc::clone(&visits);
    let provider = StochasticProvider::new(6, SimpleRng::new(11), move |index| {
        record.borrow_mut().push(index);
        Objective::from_gradient(1, |_| vec![1.0])
    });

    let epochs = 3;
    let mut descent = GradientDescent::new(provider, PlainUpdate::new(), 0.01, epochs);
    descent.optimize(&[0.0]);

    let seen = visits.borrow();
    // One probe visit, then 6 per epoch.
    assert_eq!(seen.len(), 1 + 6 * epochs);
    for epoch in 0..epochs {
        let mut window: Vec<usize> = seen[1 + epoch * 6..1 + (epoch + 1) * 6].to_vec();
        window.sort();
        assert_eq!(window, (0..6).collect::<Vec<_>>());
    }
}

#[test]
fn test_after_step_mutations_feed_later_steps_in_the_same_epoch() {
    // The generator reads a cache that after_step bumps; laziness means the
    // second and third steps of an epoch must observe the bumped values.
    let cache = Rc::new(RefCell::new(0.0));
    let observed = Rc::new(RefCell::new(Vec::new()));

    let generator_cache = Rc::clone(&cache);
    let record = Rc::clone(&observed);
    let provider = MiniBatchProvider::new(3, 1, move |_| {
        record.borrow_mut().push(*generator_cache.borrow());
        Objective::from_gradient(1, |_| vec![1.0])
    })
    .with_after_step_hook({
        let cache = Rc::clone(&cache);
        move |_| *cache.borrow_mut() += 1.0
    });

    let mut descent = GradientDescent::new(provider, PlainUpdate::new(), 0.1, 1);
    descent.optimize(&[0.0]);

    // Probe sees 0, then the epoch's three steps see 0, 1, 2.
    assert_eq!(*observed.borrow(), vec![0.0, 0.0, 1.0, 2.0]);
}

#[test]
fn test_empty_provider_returns_start_point() {
    let provider = StochasticProvider::new(0, SimpleRng::new(1), |_| {
        Objective::from_gradient(1, |_| vec![1.0])
    });
    let mut descent = GradientDescent::new(provider, PlainUpdate::new(), 0.1, 100);
    assert_eq!(descent.optimize(&[7.0]), vec![7.0]);
}

#[test]
fn test_step_sequences_are_rederived_every_epoch() {
    // Two direct calls against the same provider give fresh thunks, and the
    // stochastic provider reshuffles between them.
    let provider = StochasticProvider::new(32, SimpleRng::new(5), |index| {
        Objective::from_gradient(1, move |_| vec![index as f64])
    });

    let first: Vec<f64> = provider
        .step_objectives()
        .iter()
        .map(|thunk| thunk().gradient(&[0.0])[0])
        .collect();
    let second: Vec<f64> = provider
        .step_objectives()
        .iter()
        .map(|thunk| thunk().gradient(&[0.0])[0])
        .collect();
    assert_ne!(first, second);

    let mut sorted = second.clone();
    sorted.sort_by(f64::total_cmp);
    assert_eq!(sorted, (0..32).map(|i| i as f64).collect::<Vec<_>>());
}

//! Epoch providers: how one pass over the training data is split into
//! per-step objectives.
//!
//! A provider yields, for each epoch, an ordered sequence of *thunks* that
//! build the step objectives on demand. Laziness is part of the contract:
//! a step's objective must be constructed only when the optimizer reaches
//! that step, so `after_step` mutations to caches captured by the generator
//! (a refreshed prediction matrix, say) are visible to the steps that
//! follow within the same epoch.

use std::cell::RefCell;

use crate::optim::Objective;
use crate::utils::SimpleRng;

/// A lazily-constructed step objective.
pub type ObjectiveThunk<'a> = Box<dyn Fn() -> Objective + 'a>;

/// Strategy producing the per-step objectives for one epoch, plus lifecycle
/// callbacks around the optimizer's steps.
///
/// `step_objectives` is called afresh at every epoch, and implementations
/// re-derive their step sequence each time (mini-batch re-partitions,
/// stochastic re-permutes). The callbacks default to no-ops.
pub trait EpochProvider {
    /// The ordered step sequence for one epoch.
    fn step_objectives(&self) -> Vec<ObjectiveThunk<'_>>;

    /// Called after every applied update with the current point.
    fn after_step(&self, _point: &[f64]) {}

    /// Called at the end of every epoch in which at least one update was
    /// applied, with the current point.
    fn on_epoch_end(&self, _point: &[f64]) {}
}

/// Full-batch provider: one step per epoch against the whole-dataset
/// objective.
///
/// # Examples
///
/// ```
/// use rust_ml_toolkit::optim::{BatchProvider, EpochProvider, Objective};
///
/// let f = Objective::from_gradient(1, |x| vec![2.0 * x[0]]);
/// let provider = BatchProvider::new(f);
/// let steps = provider.step_objectives();
/// assert_eq!(steps.len(), 1);
/// assert_eq!(steps[0]().gradient(&[3.0]), vec![6.0]);
/// ```
pub struct BatchProvider {
    objective: Objective,
}

impl BatchProvider {
    /// Wrap the whole-dataset objective.
    pub fn new(objective: Objective) -> Self {
        Self { objective }
    }
}

impl EpochProvider for BatchProvider {
    fn step_objectives(&self) -> Vec<ObjectiveThunk<'_>> {
        vec![Box::new(move || self.objective.clone())]
    }
}

/// Mini-batch provider: steps are contiguous index windows of `batch_size`
/// over `[0, total_size)`, the final window truncated to the remainder.
///
/// The caller's generator receives each window's indices and builds the
/// step's objective; it typically captures the dataset and a shared weight
/// cache.
pub struct MiniBatchProvider {
    total_size: usize,
    batch_size: usize,
    generator: Box<dyn Fn(&[usize]) -> Objective>,
    after_step_hook: Option<Box<dyn Fn(&[f64])>>,
    epoch_end_hook: Option<Box<dyn Fn(&[f64])>>,
}

impl MiniBatchProvider {
    /// Create a provider over `total_size` data indices in windows of
    /// `batch_size`.
    ///
    /// # Panics
    ///
    /// Panics when `batch_size` is zero.
    pub fn new<G>(total_size: usize, batch_size: usize, generator: G) -> Self
    where
        G: Fn(&[usize]) -> Objective + 'static,
    {
        assert!(batch_size > 0, "mini-batch size must be at least 1");
        Self {
            total_size,
            batch_size,
            generator: Box::new(generator),
            after_step_hook: None,
            epoch_end_hook: None,
        }
    }

    /// Install a hook invoked after every applied update.
    pub fn with_after_step_hook<H>(mut self, hook: H) -> Self
    where
        H: Fn(&[f64]) + 'static,
    {
        self.after_step_hook = Some(Box::new(hook));
        self
    }

    /// Install a hook invoked at the end of every productive epoch.
    pub fn with_epoch_end_hook<H>(mut self, hook: H) -> Self
    where
        H: Fn(&[f64]) + 'static,
    {
        self.epoch_end_hook = Some(Box::new(hook));
        self
    }
}

impl EpochProvider for MiniBatchProvider {
    fn step_objectives(&self) -> Vec<ObjectiveThunk<'_>> {
        let indices: Vec<usize> = (0..self.total_size).collect();
        indices
            .chunks(self.batch_size)
            .map(|window| {
                let window = window.to_vec();
                Box::new(move || (self.generator)(&window)) as ObjectiveThunk<'_>
            })
            .collect()
    }

    fn after_step(&self, point: &[f64]) {
        if let Some(hook) = &self.after_step_hook {
            hook(point);
        }
    }

    fn on_epoch_end(&self, point: &[f64]) {
        if let Some(hook) = &self.epoch_end_hook {
            hook(point);
        }
    }
}

/// Stochastic provider: one step per data index per epoch, visited in a
/// fresh random permutation on every `step_objectives` call.
///
/// This is true per-example SGD: each epoch covers every index exactly once
/// in a new order. Randomness comes from the explicitly passed generator, so
/// a seeded provider yields a reproducible visit order.
pub struct StochasticProvider {
    total_size: usize,
    generator: Box<dyn Fn(usize) -> Objective>,
    rng: RefCell<SimpleRng>,
    after_step_hook: Option<Box<dyn Fn(&[f64])>>,
    epoch_end_hook: Option<Box<dyn Fn(&[f64])>>,
}

impl StochasticProvider {
    /// Create a provider over `total_size` data indices, shuffled by `rng`.
    pub fn new<G>(total_size: usize, rng: SimpleRng, generator: G) -> Self
    where
        G: Fn(usize) -> Objective + 'static,
    {
        Self {
            total_size,
            generator: Box::new(generator),
            rng: RefCell::new(rng),
            after_step_hook: None,
            epoch_end_hook: None,
        }
    }

    /// Install a hook invoked after every applied update.
    pub fn with_after_step_hook<H>(mut self, hook: H) -> Self
    where
        H: Fn(&[f64]) + 'static,
    {
        self.after_step_hook = Some(Box::new(hook));
        self
    }

    /// Install a hook invoked at the end of every productive epoch.
    pub fn with_epoch_end_hook<H>(mut self, hook: H) -> Self
    where
        H: Fn(&[f64]) + 'static,
    {
        self.epoch_end_hook = Some(Box::new(hook));
        self
    }
}

impl EpochProvider for StochasticProvider {
    fn step_objectives(&self) -> Vec<ObjectiveThunk<'_>> {
        let permutation = self.rng.borrow_mut().permutation(self.total_size);
        permutation
            .into_iter()
            .map(|index| Box::new(move || (self.generator)(index)) as ObjectiveThunk<'_>)
            .collect()
    }

    fn after_step(&self, point: &[f64]) {
        if let Some(hook) = &self.after_step_hook {
            hook(point);
        }
    }

    fn on_epoch_end(&self, point: &[f64]) {
        if let Some(hook) = &self.epoch_end_hook {
            hook(point);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn dummy_objective() -> Objective {
        Objective::from_gradient(1, |_| vec![0.0])
    }

    #[test]
    fn test_batch_yields_one_step() {
        let f = Objective::from_gradient(2, |x| x.to_vec());
        let provider = BatchProvider::new(f);

        for _ in 0..3 {
            let steps = provider.step_objectives();
            assert_eq!(steps.len(), 1);
            assert_eq!(steps[0]().input_size(), 2);
        }
    }

    #[test]
    fn test_mini_batch_windows_include_remainder() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let record = Rc::clone(&seen);
        let provider = MiniBatchProvider::new(10, 3, move |indices| {
            record.borrow_mut().push(indices.to_vec());
            dummy_objective()
        });

        let steps = provider.step_objectives();
        assert_eq!(steps.len(), 4);
        for step in &steps {
            step();
        }
        assert_eq!(
            *seen.borrow(),
            vec![vec![0, 1, 2], vec![3, 4, 5], vec![6, 7, 8], vec![9]]
        );
    }

    #[test]
    fn test_mini_batch_exact_division_has_no_empty_window() {
        let provider = MiniBatchProvider::new(6, 3, |_| dummy_objective());
        assert_eq!(provider.step_objectives().len(), 2);
    }

    #[test]
    fn test_mini_batch_empty_total_yields_no_steps() {
        let provider = MiniBatchProvider::new(0, 4, |_| dummy_objective());
        assert!(provider.step_objectives().is_empty());
    }

    #[test]
    #[should_panic(expected = "mini-batch size must be at least 1")]
    fn test_mini_batch_zero_batch_size_panics() {
        MiniBatchProvider::new(10, 0, |_| dummy_objective());
    }

    #[test]
    fn test_generators_run_lazily() {
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let provider = MiniBatchProvider::new(4, 2, move |_| {
            *counter.borrow_mut() += 1;
            dummy_objective()
        });

        let steps = provider.step_objectives();
        assert_eq!(*calls.borrow(), 0);
        steps[0]();
        assert_eq!(*calls.borrow(), 1);
        steps[1]();
        assert_eq!(*calls.borrow(), 2);
    }

    #[test]
    fn test_stochastic_covers_every_index_once() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let record = Rc::clone(&seen);
        let provider = StochasticProvider::new(8, SimpleRng::new(7), move |index| {
            record.borrow_mut().push(index);
            dummy_objective()
        });

        for step in provider.step_objectives() {
            step();
        }
        let mut visited = seen.borrow().clone();
        visited.sort();
        assert_eq!(visited, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn test_stochastic_reshuffles_each_epoch() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let record = Rc::clone(&seen);
        let provider = StochasticProvider::new(16, SimpleRng::new(21), move |index| {
            record.borrow_mut().push(index);
            dummy_objective()
        });

        for step in provider.step_objectives() {
            step();
        }
        let first = seen.borrow().clone();
        seen.borrow_mut().clear();
        for step in provider.step_objectives() {
            step();
        }
        let second = seen.borrow().clone();

        assert_ne!(first, second);
        let mut sorted = second;
        sorted.sort();
        assert_eq!(sorted, (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn test_stochastic_is_reproducible_for_equal_seeds() {
        let order = |seed: u64| {
            let seen = Rc::new(RefCell::new(Vec::new()));
            let record = Rc::clone(&seen);
            let provider = StochasticProvider::new(12, SimpleRng::new(seed), move |index| {
                record.borrow_mut().push(index);
                dummy_objective()
            });
            for step in provider.step_objectives() {
                step();
            }
            let out = seen.borrow().clone();
            out
        };

        assert_eq!(order(99), order(99));
    }

    #[test]
    fn test_stochastic_empty_total_yields_no_steps() {
        let provider = StochasticProvider::new(0, SimpleRng::new(1), |_| dummy_objective());
        assert!(provider.step_objectives().is_empty());
    }

    #[test]
    fn test_hooks_delegate_to_caller() {
        let after = Rc::new(RefCell::new(0));
        let ends = Rc::new(RefCell::new(0));
        let after_counter = Rc::clone(&after);
        let end_counter = Rc::clone(&ends);
        let provider = StochasticProvider::new(3, SimpleRng::new(5), |_| dummy_objective())
            .with_after_step_hook(move |_| *after_counter.borrow_mut() += 1)
            .with_epoch_end_hook(move |_| *end_counter.borrow_mut() += 1);

        provider.after_step(&[0.0]);
        provider.after_step(&[0.0]);
        provider.on_epoch_end(&[0.0]);
        assert_eq!(*after.borrow(), 2);
        assert_eq!(*ends.borrow(), 1);
    }
}

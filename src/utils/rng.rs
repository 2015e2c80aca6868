//! Seeded random number generator for reproducible training runs.
//!
//! Randomized pieces of the toolkit (the stochastic epoch provider, weight
//! initialization, k-means center selection) take an explicit generator
//! instead of reaching for process-global state, so equal seeds give equal
//! runs. The generator is a dependency-free xorshift64* PRNG.

use std::time::{SystemTime, UNIX_EPOCH};

// State must never be zero; xorshift fixes zero forever.
const FALLBACK_STATE: u64 = 0x9e37_79b9_7f4a_7c15;

/// Deterministic xorshift64* random number generator.
///
/// Two generators created with the same seed produce identical sequences.
///
/// # Examples
///
/// ```
/// use rust_ml_toolkit::utils::SimpleRng;
///
/// let mut a = SimpleRng::new(7);
/// let mut b = SimpleRng::new(7);
/// assert_eq!(a.next_u64(), b.next_u64());
/// ```
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    /// Create a generator from an explicit seed (a zero seed falls back to a
    /// fixed non-zero constant).
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { FALLBACK_STATE } else { seed };
        Self { state }
    }

    /// Reseed from the current time, for callers that explicitly opt out of
    /// reproducibility.
    pub fn reseed_from_time(&mut self) {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64;
        self.state = if nanos == 0 { FALLBACK_STATE } else { nanos };
    }

    /// Next raw 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_f491_4f6c_dd1d)
    }

    /// Uniform sample in `[0, 1)` with 53 bits of precision.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform sample in `[low, high)`.
    pub fn gen_range_f64(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }

    /// Integer sample in `[0, upper)`; returns 0 when `upper` is 0.
    pub fn gen_usize(&mut self, upper: usize) -> usize {
        if upper == 0 {
            0
        } else {
            (self.next_u64() % upper as u64) as usize
        }
    }

    /// Fisher-Yates shuffle.
    pub fn shuffle_usize(&mut self, data: &mut [usize]) {
        if data.len() <= 1 {
            return;
        }
        for i in (1..data.len()).rev() {
            let j = self.gen_usize(i + 1);
            data.swap(i, j);
        }
    }

    /// A random permutation of `[0, n)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_ml_toolkit::utils::SimpleRng;
    ///
    /// let mut rng = SimpleRng::new(42);
    /// let mut perm = rng.permutation(5);
    /// perm.sort();
    /// assert_eq!(perm, vec![0, 1, 2, 3, 4]);
    /// ```
    pub fn permutation(&mut self, n: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..n).collect();
        self.shuffle_usize(&mut indices);
        indices
    }
}

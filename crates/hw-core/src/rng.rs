//! Deterministic per-instance RNG wrapper.
//!
//! # Determinism strategy
//!
//! Every `Highway` owns exactly one `SimRng`; nothing in the engine touches a
//! thread-local or global generator.  Sweep drivers that run many highways in
//! parallel derive one seed per sweep point with [`SimRng::derive`]:
//!
//!   seed = root_seed XOR (point_index * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive indices uniformly across the seed space, so the
//! result of a point depends only on the root seed and its index, never on
//! which worker thread happened to run it.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Simulation RNG.
///
/// Not `Sync` by intent: one generator per highway instance.
#[derive(Clone, Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed for the `index`-th independent instance of a run rooted at `root`.
    pub fn derive(root: u64, index: u64) -> Self {
        SimRng::new(root ^ index.wrapping_mul(MIXING_CONSTANT))
    }

    /// Derive a child `SimRng` with a different seed offset, advancing `self`.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// `amount` distinct indices from `0..len`, in random order.
    ///
    /// `amount` is clamped to `len`.
    pub fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.0, len, amount.min(len)).into_vec()
    }
}

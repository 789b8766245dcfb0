//! Random number generator construction for reproducibility.
//!
//! Filter initialization takes the RNG as an explicit argument instead of
//! relying on ambient global state, so tests can reproduce exact weights.
//! These helpers build the `StdRng` instances that get passed in.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Create a deterministic RNG from an explicit seed.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Create an RNG seeded from OS entropy, for runs where reproducibility
/// does not matter.
pub fn rng_from_entropy() -> StdRng {
    StdRng::from_entropy()
}

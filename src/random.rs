//! Seedable random number generation.
//!
//! The engine never touches a process-wide random source: every stochastic
//! operation receives an explicit `&mut impl Rng`. These helpers build the
//! generator a run is threaded with.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic generator from a seed.
///
/// Two generators created from the same seed yield identical streams.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from an optional seed, falling back to entropy.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}

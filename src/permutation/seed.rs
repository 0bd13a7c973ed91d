//! Seeding of worker random sources
//!
//! Every worker owns its own `ChaCha8Rng`. Worker seeds are derived from a
//! single run seed and the worker index, so a run is reproducible from its
//! run seed while no two workers of the same run share a stream.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// SplitMix64 finalizer. A bijection on `u64`, so distinct inputs never collide.
fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Derive the seed for `worker_id` from the run seed.
pub fn derive_worker_seed(run_seed: u64, worker_id: usize) -> u64 {
    splitmix64(run_seed.wrapping_add(worker_id as u64))
}

/// Draw a run seed from the thread-local OS-seeded generator.
pub fn fresh_run_seed() -> u64 {
    rand::rng().random()
}

/// Build the random source for one worker.
pub fn worker_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

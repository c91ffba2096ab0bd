//! Deterministic RNG using PCG32 with BLAKE3 seed derivation.
//!
//! All randomness in the crate flows through injectable [`Pcg32`] generators so
//! that augmentation is reproducible from a single `u32` seed. Batch streams
//! derive an independent sub-seed per batch, which keeps a restarted stream
//! byte-identical to the first run and makes each batch's draws independent of
//! how many batches preceded it.

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Creates a PCG32 RNG from a 32-bit seed.
///
/// The 32-bit seed is expanded to 64 bits by duplicating the value in both
/// halves, as required by PCG32's state initialization.
pub fn create_rng(seed: u32) -> Pcg32 {
    let seed64 = (seed as u64) | ((seed as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}

/// Derives the seed for one batch of a stream from the stream's base seed.
///
/// Hashes the little-endian bytes of `base_seed` followed by `batch_index`
/// with BLAKE3 and truncates the digest to the first four bytes.
pub fn derive_batch_seed(base_seed: u32, batch_index: u64) -> u32 {
    let mut input = [0u8; 12];
    input[..4].copy_from_slice(&base_seed.to_le_bytes());
    input[4..].copy_from_slice(&batch_index.to_le_bytes());

    let hash = blake3::hash(&input);
    let bytes = hash.as_bytes();
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Creates the RNG for one batch of a stream.
pub fn create_batch_rng(base_seed: u32, batch_index: u64) -> Pcg32 {
    create_rng(derive_batch_seed(base_seed, batch_index))
}

//! Content hashing utilities.

use xxhash_rust::xxh3::xxh3_64_with_seed;

/// Derive a stable per-key seed from a base seed.
///
/// Gives each pattern its own random stream, so adding or removing one
/// pattern from a request does not change the values drawn for the others.
pub fn derive_seed(base: u64, key: &str) -> u64 {
    xxh3_64_with_seed(key.as_bytes(), base)
}

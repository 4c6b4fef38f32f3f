//! Shared utilities.

mod hash;

pub use hash::derive_seed;

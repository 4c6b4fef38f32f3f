//! Core data model: the architecture pattern catalog, the metric catalog
//! and metric snapshots.
//!
//! Both catalogs are immutable reference data. Snapshots are plain values
//! produced per analysis.

mod comparison;
mod metrics;
mod pattern;

pub use comparison::*;
pub use metrics::*;
pub use pattern::*;

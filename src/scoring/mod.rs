//! Pattern scoring: weighted score, ranking, recommendation and deltas.

mod comparison;
mod context;
mod engine;

pub use comparison::{best_values, compare, improvement_percentages};
pub use context::TestContext;
pub use engine::{
    Candidate, RankedPattern, Ranking, RejectedCandidate, ScoringEngine, ScoringWeights,
};

//! **Architecture pattern scaling analysis.**
//!
//! `archscale` scores six software-architecture patterns (monolithic,
//! microservices, serverless, event-driven, peer-to-peer and
//! service-oriented) against eight performance metrics, ranks them for a
//! test context, and reports how much a recommended pattern improves on a
//! baseline. It powers both the `archscale` command-line tool and a Rust
//! library for programmatic use.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the pattern catalog, the metric catalog and the
//!   [`MetricsData`] snapshot every score is computed from.
//! - **[`scoring`]**: the [`ScoringEngine`], which turns snapshots into a
//!   stable ranking, and the before/after comparison.
//! - **[`source`]**: where metrics come from. A seeded synthetic generator,
//!   a remote chat-completions endpoint (feature `remote`) and a fallback
//!   wrapper that substitutes baseline metrics when the remote call fails.
//! - **[`analysis`]**: the [`Analyzer`] tying a source and the engine
//!   together for one URL.
//! - **[`reports`]**: summary, table, JSON, Markdown and CSV renderers.
//! - **[`session`]**: the client-local store of the latest and viewed report.
//!
//! ## Ranking candidates
//!
//! ```
//! use archscale::model::{MetricsData, PatternCatalog};
//! use archscale::scoring::{Candidate, ScoringEngine, TestContext};
//!
//! let catalog = PatternCatalog::builtin();
//! let fast = MetricsData {
//!     throughput: 2800.0,
//!     latency: 180.0,
//!     availability: 99.8,
//!     resource_utilization: 65.0,
//!     fault_tolerance: 8.0,
//!     elasticity: 9.0,
//!     cost_efficiency: 6.0,
//!     data_consistency: 7.0,
//! };
//! let slow = MetricsData { throughput: 900.0, ..fast };
//!
//! let candidates = vec![
//!     Candidate::new(catalog.resolve("monolithic")?.clone(), slow),
//!     Candidate::new(catalog.resolve("microservices")?.clone(), fast),
//! ];
//! let ranking = ScoringEngine::default().rank(&candidates, &TestContext::Api)?;
//! assert_eq!(ranking.ranked[0].pattern.id, "microservices");
//! # Ok::<(), archscale::ArchScaleError>(())
//! ```
//!
//! ## Analysing a URL
//!
//! ```
//! use archscale::analysis::{AnalysisRequest, Analyzer};
//! use archscale::scoring::{ScoringEngine, TestContext};
//! use archscale::source::SyntheticSource;
//!
//! let analyzer = Analyzer::new(ScoringEngine::default(), Box::new(SyntheticSource::new(42)));
//! let report = analyzer.analyze(
//!     &AnalysisRequest::new("https://shop.example.com").with_test_type(TestContext::Database),
//! )?;
//! println!("{} ({:.1})", report.best_pattern.name, report.best_score);
//! # Ok::<(), archscale::ArchScaleError>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `remote` (default): the chat-completions metric source. Adds `reqwest`.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(
    clippy::cast_precision_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod reports;
pub mod scoring;
pub mod session;
pub mod source;
pub mod utils;

// Re-export main types for convenience
pub use analysis::{AnalysisReport, AnalysisRequest, Analyzer};
pub use config::{AppConfig, AppConfigBuilder, ConfigError, ConfigPreset, Validatable};
pub use error::{ArchScaleError, ErrorContext, OptionContext, Result, SourceErrorKind};
pub use model::{
    ArchitecturePattern, CandidateMetrics, ComparisonResult, MetricKey, MetricsData,
    PatternCatalog,
};
pub use reports::{ReportFormat, ReportGenerator};
pub use scoring::{Candidate, Ranking, ScoringEngine, ScoringWeights, TestContext};
pub use session::SessionStore;
pub use source::{MetricSource, SourceKind, SyntheticSource};

//! Unified error types for archscale.
//!
//! This module provides the error hierarchy for the library, with rich
//! context for debugging and user-friendly messages.

use crate::model::MetricKey;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for archscale operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ArchScaleError {
    /// Input rejected before any scoring took place
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A candidate snapshot lacks a required metric field
    #[error("Pattern '{pattern}' is missing required metric '{metric}'")]
    MissingMetric { pattern: String, metric: MetricKey },

    /// Errors raised by a metric source
    #[error("Metric source failed: {context}")]
    Source {
        context: String,
        #[source]
        source: SourceErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Session store errors
    #[error("Session store error: {0}")]
    Session(String),
}

/// Specific metric source error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SourceErrorKind {
    #[error("Missing credential: environment variable {0} is not set")]
    MissingCredential(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Response names an unknown pattern: {0}")]
    UnknownPattern(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for archscale operations
pub type Result<T> = std::result::Result<T, ArchScaleError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl ArchScaleError {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a missing metric error for a pattern
    pub fn missing_metric(pattern: impl Into<String>, metric: MetricKey) -> Self {
        Self::MissingMetric {
            pattern: pattern.into(),
            metric,
        }
    }

    /// Create a metric source error with context
    pub fn source(context: impl Into<String>, source: SourceErrorKind) -> Self {
        Self::Source {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a session store error
    pub fn session(message: impl Into<String>) -> Self {
        Self::Session(message.into())
    }

    /// Whether this error rejects a single candidate rather than the whole input
    #[must_use]
    pub const fn is_missing_metric(&self) -> bool {
        matches!(self, Self::MissingMetric { .. })
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for ArchScaleError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for ArchScaleError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidInput(format!("JSON deserialization: {err}"))
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are chained, so the final message reads as a path
/// through the code:
///
/// ```ignore
/// use archscale::error::ErrorContext;
///
/// let before: MetricsData = serde_json::from_str(&text)
///     .with_context(|| format!("reading baseline from {}", path.display()))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<ArchScaleError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
///
/// `MissingMetric` is structured and left untouched.
fn add_context_to_error(err: ArchScaleError, new_ctx: &str) -> ArchScaleError {
    match err {
        ArchScaleError::InvalidInput(msg) => {
            ArchScaleError::InvalidInput(chain_context(new_ctx, &msg))
        }
        ArchScaleError::Source {
            context: existing,
            source,
        } => ArchScaleError::Source {
            context: chain_context(new_ctx, &existing),
            source,
        },
        ArchScaleError::Io {
            path,
            message,
            source,
        } => ArchScaleError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        ArchScaleError::Config(msg) => ArchScaleError::Config(chain_context(new_ctx, &msg)),
        ArchScaleError::Session(msg) => ArchScaleError::Session(chain_context(new_ctx, &msg)),
        missing @ ArchScaleError::MissingMetric { .. } => missing,
    }
}

/// Chain two context strings together as "`new`: `existing`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an invalid input error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;

    /// Convert None to an invalid input error with context from a closure.
    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| ArchScaleError::InvalidInput(context.into()))
    }

    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.ok_or_else(|| ArchScaleError::InvalidInput(f().into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ArchScaleError::invalid_input("candidate set is empty");
        assert!(err.to_string().contains("candidate set is empty"));

        let err = ArchScaleError::missing_metric("serverless", MetricKey::Latency);
        let display = err.to_string();
        assert!(display.contains("serverless"), "{display}");
        assert!(display.contains("latency"), "{display}");
    }

    #[test]
    fn test_io_error_keeps_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = ArchScaleError::io("/path/to/before.json", io_err);

        assert!(err.to_string().contains("/path/to/before.json"));
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(ArchScaleError::source(
                "base",
                SourceErrorKind::InvalidResponse("not json".to_string()),
            ))
        }

        fn middle() -> Result<()> {
            inner().context("middle layer")
        }

        fn outer() -> Result<()> {
            middle().context("outer layer")
        }

        match outer() {
            Err(ArchScaleError::Source { context, .. }) => {
                assert_eq!(context, "outer layer: middle layer: base");
            }
            other => panic!("Expected Source error, got {other:?}"),
        }
    }

    #[test]
    fn test_context_leaves_missing_metric_untouched() {
        let result: Result<()> = Err(ArchScaleError::missing_metric("p2p", MetricKey::Elasticity));
        match result.context("ranking") {
            Err(ArchScaleError::MissingMetric { pattern, metric }) => {
                assert_eq!(pattern, "p2p");
                assert_eq!(metric, MetricKey::Elasticity);
            }
            other => panic!("Expected MissingMetric error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: Result<i32> = Err(ArchScaleError::config("bad"));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called, "Closure should be called for Err result");
    }

    #[test]
    fn test_option_context() {
        let none_value: Option<i32> = None;
        match none_value.context_none("missing value") {
            Err(ArchScaleError::InvalidInput(msg)) => assert_eq!(msg, "missing value"),
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
        assert_eq!(Some(7).context_none("unused").ok(), Some(7));
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}

//! Test context tags that adjust the score.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of workload the analysis targets.
///
/// `Api` and `Database` carry a score adjustment; any other tag is kept
/// verbatim as `Other` and scores like `General`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TestContext {
    #[default]
    General,
    Api,
    Database,
    Other(String),
}

impl TestContext {
    /// Parse a context tag, case-insensitively.
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        let tag = tag.trim();
        match tag.to_lowercase().as_str() {
            "" | "general" => Self::General,
            "api" => Self::Api,
            "database" | "db" => Self::Database,
            _ => Self::Other(tag.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::General => "general",
            Self::Api => "api",
            Self::Database => "database",
            Self::Other(tag) => tag,
        }
    }

    /// Whether this context changes the score
    #[must_use]
    pub const fn has_adjustment(&self) -> bool {
        matches!(self, Self::Api | Self::Database)
    }
}

impl fmt::Display for TestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for TestContext {
    fn from(tag: String) -> Self {
        Self::parse(&tag)
    }
}

impl From<&str> for TestContext {
    fn from(tag: &str) -> Self {
        Self::parse(tag)
    }
}

impl From<TestContext> for String {
    fn from(context: TestContext) -> Self {
        context.as_str().to_string()
    }
}

//! Architecture pattern reference data.
//!
//! The six built-in patterns are immutable and built once, on first use,
//! into a [`PatternCatalog`] keyed by pattern identifier.

use crate::error::{ArchScaleError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Identifiers of the built-in patterns.
pub mod ids {
    pub const MONOLITHIC: &str = "monolithic";
    pub const MICROSERVICES: &str = "microservices";
    pub const SERVERLESS: &str = "serverless";
    pub const EVENT_DRIVEN: &str = "eventdriven";
    pub const PEER_TO_PEER: &str = "p2p";
    pub const SERVICE_ORIENTED: &str = "soa";
}

/// A named software-architecture style with descriptive metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchitecturePattern {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Display color as a `#rrggbb` hex string
    pub color: String,
    pub benefits: Vec<String>,
    pub limitations: Vec<String>,
}

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Immutable lookup table of patterns, in catalog order.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    patterns: IndexMap<String, ArchitecturePattern>,
}

static BUILTIN: LazyLock<PatternCatalog> = LazyLock::new(|| PatternCatalog {
    patterns: builtin_patterns()
        .into_iter()
        .map(|p| (p.id.clone(), p))
        .collect(),
});

impl PatternCatalog {
    /// The built-in catalog of six patterns
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Build a catalog from a list of patterns, rejecting duplicate ids.
    pub fn from_patterns(patterns: Vec<ArchitecturePattern>) -> Result<Self> {
        let mut map = IndexMap::with_capacity(patterns.len());
        for pattern in patterns {
            if pattern.id.trim().is_empty() {
                return Err(ArchScaleError::invalid_input("pattern id must not be empty"));
            }
            if map.contains_key(&pattern.id) {
                return Err(ArchScaleError::invalid_input(format!(
                    "duplicate pattern id '{}'",
                    pattern.id
                )));
            }
            map.insert(pattern.id.clone(), pattern);
        }
        Ok(Self { patterns: map })
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ArchitecturePattern> {
        self.patterns.get(id)
    }

    /// Look up a pattern, producing an error with a suggestion when the id
    /// is unknown.
    pub fn resolve(&self, id: &str) -> Result<&ArchitecturePattern> {
        let normalized = id.trim().to_lowercase();
        if let Some(pattern) = self.patterns.get(normalized.as_str()) {
            return Ok(pattern);
        }
        let message = match self.suggest(&normalized) {
            Some(suggestion) => {
                format!("unknown pattern '{id}' (did you mean '{suggestion}'?)")
            }
            None => format!(
                "unknown pattern '{id}'. Valid options: {}",
                self.ids().collect::<Vec<_>>().join(", ")
            ),
        };
        Err(ArchScaleError::invalid_input(message))
    }

    /// Closest known pattern id to `id`, if any is similar enough
    #[must_use]
    pub fn suggest(&self, id: &str) -> Option<&str> {
        self.ids()
            .map(|known| (known, strsim::jaro_winkler(id, known)))
            .filter(|(_, similarity)| *similarity >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(known, _)| known)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.patterns.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArchitecturePattern> {
        self.patterns.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

fn pattern(
    id: &str,
    name: &str,
    color: &str,
    description: &str,
    benefits: &[&str],
    limitations: &[&str],
) -> ArchitecturePattern {
    ArchitecturePattern {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        color: color.to_string(),
        benefits: benefits.iter().map(ToString::to_string).collect(),
        limitations: limitations.iter().map(ToString::to_string).collect(),
    }
}

fn builtin_patterns() -> Vec<ArchitecturePattern> {
    vec![
        pattern(
            ids::MONOLITHIC,
            "Monolithic Architecture",
            "#4f46e5",
            "A single, unified codebase where all components of an application are interconnected and run as a single service.",
            &[
                "Simplicity in development and deployment",
                "Easier to test as a complete unit",
                "Less cross-cutting concerns like logging, security",
                "Straightforward debugging process",
                "Lower complexity for smaller applications",
            ],
            &[
                "Scalability becomes challenging as the application grows",
                "Single point of failure risk",
                "Technology stack is fixed for the entire application",
                "Continuous deployment can be difficult",
                "Team coordination becomes complex with large codebases",
            ],
        ),
        pattern(
            ids::MICROSERVICES,
            "Microservices Architecture",
            "#0891b2",
            "An architectural approach where an application is built as a collection of small, independent services that communicate over a network.",
            &[
                "Independent development and deployment",
                "Technology diversity - different services can use different stacks",
                "Improved fault isolation",
                "Scalability - individual services can be scaled independently",
                "Better suited for large, complex applications",
            ],
            &[
                "Increased operational complexity",
                "Network latency between services",
                "Distributed system challenges (consistency, transactions)",
                "Testing complexity across service boundaries",
                "Requires strong DevOps practices",
            ],
        ),
        pattern(
            ids::SERVERLESS,
            "Serverless Architecture",
            "#9333ea",
            "A cloud computing execution model where the cloud provider manages the infrastructure, automatically provisioning and scaling resources as needed.",
            &[
                "No server management needed",
                "Pay-per-use pricing model",
                "Automatic scaling",
                "Reduced operational costs for variable workloads",
                "Focus on code rather than infrastructure",
            ],
            &[
                "Cold start latency issues",
                "Limited execution duration",
                "Vendor lock-in concerns",
                "Debugging and monitoring challenges",
                "Less control over underlying infrastructure",
            ],
        ),
        pattern(
            ids::EVENT_DRIVEN,
            "Event-Driven Architecture",
            "#16a34a",
            "A software architecture pattern promoting the production, detection, consumption of, and reaction to events between loosely coupled components.",
            &[
                "Loose coupling between components",
                "Highly scalable and responsive",
                "Good for real-time data processing",
                "Adaptable to changing requirements",
                "Facilitates asynchronous operations",
            ],
            &[
                "Complexity in event tracking and debugging",
                "Eventual consistency challenges",
                "Event versioning and compatibility issues",
                "Potential event storms under heavy load",
                "Can be overkill for simple applications",
            ],
        ),
        pattern(
            ids::PEER_TO_PEER,
            "Peer-to-Peer Architecture",
            "#f59e0b",
            "A distributed architecture where tasks and workloads are shared among peers without a centralized server, creating a network of equals.",
            &[
                "High resilience - no single point of failure",
                "Efficient resource utilization across the network",
                "Scales naturally with more peers",
                "Reduced central infrastructure costs",
                "Better privacy as data can be distributed",
            ],
            &[
                "Security challenges with distributed trust",
                "Inconsistent performance based on peer availability",
                "Complex coordination and consensus mechanisms",
                "Discovery and NAT traversal challenges",
                "Regulatory compliance can be difficult",
            ],
        ),
        pattern(
            ids::SERVICE_ORIENTED,
            "Service-Oriented Architecture (SOA)",
            "#ef4444",
            "An architectural style where services are provided to other components through a communication protocol over a network.",
            &[
                "Reusable services across different applications",
                "Standardized service contracts",
                "Business-focused approach to service design",
                "Integration with legacy systems",
                "Improved maintainability through service abstraction",
            ],
            &[
                "Can become complex with service orchestration",
                "Potential performance overhead from layers of abstraction",
                "Service governance challenges",
                "Requires careful service design and granularity",
                "Can lead to distributed monoliths if not carefully implemented",
            ],
        ),
    ]
}

//! End-to-end analysis of a URL.
//!
//! The [`Analyzer`] validates an [`AnalysisRequest`], pulls metrics for
//! the selected patterns from its [`MetricSource`], ranks them with the
//! [`ScoringEngine`] and compares the recommendation against a baseline
//! snapshot.

use crate::config::AppConfig;
use crate::error::{ArchScaleError, ErrorContext, OptionContext, Result};
use crate::model::{ArchitecturePattern, ComparisonResult, MetricsData, PatternCatalog, PatternMetrics};
use crate::scoring::{compare, Candidate, Ranking, ScoringEngine, TestContext};
use crate::source::{baseline_snapshot, build_source, MetricSource, SourceRequest};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

/// What to analyse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub url: String,
    pub test_type: TestContext,
    /// Pattern ids to evaluate; empty means every catalog pattern
    pub selected_patterns: Vec<String>,
}

impl AnalysisRequest {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_test_type(mut self, test_type: TestContext) -> Self {
        self.test_type = test_type;
        self
    }

    #[must_use]
    pub fn with_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }
}

/// Outcome of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub timestamp: DateTime<Utc>,
    pub url: String,
    pub test_type: TestContext,
    /// Name of the metric source
    pub source: String,
    /// Whether baseline metrics were substituted for a failed source
    pub fallback_used: bool,
    pub ranking: Ranking,
    pub best_pattern: ArchitecturePattern,
    pub best_score: f64,
    pub rationale: String,
    /// Pattern the source itself suggested, when it differs from the ranking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_suggestion: Option<String>,
    pub comparison_result: ComparisonResult,
}

impl AnalysisReport {
    /// Every scored pattern with its metrics, best first
    #[must_use]
    pub fn all_patterns(&self) -> Vec<PatternMetrics> {
        self.ranking.pattern_metrics()
    }
}

/// Default explanation for a recommendation.
#[must_use]
pub fn default_rationale(pattern: &ArchitecturePattern, url: &str) -> String {
    let benefit = |i: usize| {
        pattern
            .benefits
            .get(i)
            .map_or_else(String::new, |b| b.to_lowercase())
    };
    format!(
        "{} is the most suitable architecture pattern for the provided URL ({url}) because it \
         aligns well with the application's requirements for scalability, performance, and fault \
         tolerance. This pattern provides benefits such as {} and {}.",
        pattern.name,
        benefit(0),
        benefit(1)
    )
}

/// Check that `url` is an absolute http(s) URL.
pub fn validate_url(url: &str) -> Result<Url> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(ArchScaleError::invalid_input("URL is required"));
    }
    let parsed = Url::parse(trimmed)
        .map_err(|e| ArchScaleError::invalid_input(format!("invalid URL '{trimmed}': {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(ArchScaleError::invalid_input(format!(
            "unsupported URL scheme '{other}', expected http or https"
        ))),
    }
}

/// Runs analyses against one metric source.
pub struct Analyzer {
    engine: ScoringEngine,
    source: Box<dyn MetricSource>,
    catalog: &'static PatternCatalog,
    baseline: MetricsData,
}

impl Analyzer {
    #[must_use]
    pub fn new(engine: ScoringEngine, source: Box<dyn MetricSource>) -> Self {
        Self {
            engine,
            source,
            catalog: PatternCatalog::builtin(),
            baseline: baseline_snapshot(),
        }
    }

    /// Build an analyzer with the engine and source described by `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let engine = ScoringEngine::new(config.scoring.weights.clone());
        let source = build_source(&config.source)
            .with_context(|| format!("building {} metric source", config.source.kind))?;
        Ok(Self::new(engine, source))
    }

    /// Replace the "before scaling" snapshot used for the comparison.
    pub fn with_baseline(mut self, baseline: MetricsData) -> Result<Self> {
        baseline.validate().context("baseline snapshot")?;
        self.baseline = baseline;
        Ok(self)
    }

    #[must_use]
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    fn resolve_patterns(&self, selected: &[String]) -> Result<Vec<ArchitecturePattern>> {
        if selected.is_empty() {
            return Ok(self.catalog.iter().cloned().collect());
        }
        let mut patterns: Vec<ArchitecturePattern> = Vec::with_capacity(selected.len());
        for id in selected {
            let pattern = self.catalog.resolve(id)?;
            if !patterns.iter().any(|p| p.id == pattern.id) {
                patterns.push(pattern.clone());
            }
        }
        Ok(patterns)
    }

    /// Analyse one request.
    pub fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReport> {
        let url = validate_url(&request.url)?;
        let patterns = self.resolve_patterns(&request.selected_patterns)?;
        info!(
            url = %url,
            test_type = %request.test_type,
            patterns = patterns.len(),
            source = self.source.name(),
            "Starting analysis"
        );

        let output = self.source.fetch(&SourceRequest {
            url: url.as_str(),
            context: &request.test_type,
            patterns: &patterns,
        })?;

        let candidates: Vec<Candidate> = patterns
            .iter()
            .map(|p| Candidate::new(p.clone(), output.candidate_for(&p.id)))
            .collect();
        let ranking = self.engine.rank(&candidates, &request.test_type)?;

        let best = ranking
            .recommendation()
            .context_none("ranking produced no recommendation")?;
        let best_pattern = best.pattern.clone();
        let best_score = best.score;
        let comparison = compare(&self.baseline, &best.metrics, best_pattern.id.clone())?;

        let agrees = output.suggested_pattern.as_deref() == Some(best_pattern.id.as_str());
        let rationale = match output.rationale {
            Some(text) if agrees => text,
            _ => default_rationale(&best_pattern, url.as_str()),
        };
        let source_suggestion = output.suggested_pattern.filter(|_| !agrees);
        if let Some(ref suggested) = source_suggestion {
            debug!(
                suggested = %suggested,
                recommended = %best_pattern.id,
                "Source suggestion overridden by ranking"
            );
        }

        info!(best = %best_pattern.id, score = best_score, "Analysis complete");

        Ok(AnalysisReport {
            timestamp: Utc::now(),
            url: url.to_string(),
            test_type: request.test_type.clone(),
            source: self.source.name().to_string(),
            fallback_used: output.fallback_used,
            best_pattern,
            best_score,
            rationale,
            source_suggestion,
            comparison_result: comparison,
            ranking,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SyntheticSource;

    fn analyzer() -> Analyzer {
        Analyzer::new(ScoringEngine::default(), Box::new(SyntheticSource::new(42)))
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://example.com/api").is_ok());
        assert!(validate_url("").is_err());
        assert!(validate_url("example.com").is_err());
        assert!(validate_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_with_baseline_rejects_invalid_snapshot() {
        let mut baseline = baseline_snapshot();
        baseline.latency = f64::INFINITY;
        match analyzer().with_baseline(baseline) {
            Err(ArchScaleError::InvalidInput(msg)) => {
                assert!(msg.starts_with("baseline snapshot: "), "{msg}");
            }
            Err(other) => panic!("Expected InvalidInput, got {other:?}"),
            Ok(_) => panic!("Expected an error for a non-finite baseline"),
        }
    }

    #[test]
    fn test_analyze_all_patterns() {
        let report = analyzer()
            .analyze(&AnalysisRequest::new("https://example.com"))
            .unwrap();
        assert_eq!(report.ranking.ranked.len(), 6);
        assert_eq!(report.best_pattern.id, report.ranking.ranked[0].pattern.id);
        assert_eq!(report.comparison_result.pattern_used, report.best_pattern.id);
        assert_eq!(report.comparison_result.before_scaling, baseline_snapshot());
        assert!(report.rationale.contains(&report.best_pattern.name));
        assert!(!report.fallback_used);
    }

    #[test]
    fn test_analyze_selected_patterns_dedups() {
        let request = AnalysisRequest::new("https://example.com")
            .with_patterns(["soa", "SOA", "p2p"]);
        let report = analyzer().analyze(&request).unwrap();
        assert_eq!(report.ranking.ranked.len(), 2);
    }

    #[test]
    fn test_analyze_unknown_pattern_suggests() {
        let request = AnalysisRequest::new("https://example.com").with_patterns(["serverles"]);
        let err = analyzer().analyze(&request).unwrap_err().to_string();
        assert!(err.contains("did you mean 'serverless'"), "{err}");
    }

    #[test]
    fn test_default_rationale_lowercases_benefits() {
        let pattern = PatternCatalog::builtin().get("serverless").unwrap();
        let text = default_rationale(pattern, "https://a.io");
        assert!(text.starts_with("Serverless Architecture is the most suitable"));
        assert!(text.contains("no server management needed and pay-per-use pricing model"));
    }

    #[test]
    fn test_report_json_shape() {
        let report = analyzer()
            .analyze(&AnalysisRequest::new("https://example.com").with_test_type(TestContext::Api))
            .unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["testType"], "api");
        assert!(json["comparisonResult"]["improvementPercentages"]["latency"].is_number());
        let back: AnalysisReport = serde_json::from_value(json).unwrap();
        assert_eq!(back.best_pattern, report.best_pattern);
    }
}

//! Summary and table report generators for shell output.

use super::{format_pct, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::analysis::AnalysisReport;
use crate::model::{ComparisonResult, MetricKey};
use crate::scoring::{best_values, Ranking};

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn ranking_lines(&self, ranking: &Ranking, lines: &mut Vec<String>) {
        lines.push(self.color("Ranking:", "bold"));
        for entry in &ranking.ranked {
            let line = format!(
                "  {:>2}. {:<38} {:>7.2}",
                entry.rank,
                truncate(&entry.pattern.name, 38),
                entry.score
            );
            lines.push(if entry.rank == 1 {
                self.color(&line, "green")
            } else {
                line
            });
        }
        if !ranking.rejected.is_empty() {
            lines.push(String::new());
            lines.push(self.color("Rejected:", "bold"));
            for rejected in &ranking.rejected {
                lines.push(format!(
                    "  {} {}: {}",
                    self.color("✗", "red"),
                    rejected.pattern_id,
                    rejected.reason
                ));
            }
        }
    }

    fn comparison_lines(&self, comparison: &ComparisonResult, lines: &mut Vec<String>) {
        for (key, pct) in comparison.improvement_percentages.iter() {
            let (marker, color) = if key.is_favorable(pct) {
                ("▲", "green")
            } else if pct == 0.0 {
                ("=", "dim")
            } else {
                ("▼", "red")
            };
            lines.push(format!(
                "  {} {:<22} {:>10} → {:<10} {}",
                self.color(marker, color),
                key.name(),
                key.format_value(comparison.before_scaling.get(key)),
                key.format_value(comparison.after_scaling.get(key)),
                self.color(&format!("{:>9}", format_pct(pct)), color)
            ));
        }
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_analysis_report(
        &self,
        report: &AnalysisReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        lines.push(self.color(config.title_or("Architecture Analysis"), "bold"));
        lines.push(self.color("─".repeat(60).as_str(), "dim"));

        lines.push(format!("{}  {}", self.color("URL:        ", "cyan"), report.url));
        lines.push(format!("{}  {}", self.color("Test type:  ", "cyan"), report.test_type));
        let source = if report.fallback_used {
            format!("{} {}", report.source, self.color("(fallback metrics)", "yellow"))
        } else {
            report.source.clone()
        };
        lines.push(format!("{}  {}", self.color("Source:     ", "cyan"), source));
        lines.push(format!(
            "{}  {} (score {:.2})",
            self.color("Recommended:", "cyan"),
            self.color(&report.best_pattern.name, "green"),
            report.best_score
        ));
        if let Some(ref suggested) = report.source_suggestion {
            lines.push(format!(
                "{}  {}",
                self.color("Source pick:", "cyan"),
                self.color(suggested, "dim")
            ));
        }

        lines.push(String::new());
        self.ranking_lines(&report.ranking, &mut lines);

        lines.push(String::new());
        lines.push(self.color("Improvement over baseline:", "bold"));
        self.comparison_lines(&report.comparison_result, &mut lines);

        lines.push(String::new());
        lines.push(self.color("Rationale:", "bold"));
        lines.push(format!("  {}", report.rationale));

        if config.include_pattern_details {
            lines.push(String::new());
            lines.push(self.color("Benefits:", "bold"));
            for benefit in &report.best_pattern.benefits {
                lines.push(format!("  {} {benefit}", self.color("+", "green")));
            }
            lines.push(self.color("Limitations:", "bold"));
            for limitation in &report.best_pattern.limitations {
                lines.push(format!("  {} {limitation}", self.color("-", "red")));
            }
        }

        Ok(lines.join("\n") + "\n")
    }

    fn generate_ranking_report(
        &self,
        ranking: &Ranking,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        lines.push(self.color(config.title_or("Pattern Ranking"), "bold"));
        lines.push(self.color("─".repeat(60).as_str(), "dim"));
        lines.push(format!("{}  {}", self.color("Test type:", "cyan"), ranking.context));
        lines.push(String::new());
        self.ranking_lines(ranking, &mut lines);
        Ok(lines.join("\n") + "\n")
    }

    fn generate_comparison_report(
        &self,
        comparison: &ComparisonResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        lines.push(self.color(config.title_or("Before / After Comparison"), "bold"));
        lines.push(self.color("─".repeat(60).as_str(), "dim"));
        lines.push(format!(
            "{}  {}",
            self.color("Pattern:", "cyan"),
            comparison.pattern_used
        ));
        lines.push(String::new());
        self.comparison_lines(comparison, &mut lines);

        let favorable = comparison.improvement_percentages.favorable().count();
        lines.push(String::new());
        lines.push(format!(
            "{} of {} metrics improved",
            favorable,
            comparison.improvement_percentages.len()
        ));
        Ok(lines.join("\n") + "\n")
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

/// Table reporter: every pattern against every metric.
pub struct TableReporter {
    /// Use colored output
    colored: bool,
}

impl TableReporter {
    /// Create a new table reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn ranking_table(&self, ranking: &Ranking) -> Vec<String> {
        let mut lines = Vec::new();
        let mut header = format!("{:<4} {:<14} {:>8}", "RANK", "PATTERN", "SCORE");
        for key in MetricKey::ALL {
            header.push_str(&format!(" {:>9}", short_label(key)));
        }
        let width = header.chars().count();
        lines.push(self.color(&header, "bold"));
        lines.push("─".repeat(width));

        let best = best_values(&ranking.pattern_metrics());
        for entry in &ranking.ranked {
            let mut row = format!(
                "{:<4} {:<14} {:>8.2}",
                entry.rank,
                truncate(&entry.pattern.id, 14),
                entry.score
            );
            for key in MetricKey::ALL {
                let value = entry.metrics.get(key);
                let cell = format!(" {:>9}", key.format_value(value));
                let is_best = best
                    .as_ref()
                    .and_then(|b| b.get(&key))
                    .is_some_and(|b| *b == value);
                row.push_str(&if is_best {
                    self.color(&cell, "green")
                } else {
                    cell
                });
            }
            lines.push(row);
        }
        for rejected in &ranking.rejected {
            lines.push(self.color(
                &format!("{:<4} {:<14} {}", "-", rejected.pattern_id, rejected.reason),
                "dim",
            ));
        }
        lines
    }
}

/// Column label for a metric in the table view.
const fn short_label(key: MetricKey) -> &'static str {
    match key {
        MetricKey::Throughput => "THRPUT",
        MetricKey::Latency => "LATENCY",
        MetricKey::Availability => "AVAIL%",
        MetricKey::ResourceUtilization => "UTIL%",
        MetricKey::FaultTolerance => "FAULT",
        MetricKey::Elasticity => "ELASTIC",
        MetricKey::CostEfficiency => "COST",
        MetricKey::DataConsistency => "CONSIST",
    }
}

impl Default for TableReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for TableReporter {
    fn generate_analysis_report(
        &self,
        report: &AnalysisReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = self.ranking_table(&report.ranking);
        lines.push(String::new());
        let comparison = self.generate_comparison_report(&report.comparison_result, config)?;
        lines.push(comparison);
        Ok(lines.join("\n"))
    }

    fn generate_ranking_report(
        &self,
        ranking: &Ranking,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        Ok(self.ranking_table(ranking).join("\n") + "\n")
    }

    fn generate_comparison_report(
        &self,
        comparison: &ComparisonResult,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        lines.push(self.color(
            &format!(
                "{:<22} {:>12} {:>12} {:>10}",
                "METRIC", "BEFORE", "AFTER", "CHANGE"
            ),
            "bold",
        ));
        lines.push("─".repeat(59));
        for (key, pct) in comparison.improvement_percentages.iter() {
            let change = format!("{:>10}", format_pct(pct));
            let change = if key.is_favorable(pct) {
                self.color(&change, "green")
            } else if pct < 0.0 {
                self.color(&change, "red")
            } else {
                change
            };
            lines.push(format!(
                "{:<22} {:>12} {:>12} {}",
                key.name(),
                key.format_value(comparison.before_scaling.get(key)),
                key.format_value(comparison.after_scaling.get(key)),
                change
            ));
        }
        Ok(lines.join("\n") + "\n")
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Table
    }
}

//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler returns the process exit code; the caller is responsible for
//! calling `std::process::exit()` when it is non-zero.

mod analyze;
mod compare;
mod patterns;
mod score;
mod show;

pub use analyze::{run_analyze, AnalyzeOptions};
pub use compare::run_compare;
pub use patterns::{run_metrics, run_patterns};
pub use score::{run_score, ScoreEntry};
pub use show::run_show;

use crate::config::{AppConfig, OutputConfig};
use crate::pipeline::{paths, should_use_color, write_output, OutputTarget};
use crate::reports::{create_reporter, ReportConfig, ReportError, ReportGenerator};
use crate::scoring::TestContext;
use crate::session::SessionStore;
use anyhow::Result;

/// Reporter, report settings and destination for one command.
struct Emitter {
    reporter: Box<dyn ReportGenerator>,
    report_config: ReportConfig,
    target: OutputTarget,
    quiet: bool,
}

impl Emitter {
    fn new(output: &OutputConfig, report_config: ReportConfig, quiet: bool) -> Self {
        let target = OutputTarget::from_option(output.file.clone());
        let colored = should_use_color(output.no_color, &target);
        Self {
            reporter: create_reporter(output.format, colored),
            report_config,
            target,
            quiet,
        }
    }

    fn emit<F>(&self, render: F) -> Result<()>
    where
        F: FnOnce(&dyn ReportGenerator, &ReportConfig) -> Result<String, ReportError>,
    {
        let content = render(self.reporter.as_ref(), &self.report_config)?;
        write_output(&content, &self.target, self.quiet)
    }
}

/// Session store described by `config`, or `None` when sessions are disabled.
fn session_store(config: &AppConfig) -> Option<SessionStore> {
    config.session.enabled.then(|| {
        SessionStore::new(
            config
                .session
                .dir
                .clone()
                .unwrap_or_else(paths::session_dir),
        )
    })
}

/// Context from an explicit flag, else the configured default, else general.
fn resolve_test_type(explicit: Option<&str>, config: &AppConfig) -> TestContext {
    explicit
        .or(config.scoring.default_test_type.as_deref())
        .map(TestContext::parse)
        .unwrap_or_default()
}

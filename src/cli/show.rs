//! Show command handler.
//!
//! Re-renders the report held in the session store.

use super::{session_store, Emitter};
use crate::config::AppConfig;
use crate::pipeline::exit_codes;
use crate::reports::ReportConfig;
use anyhow::{bail, Context, Result};

/// Render the viewed report, or the latest one with `latest`.
///
/// Returns [`exit_codes::NO_RESULT`] when the session holds no report.
/// With `clear`, empties the session instead.
pub fn run_show(config: &AppConfig, latest: bool, clear: bool, quiet: bool) -> Result<i32> {
    let Some(store) = session_store(config) else {
        bail!("the session store is disabled in the configuration");
    };

    if clear {
        store.clear().context("failed to clear the session")?;
        if !quiet {
            tracing::info!("Session cleared");
        }
        return Ok(exit_codes::SUCCESS);
    }

    let report = if latest { store.latest() } else { store.viewed() };
    let Some(report) = report else {
        if !quiet {
            tracing::warn!("No report in session at {}", store.dir().display());
        }
        return Ok(exit_codes::NO_RESULT);
    };

    if latest {
        store
            .view(&report)
            .context("failed to mark the latest report as viewed")?;
    }

    Emitter::new(&config.output, ReportConfig::default(), quiet)
        .emit(|reporter, cfg| reporter.generate_analysis_report(&report, cfg))?;
    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::ReportFormat;
    use crate::session::SessionStore;
    use tempfile::TempDir;

    fn config(tmp: &TempDir) -> AppConfig {
        AppConfig::builder()
            .output_format(ReportFormat::Markdown)
            .output_file(Some(tmp.path().join("show.md")))
            .session_dir(tmp.path().join("session"))
            .build()
    }

    #[test]
    fn test_run_show_empty_session() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(
            run_show(&config(&tmp), false, false, true).unwrap(),
            exit_codes::NO_RESULT
        );
    }

    #[test]
    fn test_run_show_latest_then_clear() {
        let tmp = TempDir::new().unwrap();
        let config = config(&tmp);
        let store = SessionStore::new(tmp.path().join("session"));
        store.record(&crate::reports::fixtures::report()).unwrap();

        assert_eq!(run_show(&config, true, false, true).unwrap(), exit_codes::SUCCESS);
        let md = std::fs::read_to_string(tmp.path().join("show.md")).unwrap();
        assert!(md.contains("shop.example.com"));

        run_show(&config, false, true, true).unwrap();
        assert!(store.latest().is_none());
    }

    #[test]
    fn test_run_show_disabled_session() {
        let config = AppConfig::builder().session(false).build();
        assert!(run_show(&config, false, false, true).is_err());
    }
}

//! Client-local session store.
//!
//! Keeps two slots, the latest analysis and the report currently being
//! viewed, as JSON files in one directory. Nothing is shared between
//! users and nothing outlives the directory.

use crate::analysis::AnalysisReport;
use crate::error::{ArchScaleError, ErrorContext, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const LATEST_FILE: &str = "latest.json";
const VIEWED_FILE: &str = "viewed.json";

/// File-backed store for the latest and viewed reports.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Store rooted at `dir`; the directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save a fresh analysis as both the latest and the viewed report.
    pub fn record(&self, report: &AnalysisReport) -> Result<()> {
        self.write(LATEST_FILE, report)
            .context("recording latest report")?;
        self.write(VIEWED_FILE, report)
            .context("recording viewed report")
    }

    /// Mark `report` as the one being viewed.
    pub fn view(&self, report: &AnalysisReport) -> Result<()> {
        self.write(VIEWED_FILE, report)
            .context("recording viewed report")
    }

    #[must_use]
    pub fn latest(&self) -> Option<AnalysisReport> {
        self.read(LATEST_FILE)
    }

    #[must_use]
    pub fn viewed(&self) -> Option<AnalysisReport> {
        self.read(VIEWED_FILE)
    }

    /// Remove both slots.
    pub fn clear(&self) -> Result<()> {
        for name in [LATEST_FILE, VIEWED_FILE] {
            let path = self.dir.join(name);
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(ArchScaleError::io(path, e)),
            }
        }
        Ok(())
    }

    fn write(&self, name: &str, report: &AnalysisReport) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| ArchScaleError::io(&self.dir, e))?;
        let json = serde_json::to_string_pretty(report)
            .map_err(|e| ArchScaleError::session(format!("serializing report: {e}")))?;
        let path = self.dir.join(name);
        fs::write(&path, json).map_err(|e| ArchScaleError::io(&path, e))?;
        debug!(path = %path.display(), "Saved session report");
        Ok(())
    }

    fn read(&self, name: &str) -> Option<AnalysisReport> {
        let path = self.dir.join(name);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read session file");
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(report) => Some(report),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring unreadable session file");
                None
            }
        }
    }
}

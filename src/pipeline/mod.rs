//! Shared plumbing for CLI command handlers: output targets, exit codes
//! and well-known directories.

mod output;

pub use output::{should_use_color, write_output, OutputTarget};

/// Exit codes for scripting and CI/CD integration
pub mod exit_codes {
    /// A result was produced
    pub const SUCCESS: i32 = 0;
    /// No usable result: every candidate was rejected, or the session is empty
    pub const NO_RESULT: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

/// Platform-specific directories
pub mod paths {
    use std::path::PathBuf;

    /// Per-user cache directory for archscale
    #[must_use]
    pub fn cache_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from(".cache"))
            .join("archscale")
    }

    /// Default session store directory
    #[must_use]
    pub fn session_dir() -> PathBuf {
        cache_dir().join("session")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_values() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::NO_RESULT, 1);
        assert_eq!(exit_codes::ERROR, 3);
    }

    #[test]
    fn test_session_dir_path() {
        let path = paths::session_dir();
        assert!(path.ends_with("archscale/session"));
    }
}

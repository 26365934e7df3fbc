//! Environment-driven CLI settings.
//!
//! # Responsibility
//! - Read logging settings from the process environment.
//!
//! # Invariants
//! - Missing variables fall back to defaults; reading never fails.

use librarian_core::{default_log_level, LogSettings, LoggingError};

pub const LOG_LEVEL_VAR: &str = "LIBRARIAN_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "LIBRARIAN_LOG_DIR";
pub const CATALOG_LOG_LEVEL_VAR: &str = "LIBRARIAN_CATALOG_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub log_level: String,
    /// File logging is skipped when unset.
    pub log_dir: Option<String>,
    /// Separate level for catalog events; falls back to `log_level`.
    pub catalog_log_level: Option<String>,
}

impl CliConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let log_level = lookup(LOG_LEVEL_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| default_log_level().to_string());
        let log_dir = lookup(LOG_DIR_VAR).filter(|value| !value.trim().is_empty());
        let catalog_log_level =
            lookup(CATALOG_LOG_LEVEL_VAR).filter(|value| !value.trim().is_empty());
        Self {
            log_level,
            log_dir,
            catalog_log_level,
        }
    }

    /// Builds logger settings, or `None` when no log directory is configured.
    pub fn log_settings(&self) -> Option<Result<LogSettings, LoggingError>> {
        let log_dir = self.log_dir.as_deref()?;
        let settings = LogSettings::parse(&self.log_level, log_dir);
        Some(match self.catalog_log_level.as_deref() {
            Some(level) => settings.and_then(|settings| settings.with_catalog_level(level)),
            None => settings,
        })
    }
}

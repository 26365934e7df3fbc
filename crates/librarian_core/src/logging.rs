//! Process-wide logging bootstrap.
//!
//! # Responsibility
//! - Turn caller settings into one rolling file logger per process.
//! - Let catalog events be filtered separately from everything else via
//!   `CATALOG_LOG_TARGET`.
//! - Route panics into the log before the previous hook runs.
//!
//! # Invariants
//! - Repeating init with equal settings is a no-op; different settings are
//!   rejected once a logger is active.
//! - Initialization reports failures as `LoggingError` and never panics.
//! - Catalog log lines are metadata-only: handles, ids and counts.

use flexi_logger::{
    Cleanup, Criterion, FileSpec, FlexiLoggerError, LogSpecification, Logger, LoggerHandle,
    Naming, WriteMode,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Log target used by every catalog operation.
pub const CATALOG_LOG_TARGET: &str = "librarian::catalog";

const LOG_FILE_BASENAME: &str = "librarian";
const ROTATE_AT_BYTES: u64 = 4 * 1024 * 1024;
const KEEP_LOG_FILES: usize = 3;
const PANIC_PAYLOAD_LIMIT: usize = 120;

static ACTIVE: OnceCell<(LogSettings, LoggerHandle)> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

/// Logging bootstrap failures.
#[derive(Debug)]
pub enum LoggingError {
    UnsupportedLevel(String),
    InvalidDirectory(String),
    CreateDirectory {
        dir: PathBuf,
        source: std::io::Error,
    },
    Backend(FlexiLoggerError),
    /// A logger with other settings is already running.
    AlreadyActive {
        active: LogSettings,
        requested: LogSettings,
    },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLevel(value) => write!(
                f,
                "unsupported log level `{value}`; expected off|error|warn|info|debug|trace"
            ),
            Self::InvalidDirectory(message) => write!(f, "invalid log directory: {message}"),
            Self::CreateDirectory { dir, source } => {
                write!(f, "cannot create log directory `{}`: {source}", dir.display())
            }
            Self::Backend(err) => write!(f, "cannot start logger: {err}"),
            Self::AlreadyActive { active, requested } => write!(
                f,
                "logging already active with {active}; refusing to switch to {requested}"
            ),
        }
    }
}

impl Error for LoggingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDirectory { source, .. } => Some(source),
            Self::Backend(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FlexiLoggerError> for LoggingError {
    fn from(value: FlexiLoggerError) -> Self {
        Self::Backend(value)
    }
}

/// What to log and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: LevelFilter,
    /// Overrides `level` for `CATALOG_LOG_TARGET` when set.
    pub catalog_level: Option<LevelFilter>,
    pub log_dir: PathBuf,
}

impl LogSettings {
    /// Parses a level name and an absolute directory.
    ///
    /// # Errors
    /// - `UnsupportedLevel` for unknown level names.
    /// - `InvalidDirectory` for empty or relative paths.
    pub fn parse(level: &str, log_dir: &str) -> Result<Self, LoggingError> {
        Ok(Self {
            level: parse_level(level)?,
            catalog_level: None,
            log_dir: parse_log_dir(log_dir)?,
        })
    }

    /// Sets a separate level for catalog events.
    ///
    /// # Errors
    /// - `UnsupportedLevel` for unknown level names.
    pub fn with_catalog_level(mut self, level: &str) -> Result<Self, LoggingError> {
        self.catalog_level = Some(parse_level(level)?);
        Ok(self)
    }

    /// Builds the module filter handed to the backend.
    pub fn log_specification(&self) -> LogSpecification {
        let mut builder = LogSpecification::builder();
        builder.default(self.level);
        if let Some(catalog_level) = self.catalog_level {
            builder.module(CATALOG_LOG_TARGET, catalog_level);
        }
        builder.build()
    }
}

impl Display for LogSettings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "level={}", self.level)?;
        if let Some(catalog_level) = self.catalog_level {
            write!(f, " catalog_level={catalog_level}")?;
        }
        write!(f, " dir={}", self.log_dir.display())
    }
}

/// Starts file logging with `settings`.
///
/// # Errors
/// - Directory creation or backend failure.
/// - `AlreadyActive` when a logger with different settings is running.
pub fn init_logging(settings: &LogSettings) -> Result<(), LoggingError> {
    let (active, _) = ACTIVE.get_or_try_init(|| start_logger(settings))?;
    if active != settings {
        return Err(LoggingError::AlreadyActive {
            active: active.clone(),
            requested: settings.clone(),
        });
    }
    Ok(())
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(settings: &LogSettings) -> Result<(LogSettings, LoggerHandle), LoggingError> {
    std::fs::create_dir_all(&settings.log_dir).map_err(|source| {
        LoggingError::CreateDirectory {
            dir: settings.log_dir.clone(),
            source,
        }
    })?;

    let handle = Logger::with(settings.log_specification())
        .log_to_file(
            FileSpec::default()
                .directory(settings.log_dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()?;

    install_panic_hook();
    info!(
        target: CATALOG_LOG_TARGET,
        "event=logging_start module=catalog status=ok {settings} version={}",
        env!("CARGO_PKG_VERSION")
    );

    Ok((settings.clone(), handle))
}

fn parse_level(level: &str) -> Result<LevelFilter, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" | "none" => Ok(LevelFilter::Off),
        "error" => Ok(LevelFilter::Error),
        "warn" | "warning" => Ok(LevelFilter::Warn),
        "info" => Ok(LevelFilter::Info),
        "debug" => Ok(LevelFilter::Debug),
        "trace" => Ok(LevelFilter::Trace),
        _ => Err(LoggingError::UnsupportedLevel(level.trim().to_string())),
    }
}

fn parse_log_dir(log_dir: &str) -> Result<PathBuf, LoggingError> {
    let trimmed = log_dir.trim();
    if trimmed.is_empty() {
        return Err(LoggingError::InvalidDirectory("path is empty".to_string()));
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(LoggingError::InvalidDirectory(format!(
            "`{trimmed}` is not absolute"
        )));
    }
    Ok(path.to_path_buf())
}

fn install_panic_hook() {
    if PANIC_HOOK.set(()).is_err() {
        return;
    }

    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .map(|message| (*message).to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_default();
        let payload: String = payload
            .lines()
            .collect::<Vec<_>>()
            .join(" ")
            .chars()
            .take(PANIC_PAYLOAD_LIMIT)
            .collect();
        error!(
            "event=panic module=librarian status=error location={} payload={payload}",
            info.location()
                .map(|loc| format!("{}:{}", loc.file(), loc.line()))
                .unwrap_or_default()
        );
        previous(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::{init_logging, parse_level, LogSettings, LoggingError, CATALOG_LOG_TARGET};
    use log::{Level, LevelFilter};

    #[test]
    fn parse_level_accepts_aliases_and_rejects_unknown() {
        assert_eq!(parse_level(" Warning ").expect("alias"), LevelFilter::Warn);
        assert_eq!(parse_level("OFF").expect("off"), LevelFilter::Off);
        assert!(matches!(
            parse_level("verbose"),
            Err(LoggingError::UnsupportedLevel(value)) if value == "verbose"
        ));
    }

    #[test]
    fn settings_reject_relative_directory() {
        let err = LogSettings::parse("info", "logs").expect_err("relative path must fail");
        assert!(matches!(err, LoggingError::InvalidDirectory(_)));
    }

    #[test]
    fn catalog_level_overrides_default_for_catalog_target_only() {
        let settings = LogSettings::parse("warn", "/tmp/librarian-logs")
            .expect("valid settings")
            .with_catalog_level("debug")
            .expect("valid catalog level");
        let spec = settings.log_specification();

        assert!(spec.enabled(Level::Debug, CATALOG_LOG_TARGET));
        assert!(!spec.enabled(Level::Info, "librarian_cli"));
        assert!(spec.enabled(Level::Warn, "librarian_cli"));
    }

    #[test]
    fn init_is_idempotent_and_rejects_other_settings() {
        let dir = tempfile::tempdir().expect("temp dir");
        let dir_str = dir.path().to_str().expect("utf-8 temp dir");
        let settings = LogSettings::parse("info", dir_str).expect("valid settings");

        init_logging(&settings).expect("first init");
        init_logging(&settings).expect("same settings are idempotent");

        let louder = settings
            .clone()
            .with_catalog_level("trace")
            .expect("valid catalog level");
        let err = init_logging(&louder).expect_err("different settings must be refused");
        assert!(err.to_string().contains("refusing to switch"));
    }
}

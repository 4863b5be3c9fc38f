//! Process logging bootstrap.
//!
//! # Responsibility
//! - Start the `flexi_logger` backend once per process: stderr only, or a
//!   rotated file set mirrored to stderr when a directory is configured.
//! - Log panics as `event=panic_captured` lines before the default hook runs.
//!
//! # Invariants
//! - Repeating `init_logging` with the same settings is a no-op.
//! - A second call with different settings fails instead of reconfiguring.
//! - Initialization never panics.

use flexi_logger::{
    Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming, WriteMode,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "bookstore";
const ROTATE_AT_BYTES: u64 = 8 * 1024 * 1024;
const KEEP_LOG_FILES: usize = 7;
const PANIC_PAYLOAD_LIMIT: usize = 200;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

struct ActiveLogger {
    status: LoggingStatus,
    _handle: LoggerHandle,
}

/// Where log lines end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Rotated files in this directory, mirrored to stderr.
    Directory(PathBuf),
}

impl Display for LogTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stderr => write!(f, "stderr"),
            Self::Directory(dir) => write!(f, "{}", dir.display()),
        }
    }
}

/// Settings of the running logger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingStatus {
    pub level: LevelFilter,
    pub target: LogTarget,
}

#[derive(Debug)]
pub enum LoggingError {
    UnknownLevel(String),
    InvalidDirectory { dir: PathBuf, reason: String },
    Backend(String),
    /// Logging already runs with other settings.
    Conflict {
        active: LoggingStatus,
        requested: LoggingStatus,
    },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownLevel(level) => write!(
                f,
                "unknown log level `{level}`; expected off|error|warn|info|debug|trace"
            ),
            Self::InvalidDirectory { dir, reason } => {
                write!(f, "invalid log directory `{}`: {reason}", dir.display())
            }
            Self::Backend(message) => write!(f, "failed to start logger: {message}"),
            Self::Conflict { active, requested } => write!(
                f,
                "logging already runs at level={} target={}; refusing level={} target={}",
                active.level, active.target, requested.level, requested.target
            ),
        }
    }
}

impl Error for LoggingError {}

/// Starts process logging.
///
/// `log_dir` may be relative; it is resolved against the working directory
/// and created when missing.
///
/// # Errors
/// - `UnknownLevel` / `InvalidDirectory` for bad settings.
/// - `Conflict` when logging already runs with different settings.
/// - `Backend` when `flexi_logger` cannot start.
pub fn init_logging(level: &str, log_dir: Option<&Path>) -> Result<LoggingStatus, LoggingError> {
    let requested = LoggingStatus {
        level: parse_level(level)?,
        target: match log_dir {
            Some(dir) => LogTarget::Directory(resolve_dir(dir)?),
            None => LogTarget::Stderr,
        },
    };

    let active = ACTIVE.get_or_try_init(|| start_logger(requested.clone()))?;
    if active.status != requested {
        return Err(LoggingError::Conflict {
            active: active.status.clone(),
            requested,
        });
    }
    Ok(requested)
}

/// Returns the running logger's settings, `None` before `init_logging`.
pub fn logging_status() -> Option<LoggingStatus> {
    ACTIVE.get().map(|active| active.status.clone())
}

/// `debug` for debug builds, `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(status: LoggingStatus) -> Result<ActiveLogger, LoggingError> {
    let logger = Logger::with(status.level)
        .format_for_stderr(flexi_logger::opt_format)
        .format_for_files(flexi_logger::detailed_format);

    let logger = match &status.target {
        LogTarget::Stderr => logger.log_to_stderr(),
        LogTarget::Directory(dir) => logger
            .log_to_file(
                FileSpec::default()
                    .directory(dir)
                    .basename(LOG_FILE_BASENAME),
            )
            .rotate(
                Criterion::Size(ROTATE_AT_BYTES),
                Naming::Timestamps,
                Cleanup::KeepLogFiles(KEEP_LOG_FILES),
            )
            .duplicate_to_stderr(Duplicate::All)
            .write_mode(WriteMode::BufferAndFlush)
            .append(),
    };

    let handle = logger
        .start()
        .map_err(|err| LoggingError::Backend(err.to_string()))?;
    install_panic_hook();

    info!(
        "event=logging_init module=core status=ok level={} target={} os={} version={}",
        status.level,
        status.target,
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION")
    );

    Ok(ActiveLogger {
        status,
        _handle: handle,
    })
}

fn parse_level(level: &str) -> Result<LevelFilter, LoggingError> {
    let trimmed = level.trim();
    if trimmed.eq_ignore_ascii_case("warning") {
        return Ok(LevelFilter::Warn);
    }
    trimmed
        .parse::<LevelFilter>()
        .map_err(|_| LoggingError::UnknownLevel(trimmed.to_string()))
}

fn resolve_dir(dir: &Path) -> Result<PathBuf, LoggingError> {
    let invalid = |reason: String| LoggingError::InvalidDirectory {
        dir: dir.to_path_buf(),
        reason,
    };

    if dir.as_os_str().is_empty() {
        return Err(invalid("path is empty".to_string()));
    }
    let resolved = if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|err| invalid(err.to_string()))?
            .join(dir)
    };
    std::fs::create_dir_all(&resolved).map_err(|err| invalid(err.to_string()))?;
    Ok(resolved)
}

fn install_panic_hook() {
    if PANIC_HOOK.set(()).is_err() {
        return;
    }

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = match info.location() {
            Some(loc) => format!("{}:{}", loc.file(), loc.line()),
            None => "unknown".to_string(),
        };
        error!(
            "event=panic_captured module=core status=error location={} payload={}",
            location,
            one_line(panic_message(info), PANIC_PAYLOAD_LIMIT)
        );
        default_hook(info);
    }));
}

fn panic_message<'a>(info: &'a std::panic::PanicHookInfo<'_>) -> &'a str {
    let payload = info.payload();
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

/// Flattens `value` to one line of at most `limit` chars.
fn one_line(value: &str, limit: usize) -> String {
    let flat = value.replace(['\n', '\r'], " ");
    let mut line: String = flat.chars().take(limit).collect();
    if flat.chars().count() > limit {
        line.push_str("...");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::{
        init_logging, logging_status, one_line, parse_level, resolve_dir, LogTarget, LoggingError,
    };
    use log::LevelFilter;
    use std::path::Path;

    #[test]
    fn levels_parse_case_insensitively() {
        assert_eq!(parse_level("INFO").unwrap(), LevelFilter::Info);
        assert_eq!(parse_level(" warning ").unwrap(), LevelFilter::Warn);
        assert!(matches!(
            parse_level("verbose"),
            Err(LoggingError::UnknownLevel(level)) if level == "verbose"
        ));
    }

    #[test]
    fn empty_directory_is_rejected() {
        assert!(matches!(
            resolve_dir(Path::new("")),
            Err(LoggingError::InvalidDirectory { .. })
        ));
    }

    #[test]
    fn directory_is_created_when_missing() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("logs").join("api");
        let resolved = resolve_dir(&nested).unwrap();
        assert_eq!(resolved, nested);
        assert!(nested.is_dir());
    }

    #[test]
    fn one_line_flattens_and_truncates() {
        assert_eq!(one_line("a\nb\rc", 10), "a b c");
        assert_eq!(one_line("abcdef", 3), "abc...");
    }

    #[test]
    fn second_init_must_match_first() {
        let dir = tempfile::tempdir().unwrap();
        let other = tempfile::tempdir().unwrap();

        let status = init_logging("info", Some(dir.path())).unwrap();
        let expected = LogTarget::Directory(dir.path().to_path_buf());
        assert_eq!(status.target, expected);
        init_logging("INFO", Some(dir.path())).unwrap();

        assert!(matches!(
            init_logging("debug", Some(dir.path())),
            Err(LoggingError::Conflict { .. })
        ));
        assert!(matches!(
            init_logging("info", Some(other.path())),
            Err(LoggingError::Conflict { .. })
        ));
        assert!(matches!(
            init_logging("info", None),
            Err(LoggingError::Conflict { .. })
        ));

        let active = logging_status().unwrap();
        assert_eq!(active.level, LevelFilter::Info);
        assert_eq!(active, status);
    }
}

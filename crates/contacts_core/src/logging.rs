//! Rolling file logs for the contact store.
//!
//! # Responsibility
//! - Initialize file-based rolling logs exactly once per process.
//! - Keep diagnostics off the interactive console.
//! - Record panics by location only.
//!
//! # Invariants
//! - Logging init is idempotent for the same directory and level.
//! - Re-initialization with a different directory or level is rejected.
//! - Logging initialization must not panic.
//! - Log lines carry metadata only; contact field values are never logged.
//!   Panic payloads can embed user input, so only their kind and length are kept.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::any::Any;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "contacts";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const BUILD_MODE: &str = if cfg!(debug_assertions) {
    "debug"
} else {
    "release"
};

/// Accepted spellings and the filter each maps to.
const LEVEL_ALIASES: [(&str, &str); 6] = [
    ("trace", "trace"),
    ("debug", "debug"),
    ("info", "info"),
    ("warn", "warn"),
    ("warning", "warn"),
    ("error", "error"),
];

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();
static PANIC_HOOK_INSTALLED: OnceCell<()> = OnceCell::new();

struct LoggingState {
    level: &'static str,
    log_dir: PathBuf,
    _logger: LoggerHandle,
}

/// Failures raised while bringing up the file logger.
#[derive(Debug)]
pub enum LoggingError {
    UnsupportedLevel(String),
    EmptyDirectory,
    RelativeDirectory(PathBuf),
    CreateDirectory { dir: PathBuf, source: std::io::Error },
    Backend(flexi_logger::FlexiLoggerError),
    LevelConflict { active: &'static str, requested: &'static str },
    DirectoryConflict { active: PathBuf, requested: PathBuf },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::EmptyDirectory => f.write_str("log_dir cannot be empty"),
            Self::RelativeDirectory(path) => write!(
                f,
                "log_dir must be an absolute path, got `{}`",
                path.display()
            ),
            Self::CreateDirectory { dir, source } => write!(
                f,
                "failed to create log directory `{}`: {source}",
                dir.display()
            ),
            Self::Backend(err) => write!(f, "failed to start logger: {err}"),
            Self::LevelConflict { active, requested } => write!(
                f,
                "logging already initialized with level `{active}`; refusing to switch to `{requested}`"
            ),
            Self::DirectoryConflict { active, requested } => write!(
                f,
                "logging already initialized at `{}`; refusing to switch to `{}`",
                active.display(),
                requested.display()
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

/// Initializes file logging with `level` under the absolute directory `log_dir`.
///
/// # Errors
/// - `UnsupportedLevel` for anything other than trace|debug|info|warn|error.
/// - `EmptyDirectory` / `RelativeDirectory` for an unusable `log_dir`.
/// - `CreateDirectory` / `Backend` when the logger cannot be brought up.
/// - `LevelConflict` / `DirectoryConflict` when already active with other settings.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), LoggingError> {
    let level = normalize_level(level)?;
    let log_dir = normalize_log_dir(log_dir)?;

    if let Some(state) = LOGGING_STATE.get() {
        return state.check_matches(level, &log_dir);
    }

    let state = LOGGING_STATE.get_or_try_init(|| start_logger(level, log_dir.clone()))?;
    state.check_matches(level, &log_dir)
}

/// Returns `(level, log_dir)` of the active logger, or `None` before init.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    LOGGING_STATE
        .get()
        .map(|state| (state.level, state.log_dir.clone()))
}

/// `debug` in debug builds, `info` in release builds.
pub fn default_log_level() -> &'static str {
    match BUILD_MODE {
        "debug" => "debug",
        _ => "info",
    }
}

impl LoggingState {
    fn check_matches(&self, level: &'static str, log_dir: &Path) -> Result<(), LoggingError> {
        if self.log_dir != log_dir {
            return Err(LoggingError::DirectoryConflict {
                active: self.log_dir.clone(),
                requested: log_dir.to_path_buf(),
            });
        }
        if self.level != level {
            return Err(LoggingError::LevelConflict {
                active: self.level,
                requested: level,
            });
        }
        Ok(())
    }
}

fn start_logger(level: &'static str, log_dir: PathBuf) -> Result<LoggingState, LoggingError> {
    std::fs::create_dir_all(&log_dir).map_err(|source| LoggingError::CreateDirectory {
        dir: log_dir.clone(),
        source,
    })?;

    // Format: [YYYY-MM-DD HH:MM:SS.ffffff TZ] LEVEL [module] file:line: message
    let logger = Logger::try_with_str(level)
        .map_err(LoggingError::Backend)?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(LoggingError::Backend)?;

    install_panic_hook_once();

    info!(
        "event=app_start module=core status=ok platform={} build_mode={} version={}",
        std::env::consts::OS,
        BUILD_MODE,
        env!("CARGO_PKG_VERSION")
    );
    info!(
        "event=logging_init module=core status=ok level={} log_dir={}",
        level,
        log_dir.display()
    );

    Ok(LoggingState {
        level,
        log_dir,
        _logger: logger,
    })
}

fn normalize_level(level: &str) -> Result<&'static str, LoggingError> {
    let requested = level.trim().to_ascii_lowercase();
    LEVEL_ALIASES
        .iter()
        .find(|(alias, _)| *alias == requested)
        .map(|(_, filter)| *filter)
        .ok_or(LoggingError::UnsupportedLevel(requested))
}

fn normalize_log_dir(log_dir: &str) -> Result<PathBuf, LoggingError> {
    let path = PathBuf::from(log_dir.trim());
    if path.as_os_str().is_empty() {
        Err(LoggingError::EmptyDirectory)
    } else if path.is_relative() {
        Err(LoggingError::RelativeDirectory(path))
    } else {
        Ok(path)
    }
}

fn install_panic_hook_once() {
    if PANIC_HOOK_INSTALLED.set(()).is_err() {
        return;
    }

    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let (file, line) = panic_info
            .location()
            .map_or(("unknown", 0), |loc| (loc.file(), loc.line()));
        let (kind, chars) = describe_payload(panic_info.payload());
        error!(
            "event=panic_captured module=core status=error file={} line={} payload_kind={} payload_chars={}",
            file, line, kind, chars
        );
        previous_hook(panic_info);
    }));
}

/// Kind and character count of a panic payload, without its text.
fn describe_payload(payload: &(dyn Any + Send)) -> (&'static str, usize) {
    if let Some(message) = payload.downcast_ref::<&str>() {
        ("str", message.chars().count())
    } else if let Some(message) = payload.downcast_ref::<String>() {
        ("string", message.chars().count())
    } else {
        ("opaque", 0)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        describe_payload, init_logging, logging_status, normalize_level, normalize_log_dir,
        LoggingError,
    };
    use std::any::Any;
    use std::path::Path;

    #[test]
    fn normalize_level_accepts_known_values() {
        assert_eq!(normalize_level("DEBUG").unwrap(), "debug");
        assert_eq!(normalize_level("error").unwrap(), "error");
        assert_eq!(normalize_level(" warning ").unwrap(), "warn");
        assert!(matches!(
            normalize_level("loud"),
            Err(LoggingError::UnsupportedLevel(level)) if level == "loud"
        ));
    }

    #[test]
    fn normalize_log_dir_rejects_empty_and_relative_paths() {
        let relative = normalize_log_dir("logs/dev").unwrap_err();
        assert!(matches!(
            &relative,
            LoggingError::RelativeDirectory(path) if path == Path::new("logs/dev")
        ));
        assert!(relative.to_string().contains("absolute"));
        assert!(matches!(
            normalize_log_dir("   "),
            Err(LoggingError::EmptyDirectory)
        ));
    }

    #[test]
    fn describe_payload_reports_shape_without_text() {
        let borrowed: Box<dyn Any + Send> = Box::new("Ana|ana@x.com");
        assert_eq!(describe_payload(borrowed.as_ref()), ("str", 13));

        let owned: Box<dyn Any + Send> = Box::new(String::from("Léo"));
        assert_eq!(describe_payload(owned.as_ref()), ("string", 3));

        let opaque: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(describe_payload(opaque.as_ref()), ("opaque", 0));
    }

    #[test]
    fn init_logging_is_idempotent_and_rejects_conflicts() {
        let log_dir = tempfile::tempdir().unwrap();
        let other_dir = tempfile::tempdir().unwrap();
        let log_dir_str = log_dir.path().to_str().unwrap().to_string();
        let other_dir_str = other_dir.path().to_str().unwrap().to_string();

        init_logging("info", &log_dir_str).expect("first init should succeed");
        init_logging("INFO", &log_dir_str).expect("same config should be idempotent");

        let level_err = init_logging("debug", &log_dir_str).unwrap_err();
        assert!(matches!(level_err, LoggingError::LevelConflict { .. }));

        let dir_err = init_logging("info", &other_dir_str).unwrap_err();
        assert!(matches!(dir_err, LoggingError::DirectoryConflict { .. }));
        assert!(dir_err.to_string().contains("refusing to switch"));

        let (active_level, active_dir) = logging_status().expect("logging should be active");
        assert_eq!(active_level, "info");
        assert_eq!(active_dir, log_dir.path());
    }
}

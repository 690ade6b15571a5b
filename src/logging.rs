//! File logging.
//!
//! The terminal belongs to the UI, so logs go to rotating files under
//! `<data_dir>/logs`. Initialization happens once per process and never panics.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const LOG_FILE_BASENAME: &str = "focusdesk";
const LOG_DIR_NAME: &str = "logs";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 2 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static LOGGER: OnceLock<LoggerHandle> = OnceLock::new();

pub fn log_dir(data_dir: &Path) -> PathBuf {
    data_dir.join(LOG_DIR_NAME)
}

/// Normalizes a configured level; unknown values are rejected.
pub fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" => Ok("off"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error|off"
        )),
    }
}

/// Starts file logging. Calling it again after a successful start is a no-op.
pub fn init_logging(level: &str, data_dir: &Path) -> Result<(), String> {
    if LOGGER.get().is_some() {
        return Ok(());
    }

    let level = normalize_level(level)?;
    let dir = log_dir(data_dir);
    std::fs::create_dir_all(&dir)
        .map_err(|err| format!("failed to create log directory `{}`: {err}", dir.display()))?;

    let handle = Logger::try_with_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?
        .log_to_file(
            FileSpec::default()
                .directory(dir.as_path())
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
        .map_err(|err| format!("failed to start logger: {err}"))?;

    // Lost a race with another initializer; the extra handle is dropped.
    let _ = LOGGER.set(handle);

    info!(
        "focusdesk {} starting, level={} log_dir={}",
        env!("CARGO_PKG_VERSION"),
        level,
        dir.display()
    );
    Ok(())
}

/// Writes out buffered log lines. The handle lives in a static and is never
/// dropped, so this has to run before the process exits.
pub fn flush() {
    if let Some(handle) = LOGGER.get() {
        handle.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_level() {
        assert_eq!(normalize_level("INFO"), Ok("info"));
        assert_eq!(normalize_level(" warning "), Ok("warn"));
        assert_eq!(normalize_level("off"), Ok("off"));
        assert!(normalize_level("loud").is_err());
    }

    #[test]
    fn test_log_dir_is_under_data_dir() {
        assert_eq!(
            log_dir(Path::new("/data/focusdesk")),
            PathBuf::from("/data/focusdesk/logs")
        );
    }

    // The only test that starts the global logger.
    #[test]
    fn test_flush_writes_buffered_lines() {
        let dir = tempfile::tempdir().unwrap();
        init_logging("info", dir.path()).unwrap();
        log::error!("flush marker 7f3a");
        flush();

        let contents: String = std::fs::read_dir(log_dir(dir.path()))
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "log"))
            .filter_map(|entry| std::fs::read_to_string(entry.path()).ok())
            .collect();
        assert!(contents.contains("flush marker 7f3a"));
        assert!(contents.contains("starting"));
    }
}

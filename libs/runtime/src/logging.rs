use crate::config::LoggingConfig;
use std::{
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tracing::Level;
use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry,
};

use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    ContentLimit, FileRotate,
};

// -------- level helpers --------
fn parse_tracing_level(s: &str) -> Option<Level> {
    match s.to_ascii_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        "off" | "none" => None,
        _ => Some(Level::INFO),
    }
}

// -------- rotating writer for files --------
#[derive(Clone)]
struct RotWriter(Arc<Mutex<FileRotate<AppendTimestamp>>>);

impl<'a> fmt::MakeWriter<'a> for RotWriter {
    type Writer = RotWriterHandle;
    fn make_writer(&'a self) -> Self::Writer {
        RotWriterHandle(self.0.clone())
    }
}

#[derive(Clone)]
struct RotWriterHandle(Arc<Mutex<FileRotate<AppendTimestamp>>>);

impl Write for RotWriterHandle {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0.lock().unwrap().flush()
    }
}

// -------- path resolution helpers --------

/// Resolve a log file path against `base_dir`.
/// Absolute paths are kept as-is; relative paths are joined with `base_dir`.
fn resolve_log_path(file: &str, base_dir: &Path) -> PathBuf {
    let p = Path::new(file);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}

/// Create a rotating writer for log files, ensuring the parent directory exists.
fn create_rotating_writer_at_path(
    log_path: &Path,
    max_bytes: usize,
    max_backups: usize,
) -> Result<RotWriter, Box<dyn std::error::Error + Send + Sync>> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let rot = FileRotate::new(
        log_path,
        AppendTimestamp::default(FileLimit::MaxFiles(max_backups)),
        ContentLimit::BytesSurpassed(max_bytes),
        Compression::None,
        #[cfg(unix)]
        None, // file permissions (Unix only)
    );

    Ok(RotWriter(Arc::new(Mutex::new(rot))))
}

// -------- public init --------

/// Initialize logging from a configuration.
/// - `cfg`: console level plus an optional size-rotated log file
/// - `base_dir`: base directory used to resolve relative log file paths
///
/// Safe to call more than once; only the first subscriber wins.
pub fn init_logging_from_config(cfg: &LoggingConfig, base_dir: &Path) {
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    if let Some(level) = parse_tracing_level(&cfg.console_level) {
        layers.push(
            fmt::layer()
                .with_target(true)
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .with_filter(LevelFilter::from_level(level))
                .boxed(),
        );
    }

    if !cfg.file.trim().is_empty() {
        let file_level = if cfg.file_level.trim().is_empty() {
            Some(Level::DEBUG)
        } else {
            parse_tracing_level(&cfg.file_level)
        };

        if let Some(level) = file_level {
            let max_bytes = cfg.max_size_mb.unwrap_or(100) * 1024 * 1024;
            let max_backups = cfg.max_backups.unwrap_or(3);
            let log_path = resolve_log_path(&cfg.file, base_dir);

            match create_rotating_writer_at_path(&log_path, max_bytes as usize, max_backups) {
                Ok(writer) => layers.push(
                    fmt::layer()
                        .with_ansi(false)
                        .with_target(true)
                        .with_timer(fmt::time::UtcTime::rfc_3339())
                        .with_writer(writer)
                        .with_filter(LevelFilter::from_level(level))
                        .boxed(),
                ),
                Err(e) => {
                    eprintln!(
                        "Failed to initialize log file '{}': {}",
                        log_path.to_string_lossy(),
                        e
                    );
                }
            }
        }
    }

    let _ = tracing_subscriber::registry().with(layers).try_init();
}

/// Plain console logging; used when no configuration is available yet.
pub fn init_default_logging() {
    let _ = fmt()
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::fmt::MakeWriter;

    #[test]
    fn test_parse_tracing_level() {
        assert_eq!(parse_tracing_level("trace"), Some(Level::TRACE));
        assert_eq!(parse_tracing_level("DEBUG"), Some(Level::DEBUG));
        assert_eq!(parse_tracing_level("info"), Some(Level::INFO));
        assert_eq!(parse_tracing_level("off"), None);
        assert_eq!(parse_tracing_level("none"), None);
        // Unknown levels fall back to info
        assert_eq!(parse_tracing_level("verbose"), Some(Level::INFO));
    }

    #[test]
    fn test_resolve_log_path() {
        let base = Path::new("/srv/flightboard");
        assert_eq!(
            resolve_log_path("logs/app.log", base),
            PathBuf::from("/srv/flightboard/logs/app.log")
        );
        assert_eq!(
            resolve_log_path("/var/log/app.log", base),
            PathBuf::from("/var/log/app.log")
        );
    }

    #[test]
    fn test_rotating_writer_creates_parent_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let log_path = tmp.path().join("nested/logs/app.log");

        let writer = create_rotating_writer_at_path(&log_path, 1024, 1).unwrap();
        let mut handle = writer.make_writer();
        handle.write_all(b"hello\n").unwrap();
        handle.flush().unwrap();

        assert!(log_path.parent().unwrap().is_dir());
    }
}

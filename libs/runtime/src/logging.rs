use crate::config::{LoggingConfig, Section};
use std::{
    collections::HashMap,
    io::{IsTerminal, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tracing::{level_filters::LevelFilter, Level};
use tracing_subscriber::{filter::Targets, fmt};

use file_rotate::{
    compression::Compression,
    suffix::AppendCount,
    ContentLimit, FileRotate,
};

const DEFAULT_SECTION: &str = "default";

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

fn level_filter(s: &str) -> LevelFilter {
    parse_tracing_level(s)
        .map(LevelFilter::from_level)
        .unwrap_or(LevelFilter::OFF)
}

/// Returns true if target == prefix or target starts with "prefix::"
fn matches_target_prefix(target: &str, prefix: &str) -> bool {
    target == prefix
        || (target.starts_with(prefix) && target[prefix.len()..].starts_with("::"))
}

// -------- rotating writer for files --------
#[derive(Clone)]
struct RotWriter(Arc<Mutex<FileRotate<AppendCount>>>);

struct RotWriterHandle(Option<Arc<Mutex<FileRotate<AppendCount>>>>);

impl Write for RotWriterHandle {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match &self.0 {
            Some(inner) => inner
                .lock()
                .map_err(|_| std::io::Error::other("log writer poisoned"))?
                .write(buf),
            // no sink for this target: drop silently
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match &self.0 {
            Some(inner) => inner
                .lock()
                .map_err(|_| std::io::Error::other("log writer poisoned"))?
                .flush(),
            None => Ok(()),
        }
    }
}

/// Routes file records by target prefix, falling back to the default file.
struct FileRouter {
    default: Option<RotWriter>,
    by_prefix: HashMap<String, RotWriter>,
}

impl FileRouter {
    fn resolve_for(&self, target: &str) -> Option<&RotWriter> {
        self.by_prefix
            .iter()
            .find(|(prefix, _)| matches_target_prefix(target, prefix))
            .map(|(_, w)| w)
            .or(self.default.as_ref())
    }

    fn is_empty(&self) -> bool {
        self.default.is_none() && self.by_prefix.is_empty()
    }
}

impl<'a> fmt::MakeWriter<'a> for FileRouter {
    type Writer = RotWriterHandle;

    fn make_writer(&'a self) -> Self::Writer {
        RotWriterHandle(self.default.as_ref().map(|w| w.0.clone()))
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        RotWriterHandle(self.resolve_for(meta.target()).map(|w| w.0.clone()))
    }
}

// -------- path resolution helpers --------

/// Absolute paths are kept; relative paths are joined with `base_dir` (home_dir).
fn resolve_log_path(file: &str, base_dir: &Path) -> PathBuf {
    let p = Path::new(file);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}

fn create_rotating_writer_at_path(
    log_path: &Path,
    max_bytes: usize,
    max_backups: usize,
) -> std::io::Result<RotWriter> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let rot = FileRotate::new(
        log_path,
        AppendCount::new(max_backups),
        ContentLimit::BytesSurpassed(max_bytes),
        Compression::None,
        #[cfg(unix)]
        None,
    );

    Ok(RotWriter(Arc::new(Mutex::new(rot))))
}

fn file_writer_for(name: &str, section: &Section, base_dir: &Path) -> Option<RotWriter> {
    if section.file.trim().is_empty() {
        return None;
    }

    let max_bytes = section.max_size_mb.unwrap_or(100) * 1024 * 1024;
    let log_path = resolve_log_path(&section.file, base_dir);

    match create_rotating_writer_at_path(
        &log_path,
        max_bytes as usize,
        section.max_backups.unwrap_or(3),
    ) {
        Ok(writer) => Some(writer),
        Err(e) => {
            eprintln!(
                "Failed to init log file for '{}': {} ({})",
                name,
                log_path.to_string_lossy(),
                e
            );
            None
        }
    }
}

fn explicit_sections(cfg: &LoggingConfig) -> impl Iterator<Item = (&String, &Section)> {
    cfg.iter().filter(|(k, _)| k.as_str() != DEFAULT_SECTION)
}

fn build_console_targets(cfg: &LoggingConfig) -> Targets {
    let default = cfg
        .get(DEFAULT_SECTION)
        .map(|s| level_filter(&s.console_level))
        .unwrap_or(LevelFilter::OFF);

    explicit_sections(cfg).fold(Targets::new().with_default(default), |t, (name, s)| {
        t.with_target(name.clone(), level_filter(&s.console_level))
    })
}

fn build_file_targets(cfg: &LoggingConfig, has_default_file: bool) -> Targets {
    let default = match cfg.get(DEFAULT_SECTION) {
        Some(s) if has_default_file => level_filter(&s.file_level),
        _ => LevelFilter::OFF,
    };

    explicit_sections(cfg).fold(Targets::new().with_default(default), |t, (name, s)| {
        let level = if s.file.trim().is_empty() {
            LevelFilter::OFF
        } else {
            level_filter(&s.file_level)
        };
        t.with_target(name.clone(), level)
    })
}

fn build_file_router(cfg: &LoggingConfig, base_dir: &Path) -> FileRouter {
    FileRouter {
        default: cfg
            .get(DEFAULT_SECTION)
            .and_then(|s| file_writer_for(DEFAULT_SECTION, s, base_dir)),
        by_prefix: explicit_sections(cfg)
            .filter_map(|(name, s)| file_writer_for(name, s, base_dir).map(|w| (name.clone(), w)))
            .collect(),
    }
}

// -------- public init --------

/// Install the global subscriber.
/// - `cfg`: logging sections keyed by target prefix ("default" is the catch-all)
/// - `base_dir`: directory relative log file paths are resolved against (server.home_dir)
pub fn init_logging_from_config(cfg: &LoggingConfig, base_dir: &Path) {
    use tracing_subscriber::{prelude::*, Registry};

    if cfg.is_empty() {
        init_default_logging();
        return;
    }

    let ansi = std::io::stdout().is_terminal();
    let console_layer = fmt::layer()
        .with_ansi(ansi)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_filter(build_console_targets(cfg));

    let router = build_file_router(cfg, base_dir);
    let file_layer = if router.is_empty() {
        None
    } else {
        let targets = build_file_targets(cfg, router.default.is_some());
        Some(
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_target(true)
                .with_level(true)
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .with_writer(router)
                .with_filter(targets),
        )
    };

    // try_init also bridges `log` records (sqlx) into tracing
    let _ = Registry::default()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

fn init_default_logging() {
    let _ = fmt()
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .try_init();
}

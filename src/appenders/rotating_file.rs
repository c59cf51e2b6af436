//! Rotating file appender with size-based rotation
//!
//! The active file always lives at the configured path. When a write would
//! push it past the size limit, the file is renamed to a timestamped backup
//! in the same directory and a fresh file is opened:
//!
//! ```text
//! app.log                                  active file
//! app-2025-01-08T10-30-45.123.log          backup
//! app-2025-01-07T22-01-12.004.log.gz       compressed backup
//! ```
//!
//! The file and its parent directories are created on the first write, so
//! building an appender never touches the filesystem. After each rotation,
//! backups are pruned by count and age and, when compression is on, every
//! remaining plain backup is gzip-compressed.

use crate::core::appender::Appender;
use crate::core::error::{LoggerError, Result};
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const MEGABYTE: u64 = 1024 * 1024;

/// Size limit used when none is configured
pub const DEFAULT_MAX_SIZE_MB: u64 = 100;

const BACKUP_TIME_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.3f";
const COMPRESSED_SUFFIX: &str = ".gz";

/// Rotation and retention settings
///
/// Zero values mean "unset": no size means [`DEFAULT_MAX_SIZE_MB`], no backup
/// count keeps every backup, no age disables age pruning.
///
/// # Examples
///
/// ```
/// use rust_log_wrapper::appenders::RotationConfig;
///
/// let config = RotationConfig::new()
///     .with_max_size_mb(10)
///     .with_max_backups(5)
///     .with_max_age_days(28)
///     .with_compression(true);
///
/// assert_eq!(config.max_bytes(), 10 * 1024 * 1024);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RotationConfig {
    max_bytes: u64,
    max_backups: usize,
    max_age_days: u32,
    compress: bool,
}

impl RotationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_size_mb(mut self, size_mb: u64) -> Self {
        self.max_bytes = size_mb.saturating_mul(MEGABYTE);
        self
    }

    /// Exact size limit in bytes; replaces any megabyte setting
    #[must_use]
    pub fn with_max_bytes(mut self, bytes: u64) -> Self {
        self.max_bytes = bytes;
        self
    }

    #[must_use]
    pub fn with_max_backups(mut self, count: usize) -> Self {
        self.max_backups = count;
        self
    }

    #[must_use]
    pub fn with_max_age_days(mut self, days: u32) -> Self {
        self.max_age_days = days;
        self
    }

    #[must_use]
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }

    /// Effective size limit in bytes
    pub fn max_bytes(&self) -> u64 {
        if self.max_bytes == 0 {
            DEFAULT_MAX_SIZE_MB * MEGABYTE
        } else {
            self.max_bytes
        }
    }

    pub fn max_backups(&self) -> usize {
        self.max_backups
    }

    pub fn max_age_days(&self) -> u32 {
        self.max_age_days
    }

    pub fn compress(&self) -> bool {
        self.compress
    }
}

/// A backup file found next to the active log
#[derive(Debug)]
struct Backup {
    path: PathBuf,
    time: DateTime<Utc>,
    compressed: bool,
}

/// File appender that rotates on size
///
/// # Examples
///
/// ```no_run
/// use rust_log_wrapper::appenders::{RotatingFileAppender, RotationConfig};
///
/// let config = RotationConfig::new().with_max_size_mb(50).with_max_backups(7);
/// let appender = RotatingFileAppender::new("/var/log/app.log", config);
/// assert_eq!(appender.current_size(), 0);
/// ```
pub struct RotatingFileAppender {
    path: PathBuf,
    config: RotationConfig,
    file: Option<File>,
    current_size: u64,
}

impl RotatingFileAppender {
    /// Appender for `path`; nothing is opened until the first write
    pub fn new<P: AsRef<Path>>(path: P, config: RotationConfig) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            config,
            file: None,
            current_size: 0,
        }
    }

    /// Open (or create) the active file and its parent directories if needed
    fn ensure_open(&mut self) -> Result<()> {
        if self.file.is_some() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LoggerError::file_appender(
                    self.path.display().to_string(),
                    format!("Failed to create directory '{}': {}", parent.display(), e),
                )
            })?;
        }

        let (file, size) = Self::open_active(&self.path).map_err(|e| {
            LoggerError::file_appender(
                self.path.display().to_string(),
                format!("Failed to open: {}", e),
            )
        })?;
        self.file = Some(file);
        self.current_size = size;
        Ok(())
    }

    fn open_active(path: &Path) -> std::io::Result<(File, u64)> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let size = file.metadata()?.len();
        Ok((file, size))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &RotationConfig {
        &self.config
    }

    /// Bytes in the active file, zero until it is first opened
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    /// Close the active file, move it to a backup and start a new one
    pub fn rotate(&mut self) -> Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush().map_err(|e| {
                LoggerError::file_rotation(
                    self.path.display().to_string(),
                    format!("Failed to flush before rotation: {}", e),
                )
            })?;
        }

        let backup = self.next_backup_path(Utc::now());
        if self.path.exists() {
            fs::rename(&self.path, &backup).map_err(|e| {
                LoggerError::file_rotation(
                    self.path.display().to_string(),
                    format!("Failed to rotate current log file: {}", e),
                )
            })?;
        }

        let (file, size) = Self::open_active(&self.path).map_err(|e| {
            LoggerError::file_rotation(
                self.path.display().to_string(),
                format!("Failed to create new log file: {}", e),
            )
        })?;
        self.file = Some(file);
        self.current_size = size;

        self.mill_backups();

        Ok(())
    }

    /// Backup path for a rotation at `time`, stepping past existing names
    fn next_backup_path(&self, mut time: DateTime<Utc>) -> PathBuf {
        loop {
            let candidate = self.backup_path(time);
            let compressed = append_suffix(&candidate, COMPRESSED_SUFFIX);
            if !candidate.exists() && !compressed.exists() {
                return candidate;
            }
            time += Duration::milliseconds(1);
        }
    }

    fn backup_path(&self, time: DateTime<Utc>) -> PathBuf {
        let (stem, ext) = self.name_parts();
        self.path.with_file_name(format!(
            "{}-{}{}",
            stem,
            time.format(BACKUP_TIME_FORMAT),
            ext
        ))
    }

    /// File stem and extension (with its dot) of the active file
    fn name_parts(&self) -> (String, String) {
        let stem = self
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("app")
            .to_string();
        let ext = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();
        (stem, ext)
    }

    /// Backups of this log, newest first
    pub fn backups(&self) -> Vec<PathBuf> {
        self.scan_backups().into_iter().map(|b| b.path).collect()
    }

    fn scan_backups(&self) -> Vec<Backup> {
        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(dir) => dir.to_path_buf(),
            None => PathBuf::from("."),
        };
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                eprintln!("[WARN] Cannot list log directory {}: {}", dir.display(), e);
                return Vec::new();
            }
        };

        let (stem, ext) = self.name_parts();
        let prefix = format!("{}-", stem);

        let mut backups: Vec<Backup> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                let time = parse_backup_time(&name, &prefix, &ext)?;
                Some(Backup {
                    compressed: name.ends_with(COMPRESSED_SUFFIX),
                    path: entry.path(),
                    time,
                })
            })
            .collect();

        backups.sort_by(|a, b| b.time.cmp(&a.time));
        backups
    }

    /// Remove backups beyond the count or age limit, then compress the
    /// remaining plain backups when compression is on
    fn mill_backups(&self) {
        let max_backups = self.config.max_backups;
        let max_age_days = self.config.max_age_days;
        if max_backups == 0 && max_age_days == 0 && !self.config.compress {
            return;
        }

        let cutoff = Utc::now() - Duration::days(i64::from(max_age_days));
        let mut retained = Vec::new();

        for (index, backup) in self.scan_backups().into_iter().enumerate() {
            let over_count = max_backups > 0 && index >= max_backups;
            let too_old = max_age_days > 0 && backup.time < cutoff;
            if !(over_count || too_old) {
                retained.push(backup);
                continue;
            }
            if let Err(e) = fs::remove_file(&backup.path) {
                eprintln!(
                    "[WARN] Failed to remove old backup {}: {}",
                    backup.path.display(),
                    e
                );
            }
        }

        if !self.config.compress {
            return;
        }
        for backup in retained.iter().filter(|b| !b.compressed) {
            if let Err(e) = compress_file(&backup.path) {
                eprintln!(
                    "[WARN] Failed to compress rotated log {}: {}",
                    backup.path.display(),
                    e
                );
            }
        }
    }
}

/// Parse the rotation time out of `<prefix><time><ext>[.gz]`
fn parse_backup_time(name: &str, prefix: &str, ext: &str) -> Option<DateTime<Utc>> {
    let name = name.strip_suffix(COMPRESSED_SUFFIX).unwrap_or(name);
    let stamp = name.strip_prefix(prefix)?.strip_suffix(ext)?;
    NaiveDateTime::parse_from_str(stamp, BACKUP_TIME_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Gzip `path` to `path.gz` through a temporary file, then remove the original
///
/// The original is only deleted once the compressed copy is complete.
fn compress_file(path: &Path) -> Result<()> {
    use std::io::{BufReader, BufWriter};

    let gz_path = append_suffix(path, COMPRESSED_SUFFIX);
    let temp_gz_path = append_suffix(path, ".gz.tmp");

    let input = File::open(path).map_err(|e| {
        LoggerError::io_operation(
            "compress log file",
            format!("Failed to open file for compression: {}", path.display()),
            e,
        )
    })?;
    let mut reader = BufReader::with_capacity(64 * 1024, input);

    let output = File::create(&temp_gz_path).map_err(|e| {
        LoggerError::io_operation(
            "compress log file",
            format!(
                "Failed to create temporary compressed file: {}",
                temp_gz_path.display()
            ),
            e,
        )
    })?;
    let mut encoder = flate2::write::GzEncoder::new(
        BufWriter::with_capacity(64 * 1024, output),
        flate2::Compression::default(),
    );

    let streamed = std::io::copy(&mut reader, &mut encoder)
        .and_then(|_| encoder.finish())
        .and_then(|mut writer| writer.flush());
    if let Err(e) = streamed {
        let _ = fs::remove_file(&temp_gz_path);
        return Err(LoggerError::io_operation(
            "compress log file",
            format!("Failed to compress {}", path.display()),
            e,
        ));
    }

    fs::rename(&temp_gz_path, &gz_path).map_err(|e| {
        let _ = fs::remove_file(&temp_gz_path);
        LoggerError::io_operation(
            "compress log file",
            format!("Failed to rename compressed file to: {}", gz_path.display()),
            e,
        )
    })?;

    if let Err(e) = fs::remove_file(path) {
        eprintln!(
            "[WARN] Compression succeeded but failed to remove original file {}: {}. \
             Both compressed and uncompressed versions exist.",
            path.display(),
            e
        );
    }

    Ok(())
}

impl Appender for RotatingFileAppender {
    fn name(&self) -> &str {
        "RotatingFileAppender"
    }

    fn append(&mut self, record: &[u8]) -> Result<()> {
        let len = record.len() as u64;
        let max_bytes = self.config.max_bytes();
        if len > max_bytes {
            return Err(LoggerError::file_appender(
                self.path.display().to_string(),
                format!(
                    "write length {} exceeds maximum file size {}",
                    len, max_bytes
                ),
            ));
        }

        self.ensure_open()?;

        if self.current_size + len > max_bytes {
            if let Err(e) = self.rotate() {
                eprintln!("[WARN] Log rotation failed: {}. Continuing with current file.", e);
                self.ensure_open()?;
            }
        }

        let file = self.file.as_mut().ok_or_else(|| {
            LoggerError::file_appender(self.path.display().to_string(), "file not open")
        })?;
        file.write_all(record).map_err(|e| {
            LoggerError::file_appender(
                self.path.display().to_string(),
                format!("Failed to write log entry: {}", e),
            )
        })?;
        self.current_size += len;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(file) = self.file.as_mut() {
            file.flush().map_err(|e| {
                LoggerError::file_appender(
                    self.path.display().to_string(),
                    format!("Failed to flush: {}", e),
                )
            })?;
        }
        Ok(())
    }
}

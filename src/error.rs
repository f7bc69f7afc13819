use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Custom error type for the exporter
#[derive(Error, Debug)]
pub enum ExporterError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Cannot bind metrics listener on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("Scan failed: {0}")]
    Scan(#[from] ScanError),

    #[error("Metrics registry error: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for the exporter
pub type Result<T> = std::result::Result<T, ExporterError>;

impl ExporterError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        ExporterError::Config(msg.into())
    }

    /// Create a bind error for the given listen address
    pub fn bind(addr: SocketAddr, source: io::Error) -> Self {
        ExporterError::Bind { addr, source }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        ExporterError::Other(msg.into())
    }

    pub fn is_config(&self) -> bool {
        matches!(self, ExporterError::Config(_) | ExporterError::Yaml(_))
    }
}

/// Failure of a single monitor's directory scan.
///
/// Only directory-level failures surface here; per-file stat failures are
/// absorbed by the scanner.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("directory not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    /// Classify an I/O error raised while opening or listing `path`.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => ScanError::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => ScanError::PermissionDenied(path.to_path_buf()),
            _ => ScanError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

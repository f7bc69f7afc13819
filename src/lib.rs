// File Count Exporter Library - Public API

// Re-export error types
pub mod error;
pub use error::{ExporterError, Result, ScanError};

// Module declarations
pub mod commands;
pub mod core;
pub mod metrics;
pub mod platform;

// Re-export commonly used types
pub use core::config::{Config, ConsoleStream, LoggingConfig};

use std::fs::{File, OpenOptions};
use std::io::{self, Write};

/// Copies every log line to the console and to the log file
struct LogTee {
    console: ConsoleStream,
    file: File,
}

impl Write for LogTee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.console {
            ConsoleStream::Stdout => io::stdout().write_all(buf)?,
            ConsoleStream::Stderr => io::stderr().write_all(buf)?,
        }
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.console {
            ConsoleStream::Stdout => io::stdout().flush()?,
            ConsoleStream::Stderr => io::stderr().flush()?,
        }
        self.file.flush()
    }
}

// Initialize logging
//
// The configured level is the default; RUST_LOG still takes precedence.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(config.level)
        .parse_env(env_logger::Env::default())
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<8} {}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S"),
                record.level(),
                record.args()
            )
        });

    let file = match &config.log_file {
        Some(path) => Some(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| ExporterError::config(format!("Cannot open log file {:?}: {}", path, e)))?,
        ),
        None => None,
    };

    match (config.console, file) {
        (Some(console), Some(file)) => {
            builder.target(env_logger::Target::Pipe(Box::new(LogTee { console, file })));
        }
        (None, Some(file)) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        (Some(ConsoleStream::Stdout), None) => {
            builder.target(env_logger::Target::Stdout);
        }
        (Some(ConsoleStream::Stderr), None) => {
            builder.target(env_logger::Target::Stderr);
        }
        (None, None) => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }

    builder
        .try_init()
        .map_err(|e| ExporterError::other(format!("Logger already initialized: {}", e)))
}

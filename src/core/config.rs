use serde::Deserialize;
use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::monitor::MonitorSpec;
use crate::error::{ExporterError, Result};

pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Exporter configuration as read from YAML
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub listen_port: u16,
    pub update_interval_seconds: u64,
    #[serde(default = "default_listen_address")]
    pub listen_address: IpAddr,
    /// Overrides the resolved host address in the `server` label
    #[serde(default)]
    pub server_label: Option<String>,
    #[serde(default = "default_true")]
    pub log_to_stdout: bool,
    #[serde(default)]
    pub log_to_file: bool,
    #[serde(default)]
    pub log_filename: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub monitors: Vec<MonitorConfig>,
}

/// Console stream for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStream {
    Stdout,
    Stderr,
}

/// Logging destinations and level, see [`crate::init_logging`]
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `None` when console logging is disabled
    pub console: Option<ConsoleStream>,
    /// Append-mode log file, if any
    pub log_file: Option<PathBuf>,
    pub level: log::LevelFilter,
}

/// One `monitors` entry before normalization
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorConfig {
    pub directory_path: PathBuf,
    pub directory_name: String,
    #[serde(default)]
    pub extensions_to_watch: Vec<String>,
    #[serde(default = "default_true")]
    pub recurse: bool,
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_listen_address() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

impl LoggingConfig {
    /// Keep stdout free for program output; console logging moves to stderr
    pub fn console_to_stderr(mut self) -> Self {
        if self.console.is_some() {
            self.console = Some(ConsoleStream::Stderr);
        }
        self
    }
}

impl Config {
    /// Read, parse and validate a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = fs::read_to_string(path).map_err(|e| {
            ExporterError::config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.listen_port == 0 {
            return Err(ExporterError::config("listen_port must be between 1 and 65535"));
        }
        if self.update_interval_seconds == 0 {
            return Err(ExporterError::config(
                "update_interval_seconds must be a positive number of seconds",
            ));
        }
        if self.log_to_file && self.log_filename.is_none() {
            return Err(ExporterError::config(
                "log_filename is required when log_to_file is enabled",
            ));
        }
        if self.log_level.parse::<log::LevelFilter>().is_err() {
            return Err(ExporterError::config(format!(
                "unknown log_level {:?}",
                self.log_level
            )));
        }

        for (index, monitor) in self.monitors.iter().enumerate() {
            if monitor.directory_name.trim().is_empty() {
                return Err(ExporterError::config(format!(
                    "monitors[{}]: directory_name must not be empty",
                    index
                )));
            }
            monitor.to_spec().map_err(|e| match e {
                ExporterError::Config(msg) => {
                    ExporterError::config(format!("monitors[{}]: {}", index, msg))
                }
                other => other,
            })?;
        }

        Ok(())
    }

    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            console: self.log_to_stdout.then_some(ConsoleStream::Stdout),
            log_file: if self.log_to_file {
                self.log_filename.clone()
            } else {
                None
            },
            level: self.log_level.parse().unwrap_or(log::LevelFilter::Info),
        }
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.listen_address, self.listen_port)
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_secs(self.update_interval_seconds)
    }

    /// Normalized monitors in configured order
    pub fn monitor_specs(&self) -> Result<Vec<MonitorSpec>> {
        self.monitors.iter().map(MonitorConfig::to_spec).collect()
    }
}

impl MonitorConfig {
    pub fn to_spec(&self) -> Result<MonitorSpec> {
        MonitorSpec::new(
            self.directory_path.clone(),
            self.directory_name.clone(),
            &self.extensions_to_watch,
            self.recurse,
        )
    }
}

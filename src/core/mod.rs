// Core business logic module

pub mod config;
pub mod file_scanner;
pub mod monitor;
pub mod scan_result;
pub mod scheduler;

// Re-export commonly used items
pub use config::{Config, ConsoleStream, LoggingConfig, MonitorConfig};
pub use file_scanner::FileScanner;
pub use monitor::MonitorSpec;
pub use scan_result::ScanResult;
pub use scheduler::{CycleReport, PollScheduler, Shutdown};

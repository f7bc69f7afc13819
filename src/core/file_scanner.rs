//! Directory scanner producing per-monitor file statistics
//!
//! The scanner walks one monitored directory (optionally recursively) and
//! aggregates counts into a [`ScanResult`]. Only regular files are counted;
//! symbolic links are neither counted nor followed.
//!
//! # Failure boundary
//!
//! Failing to open or enumerate any directory of the tree, including an error
//! yielded partway through a listing, aborts the scan with a [`ScanError`],
//! and no partial result is returned. An entry whose
//! type or size cannot be read (typically a file removed between listing and
//! stat) is skipped and counted in [`ScanResult::skipped_entries`].
//!
//! # Examples
//!
//! ```no_run
//! use file_count_exporter::core::file_scanner::FileScanner;
//! use file_count_exporter::core::monitor::MonitorSpec;
//!
//! let monitor = MonitorSpec::new("/var/log", "logs", [".log"], true)?;
//! let result = FileScanner::new(&monitor).scan()?;
//!
//! println!("{} files, {} empty", result.total_file_count, result.empty_file_count);
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::monitor::{file_extension, MonitorSpec};
use crate::core::scan_result::ScanResult;
use crate::error::ScanError;

/// Scanner bound to a single monitor
pub struct FileScanner<'a> {
    monitor: &'a MonitorSpec,
}

impl<'a> FileScanner<'a> {
    pub fn new(monitor: &'a MonitorSpec) -> Self {
        Self { monitor }
    }

    /// Walk the monitored directory and aggregate its files
    pub fn scan(&self) -> Result<ScanResult, ScanError> {
        let root = self.monitor.directory_path();
        log::debug!("Scanning {:?} (recurse={})", root, self.monitor.recurse());

        let metadata = fs::metadata(root).map_err(|e| ScanError::from_io(root, e))?;
        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory(root.to_path_buf()));
        }

        let mut result = ScanResult::seeded(self.monitor.extensions_to_watch());
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            self.scan_dir(&dir, &mut result, &mut pending)?;
        }

        Ok(result)
    }

    /// Count the entries of one directory, queueing subdirectories when recursing
    fn scan_dir(
        &self,
        dir: &Path,
        result: &mut ScanResult,
        pending: &mut Vec<PathBuf>,
    ) -> Result<(), ScanError> {
        let entries = fs::read_dir(dir).map_err(|e| ScanError::from_io(dir, e))?;

        for entry in entries {
            // The listing itself broke off; the rest of this directory is unknown
            let entry = entry.map_err(|e| ScanError::from_io(dir, e))?;

            // file_type() does not follow symlinks
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(e) => {
                    log::debug!("Skipping {:?}: cannot read file type: {}", entry.path(), e);
                    result.record_skipped();
                    continue;
                }
            };

            if file_type.is_dir() {
                if self.monitor.recurse() {
                    pending.push(entry.path());
                }
                continue;
            }
            if !file_type.is_file() {
                continue;
            }

            let size = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(e) => {
                    log::debug!("Skipping {:?}: cannot stat: {}", entry.path(), e);
                    result.record_skipped();
                    continue;
                }
            };

            let extension = file_extension(Path::new(&entry.file_name()));
            let watched = extension.as_deref().filter(|ext| self.monitor.watches(ext));
            result.record_file(size, watched);
        }

        Ok(())
    }
}

/// Scan one monitor
pub fn scan(monitor: &MonitorSpec) -> Result<ScanResult, ScanError> {
    FileScanner::new(monitor).scan()
}

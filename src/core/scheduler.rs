//! Polling scheduler driving repeated collection.
//!
//! One cycle scans every monitor in configured order and writes each result
//! into the metrics sink before moving on to the next monitor. A failing
//! monitor is logged and skipped; its gauges keep their last-known values and
//! only `file_scan_success` drops to zero. After the cycle the scheduler waits
//! the configured interval, or returns early once [`Shutdown`] is triggered.
//!
//! Scans are sequential and blocking: a slow tree delays the monitors after it
//! and the start of the next cycle.

use std::sync::Arc;
use std::time::{Duration, Instant};

use humansize::{format_size, DECIMAL};
use parking_lot::{Condvar, Mutex};

use crate::core::file_scanner;
use crate::core::monitor::MonitorSpec;
use crate::core::scan_result::ScanResult;
use crate::error::Result;
use crate::metrics::{Metric, MetricsSink};

/// Stop signal shared between the process and the scheduler thread
#[derive(Clone, Default)]
pub struct Shutdown {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        let (lock, cvar) = &*self.inner;
        *lock.lock() = true;
        cvar.notify_all();
    }

    pub fn is_triggered(&self) -> bool {
        *self.inner.0.lock()
    }

    /// Block for up to `timeout`; returns true if shutdown was requested
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let mut triggered = lock.lock();
        if !*triggered {
            cvar.wait_while_for(&mut triggered, |triggered| !*triggered, timeout);
        }
        *triggered
    }
}

/// Outcome of one pass over all monitors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub scanned: usize,
    pub failed: usize,
    pub elapsed: Duration,
}

impl CycleReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

pub struct PollScheduler<S: MetricsSink + ?Sized> {
    monitors: Vec<MonitorSpec>,
    interval: Duration,
    server: String,
    sink: Arc<S>,
}

impl<S: MetricsSink + ?Sized> PollScheduler<S> {
    pub fn new(monitors: Vec<MonitorSpec>, interval: Duration, server: String, sink: Arc<S>) -> Self {
        Self {
            monitors,
            interval,
            server,
            sink,
        }
    }

    pub fn monitors(&self) -> &[MonitorSpec] {
        &self.monitors
    }

    /// Run cycles until `shutdown` is triggered
    pub fn run(&self, shutdown: &Shutdown) {
        log::info!(
            "Poll scheduler started: {} monitor(s), interval {}s",
            self.monitors.len(),
            self.interval.as_secs()
        );

        while !shutdown.is_triggered() {
            let report = self.run_cycle();
            log::debug!(
                "Cycle finished in {:?}: {} scanned, {} failed",
                report.elapsed,
                report.scanned,
                report.failed
            );

            if shutdown.wait_timeout(self.interval) {
                break;
            }
        }

        log::info!("Poll scheduler stopped");
    }

    /// Scan every monitor once, in configured order
    pub fn run_cycle(&self) -> CycleReport {
        let cycle_start = Instant::now();
        let mut report = CycleReport::default();

        for monitor in &self.monitors {
            log::debug!("Collecting file counts for: {}", monitor);

            let started = Instant::now();
            let outcome: Result<ScanResult> = file_scanner::scan(monitor)
                .map_err(Into::into)
                .and_then(|result| {
                    self.publish(monitor, &result, started.elapsed())?;
                    Ok(result)
                });

            match outcome {
                Ok(result) => {
                    report.scanned += 1;
                    log::info!(
                        "Scanned {:?}: {} files, {} empty, {} in watched extensions",
                        monitor.directory_path(),
                        result.total_file_count,
                        result.empty_file_count,
                        format_size(result.watched_bytes(), DECIMAL)
                    );
                    if result.skipped_entries > 0 {
                        log::warn!(
                            "Skipped {} unreadable entries under {:?}",
                            result.skipped_entries,
                            monitor.directory_path()
                        );
                    }
                }
                Err(e) => {
                    report.failed += 1;
                    log::error!(
                        "Error occurred while processing directory {:?}: {}",
                        monitor.directory_path(),
                        e
                    );
                    self.mark_failed(monitor);
                }
            }
        }

        report.elapsed = cycle_start.elapsed();
        report
    }

    /// Write one scan result into the sink
    fn publish(&self, monitor: &MonitorSpec, result: &ScanResult, elapsed: Duration) -> Result<()> {
        let path = monitor.path_label();
        let name = monitor.directory_name();
        let labels = [path.as_str(), name, self.server.as_str()];

        self.sink
            .set_gauge(Metric::FileCount, &labels, result.total_file_count as f64)?;
        self.sink
            .set_gauge(Metric::EmptyFileCount, &labels, result.empty_file_count as f64)?;

        for (ext, count) in &result.ext_count {
            let ext_labels = [path.as_str(), name, ext.as_str(), self.server.as_str()];
            self.sink
                .set_gauge(Metric::FileCountByExtension, &ext_labels, *count as f64)?;
        }
        for (ext, bytes) in &result.ext_disk_space {
            let ext_labels = [path.as_str(), name, ext.as_str(), self.server.as_str()];
            self.sink
                .set_gauge(Metric::FileDiskSpaceByExtension, &ext_labels, *bytes as f64)?;
        }

        self.sink
            .set_gauge(Metric::ScanDurationSeconds, &labels, elapsed.as_secs_f64())?;
        self.sink.set_gauge(Metric::ScanSuccess, &labels, 1.0)?;
        Ok(())
    }

    /// Flag a failed scan without touching the last-known values
    fn mark_failed(&self, monitor: &MonitorSpec) {
        let path = monitor.path_label();
        let labels = [path.as_str(), monitor.directory_name(), self.server.as_str()];

        if let Err(e) = self.sink.set_gauge(Metric::ScanSuccess, &labels, 0.0) {
            log::error!("Failed to record scan failure for {:?}: {}", monitor.directory_path(), e);
        }
    }
}

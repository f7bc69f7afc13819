//! Gauge sink and Prometheus exposition.
//!
//! The scheduler writes through the [`MetricsSink`] trait; [`PrometheusSink`]
//! keeps the values in a private registry that the HTTP endpoint in
//! [`server`] renders on every scrape.

pub mod server;

use std::collections::HashMap;

use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};

use crate::error::{ExporterError, Result};

pub use server::MetricsServer;

const MONITOR_LABELS: &[&str] = &["path", "name", "server"];
const EXTENSION_LABELS: &[&str] = &["path", "name", "extension", "server"];

/// Every gauge the exporter publishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    FileCount,
    FileCountByExtension,
    FileDiskSpaceByExtension,
    EmptyFileCount,
    ScanSuccess,
    ScanDurationSeconds,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::FileCount,
        Metric::FileCountByExtension,
        Metric::FileDiskSpaceByExtension,
        Metric::EmptyFileCount,
        Metric::ScanSuccess,
        Metric::ScanDurationSeconds,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Metric::FileCount => "file_count",
            Metric::FileCountByExtension => "file_count_by_extension",
            Metric::FileDiskSpaceByExtension => "file_disk_space_by_extension",
            Metric::EmptyFileCount => "empty_file_count",
            Metric::ScanSuccess => "file_scan_success",
            Metric::ScanDurationSeconds => "file_scan_duration_seconds",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            Metric::FileCount => "Number of files in directory",
            Metric::FileCountByExtension => "Number of files with extension",
            Metric::FileDiskSpaceByExtension => "Disk space used by files with extension",
            Metric::EmptyFileCount => "Number of empty files",
            Metric::ScanSuccess => "Whether the last scan of the directory succeeded",
            Metric::ScanDurationSeconds => "Duration of the last successful scan in seconds",
        }
    }

    /// Label names, in the order `set_gauge` expects the values
    pub fn label_names(self) -> &'static [&'static str] {
        match self {
            Metric::FileCountByExtension | Metric::FileDiskSpaceByExtension => EXTENSION_LABELS,
            _ => MONITOR_LABELS,
        }
    }
}

/// Destination for gauge updates.
///
/// Writes are last-write-wins per label combination; setting the same labels
/// twice overwrites.
pub trait MetricsSink: Send + Sync {
    fn set_gauge(&self, metric: Metric, labels: &[&str], value: f64) -> Result<()>;
}

/// Sink backed by a dedicated Prometheus registry
#[derive(Clone)]
pub struct PrometheusSink {
    registry: Registry,
    gauges: HashMap<Metric, GaugeVec>,
}

impl PrometheusSink {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        let mut gauges = HashMap::with_capacity(Metric::ALL.len());

        for metric in Metric::ALL {
            let gauge = GaugeVec::new(Opts::new(metric.name(), metric.help()), metric.label_names())?;
            registry.register(Box::new(gauge.clone()))?;
            gauges.insert(metric, gauge);
        }

        Ok(Self { registry, gauges })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Render the registry in the Prometheus text exposition format
    pub fn encode(&self) -> Result<String> {
        encode_registry(&self.registry)
    }

    /// Current value of one series, if it has been written
    pub fn gauge_value(&self, metric: Metric, labels: &[&str]) -> Option<f64> {
        let expected: Vec<(&str, &str)> = metric
            .label_names()
            .iter()
            .copied()
            .zip(labels.iter().copied())
            .collect();

        self.registry
            .gather()
            .iter()
            .find(|family| family.get_name() == metric.name())?
            .get_metric()
            .iter()
            .find(|sample| {
                let pairs = sample.get_label();
                pairs.len() == expected.len()
                    && expected.iter().all(|(name, value)| {
                        pairs
                            .iter()
                            .any(|pair| pair.get_name() == *name && pair.get_value() == *value)
                    })
            })
            .map(|sample| sample.get_gauge().value())
    }
}

impl MetricsSink for PrometheusSink {
    fn set_gauge(&self, metric: Metric, labels: &[&str], value: f64) -> Result<()> {
        let gauge = self
            .gauges
            .get(&metric)
            .ok_or_else(|| ExporterError::other(format!("unregistered metric {}", metric.name())))?;

        gauge.get_metric_with_label_values(labels)?.set(value);
        Ok(())
    }
}

pub fn encode_registry(registry: &Registry) -> Result<String> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| ExporterError::other(format!("metrics are not UTF-8: {}", e)))
}

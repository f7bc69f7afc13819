//! Exporter startup and main loop.
//!
//! Startup loads the configuration, sets up logging, resolves the `server`
//! label and binds the metrics listener; any failure there is fatal. The poll
//! scheduler then runs on its own thread while the HTTP server answers scrapes
//! until the process receives SIGINT/SIGTERM.

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::sync::Arc;
use std::thread;

use crate::core::config::Config;
use crate::core::scheduler::{PollScheduler, Shutdown};
use crate::init_logging;
use crate::metrics::server::METRICS_PATH;
use crate::metrics::{MetricsServer, PrometheusSink};
use crate::platform::resolve_server_identity;

/// Execute the exporter
///
/// With `once` set, a single cycle is run and the resulting metrics are
/// printed to stdout instead of being served.
pub fn execute(config_path: &Path, once: bool) -> Result<()> {
    let config = Config::load(config_path)
        .with_context(|| format!("Failed to load configuration from {:?}", config_path))?;

    // stdout carries the exposition text in one-shot mode
    let logging = if once {
        config.logging().console_to_stderr()
    } else {
        config.logging()
    };
    init_logging(&logging).context("Failed to initialize logging")?;

    let monitors = config.monitor_specs()?;
    if monitors.is_empty() {
        log::warn!("No monitors configured; only the metrics endpoint will be served");
    }

    let server_label = resolve_server_identity(config.server_label.as_deref());
    let sink = Arc::new(PrometheusSink::new().context("Failed to create metrics registry")?);
    let scheduler = PollScheduler::new(
        monitors,
        config.update_interval(),
        server_label.clone(),
        sink.clone(),
    );

    if once {
        let report = scheduler.run_cycle();
        print!("{}", sink.encode()?);
        if !report.all_succeeded() {
            bail!("{} of {} monitor(s) failed", report.failed, scheduler.monitors().len());
        }
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .thread_name("exporter-http")
        .build()
        .context("Failed to create async runtime")?;

    let shutdown = Shutdown::new();

    let (served, worker) = runtime.block_on(async {
        let server = MetricsServer::bind(config.listen_addr(), &sink)
            .context("Failed to start metrics listener")?;

        log::info!(
            "Prometheus File Count Exporter started at http://{}{} (server label {})",
            config.listen_addr(),
            METRICS_PATH,
            server_label
        );

        let worker = thread::Builder::new()
            .name("poll-scheduler".to_string())
            .spawn({
                let shutdown = shutdown.clone();
                move || scheduler.run(&shutdown)
            })
            .context("Failed to start poll scheduler")?;

        let served = server.run().await;
        Ok::<_, anyhow::Error>((served, worker))
    })?;

    log::info!("Metrics server stopped, shutting down");
    shutdown.trigger();
    if worker.join().is_err() {
        log::error!("Poll scheduler terminated abnormally");
    }

    served.context("Metrics server failed")
}

//! Validate a configuration file without starting the exporter.

use anyhow::{Context, Result};
use std::path::Path;

use crate::core::config::Config;

pub fn execute(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)
        .with_context(|| format!("Invalid configuration in {:?}", config_path))?;
    let monitors = config.monitor_specs()?;

    println!("Configuration {:?} is valid", config_path);
    println!("  listen address:  {}", config.listen_addr());
    println!("  update interval: {}s", config.update_interval_seconds);
    println!("  monitors:        {}", monitors.len());

    for monitor in &monitors {
        let exists = monitor.directory_path().is_dir();
        println!(
            "    - {}{}",
            monitor,
            if exists { "" } else { " [directory not found]" }
        );
    }

    Ok(())
}

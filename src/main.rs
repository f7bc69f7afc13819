use clap::{Arg, Command};
use std::path::PathBuf;
use std::process::ExitCode;

use file_count_exporter::commands;
use file_count_exporter::core::config::DEFAULT_CONFIG_FILE;

fn cli() -> Command {
    Command::new("file-count-exporter")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Prometheus exporter for per-directory file statistics")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .short_alias('V')
                .long("version")
                .help("Print version information")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Path to the YAML configuration file")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value(DEFAULT_CONFIG_FILE),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .help("Validate the configuration and exit")
                .action(clap::ArgAction::SetTrue)
                .conflicts_with("once"),
        )
        .arg(
            Arg::new("once")
                .long("once")
                .help("Run a single collection cycle, print the metrics and exit")
                .action(clap::ArgAction::SetTrue),
        )
}

fn main() -> ExitCode {
    let matches = cli().get_matches();

    let result = if matches.get_flag("version") {
        commands::version()
    } else {
        // default_value guarantees presence
        let config_path = matches
            .get_one::<PathBuf>("config")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        if matches.get_flag("check") {
            commands::check(&config_path)
        } else {
            commands::serve(&config_path, matches.get_flag("once"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

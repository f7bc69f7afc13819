use file_count_exporter::core::config::Config;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_config_load_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.yaml");
    fs::write(
        &path,
        r#"
listen_port: 9200
update_interval_seconds: 15
listen_address: 127.0.0.1
server_label: web-01
log_to_stdout: false
log_to_file: true
log_filename: exporter.log
log_level: debug
monitors:
  - directory_path: /var/spool
    directory_name: spool
    extensions_to_watch: [".MSG", "tmp"]
    recurse: false
"#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.listen_addr().to_string(), "127.0.0.1:9200");
    assert_eq!(config.server_label.as_deref(), Some("web-01"));

    let logging = config.logging();
    assert_eq!(logging.console, None);
    assert_eq!(logging.log_file.as_deref(), Some(Path::new("exporter.log")));
    assert_eq!(logging.level, log::LevelFilter::Debug);

    let monitors = config.monitor_specs().unwrap();
    assert_eq!(monitors.len(), 1);
    let exts: Vec<&str> = monitors[0]
        .extensions_to_watch()
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(exts, vec![".msg", ".tmp"]);
    assert!(!monitors[0].recurse());
}

#[test]
fn test_config_load_missing_file_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = Config::load(temp_dir.path().join("absent.yaml")).unwrap_err();
    assert!(err.is_config());
}

#[test]
fn test_config_monitor_missing_name_is_rejected() {
    let err = Config::from_yaml(
        r#"
listen_port: 9100
update_interval_seconds: 5
monitors:
  - directory_path: /tmp
    extensions_to_watch: [".log"]
"#,
    )
    .unwrap_err();
    assert!(err.is_config());
}

#[test]
fn test_config_empty_monitor_list_is_allowed() {
    let config =
        Config::from_yaml("listen_port: 9100\nupdate_interval_seconds: 5\nmonitors: []\n").unwrap();
    assert!(config.monitor_specs().unwrap().is_empty());
}

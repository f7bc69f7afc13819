use file_count_exporter::metrics::Metric;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn is_exposition_line(line: &str) -> bool {
    if line.starts_with("# HELP ") || line.starts_with("# TYPE ") {
        return true;
    }

    let Some((series, value)) = line.rsplit_once(' ') else {
        return false;
    };
    let name = series.split('{').next().unwrap_or_default();

    value.parse::<f64>().is_ok() && Metric::ALL.iter().any(|m| m.name() == name)
}

#[test]
fn test_once_prints_only_exposition_text_on_stdout() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("data");
    fs::create_dir(&data).unwrap();
    fs::write(data.join("app.log"), vec![b'x'; 100]).unwrap();
    fs::write(data.join("empty.txt"), b"").unwrap();

    let config = temp_dir.path().join("config.yaml");
    fs::write(
        &config,
        format!(
            "listen_port: 9100\nupdate_interval_seconds: 5\nserver_label: host\nlog_level: debug\nmonitors:\n  - directory_path: {:?}\n    directory_name: data\n    extensions_to_watch: [\".log\"]\n",
            data
        ),
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_file-count-exporter"))
        .arg("--config")
        .arg(&config)
        .arg("--once")
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("# TYPE file_count gauge"));
    for line in stdout.lines().filter(|l| !l.is_empty()) {
        assert!(is_exposition_line(line), "not exposition text: {:?}", line);
    }

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Scanned"));
}

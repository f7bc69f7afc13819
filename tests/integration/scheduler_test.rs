use file_count_exporter::core::monitor::MonitorSpec;
use file_count_exporter::core::scheduler::PollScheduler;
use file_count_exporter::metrics::{Metric, PrometheusSink};
use std::fs;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

const SERVER: &str = "10.1.2.3";

fn labels<'a>(path: &'a str, name: &'a str) -> [&'a str; 3] {
    [path, name, SERVER]
}

#[test]
fn test_failed_monitor_keeps_last_known_values() {
    let temp = TempDir::new().unwrap();
    let watched = temp.path().join("spool");
    fs::create_dir(&watched).unwrap();
    fs::write(watched.join("a.log"), b"0123456789").unwrap();
    fs::write(watched.join("b.log"), b"").unwrap();

    let sink = Arc::new(PrometheusSink::new().unwrap());
    let scheduler = PollScheduler::new(
        vec![MonitorSpec::new(&watched, "spool", [".log"], false).unwrap()],
        Duration::from_secs(60),
        SERVER.to_string(),
        sink.clone(),
    );

    assert!(scheduler.run_cycle().all_succeeded());

    let path = watched.to_string_lossy().into_owned();
    assert_eq!(sink.gauge_value(Metric::FileCount, &labels(&path, "spool")), Some(2.0));
    assert_eq!(sink.gauge_value(Metric::EmptyFileCount, &labels(&path, "spool")), Some(1.0));
    assert_eq!(sink.gauge_value(Metric::ScanSuccess, &labels(&path, "spool")), Some(1.0));

    fs::remove_dir_all(&watched).unwrap();
    let report = scheduler.run_cycle();
    assert_eq!(report.failed, 1);

    assert_eq!(sink.gauge_value(Metric::FileCount, &labels(&path, "spool")), Some(2.0));
    assert_eq!(
        sink.gauge_value(Metric::FileDiskSpaceByExtension, &[path.as_str(), "spool", ".log", SERVER]),
        Some(10.0)
    );
    assert_eq!(sink.gauge_value(Metric::ScanSuccess, &labels(&path, "spool")), Some(0.0));
}

#[test]
fn test_error_on_first_monitor_still_updates_second() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("not-there");
    let present = temp.path().join("present");
    fs::create_dir(&present).unwrap();
    fs::write(present.join("x.csv"), b"abc").unwrap();

    let sink = Arc::new(PrometheusSink::new().unwrap());
    let scheduler = PollScheduler::new(
        vec![
            MonitorSpec::new(&missing, "a", [".csv"], true).unwrap(),
            MonitorSpec::new(&present, "b", [".csv", ".json"], true).unwrap(),
        ],
        Duration::from_secs(60),
        SERVER.to_string(),
        sink.clone(),
    );

    let report = scheduler.run_cycle();
    assert_eq!(report.scanned, 1);
    assert_eq!(report.failed, 1);

    let missing_path = missing.to_string_lossy().into_owned();
    let present_path = present.to_string_lossy().into_owned();

    assert_eq!(sink.gauge_value(Metric::FileCount, &labels(&missing_path, "a")), None);
    assert_eq!(sink.gauge_value(Metric::FileCount, &labels(&present_path, "b")), Some(1.0));
    assert_eq!(
        sink.gauge_value(Metric::FileCountByExtension, &[present_path.as_str(), "b", ".csv", SERVER]),
        Some(1.0)
    );
    // Watched but absent extensions are exported as zero
    assert_eq!(
        sink.gauge_value(Metric::FileCountByExtension, &[present_path.as_str(), "b", ".json", SERVER]),
        Some(0.0)
    );
    assert_eq!(
        sink.gauge_value(Metric::FileDiskSpaceByExtension, &[present_path.as_str(), "b", ".json", SERVER]),
        Some(0.0)
    );
}

#[test]
fn test_repeated_cycles_overwrite_instead_of_accumulating() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("one.log"), b"1").unwrap();

    let sink = Arc::new(PrometheusSink::new().unwrap());
    let scheduler = PollScheduler::new(
        vec![MonitorSpec::new(temp.path(), "tmp", [".log"], true).unwrap()],
        Duration::from_secs(60),
        SERVER.to_string(),
        sink.clone(),
    );

    scheduler.run_cycle();
    scheduler.run_cycle();

    let path = temp.path().to_string_lossy().into_owned();
    assert_eq!(sink.gauge_value(Metric::FileCount, &labels(&path, "tmp")), Some(1.0));

    fs::write(temp.path().join("two.log"), b"22").unwrap();
    scheduler.run_cycle();
    assert_eq!(sink.gauge_value(Metric::FileCount, &labels(&path, "tmp")), Some(2.0));
    assert_eq!(
        sink.gauge_value(Metric::FileDiskSpaceByExtension, &[path.as_str(), "tmp", ".log", SERVER]),
        Some(3.0)
    );
}

use pc_probe::{
    metrics::{cpu, disk, memory},
    render_text, CounterKind, LoadSnapshot, MetricOutcome, Probe, ProbeConfig, ProbeError,
    ProbeReport,
};
use std::fs;
use std::path::Path;
use std::time::Duration;

const STAT: &str = "cpu  100 0 0 900 0 0 0 0 0 0\ncpu0 100 0 0 900 0 0 0 0 0 0\n";
const MEMINFO: &str = "MemTotal:       16384 kB\nMemFree:         2048 kB\nMemAvailable:    8192 kB\n";

fn fake_proc(stat: Option<&str>, meminfo: Option<&str>) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    if let Some(stat) = stat {
        fs::write(dir.path().join("stat"), stat).expect("Should write stat");
    }
    if let Some(meminfo) = meminfo {
        fs::write(dir.path().join("meminfo"), meminfo).expect("Should write meminfo");
    }
    dir
}

/// Ticks doubling in proportion give the ratio of the deltas
#[test]
fn test_load_ratio_from_stat_text() {
    let a = cpu::parse_stat("cpu 100 0 0 900 0 0 0\n").unwrap();
    let b = cpu::parse_stat("cpu 200 0 0 1800 0 0 0\n").unwrap();
    assert_eq!(a.sum_all(), 1000);
    assert_eq!(b.sum_all(), 2000);

    let ratio = cpu::load_ratio(&a, &b).expect("Ticks advanced");
    assert!((ratio - 0.10).abs() < 1e-12);
}

/// Work ticks never exceed total ticks for parsed input
#[test]
fn test_sum_work_bounded_by_sum_all() {
    for line in [
        "cpu 0 0 0 0 0 0 0",
        "cpu 1 2 3 4 5 6 7",
        "cpu 4705 356 584 3699176 23060 0 277 0 0 0",
        "cpu 18446744073 0 0 0 0 0 0",
    ] {
        let snapshot: LoadSnapshot = cpu::parse_stat(line).unwrap();
        assert!(snapshot.sum_work() <= snapshot.sum_all(), "{}", line);
    }
}

/// Tick totals past u64::MAX are a parse error, not a panic
#[test]
fn test_overflowing_ticks_rejected() {
    let err = cpu::parse_stat("cpu 18446744073709551615 0 0 1 0 0 0\n").unwrap_err();
    assert!(matches!(err, ProbeError::Parse(_)));
}

/// An overflowing stat file fails only the CPU sampler
#[tokio::test]
async fn test_overflowing_stat_isolated() {
    let dir = fake_proc(Some("cpu 18446744073709551615 0 0 1 0 0 0\n"), Some(MEMINFO));
    let config = ProbeConfig::new(dir.path())
        .with_proc_root(dir.path())
        .with_window_us(1_000);

    let report = Probe::new(config).unwrap().run("pc_probe").await;
    assert!(report.cpu.is_failed());
    assert!(report.disk.value().is_some());
    assert_eq!(report.memory.value().unwrap().total_kb, 16384);
}

/// Regression test for label-based meminfo parsing
#[test]
fn test_meminfo_by_label() {
    let measurement = memory::parse_meminfo("MemTotal: 16384 kB\nMemFree: 2048 kB\n").unwrap();
    assert_eq!(measurement.total_kb, 16384);
    assert_eq!(measurement.free_kb, 2048);

    let dir = fake_proc(None, Some(MEMINFO));
    let measurement = memory::sample_memory(dir.path()).unwrap();
    assert_eq!(measurement.total_kb, 16384);
    assert_eq!(measurement.free_kb, 2048);
    assert_eq!(measurement.available_kb, Some(8192));
}

/// Totals do not change between immediate samples
#[cfg(target_os = "linux")]
#[test]
fn test_live_samples_are_stable() {
    let first = memory::sample_memory(Path::new("/proc")).unwrap();
    let second = memory::sample_memory(Path::new("/proc")).unwrap();
    assert_eq!(first.total_kb, second.total_kb);
    assert!(first.free_kb <= first.total_kb);

    let first = disk::sample_disk(Path::new("/")).unwrap();
    let second = disk::sample_disk(Path::new("/")).unwrap();
    assert_eq!(first.total_bytes, second.total_bytes);
    assert!(first.free_bytes <= first.total_bytes);
}

/// A live CPU sample over a short window
#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_live_cpu_sample() {
    let measurement = cpu::sample_cpu(Path::new("/proc"), Duration::from_millis(50))
        .await
        .expect("Should sample /proc/stat");

    assert!(measurement.frequency_mhz.expect("Time elapsed") >= 0.0);
    if let Some(ratio) = measurement.load_ratio {
        assert!((0.0..=1.0).contains(&ratio));
    }
    assert_eq!(measurement.window_us, 50_000);
}

/// A complete run against a synthetic proc root
#[tokio::test]
async fn test_probe_with_fake_proc() {
    let dir = fake_proc(Some(STAT), Some(MEMINFO));
    let config = ProbeConfig::new(dir.path())
        .with_proc_root(dir.path())
        .with_window_us(5_000);

    let report = Probe::new(config).unwrap().run("./pc_probe").await;
    assert!(!report.has_failures());

    let cpu = report.cpu.value().unwrap();
    assert_eq!(cpu.load_ratio, None, "Frozen stat file has no tick progress");

    let text = render_text(&report);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "./pc_probe");
    assert!(lines[1].starts_with("CPU frequency: "));
    assert_eq!(lines[2], "CPU load: n/a (no tick progress)");
    assert!(lines[3].starts_with("Disc size: "));
    assert_eq!(lines[4], "Memory size: 2.0/16.4 MB");
}

/// Each sampler fails on its own without hiding the others
#[tokio::test]
async fn test_every_sampler_failing() {
    let dir = fake_proc(None, Some("Buffers: 1 kB\n"));
    let config = ProbeConfig::new(dir.path().join("missing"))
        .with_proc_root(dir.path())
        .with_window_us(1_000);

    let report = Probe::new(config).unwrap().run("pc_probe").await;
    assert!(report.cpu.is_failed());
    assert!(report.disk.is_failed());
    assert!(report.memory.is_failed());
    assert_eq!(pc_probe::exit_status(&report), 1);

    let text = render_text(&report);
    assert!(text.contains("CPU frequency: unavailable"));
    assert!(text.contains("Disc size: unavailable (statvfs failed"));
    assert!(text.contains("Memory size: unavailable"));
}

/// The JSON report parses back into the same values
#[tokio::test]
async fn test_json_report() {
    let dir = fake_proc(Some(STAT), Some(MEMINFO));
    let config = ProbeConfig::new(dir.path())
        .with_proc_root(dir.path())
        .with_window_us(1_000);
    let report = Probe::new(config).unwrap().run("pc_probe").await;

    let json = pc_probe::render(&report, pc_probe::OutputFormat::Json).unwrap();
    let parsed: ProbeReport = serde_json::from_str(&json).expect("Should deserialize report");

    assert_eq!(parsed.program, "pc_probe");
    match parsed.memory {
        MetricOutcome::Ok(memory) => assert_eq!(memory.total_kb, 16384),
        MetricOutcome::Failed { error } => panic!("memory failed: {}", error),
    }
    match parsed.cpu {
        MetricOutcome::Ok(cpu) => {
            assert_eq!(cpu.counter, pc_probe::metrics::clock::COUNTER_KIND);
            assert_eq!(cpu.load_ratio, None);
        }
        MetricOutcome::Failed { error } => panic!("cpu failed: {}", error),
    }
}

/// Missing stat source is an error, never zeroed counters
#[tokio::test]
async fn test_missing_stat_propagates() {
    let dir = fake_proc(None, None);
    let err = cpu::sample_cpu(dir.path(), Duration::from_millis(1))
        .await
        .unwrap_err();
    assert!(matches!(err, ProbeError::Io { .. }));
    assert!(err.to_string().contains("stat"));
}

#[test]
fn test_counter_kind_names() {
    assert_eq!(serde_json::to_string(&CounterKind::Tsc).unwrap(), "\"tsc\"");
    assert_eq!(
        serde_json::to_string(&CounterKind::ArmGenericTimer).unwrap(),
        "\"arm_generic_timer\""
    );
}

//! CPU frequency and load sampling.

use crate::error::{ProbeError, Result};
use crate::metrics::clock;
use crate::metrics::data::{CounterKind, CpuMeasurement, LoadSnapshot};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tokio::time::{self, Instant};
use tracing::debug;

/// Parse the aggregate `cpu` line of a stat file.
///
/// Only the first seven counters are used; newer kernels append steal and
/// guest columns which are ignored.
pub fn parse_stat(text: &str) -> Result<LoadSnapshot> {
    let line = text
        .lines()
        .find(|line| line.split_whitespace().next() == Some("cpu"))
        .ok_or_else(|| ProbeError::parse_error("no aggregate `cpu` line in stat"))?;

    let mut fields = [0u64; 7];
    let mut values = line.split_whitespace().skip(1);
    for (index, slot) in fields.iter_mut().enumerate() {
        let raw = values.next().ok_or_else(|| {
            ProbeError::parse_error(format!("`cpu` line has {} counters, expected 7", index))
        })?;
        *slot = raw.parse().map_err(|e| {
            ProbeError::parse_error(format!("invalid tick count {:?}: {}", raw, e))
        })?;
    }

    let [user, nice, system, idle, iowait, irq, softirq] = fields;
    let snapshot = LoadSnapshot {
        user,
        nice,
        system,
        idle,
        iowait,
        irq,
        softirq,
    };
    if snapshot.checked_sum_all().is_none() {
        return Err(ProbeError::parse_error(
            "`cpu` tick counters overflow a 64-bit total",
        ));
    }
    Ok(snapshot)
}

/// Read a load snapshot from `<proc_root>/stat`.
pub fn read_load_snapshot(proc_root: &Path) -> Result<LoadSnapshot> {
    let path = proc_root.join("stat");
    let text = fs::read_to_string(&path).map_err(|e| ProbeError::io(&path, e))?;
    parse_stat(&text)
}

/// Fraction of ticks spent working between two snapshots.
///
/// Returns `None` when no ticks elapsed, since the ratio is undefined.
pub fn load_ratio(start: &LoadSnapshot, end: &LoadSnapshot) -> Option<f64> {
    let all = end.sum_all().saturating_sub(start.sum_all());
    if all == 0 {
        return None;
    }
    let work = end.sum_work().saturating_sub(start.sum_work());
    Some((work as f64 / all as f64).clamp(0.0, 1.0))
}

impl CpuMeasurement {
    /// Derive a measurement from the readings taken at both ends of a window.
    pub fn from_window(
        start: &LoadSnapshot,
        end: &LoadSnapshot,
        cycles: (u64, u64),
        elapsed: Duration,
        counter: CounterKind,
        window: Duration,
    ) -> Self {
        let micros = elapsed.as_secs_f64() * 1_000_000.0;
        let frequency_mhz = if micros > 0.0 {
            Some(cycles.1.saturating_sub(cycles.0) as f64 / micros)
        } else {
            None
        };

        Self {
            frequency_mhz,
            load_ratio: load_ratio(start, end),
            counter,
            window_us: u64::try_from(window.as_micros()).unwrap_or(u64::MAX),
        }
    }
}

/// Sample CPU frequency and load over `window`.
///
/// Blocks the calling task for the whole window. A longer window gives a
/// steadier estimate.
pub async fn sample_cpu(proc_root: &Path, window: Duration) -> Result<CpuMeasurement> {
    let load_start = read_load_snapshot(proc_root)?;
    let cycles_start = clock::read_cycles();
    let started = Instant::now();

    time::sleep(window).await;

    let cycles_end = clock::read_cycles();
    let elapsed = started.elapsed();
    let load_end = read_load_snapshot(proc_root)?;

    debug!(
        "cpu window: {:?} elapsed, {} cycles, {} ticks",
        elapsed,
        cycles_end.saturating_sub(cycles_start),
        load_end.sum_all().saturating_sub(load_start.sum_all())
    );

    Ok(CpuMeasurement::from_window(
        &load_start,
        &load_end,
        (cycles_start, cycles_end),
        elapsed,
        clock::COUNTER_KIND,
        window,
    ))
}

//! Data structures for probe measurements.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cumulative CPU tick counters from the aggregate `cpu` line of the stat file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSnapshot {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
}

impl LoadSnapshot {
    fn all_fields(&self) -> [u64; 7] {
        [
            self.user,
            self.nice,
            self.system,
            self.idle,
            self.iowait,
            self.irq,
            self.softirq,
        ]
    }

    /// Sum of every tick class, `None` if it does not fit in a `u64`.
    pub fn checked_sum_all(&self) -> Option<u64> {
        self.all_fields()
            .iter()
            .try_fold(0u64, |acc, &ticks| acc.checked_add(ticks))
    }

    /// Sum of every tick class, saturating at `u64::MAX`.
    pub fn sum_all(&self) -> u64 {
        self.all_fields()
            .iter()
            .fold(0u64, |acc, &ticks| acc.saturating_add(ticks))
    }

    /// Ticks spent doing work: user + nice + system, saturating at `u64::MAX`.
    ///
    /// Never exceeds [`sum_all`](Self::sum_all).
    pub fn sum_work(&self) -> u64 {
        self.user.saturating_add(self.nice).saturating_add(self.system)
    }
}

/// Source of the cycle counter used for the frequency estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterKind {
    /// x86 time-stamp counter (`rdtsc`)
    Tsc,
    /// ARM generic timer (`cntvct_el0`), fixed rate independent of the core clock
    ArmGenericTimer,
    /// Monotonic clock in nanoseconds; yields a nominal 1000 MHz
    MonotonicNanos,
}

/// CPU frequency estimate and utilization over one measurement window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpuMeasurement {
    /// Estimated counter rate in MHz, `None` if no wall time elapsed
    pub frequency_mhz: Option<f64>,
    /// Work ticks over all ticks in `[0, 1]`, `None` if no ticks elapsed
    pub load_ratio: Option<f64>,
    /// Counter the frequency was derived from
    pub counter: CounterKind,
    /// Requested measurement window in microseconds
    pub window_us: u64,
}

/// Capacity of the filesystem containing the probed path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageMeasurement {
    pub total_bytes: u64,
    /// Space available to unprivileged users
    pub free_bytes: u64,
}

/// Physical memory figures from the meminfo file, in kB.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryMeasurement {
    pub total_kb: u64,
    pub free_kb: u64,
    /// `MemAvailable`, missing on kernels older than 3.14
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_kb: Option<u64>,
}

/// Result of one sampler, isolated from the others.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MetricOutcome<T> {
    Ok(T),
    Failed { error: String },
}

impl<T> MetricOutcome<T> {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// The measurement, if the sampler succeeded.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Failed { .. } => None,
        }
    }
}

impl<T> From<crate::error::Result<T>> for MetricOutcome<T> {
    fn from(result: crate::error::Result<T>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(err) => Self::Failed {
                error: err.to_string(),
            },
        }
    }
}

/// Everything one probe run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeReport {
    /// Invocation path of the program, printed as the report header
    pub program: String,
    /// When sampling finished
    pub sampled_at: DateTime<Utc>,
    pub cpu: MetricOutcome<CpuMeasurement>,
    pub disk: MetricOutcome<StorageMeasurement>,
    pub memory: MetricOutcome<MemoryMeasurement>,
}

impl ProbeReport {
    /// Whether any sampler failed.
    pub fn has_failures(&self) -> bool {
        self.cpu.is_failed() || self.disk.is_failed() || self.memory.is_failed()
    }
}

//! # pc_probe - one-shot Linux machine probe
//!
//! Samples CPU clock frequency and utilization, disk capacity and free space,
//! and physical memory, then reports them once.
//!
//! ## Features
//!
//! - **CPU**: frequency estimated from the cycle counter and load from
//!   `/proc/stat` tick deltas over a configurable window
//! - **Disk**: `statvfs` totals for the filesystem holding any path
//! - **Memory**: `MemTotal`/`MemFree` from `/proc/meminfo`, looked up by label
//! - **Isolation**: one failing sampler never hides the others
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pc_probe::{Probe, ProbeConfig, render_text};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let probe = Probe::new(ProbeConfig::new("/"))?;
//!     let report = probe.run("pc_probe").await;
//!     print!("{}", render_text(&report));
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod metrics;
pub mod probe;
pub mod report;

// Re-export public API
pub use config::ProbeConfig;
pub use error::{ProbeError, Result};
pub use metrics::data::{
    CounterKind, CpuMeasurement, LoadSnapshot, MemoryMeasurement, MetricOutcome, ProbeReport,
    StorageMeasurement,
};
pub use probe::Probe;
pub use report::{exit_status, render, render_text, OutputFormat};

/// The default CPU measurement window in microseconds
pub const DEFAULT_WINDOW_US: u64 = 1_000_000;

/// Where the kernel exposes `stat` and `meminfo`
pub const DEFAULT_PROC_ROOT: &str = "/proc";

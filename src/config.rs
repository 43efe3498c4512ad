//! Probe configuration.

use crate::error::{ProbeError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for one probe run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// CPU measurement window in microseconds
    pub window_us: u64,
    /// Any path on the filesystem to measure
    pub disk_path: PathBuf,
    /// Directory holding the `stat` and `meminfo` pseudo-files
    pub proc_root: PathBuf,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            window_us: crate::DEFAULT_WINDOW_US,
            disk_path: PathBuf::from("/"),
            proc_root: PathBuf::from(crate::DEFAULT_PROC_ROOT),
        }
    }
}

impl ProbeConfig {
    /// Create a configuration probing the filesystem that holds `disk_path`.
    pub fn new(disk_path: impl Into<PathBuf>) -> Self {
        Self {
            disk_path: disk_path.into(),
            ..Default::default()
        }
    }

    /// Set the CPU measurement window.
    pub fn with_window_us(mut self, window_us: u64) -> Self {
        self.window_us = window_us;
        self
    }

    /// Set the path whose filesystem is measured.
    pub fn with_disk_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.disk_path = path.into();
        self
    }

    /// Set the directory to read `stat` and `meminfo` from.
    pub fn with_proc_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.proc_root = root.into();
        self
    }

    /// The CPU window as a duration.
    pub fn window(&self) -> Duration {
        Duration::from_micros(self.window_us)
    }

    /// Reject configurations that cannot produce a measurement.
    pub fn validate(&self) -> Result<()> {
        if self.window_us == 0 {
            return Err(ProbeError::config_error(
                "measurement window must be greater than zero",
            ));
        }
        if self.disk_path.as_os_str().is_empty() {
            return Err(ProbeError::config_error("disk path is empty"));
        }
        Ok(())
    }
}

//! One round of sampling.

use crate::config::ProbeConfig;
use crate::error::Result;
use crate::metrics::{
    cpu::sample_cpu,
    data::{MetricOutcome, ProbeReport},
    disk::sample_disk,
    memory::sample_memory,
};
use chrono::Utc;
use tracing::{info, warn};

/// Runs every sampler once against a fixed configuration.
pub struct Probe {
    config: ProbeConfig,
}

impl Probe {
    /// Create a probe, rejecting unusable configurations.
    pub fn new(config: ProbeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Sample CPU, disk and memory in that order.
    ///
    /// A failing sampler is logged and recorded in its slot of the report;
    /// the remaining samplers still run.
    pub async fn run(&self, program: impl Into<String>) -> ProbeReport {
        info!("Sampling CPU over {:?}", self.config.window());
        let cpu = sample_cpu(&self.config.proc_root, self.config.window()).await;
        if let Err(err) = &cpu {
            warn!("cpu metrics unavailable: {}", err);
        }

        info!("Sampling disk at {}", self.config.disk_path.display());
        let disk = sample_disk(&self.config.disk_path);
        if let Err(err) = &disk {
            warn!("Error when accessing disc info: {}", err);
        }

        let memory = sample_memory(&self.config.proc_root);
        if let Err(err) = &memory {
            warn!("memory metrics unavailable: {}", err);
        }

        ProbeReport {
            program: program.into(),
            sampled_at: Utc::now(),
            cpu: MetricOutcome::from(cpu),
            disk: MetricOutcome::from(disk),
            memory: MetricOutcome::from(memory),
        }
    }
}

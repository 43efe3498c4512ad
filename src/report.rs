//! Report rendering and exit status.

use crate::error::Result;
use crate::metrics::data::{
    CpuMeasurement, MemoryMeasurement, MetricOutcome, ProbeReport, StorageMeasurement,
};

/// Supported output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Exit status when every sampler succeeded.
pub const EXIT_OK: u8 = 0;
/// Exit status when at least one sampler failed.
pub const EXIT_SAMPLER_FAILED: u8 = 1;

/// Exit status a report maps to.
pub fn exit_status(report: &ProbeReport) -> u8 {
    if report.has_failures() {
        EXIT_SAMPLER_FAILED
    } else {
        EXIT_OK
    }
}

/// Render `report` in the requested format.
pub fn render(report: &ProbeReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

/// Render the plain text report, one metric per line.
pub fn render_text(report: &ProbeReport) -> String {
    let mut lines = vec![report.program.clone()];
    lines.extend(cpu_lines(&report.cpu));
    lines.push(disk_line(&report.disk));
    lines.push(memory_line(&report.memory));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn cpu_lines(outcome: &MetricOutcome<CpuMeasurement>) -> [String; 2] {
    match outcome {
        MetricOutcome::Ok(cpu) => [
            match cpu.frequency_mhz {
                Some(mhz) => format!("CPU frequency: {:.3} Mhz", mhz),
                None => "CPU frequency: n/a (no time elapsed)".to_string(),
            },
            match cpu.load_ratio {
                Some(ratio) => format!("CPU load: {:.3} %", 100.0 * ratio),
                None => "CPU load: n/a (no tick progress)".to_string(),
            },
        ],
        MetricOutcome::Failed { error } => [
            format!("CPU frequency: unavailable ({})", error),
            format!("CPU load: unavailable ({})", error),
        ],
    }
}

fn disk_line(outcome: &MetricOutcome<StorageMeasurement>) -> String {
    match outcome {
        MetricOutcome::Ok(disk) => format!(
            "Disc size: {:.1}/{:.1} GB",
            disk.free_bytes as f64 / 1e9,
            disk.total_bytes as f64 / 1e9
        ),
        MetricOutcome::Failed { error } => format!("Disc size: unavailable ({})", error),
    }
}

fn memory_line(outcome: &MetricOutcome<MemoryMeasurement>) -> String {
    match outcome {
        MetricOutcome::Ok(memory) => format!(
            "Memory size: {:.1}/{:.1} MB",
            memory.free_kb as f64 / 1e3,
            memory.total_kb as f64 / 1e3
        ),
        MetricOutcome::Failed { error } => format!("Memory size: unavailable ({})", error),
    }
}

//! Physical memory from the meminfo file.
//!
//! The file is parsed line by line as `Label: value [unit]` and looked up by
//! label. Column widths differ between kernels, so nothing here relies on
//! byte offsets.

use crate::error::{ProbeError, Result};
use crate::metrics::data::MemoryMeasurement;
use std::fs;
use std::path::Path;

/// Parse meminfo text into a measurement.
pub fn parse_meminfo(text: &str) -> Result<MemoryMeasurement> {
    let mut total_kb = None;
    let mut free_kb = None;
    let mut available_kb = None;

    for line in text.lines() {
        let Some((label, rest)) = line.split_once(':') else {
            continue;
        };
        let slot = match label.trim() {
            "MemTotal" => &mut total_kb,
            "MemFree" => &mut free_kb,
            "MemAvailable" => &mut available_kb,
            _ => continue,
        };
        let raw = rest.split_whitespace().next().unwrap_or_default();
        let value = raw.parse::<u64>().map_err(|e| {
            ProbeError::parse_error(format!("invalid {} value {:?}: {}", label.trim(), raw, e))
        })?;
        *slot = Some(value);
    }

    Ok(MemoryMeasurement {
        total_kb: total_kb.ok_or_else(|| ProbeError::parse_error("meminfo has no MemTotal"))?,
        free_kb: free_kb.ok_or_else(|| ProbeError::parse_error("meminfo has no MemFree"))?,
        available_kb,
    })
}

/// Sample memory from `<proc_root>/meminfo`.
pub fn sample_memory(proc_root: &Path) -> Result<MemoryMeasurement> {
    let path = proc_root.join("meminfo");
    let text = fs::read_to_string(&path).map_err(|e| ProbeError::io(&path, e))?;
    parse_meminfo(&text)
}

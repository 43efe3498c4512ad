//! Filesystem capacity via `statvfs`.

use crate::error::{ProbeError, Result};
use crate::metrics::data::StorageMeasurement;
use nix::sys::statvfs::statvfs;
use std::path::Path;

/// Sample total and free space of the filesystem containing `path`.
///
/// Free space is the unprivileged available-block count, so blocks reserved
/// for root are not included.
pub fn sample_disk(path: &Path) -> Result<StorageMeasurement> {
    let stats = statvfs(path).map_err(|e| ProbeError::syscall(path, e))?;

    #[allow(clippy::unnecessary_cast)]
    let unit = stats.fragment_size() as u64;
    #[allow(clippy::unnecessary_cast)]
    let (blocks, available) = (stats.blocks() as u64, stats.blocks_available() as u64);

    Ok(StorageMeasurement {
        total_bytes: blocks.saturating_mul(unit),
        free_bytes: available.saturating_mul(unit),
    })
}

//! Samplers and the measurements they produce.
//!
//! Each sampler is a stateless function that reads one kernel source and
//! returns a value or an error; none of them share state.

pub mod clock;
pub mod cpu;
pub mod data;
pub mod disk;
pub mod memory;

// Re-export commonly used items
pub use cpu::sample_cpu;
pub use data::ProbeReport;
pub use disk::sample_disk;
pub use memory::sample_memory;

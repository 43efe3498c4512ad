//! Cycle counter access.
//!
//! The frequency estimate counts how far a hardware counter advances across
//! the measurement window. On x86_64 that counter is the TSC, which on
//! modern parts runs at a constant nominal rate regardless of frequency
//! scaling, so the result approximates the base clock rather than the
//! instantaneous one. Other targets have no core-clock counter reachable from
//! user space and fall back to a fixed-rate timer.

use crate::metrics::data::CounterKind;

/// Counter used on this target.
#[cfg(target_arch = "x86_64")]
pub const COUNTER_KIND: CounterKind = CounterKind::Tsc;

#[cfg(all(target_arch = "aarch64", target_os = "linux"))]
pub const COUNTER_KIND: CounterKind = CounterKind::ArmGenericTimer;

#[cfg(not(any(target_arch = "x86_64", all(target_arch = "aarch64", target_os = "linux"))))]
pub const COUNTER_KIND: CounterKind = CounterKind::MonotonicNanos;

/// Read the current counter value.
#[cfg(target_arch = "x86_64")]
#[inline(always)]
pub fn read_cycles() -> u64 {
    // SAFETY: rdtsc is available on every x86_64 CPU and has no side effects.
    unsafe { core::arch::x86_64::_rdtsc() }
}

/// Read the current counter value.
#[cfg(all(target_arch = "aarch64", target_os = "linux"))]
#[inline(always)]
pub fn read_cycles() -> u64 {
    let val: u64;
    // SAFETY: Linux enables EL0 access to CNTVCT_EL0. The isb keeps the
    // read from being speculated ahead of earlier instructions. Read-only
    // system register, no side effects.
    unsafe {
        std::arch::asm!("isb", "mrs {}, cntvct_el0", out(reg) val, options(nostack));
    }
    val
}

/// Read the current counter value.
#[cfg(not(any(target_arch = "x86_64", all(target_arch = "aarch64", target_os = "linux"))))]
pub fn read_cycles() -> u64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static ANCHOR: OnceLock<Instant> = OnceLock::new();
    let anchor = ANCHOR.get_or_init(Instant::now);
    u64::try_from(anchor.elapsed().as_nanos()).unwrap_or(u64::MAX)
}

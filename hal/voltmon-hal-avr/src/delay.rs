//! Busy-wait delay
//!
//! No timer is touched. Each request is converted to CPU cycles and spent
//! in `avr_device::asm::delay_cycles`, whose loop is counted per
//! instruction, so the only error is the call overhead.

use embedded_hal::delay::DelayNs;

/// Cycle-counted delay for a fixed CPU clock
#[derive(Debug, Clone, Copy)]
pub struct CycleDelay {
    cpu_hz: u32,
}

impl CycleDelay {
    pub const fn new(cpu_hz: u32) -> Self {
        Self { cpu_hz }
    }

    /// CPU cycles covering at least `ns` nanoseconds
    pub const fn cycles_for_ns(&self, ns: u32) -> u32 {
        let cycles = (ns as u64 * self.cpu_hz as u64).div_ceil(1_000_000_000);
        if cycles > u32::MAX as u64 {
            u32::MAX
        } else {
            cycles as u32
        }
    }

    /// CPU cycles in one millisecond
    pub const fn cycles_per_ms(&self) -> u32 {
        self.cpu_hz.div_ceil(1_000)
    }
}

#[cfg(target_arch = "avr")]
#[inline(always)]
fn spend(cycles: u32) {
    avr_device::asm::delay_cycles(cycles);
}

// Host builds only run the cycle arithmetic
#[cfg(not(target_arch = "avr"))]
#[inline(always)]
fn spend(_cycles: u32) {}

impl DelayNs for CycleDelay {
    fn delay_ns(&mut self, ns: u32) {
        spend(self.cycles_for_ns(ns));
    }

    fn delay_ms(&mut self, ms: u32) {
        // Per-millisecond chunks keep the cycle count inside u32
        let per_ms = self.cycles_per_ms();
        for _ in 0..ms {
            spend(per_ms);
        }
    }
}

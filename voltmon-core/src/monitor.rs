//! Sample-and-report loop
//!
//! Ties one [`SerialTx`] and one [`AnalogSampler`] together. Everything
//! is synchronous: each step blocks on the peripherals and on the delay,
//! in program order.

use embedded_hal::delay::DelayNs;
use voltmon_hal::{AnalogSampler, SerialTx};

use crate::config::MonitorConfig;
use crate::report::{Reading, Report};
use crate::state::Phase;

/// Voltage monitor
pub struct Monitor<T, S, D> {
    serial: T,
    sampler: S,
    delay: D,
    config: MonitorConfig,
    phase: Phase,
    line: Report,
    reports: u32,
}

impl<T: SerialTx, S: AnalogSampler, D: DelayNs> Monitor<T, S, D> {
    /// Create a monitor in the startup phase
    ///
    /// Nothing touches the hardware until the first [`step`](Self::step).
    pub fn new(serial: T, sampler: S, delay: D, config: MonitorConfig) -> Self {
        Self {
            serial,
            sampler,
            delay,
            config,
            phase: Phase::Startup,
            line: Report::new(),
            reports: 0,
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Text of the most recent report
    #[inline]
    pub fn line(&self) -> &Report {
        &self.line
    }

    /// Number of reports sent (wraps)
    #[inline]
    pub fn reports(&self) -> u32 {
        self.reports
    }

    /// Run the current phase once
    ///
    /// Returns the reading that was reported, or `None` for startup.
    pub fn step(&mut self) -> Option<Reading> {
        let reading = match self.phase {
            Phase::Startup => {
                self.startup();
                None
            }
            Phase::SampleReport => Some(self.sample_report()),
        };

        let next = self.phase.next();
        if next != self.phase {
            #[cfg(feature = "defmt")]
            defmt::info!("monitor: {} -> {}", self.phase, next);
            self.phase = next;
        }
        reading
    }

    /// Step forever
    pub fn run(mut self) -> ! {
        loop {
            self.step();
        }
    }

    pub fn free(self) -> (T, S, D) {
        (self.serial, self.sampler, self.delay)
    }

    fn startup(&mut self) {
        self.serial.initialize();
        self.sampler.initialize();
        self.delay.delay_ms(self.config.settle_delay_ms);
    }

    fn sample_report(&mut self) -> Reading {
        let raw = self.sampler.read();
        let reading = Reading::new(raw, self.config.reference_mv, self.sampler.max_code());

        self.line.format_reading(&reading);
        self.serial.send_line(self.line.as_bytes());
        self.reports = self.reports.wrapping_add(1);

        #[cfg(feature = "defmt")]
        defmt::debug!("monitor: raw={} cV={}", reading.raw, reading.centivolts);

        self.delay.delay_ms(self.config.sample_interval_ms);
        reading
    }
}

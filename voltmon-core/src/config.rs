//! Compile-time configuration
//!
//! There is no runtime configuration: these constants are the whole
//! configuration surface. The defaults describe an Arduino Mega reading
//! A15 against a 5V AVcc reference.

use voltmon_hal::{Reference, SerialConfig};

/// CPU clock (16 MHz crystal)
pub const CPU_CLOCK_HZ: u32 = 16_000_000;

/// Serial line rate
pub const BAUD_RATE: u32 = 9600;

/// Analog input sampled by the monitor (A15)
pub const ADC_CHANNEL: u8 = 15;

/// Reference source for the converter
pub const ADC_REFERENCE: Reference = Reference::Avcc;

/// Voltage that maps to the top converter code, in millivolts
pub const REFERENCE_MV: u32 = 5000;

/// Wait after initialization for the peripherals to stabilize
pub const SETTLE_DELAY_MS: u32 = 1000;

/// Wait between reports
pub const SAMPLE_INTERVAL_MS: u32 = 1000;

/// Report buffer size in bytes, including the NUL terminator
pub const REPORT_CAPACITY: usize = 16;

/// Text in front of the reading
pub const REPORT_LABEL: &str = "Voltage";

/// Unit suffix after the reading
pub const REPORT_UNIT: &str = "V";

/// Monitor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MonitorConfig {
    /// CPU clock in Hz
    pub cpu_clock_hz: u32,
    /// Serial framing and rate
    pub serial: SerialConfig,
    /// Analog channel number
    pub adc_channel: u8,
    /// Converter reference source
    pub adc_reference: Reference,
    /// Full-scale reference voltage in mV
    pub reference_mv: u32,
    /// Post-initialization settle time in ms
    pub settle_delay_ms: u32,
    /// Time between reports in ms
    pub sample_interval_ms: u32,
}

impl MonitorConfig {
    /// The compile-time configuration
    pub const DEFAULT: Self = Self {
        cpu_clock_hz: CPU_CLOCK_HZ,
        serial: SerialConfig::eight_n_one(BAUD_RATE),
        adc_channel: ADC_CHANNEL,
        adc_reference: ADC_REFERENCE,
        reference_mv: REFERENCE_MV,
        settle_delay_ms: SETTLE_DELAY_MS,
        sample_interval_ms: SAMPLE_INTERVAL_MS,
    };
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voltmon_hal::{DataBits, Parity, StopBits};

    #[test]
    fn test_default_config() {
        let cfg = MonitorConfig::default();
        assert_eq!(cfg.cpu_clock_hz, 16_000_000);
        assert_eq!(cfg.serial.baudrate, 9600);
        assert_eq!(cfg.serial.data_bits, DataBits::Eight);
        assert_eq!(cfg.serial.parity, Parity::None);
        assert_eq!(cfg.serial.stop_bits, StopBits::One);
        assert_eq!(cfg.adc_channel, 15);
        assert_eq!(cfg.reference_mv, 5000);
    }

    #[test]
    fn test_capacity_fits_full_scale_line() {
        // "Voltage: 5.00 V" plus the terminator
        let longest = REPORT_LABEL.len() + ": 5.00 ".len() + REPORT_UNIT.len();
        assert_eq!(longest + 1, REPORT_CAPACITY);
    }
}

//! Blocking single-channel ADC
//!
//! The channel, reference and converter clock are fixed at build time in
//! an [`AdcSetup`]; [`Adc::read`] starts one conversion and spins on ADSC.

use voltmon_hal::{AnalogSampler, Reference};

use crate::device::{bits, AdcRegisters, Device};
use crate::register::{bit, RegisterBus};

/// ADC clock prescaler (ADPS2:0)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Prescaler {
    Div2 = 1,
    Div4 = 2,
    Div8 = 3,
    Div16 = 4,
    Div32 = 5,
    Div64 = 6,
    Div128 = 7,
}

impl Prescaler {
    const ALL: [Prescaler; 7] = [
        Prescaler::Div2,
        Prescaler::Div4,
        Prescaler::Div8,
        Prescaler::Div16,
        Prescaler::Div32,
        Prescaler::Div64,
        Prescaler::Div128,
    ];

    /// Division factor
    pub const fn divisor(self) -> u32 {
        1 << (self as u8)
    }

    /// Converter clock produced from `cpu_hz`
    pub const fn adc_clock_hz(self, cpu_hz: u32) -> u32 {
        cpu_hz / self.divisor()
    }

    /// Smallest division that keeps the converter clock at or below
    /// `max_adc_hz`, or `Div128` if none does
    pub const fn for_clock(cpu_hz: u32, max_adc_hz: u32) -> Self {
        let mut i = 0;
        while i < Self::ALL.len() {
            let p = Self::ALL[i];
            if p.adc_clock_hz(cpu_hz) <= max_adc_hz {
                return p;
            }
            i += 1;
        }
        Prescaler::Div128
    }
}

/// Register images for one channel/reference/clock choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdcSetup {
    pub admux: u8,
    pub adcsrb: u8,
    pub adcsra: u8,
    pub max_code: u16,
}

impl AdcSetup {
    /// Encode `channel` and `reference` for `device`
    ///
    /// Returns `None` when the device lacks the channel or the reference.
    pub const fn resolve(
        device: &Device,
        channel: u8,
        reference: Reference,
        prescaler: Prescaler,
    ) -> Option<Self> {
        let Some(sel) = device.channel(channel) else {
            return None;
        };
        let Some(refs) = device.reference_bits(reference) else {
            return None;
        };

        let admux = (refs << bits::REFS0) | (sel.mux & bits::MUX_MASK);
        let adcsrb = if sel.mux5 { bit(bits::MUX5) } else { 0 };
        let adcsra = bit(bits::ADEN) | ((prescaler as u8) << bits::ADPS0);

        Some(Self {
            admux,
            adcsrb,
            adcsra,
            max_code: device.adc_max_code(),
        })
    }
}

/// Blocking ADC over a register bus
pub struct Adc<B> {
    bus: B,
    regs: AdcRegisters,
    setup: AdcSetup,
}

impl<B: RegisterBus> Adc<B> {
    pub fn new(bus: B, regs: AdcRegisters, setup: AdcSetup) -> Self {
        Self { bus, regs, setup }
    }

    pub fn free(self) -> B {
        self.bus
    }
}

impl<B: RegisterBus> AnalogSampler for Adc<B> {
    fn initialize(&mut self) {
        self.regs.admux.write(&mut self.bus, self.setup.admux);
        self.regs.adcsrb.write(&mut self.bus, self.setup.adcsrb);
        self.regs.adcsra.write(&mut self.bus, self.setup.adcsra);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "adc: admux={=u8:#x} adcsrb={=u8:#x} adcsra={=u8:#x}",
            self.setup.admux,
            self.setup.adcsrb,
            self.setup.adcsra
        );
    }

    fn read(&mut self) -> u16 {
        self.regs.adcsra.set_bits(&mut self.bus, bit(bits::ADSC));
        self.regs.adcsra.wait_for(&mut self.bus, bits::ADSC, false);
        self.regs.data.read(&mut self.bus) & self.setup.max_code
    }

    fn max_code(&self) -> u16 {
        self.setup.max_code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{ATMEGA2560, ATMEGA328P};
    use crate::sim::SimBus;

    const A15: AdcSetup = match AdcSetup::resolve(
        &ATMEGA2560,
        15,
        Reference::Avcc,
        Prescaler::Div128,
    ) {
        Some(setup) => setup,
        None => panic!("A15 must exist on the ATmega2560"),
    };

    #[test]
    fn test_prescaler_keeps_clock_in_range() {
        assert_eq!(Prescaler::for_clock(16_000_000, 200_000), Prescaler::Div128);
        assert_eq!(Prescaler::Div128.adc_clock_hz(16_000_000), 125_000);
        assert_eq!(Prescaler::for_clock(8_000_000, 200_000), Prescaler::Div64);
        assert_eq!(Prescaler::for_clock(1_000_000, 200_000), Prescaler::Div8);
        // Nothing slow enough: fall back to the largest division
        assert_eq!(Prescaler::for_clock(100_000_000, 200_000), Prescaler::Div128);
    }

    #[test]
    fn test_a15_register_images() {
        // AVcc reference, MUX4:0 = 7
        assert_eq!(A15.admux, 0b0100_0111);
        // MUX5 selects the upper bank
        assert_eq!(A15.adcsrb, 0b0000_1000);
        // Enabled, /128
        assert_eq!(A15.adcsra, 0b1000_0111);
        assert_eq!(A15.max_code, 1023);
    }

    #[test]
    fn test_resolve_rejects_missing_hardware() {
        assert!(
            AdcSetup::resolve(&ATMEGA328P, 15, Reference::Avcc, Prescaler::Div128).is_none()
        );
        assert!(
            AdcSetup::resolve(&ATMEGA328P, 0, Reference::Internal2V56, Prescaler::Div128)
                .is_none()
        );
        let low = AdcSetup::resolve(&ATMEGA328P, 3, Reference::Avcc, Prescaler::Div128).unwrap();
        assert_eq!(low.admux, 0b0100_0011);
        assert_eq!(low.adcsrb, 0);
    }

    #[test]
    fn test_initialize_writes_images() {
        let mut adc = Adc::new(SimBus::new(), ATMEGA2560.adc, A15);
        adc.initialize();

        let bus = adc.free();
        assert_eq!(bus.reg(0x7C), A15.admux);
        assert_eq!(bus.reg(0x7B), A15.adcsrb);
        assert_eq!(bus.reg(0x7A), A15.adcsra);
    }

    #[test]
    fn test_read_waits_for_conversion() {
        let mut bus = SimBus::new();
        bus.adc_latency = 5;
        bus.sample = 512;
        let mut adc = Adc::new(bus, ATMEGA2560.adc, A15);
        adc.initialize();

        assert_eq!(adc.read(), 512);
        assert_eq!(adc.max_code(), 1023);

        let bus = adc.free();
        assert_eq!(bus.conversions, 1);
        // ADSC cleared, converter still enabled
        assert_eq!(bus.reg(0x7A) & (1 << 6), 0);
        assert_ne!(bus.reg(0x7A) & (1 << 7), 0);
    }

    #[test]
    fn test_read_full_scale() {
        let mut bus = SimBus::new();
        bus.sample = 1023;
        let mut adc = Adc::new(bus, ATMEGA2560.adc, A15);
        adc.initialize();
        assert_eq!(adc.read(), 1023);
        assert_eq!(adc.read(), 1023);
        assert_eq!(adc.free().conversions, 2);
    }
}

//! Per-device register tables
//!
//! Addresses are data-space addresses (I/O address + 0x20 for the low
//! range, extended I/O as-is). Bit positions shared by every supported
//! ATmega live in [`bits`]; everything that differs between chips lives
//! in a [`Device`] constant.

use voltmon_hal::Reference;

use crate::register::{Reg16, Reg8};

/// Bit positions common to the supported ATmega parts
pub mod bits {
    // UCSRnA
    pub const RXC: u8 = 7;
    pub const TXC: u8 = 6;
    pub const UDRE: u8 = 5;

    // UCSRnB
    pub const TXEN: u8 = 3;

    // UCSRnC
    pub const UPM0: u8 = 4;
    pub const USBS: u8 = 3;
    pub const UCSZ0: u8 = 1;

    // ADCSRA
    pub const ADEN: u8 = 7;
    pub const ADSC: u8 = 6;
    pub const ADPS0: u8 = 0;

    // ADMUX
    pub const REFS0: u8 = 6;
    pub const MUX_MASK: u8 = 0x1F;

    // ADCSRB
    pub const MUX5: u8 = 3;
}

/// USART control, status, baud and data registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UsartRegisters {
    pub ucsra: Reg8,
    pub ucsrb: Reg8,
    pub ucsrc: Reg8,
    pub ubrr: Reg16,
    pub udr: Reg8,
}

/// ADC control, multiplexer and data registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdcRegisters {
    pub data: Reg16,
    pub adcsra: Reg8,
    pub adcsrb: Reg8,
    pub admux: Reg8,
}

/// Multiplexer encoding for one single-ended input
///
/// Channels past the width of ADMUX's MUX field need the extension bit
/// in ADCSRB, so one channel number maps to two register fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MuxSelect {
    /// Value for ADMUX MUX4:0
    pub mux: u8,
    /// Value for ADCSRB MUX5
    pub mux5: bool,
}

impl MuxSelect {
    const fn low(mux: u8) -> Self {
        Self { mux, mux5: false }
    }

    const fn high(mux: u8) -> Self {
        Self { mux, mux5: true }
    }
}

/// Register layout and analog capabilities of one chip
#[derive(Debug)]
pub struct Device {
    pub usart0: UsartRegisters,
    pub adc: AdcRegisters,
    /// Single-ended input encodings, indexed by channel number (ADCn)
    pub channels: &'static [MuxSelect],
    /// Available references and their REFS1:0 encoding
    pub references: &'static [(Reference, u8)],
    /// Converter resolution in bits
    pub adc_bits: u8,
    /// Highest converter clock that still gives full resolution
    pub adc_clock_max_hz: u32,
    /// Lowest converter clock before the sample-and-hold droops
    pub adc_clock_min_hz: u32,
}

impl Device {
    /// Look up the multiplexer encoding for channel `ch`
    pub const fn channel(&self, ch: u8) -> Option<MuxSelect> {
        if (ch as usize) < self.channels.len() {
            Some(self.channels[ch as usize])
        } else {
            None
        }
    }

    /// Look up the REFS1:0 encoding for `reference`
    pub const fn reference_bits(&self, reference: Reference) -> Option<u8> {
        let mut i = 0;
        while i < self.references.len() {
            let (r, refs) = self.references[i];
            if r as u8 == reference as u8 {
                return Some(refs);
            }
            i += 1;
        }
        None
    }

    /// Largest code the converter returns
    pub const fn adc_max_code(&self) -> u16 {
        (1u16 << self.adc_bits) - 1
    }
}

const USART0: UsartRegisters = UsartRegisters {
    ucsra: Reg8::at(0xC0),
    ucsrb: Reg8::at(0xC1),
    ucsrc: Reg8::at(0xC2),
    ubrr: Reg16::at(0xC4),
    udr: Reg8::at(0xC6),
};

const ADC: AdcRegisters = AdcRegisters {
    data: Reg16::at(0x78),
    adcsra: Reg8::at(0x7A),
    adcsrb: Reg8::at(0x7B),
    admux: Reg8::at(0x7C),
};

/// ADC0..ADC15; ADC8 and up set MUX5
const ATMEGA2560_CHANNELS: [MuxSelect; 16] = [
    MuxSelect::low(0),
    MuxSelect::low(1),
    MuxSelect::low(2),
    MuxSelect::low(3),
    MuxSelect::low(4),
    MuxSelect::low(5),
    MuxSelect::low(6),
    MuxSelect::low(7),
    MuxSelect::high(0),
    MuxSelect::high(1),
    MuxSelect::high(2),
    MuxSelect::high(3),
    MuxSelect::high(4),
    MuxSelect::high(5),
    MuxSelect::high(6),
    MuxSelect::high(7),
];

/// ADC0..ADC7 (ADC6/7 only bonded out on TQFP/QFN)
const ATMEGA328P_CHANNELS: [MuxSelect; 8] = [
    MuxSelect::low(0),
    MuxSelect::low(1),
    MuxSelect::low(2),
    MuxSelect::low(3),
    MuxSelect::low(4),
    MuxSelect::low(5),
    MuxSelect::low(6),
    MuxSelect::low(7),
];

pub const ATMEGA2560: Device = Device {
    usart0: USART0,
    adc: ADC,
    channels: &ATMEGA2560_CHANNELS,
    references: &[
        (Reference::Aref, 0b00),
        (Reference::Avcc, 0b01),
        (Reference::Internal1V1, 0b10),
        (Reference::Internal2V56, 0b11),
    ],
    adc_bits: 10,
    adc_clock_max_hz: 200_000,
    adc_clock_min_hz: 50_000,
};

pub const ATMEGA328P: Device = Device {
    usart0: USART0,
    adc: ADC,
    channels: &ATMEGA328P_CHANNELS,
    references: &[
        (Reference::Aref, 0b00),
        (Reference::Avcc, 0b01),
        (Reference::Internal1V1, 0b11),
    ],
    adc_bits: 10,
    adc_clock_max_hz: 200_000,
    adc_clock_min_hz: 50_000,
};

#[cfg(all(feature = "atmega2560", feature = "atmega328p"))]
compile_error!("enable only one of the `atmega2560` and `atmega328p` features");

#[cfg(not(any(feature = "atmega2560", feature = "atmega328p")))]
compile_error!("enable one of the `atmega2560` or `atmega328p` features");

/// Device selected by Cargo feature
#[cfg(feature = "atmega2560")]
pub const TARGET: &Device = &ATMEGA2560;

/// Device selected by Cargo feature
#[cfg(feature = "atmega328p")]
pub const TARGET: &Device = &ATMEGA328P;

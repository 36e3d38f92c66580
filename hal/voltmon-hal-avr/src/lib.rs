//! AVR-specific HAL for the Voltmon firmware
//!
//! Register-level drivers for the ATmega family, implementing the
//! `voltmon-hal` traits. Supported chips:
//!
//! - ATmega2560 (Arduino Mega, the default target)
//! - ATmega328P (Arduino Uno / Nano)
//!
//! # Features
//!
//! - `atmega2560` (default) / `atmega328p` - select the register tables for
//!   [`device::TARGET`] and the matching `avr-device` chip; enable exactly one
//! - `defmt` - Enable debug formatting support
//!
//! # Usage
//!
//! All register images are computed in `const` context from a
//! [`device::Device`] table, so the firmware only performs the writes:
//!
//! ```no_run
//! use voltmon_hal::{Reference, SerialConfig};
//! use voltmon_hal_avr::adc::{Adc, AdcSetup, Prescaler};
//! use voltmon_hal_avr::device::TARGET;
//! use voltmon_hal_avr::register::Mmio;
//! use voltmon_hal_avr::usart::{Usart, UsartSetup};
//!
//! const UART: UsartSetup = UsartSetup::new(16_000_000, SerialConfig::eight_n_one(9600));
//! const ADC: AdcSetup = match AdcSetup::resolve(
//!     TARGET,
//!     15,
//!     Reference::Avcc,
//!     Prescaler::for_clock(16_000_000, TARGET.adc_clock_max_hz),
//! ) {
//!     Some(setup) => setup,
//!     None => panic!("ADC channel or reference not available"),
//! };
//!
//! // SAFETY: running on the chip described by TARGET
//! let bus = unsafe { Mmio::new() };
//! let usart = Usart::new(bus, TARGET.usart0, UART);
//! let adc = Adc::new(bus, TARGET.adc, ADC);
//! ```

#![no_std]

pub mod adc;
pub mod delay;
pub mod device;
pub mod register;
pub mod usart;

#[cfg(test)]
mod sim;

pub use adc::{Adc, AdcSetup, Prescaler};
pub use delay::CycleDelay;
pub use device::{Device, MuxSelect, TARGET};
pub use register::{Mmio, Reg16, Reg8, RegisterBus};
pub use usart::{Usart, UsartSetup};

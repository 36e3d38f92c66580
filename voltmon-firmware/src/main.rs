//! Voltmon - Serial Voltage Monitor Firmware
//!
//! Samples one analog input and prints `Voltage: X.XX V` over USART0
//! once a second, forever. Single-threaded, interrupts stay disabled,
//! and every wait is a spin loop.
//!
//! All hardware setup is resolved at compile time: a channel or reference
//! the selected chip does not have, a converter clock outside its range,
//! or an unusable baud divisor fails the build instead of the board.

#![no_std]
#![no_main]

use panic_halt as _;

use voltmon_core::{Monitor, MonitorConfig};
use voltmon_hal_avr::adc::{Adc, AdcSetup, Prescaler};
use voltmon_hal_avr::delay::CycleDelay;
use voltmon_hal_avr::device::TARGET;
use voltmon_hal_avr::register::Mmio;
use voltmon_hal_avr::usart::{baud_error_permille, Usart, UsartSetup};

/// Analog input sampled on this board
#[cfg(not(feature = "atmega328p"))]
const BOARD_ADC_CHANNEL: u8 = voltmon_core::config::ADC_CHANNEL;

/// Analog input sampled on this board (A0; the Uno has no A15)
#[cfg(feature = "atmega328p")]
const BOARD_ADC_CHANNEL: u8 = 0;

/// Compile-time configuration
const CONFIG: MonitorConfig = MonitorConfig {
    adc_channel: BOARD_ADC_CHANNEL,
    ..MonitorConfig::DEFAULT
};

const USART_SETUP: UsartSetup = UsartSetup::new(CONFIG.cpu_clock_hz, CONFIG.serial);

const ADC_PRESCALER: Prescaler = Prescaler::for_clock(CONFIG.cpu_clock_hz, TARGET.adc_clock_max_hz);

const ADC_SETUP: AdcSetup = match AdcSetup::resolve(
    TARGET,
    CONFIG.adc_channel,
    CONFIG.adc_reference,
    ADC_PRESCALER,
) {
    Some(setup) => setup,
    None => panic!("configured ADC channel or reference does not exist on this device"),
};

// Below the minimum the sample-and-hold droops
const _: () = assert!(
    ADC_PRESCALER.adc_clock_hz(CONFIG.cpu_clock_hz) >= TARGET.adc_clock_min_hz,
    "ADC clock below the device minimum"
);

// 8-N-1 tolerates roughly 2% total mismatch
const _: () = assert!(
    baud_error_permille(CONFIG.cpu_clock_hz, CONFIG.serial.baudrate).abs() <= 20,
    "baud rate not reachable from the CPU clock"
);

fn build() -> Monitor<Usart<Mmio>, Adc<Mmio>, CycleDelay> {
    // SAFETY: this binary is only linked for the chip TARGET describes
    let bus = unsafe { Mmio::new() };

    let serial = Usart::new(bus, TARGET.usart0, USART_SETUP);
    let sampler = Adc::new(bus, TARGET.adc, ADC_SETUP);
    let delay = CycleDelay::new(CONFIG.cpu_clock_hz);

    Monitor::new(serial, sampler, delay, CONFIG)
}

#[avr_device::entry]
fn main() -> ! {
    build().run()
}


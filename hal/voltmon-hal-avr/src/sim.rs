//! Simulated ATmega register file for host tests
//!
//! Models just enough peripheral behavior to exercise the drivers: the
//! USART data-register-empty and transmit-complete flags, and the ADC
//! start-conversion flag with its result latch.

use heapless::Vec;

use crate::device::{bits, ATMEGA2560};
use crate::register::{bit, RegisterBus};

const UCSRA: u16 = ATMEGA2560.usart0.ucsra.addr();
const UDR: u16 = ATMEGA2560.usart0.udr.addr();
const ADCSRA: u16 = ATMEGA2560.adc.adcsra.addr();
const ADCL: u16 = ATMEGA2560.adc.data.low().addr();
const ADCH: u16 = ATMEGA2560.adc.data.high().addr();

pub struct SimBus {
    pub regs: [u8; 0x100],
    /// Bytes written to UDR, in order
    pub transmitted: Vec<u8, 128>,
    /// Number of UCSRA reads
    pub status_polls: u32,
    /// UDR writes that happened while UDRE was clear
    pub overruns: u32,
    /// UCSRA reads that report busy after each UDR write
    pub tx_latency: u8,
    tx_busy: u8,
    /// ADCSRA reads that report ADSC set after a conversion starts
    pub adc_latency: u8,
    adc_busy: u8,
    /// Code latched into ADCH:ADCL when a conversion completes
    pub sample: u16,
    pub conversions: u32,
}

impl SimBus {
    pub fn new() -> Self {
        Self {
            regs: [0; 0x100],
            transmitted: Vec::new(),
            status_polls: 0,
            overruns: 0,
            tx_latency: 0,
            tx_busy: 0,
            adc_latency: 0,
            adc_busy: 0,
            sample: 0,
            conversions: 0,
        }
    }

    pub fn reg(&self, addr: u16) -> u8 {
        self.regs[addr as usize]
    }
}

impl RegisterBus for SimBus {
    fn read8(&mut self, addr: u16) -> u8 {
        match addr {
            UCSRA => {
                self.status_polls += 1;
                let flags = bit(bits::UDRE) | bit(bits::TXC);
                if self.tx_busy > 0 {
                    self.tx_busy -= 1;
                    self.regs[UCSRA as usize] & !flags
                } else {
                    self.regs[UCSRA as usize] | flags
                }
            }
            ADCSRA => {
                let adsc = bit(bits::ADSC);
                if self.regs[ADCSRA as usize] & adsc != 0 {
                    if self.adc_busy > 0 {
                        self.adc_busy -= 1;
                    } else {
                        self.regs[ADCSRA as usize] &= !adsc;
                        let [lo, hi] = (self.sample & 0x03FF).to_le_bytes();
                        self.regs[ADCL as usize] = lo;
                        self.regs[ADCH as usize] = hi;
                        self.conversions += 1;
                    }
                }
                self.regs[ADCSRA as usize]
            }
            _ => self.regs[addr as usize],
        }
    }

    fn write8(&mut self, addr: u16, value: u8) {
        match addr {
            UCSRA => {
                // Flag bits are cleared by hardware or by writing one
                let flags = bit(bits::UDRE) | bit(bits::TXC) | bit(bits::RXC);
                self.regs[UCSRA as usize] = value & !flags;
            }
            UDR => {
                if self.tx_busy > 0 {
                    self.overruns += 1;
                }
                self.regs[UDR as usize] = value;
                self.transmitted.push(value).unwrap();
                self.tx_busy = self.tx_latency;
            }
            ADCSRA => {
                self.regs[ADCSRA as usize] = value;
                if value & bit(bits::ADSC) != 0 {
                    self.adc_busy = self.adc_latency;
                }
            }
            _ => self.regs[addr as usize] = value,
        }
    }
}

//! USART transmitter
//!
//! Transmit-only driver: the receiver is left disabled and there is no
//! interrupt use. Every send spins on UDRE.

use core::convert::Infallible;
use core::fmt;

use voltmon_hal::{DataBits, Parity, SerialConfig, SerialTx, StopBits};

use crate::device::{bits, UsartRegisters};
use crate::register::{bit, RegisterBus};

/// UBRR is a 12-bit field
const UBRR_MAX: u32 = 0x0FFF;

/// Baud divisor for normal-speed (16x oversampling) asynchronous mode
///
/// `round(clock / (16 * baud)) - 1`, clamped to the register width.
pub const fn ubrr_for(clock_hz: u32, baud: u32) -> u16 {
    let div = (clock_hz + 8 * baud) / (16 * baud);
    let ubrr = if div == 0 { 0 } else { div - 1 };
    if ubrr > UBRR_MAX {
        UBRR_MAX as u16
    } else {
        ubrr as u16
    }
}

/// Baud rate actually produced by `ubrr`
pub const fn actual_baud(clock_hz: u32, ubrr: u16) -> u32 {
    clock_hz / (16 * (ubrr as u32 + 1))
}

/// Deviation of the achieved rate from `baud`, in parts per thousand
pub const fn baud_error_permille(clock_hz: u32, baud: u32) -> i32 {
    let actual = actual_baud(clock_hz, ubrr_for(clock_hz, baud)) as i64;
    ((actual - baud as i64) * 1000 / baud as i64) as i32
}

/// Register images for one serial configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UsartSetup {
    pub ubrr: u16,
    pub ucsrb: u8,
    pub ucsrc: u8,
}

impl UsartSetup {
    /// Compute the register images for `config` at `clock_hz`
    pub const fn new(clock_hz: u32, config: SerialConfig) -> Self {
        // Transmitter only; UCSZ2 stays clear for up to 8 data bits
        let ucsrb = bit(bits::TXEN);

        let size = match config.data_bits {
            DataBits::Five => 0b00,
            DataBits::Six => 0b01,
            DataBits::Seven => 0b10,
            DataBits::Eight => 0b11,
        };
        let parity = match config.parity {
            Parity::None => 0b00,
            Parity::Even => 0b10,
            Parity::Odd => 0b11,
        };
        let stop = match config.stop_bits {
            StopBits::One => 0,
            StopBits::Two => bit(bits::USBS),
        };
        let ucsrc = (parity << bits::UPM0) | stop | (size << bits::UCSZ0);

        Self {
            ubrr: ubrr_for(clock_hz, config.baudrate),
            ucsrb,
            ucsrc,
        }
    }
}

/// Blocking USART transmitter over a register bus
pub struct Usart<B> {
    bus: B,
    regs: UsartRegisters,
    setup: UsartSetup,
    /// A byte went out since initialization, so TXC will eventually set
    written: bool,
}

impl<B: RegisterBus> Usart<B> {
    pub fn new(bus: B, regs: UsartRegisters, setup: UsartSetup) -> Self {
        Self {
            bus,
            regs,
            setup,
            written: false,
        }
    }

    pub fn free(self) -> B {
        self.bus
    }
}

impl<B: RegisterBus> SerialTx for Usart<B> {
    fn initialize(&mut self) {
        // U2X off: the divisor assumes 16x oversampling
        self.regs.ucsra.write(&mut self.bus, 0);
        self.regs.ucsrb.write(&mut self.bus, self.setup.ucsrb);
        self.regs.ucsrc.write(&mut self.bus, self.setup.ucsrc);
        self.regs.ubrr.write(&mut self.bus, self.setup.ubrr);
        self.written = false;

        #[cfg(feature = "defmt")]
        defmt::debug!("usart: ubrr={} ucsrc={=u8:#x}", self.setup.ubrr, self.setup.ucsrc);
    }

    fn send_byte(&mut self, byte: u8) {
        self.regs.ucsra.wait_for(&mut self.bus, bits::UDRE, true);
        // Writing one clears TXC so flush() waits for this byte
        self.regs.ucsra.write(&mut self.bus, bit(bits::TXC));
        self.regs.udr.write(&mut self.bus, byte);
        self.written = true;
    }

    fn flush(&mut self) {
        if self.written {
            self.regs.ucsra.wait_for(&mut self.bus, bits::TXC, true);
        }
    }
}

impl<B: RegisterBus> embedded_io::ErrorType for Usart<B> {
    type Error = Infallible;
}

impl<B: RegisterBus> embedded_io::Write for Usart<B> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        for &b in buf {
            self.send_byte(b);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        SerialTx::flush(self);
        Ok(())
    }
}

impl<B: RegisterBus> fmt::Write for Usart<B> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for &b in s.as_bytes() {
            self.send_byte(b);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::ATMEGA2560;
    use crate::sim::SimBus;

    fn usart(bus: SimBus) -> Usart<SimBus> {
        let setup = UsartSetup::new(16_000_000, SerialConfig::eight_n_one(9600));
        Usart::new(bus, ATMEGA2560.usart0, setup)
    }

    #[test]
    fn test_divisor_for_9600_at_16mhz() {
        assert_eq!(ubrr_for(16_000_000, 9600), 103);
        assert_eq!(ubrr_for(16_000_000, 115_200), 8);
        assert_eq!(ubrr_for(8_000_000, 9600), 51);
        assert_eq!(actual_baud(16_000_000, 103), 9615);
        assert_eq!(baud_error_permille(16_000_000, 9600), 1);
    }

    #[test]
    fn test_divisor_clamped_to_register_width() {
        assert_eq!(ubrr_for(16_000_000, 10), 0x0FFF);
        assert_eq!(ubrr_for(1_000, 1_000_000), 0);
    }

    #[test]
    fn test_frame_format_encoding() {
        let setup = UsartSetup::new(16_000_000, SerialConfig::eight_n_one(9600));
        assert_eq!(setup.ucsrb, 1 << 3);
        assert_eq!(setup.ucsrc, (1 << 2) | (1 << 1));

        let setup = UsartSetup::new(
            16_000_000,
            SerialConfig {
                baudrate: 9600,
                data_bits: DataBits::Seven,
                parity: Parity::Even,
                stop_bits: StopBits::Two,
            },
        );
        assert_eq!(setup.ucsrc, 0b0010_1100);
    }

    #[test]
    fn test_initialize_programs_registers() {
        let mut tx = usart(SimBus::new());
        tx.initialize();

        let mut bus = tx.free();
        assert_eq!(ATMEGA2560.usart0.ubrr.read(&mut bus), 103);
        assert_eq!(bus.reg(0xC5), 0);
        assert_eq!(bus.reg(0xC4), 103);
        // Transmitter only, receiver disabled
        assert_eq!(bus.reg(0xC1), 1 << 3);
        assert_eq!(bus.reg(0xC2), 0b0000_0110);
    }

    #[test]
    fn test_send_string_waits_for_each_byte() {
        let mut bus = SimBus::new();
        bus.tx_latency = 3;
        let mut tx = usart(bus);
        tx.initialize();

        let msg = b"Voltage: 2.50 V";
        tx.send_string(msg);

        let bus = tx.free();
        assert_eq!(bus.transmitted.as_slice(), msg);
        assert_eq!(bus.overruns, 0);
        // Every byte after the first saw 3 busy polls plus one ready poll
        assert!(bus.status_polls >= (msg.len() as u32 - 1) * 4 + 1);
    }

    #[test]
    fn test_flush_without_traffic_returns() {
        let mut tx = usart(SimBus::new());
        tx.initialize();
        SerialTx::flush(&mut tx);
        assert_eq!(tx.free().status_polls, 0);
    }

    #[test]
    fn test_flush_waits_for_transmit_complete() {
        let mut bus = SimBus::new();
        bus.tx_latency = 2;
        let mut tx = usart(bus);
        tx.initialize();
        tx.send_byte(b'x');
        SerialTx::flush(&mut tx);

        let bus = tx.free();
        // One ready poll before the write, two busy plus one done after
        assert_eq!(bus.status_polls, 4);
    }

    #[test]
    fn test_ecosystem_writers() {
        use core::fmt::Write as _;

        let mut tx = usart(SimBus::new());
        tx.initialize();
        write!(tx, "{}+{}", 1, 2).unwrap();
        embedded_io::Write::write_all(&mut tx, b"\r\n").unwrap();

        assert_eq!(tx.free().transmitted.as_slice(), b"1+2\r\n");
    }
}

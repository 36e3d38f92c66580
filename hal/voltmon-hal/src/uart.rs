//! Serial transmit abstractions
//!
//! Transmit-only, blocking. There is no receive path and no error
//! reporting: a transmitter that never becomes ready hangs the caller.

/// Serial transmitter
///
/// Implementations busy-wait on the hardware until the data register can
/// accept another byte. There is no timeout.
pub trait SerialTx {
    /// Configure the peripheral for transmission
    ///
    /// Register writes cannot fail, so neither can this.
    fn initialize(&mut self);

    /// Block until the transmit buffer is empty, then write `byte`
    fn send_byte(&mut self, byte: u8);

    /// Send every byte of `bytes` in order
    ///
    /// Stops early at a NUL byte, so a terminated buffer can be passed
    /// whole.
    fn send_string(&mut self, bytes: &[u8]) {
        for &b in bytes.iter().take_while(|&&b| b != 0) {
            self.send_byte(b);
        }
    }

    /// Send `bytes` followed by a CR-LF terminator
    fn send_line(&mut self, bytes: &[u8]) {
        self.send_string(bytes);
        self.send_string(b"\r\n");
    }

    /// Block until the last byte has left the shift register
    fn flush(&mut self) {}
}

/// Serial line configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl SerialConfig {
    /// 8 data bits, no parity, 1 stop bit at the given rate
    pub const fn eight_n_one(baudrate: u32) -> Self {
        Self {
            baudrate,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self::eight_n_one(9600)
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Five,
    Six,
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}

//! Typed access to memory-mapped registers
//!
//! A register is just its data-space address. Every access goes through a
//! [`RegisterBus`], which on hardware is the zero-sized [`Mmio`] doing
//! volatile loads and stores, and in host tests is a simulated register
//! file.

/// Byte-wide access to the I/O data space
pub trait RegisterBus {
    /// Read the register at `addr`
    ///
    /// Takes `&mut self` because reading some status and data registers
    /// has side effects on the peripheral.
    fn read8(&mut self, addr: u16) -> u8;

    /// Write `value` to the register at `addr`
    fn write8(&mut self, addr: u16, value: u8);
}

/// Volatile access to the real memory-mapped registers
#[derive(Debug, Clone, Copy)]
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// Create the hardware bus
    ///
    /// # Safety
    ///
    /// Every address later passed to this bus must be a register of the
    /// chip the code is running on. Only use this with the tables in
    /// [`crate::device`] for the matching target.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl RegisterBus for Mmio {
    #[inline(always)]
    fn read8(&mut self, addr: u16) -> u8 {
        // SAFETY: `Mmio::new` requires addresses to be valid registers
        unsafe { core::ptr::read_volatile(addr as usize as *const u8) }
    }

    #[inline(always)]
    fn write8(&mut self, addr: u16, value: u8) {
        // SAFETY: `Mmio::new` requires addresses to be valid registers
        unsafe { core::ptr::write_volatile(addr as usize as *mut u8, value) }
    }
}

/// Bit mask for bit number `n`
#[inline(always)]
pub const fn bit(n: u8) -> u8 {
    1 << n
}

/// 8-bit register at a fixed address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reg8 {
    addr: u16,
}

impl Reg8 {
    pub const fn at(addr: u16) -> Self {
        Self { addr }
    }

    #[inline]
    pub const fn addr(&self) -> u16 {
        self.addr
    }

    #[inline]
    pub fn read<B: RegisterBus>(self, bus: &mut B) -> u8 {
        bus.read8(self.addr)
    }

    #[inline]
    pub fn write<B: RegisterBus>(self, bus: &mut B, value: u8) {
        bus.write8(self.addr, value);
    }

    /// Read-modify-write
    #[inline]
    pub fn modify<B: RegisterBus>(self, bus: &mut B, f: impl FnOnce(u8) -> u8) {
        let value = self.read(bus);
        self.write(bus, f(value));
    }

    #[inline]
    pub fn set_bits<B: RegisterBus>(self, bus: &mut B, mask: u8) {
        self.modify(bus, |v| v | mask);
    }

    /// Check a single status bit
    #[inline]
    pub fn is_set<B: RegisterBus>(self, bus: &mut B, bit_num: u8) -> bool {
        self.read(bus) & bit(bit_num) != 0
    }

    /// Spin until `bit_num` reads as `level`
    ///
    /// No timeout: a peripheral that never changes the bit hangs here.
    #[inline]
    pub fn wait_for<B: RegisterBus>(self, bus: &mut B, bit_num: u8, level: bool) {
        while self.is_set(bus, bit_num) != level {}
    }
}

/// 16-bit register pair (low byte at `addr`, high byte at `addr + 1`)
///
/// AVR latches the pair through a shared TEMP register, so reads take the
/// low byte first and writes store the high byte first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reg16 {
    low: u16,
}

impl Reg16 {
    pub const fn at(low_addr: u16) -> Self {
        Self { low: low_addr }
    }

    #[inline]
    pub const fn low(&self) -> Reg8 {
        Reg8::at(self.low)
    }

    #[inline]
    pub const fn high(&self) -> Reg8 {
        Reg8::at(self.low + 1)
    }

    #[inline]
    pub fn read<B: RegisterBus>(self, bus: &mut B) -> u16 {
        let lo = self.low().read(bus);
        let hi = self.high().read(bus);
        u16::from_le_bytes([lo, hi])
    }

    #[inline]
    pub fn write<B: RegisterBus>(self, bus: &mut B, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.high().write(bus, hi);
        self.low().write(bus, lo);
    }
}

//! Sample conversion and report formatting
//!
//! Readings are kept in fixed point (hundredths of a volt) so the AVR
//! never needs soft-float just to print two decimals. Rounding is to
//! nearest, which gives the same digits as `{:.2}` of the floating-point
//! formula for every code of a 10-bit converter.

use core::fmt::{self, Write};

use crate::config::{REPORT_CAPACITY, REPORT_LABEL, REPORT_UNIT};

/// Report buffer with the default capacity
pub type Report = ReportLine<REPORT_CAPACITY>;

/// One converted sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    /// Raw converter code, clamped to the converter range
    pub raw: u16,
    /// Voltage in hundredths of a volt
    pub centivolts: u32,
}

impl Reading {
    /// Convert `raw` against a full-scale `reference_mv` at `max_code`
    pub const fn new(raw: u16, reference_mv: u32, max_code: u16) -> Self {
        let raw = if raw > max_code { max_code } else { raw };
        let num = raw as u64 * reference_mv as u64;
        let den = max_code as u64 * 10;
        let centivolts = if den == 0 { 0 } else { (num + den / 2) / den };
        Self {
            raw,
            centivolts: centivolts as u32,
        }
    }

    /// Whole volts
    #[inline]
    pub const fn whole(&self) -> u32 {
        self.centivolts / 100
    }

    /// Hundredths after the decimal point
    #[inline]
    pub const fn hundredths(&self) -> u32 {
        self.centivolts % 100
    }
}

/// Unrounded voltage, `raw * reference / max_code`
pub fn volts(raw: u16, reference_mv: u32, max_code: u16) -> f32 {
    raw as f32 * (reference_mv as f32 / 1000.0) / max_code as f32
}

/// Fixed-capacity, always NUL-terminated text buffer
///
/// Holds at most `N - 1` bytes of text; the byte after the text is always
/// zero. Writes that do not fit are cut at the last whole character and
/// the rest is dropped silently.
pub struct ReportLine<const N: usize> {
    buf: [u8; N],
    len: usize,
    truncated: bool,
}

impl<const N: usize> ReportLine<N> {
    const HAS_TERMINATOR: () = assert!(N > 0, "report buffer needs room for the terminator");

    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::HAS_TERMINATOR;
        Self {
            buf: [0; N],
            len: 0,
            truncated: false,
        }
    }

    /// Bytes of text the buffer can hold
    #[inline]
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Some text was dropped since the last clear
    #[inline]
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn clear(&mut self) {
        self.len = 0;
        self.truncated = false;
        self.buf[0] = 0;
    }

    /// Text without the terminator
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Text including the terminator
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.buf[..=self.len]
    }

    pub fn as_str(&self) -> &str {
        // Only whole characters are ever copied in
        core::str::from_utf8(self.as_bytes()).unwrap_or("")
    }

    /// Replace the contents with the report text for `reading`
    pub fn format_reading(&mut self, reading: &Reading) {
        self.clear();
        let _ = write!(
            self,
            "{}: {}.{:02} {}",
            REPORT_LABEL,
            reading.whole(),
            reading.hundredths(),
            REPORT_UNIT
        );
    }
}

impl<const N: usize> Default for ReportLine<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Write for ReportLine<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        // Output stays a prefix of what was written
        if self.truncated {
            return Ok(());
        }

        let room = self.capacity() - self.len;
        let mut take = s.len();
        if take > room {
            take = room;
            while !s.is_char_boundary(take) {
                take -= 1;
            }
            self.truncated = true;
        }

        self.buf[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
        self.buf[self.len] = 0;
        Ok(())
    }
}

impl<const N: usize> fmt::Debug for ReportLine<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportLine")
            .field("text", &self.as_str())
            .field("truncated", &self.truncated)
            .finish()
    }
}

//! Analog sampling abstractions

/// Single-channel analog sampler
///
/// The channel and reference are fixed when the sampler is built;
/// `read` only triggers a conversion and waits for it.
pub trait AnalogSampler {
    /// Configure reference, channel and converter clock, then enable
    fn initialize(&mut self);

    /// Start a conversion and busy-wait for the raw result
    ///
    /// The returned code is right-aligned, `0..=max_code()`.
    fn read(&mut self) -> u16;

    /// Largest code the converter can return
    fn max_code(&self) -> u16 {
        1023
    }
}

/// Voltage reference feeding the converter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reference {
    /// External voltage on the AREF pin
    Aref,
    /// Analog supply (AVcc) with external capacitor on AREF
    Avcc,
    /// Internal 1.1V bandgap
    Internal1V1,
    /// Internal 2.56V reference
    Internal2V56,
}

//! Driver state machine
//!
//! The monitor runs startup exactly once and then reports forever. There
//! is no terminal state: only a reset or power loss leaves
//! `SampleReport`.

/// Monitor phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Peripheral initialization and settle delay
    #[default]
    Startup,
    /// Sample, format, transmit, wait
    SampleReport,
}

impl Phase {
    /// Phase after this one's work has run
    pub fn next(self) -> Self {
        match self {
            Phase::Startup => Phase::SampleReport,
            Phase::SampleReport => Phase::SampleReport,
        }
    }
}

//! Board-agnostic core logic for the serial voltage monitor
//!
//! This crate contains everything that does not depend on a specific
//! chip:
//!
//! - Compile-time configuration
//! - Sample conversion and bounded report formatting
//! - The two-phase driver state machine
//! - The monitor loop, generic over the `voltmon-hal` traits

// Host tests need std for proptest and `format!`
#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod monitor;
pub mod report;
pub mod state;

pub use config::MonitorConfig;
pub use monitor::Monitor;
pub use report::{Reading, Report, ReportLine};
pub use state::Phase;

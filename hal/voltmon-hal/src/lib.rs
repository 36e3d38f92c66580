//! Voltmon Hardware Abstraction Layer
//!
//! This crate defines the two peripheral seams the monitor loop needs.
//! Chip-specific HALs implement them on top of their registers, and
//! `voltmon-core` drives them without knowing which chip it runs on.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  voltmon-firmware / voltmon-core        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  voltmon-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ voltmon-hal-  │
//!             │      avr      │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::SerialTx`] - Transmit-only blocking serial output
//! - [`adc::AnalogSampler`] - Blocking single-channel analog sampling

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use adc::{AnalogSampler, Reference};
pub use uart::{DataBits, Parity, SerialConfig, SerialTx, StopBits};

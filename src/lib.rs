//! PCA9685 PWM Controller Driver Library
//!
//! This library drives the NXP PCA9685, a 16-channel 12-bit PWM controller
//! on I2C, for dimming LEDs and positioning servos. Callers ask for a duty
//! cycle or a PWM frequency; the driver works out the register values and
//! sequences the chip's sleep/restart state machine.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        DRIVER LAYER                          │
//! │  Init  │  Mode (sleep/wake/restart)  │  Frequency  │  PWM    │
//! ├─────────────────────────────────────────────────────────────┤
//! │                      CONVERSION LAYER                        │
//! │  Prescaler  │  Duty cycle → on/off pair  │  CIE dimming      │
//! ├─────────────────────────────────────────────────────────────┤
//! │                      REGISTER LAYER                          │
//! │  RegisterBus (byte / block / read)  │  Register map          │
//! ├─────────────────────────────────────────────────────────────┤
//! │                 embedded-hal 1.0 (I2c, DelayNs)              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use pca9685_driver::prelude::*;
//!
//! let mut pwm = Pca9685::new(i2c, delay, I2cAddress::DEFAULT);
//! pwm.init()?;
//! pwm.set_pwm_frequency(200.0)?;
//! pwm.set_channel_duty_cycle(3, 0.25, true)?;
//! ```
//!
//! # Design Principles
//!
//! - **Validate before I/O**: out-of-range arguments never reach the bus
//! - **Type-driven design**: `Channel`, `DutyCycle`, `PwmFrequency` enforce ranges
//! - **No shadow state**: the chip's registers are the only state besides the handle
//! - **Explicit error handling**: all fallible operations return `Result`

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]

// Logging shims, must come first so the macros are in scope below
mod fmt;

/// Hardware Abstraction Layer
///
/// Register-level I2C access over embedded-hal.
pub mod hal;

/// Peripheral Drivers
///
/// The PCA9685 driver handle.
pub mod drivers;

/// Register addresses and MODE bit helpers
pub mod registers;

/// Perceptual dimming table
pub mod dimming;

/// Composite operation sequencing
pub mod sequence;

/// Driver error type
pub mod error;

/// Shared types used across modules
pub mod types;

/// Hardware constants and defaults
pub mod config;

pub use drivers::pca9685::{ModeState, Pca9685};
pub use error::{Error, Result};
pub use hal::i2c::I2cAddress;
pub use sequence::SequencePolicy;

/// Prelude module for common imports
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::types::*;

    pub use crate::drivers::pca9685::{ModeState, Pca9685};
    pub use crate::error::Error;
    pub use crate::hal::i2c::I2cAddress;
    pub use crate::sequence::SequencePolicy;

    // Common traits
    pub use embedded_hal::delay::DelayNs;
    pub use embedded_hal::i2c::I2c;
}

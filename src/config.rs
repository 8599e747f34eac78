//! Driver configuration and hardware constants
//!
//! This module defines compile-time constants for the PCA9685 and the
//! default values the driver programs during initialization.
//! All timing, address, and register defaults are centralized here.

use crate::registers::{mask, mode1, mode2};

/// Internal oscillator frequency (25 MHz)
pub const OSCILLATOR_HZ: u32 = 25_000_000;

/// Ticks in one PWM period (12-bit counter)
pub const PWM_RESOLUTION: u16 = 4096;

/// Largest counter value a non-sentinel on/off time may take
pub const PWM_MAX_COUNT: u16 = PWM_RESOLUTION - 1;

/// Number of independent PWM outputs
pub const CHANNEL_COUNT: u8 = 16;

/// Per-channel on-time stagger in ticks
pub const CHANNEL_PHASE_STEP: u16 = 256;

/// Default 7-bit I2C address (all address pins low)
pub const DEFAULT_I2C_ADDR: u8 = 0x40;

/// Address bits selected by the A5..A0 pins
pub const ADDRESS_PIN_MASK: u8 = 0x3F;

/// Default 8-bit (write) I2C address, as printed in the datasheet
pub const DEFAULT_I2C_ADDR_8BIT: u8 = DEFAULT_I2C_ADDR << 1;

/// I2C bus frequency used by the demo firmware (Fast-mode)
pub const I2C_FREQUENCY_HZ: u32 = 400_000;

/// Lowest PWM frequency the prescaler can produce
pub const MIN_PWM_FREQUENCY_HZ: f32 = 24.0;

/// Highest PWM frequency the prescaler can produce
pub const MAX_PWM_FREQUENCY_HZ: f32 = 1526.0;

/// PWM frequency programmed by `init`
pub const DEFAULT_PWM_FREQUENCY_HZ: f32 = 1000.0;

/// MODE1 after init: auto-increment and sleep
pub const MODE1_DEFAULT: u8 = mask(mode1::AI) | mask(mode1::SLEEP);

/// MODE2 after init: open-drain outputs, non-inverted
pub const MODE2_DEFAULT: u8 = 0;

/// MODE2 bit that inverts output polarity
pub const MODE2_INVERT: u8 = mask(mode2::INVRT);

/// Oscillator settle time before setting RESTART, in microseconds
pub const OSCILLATOR_SETTLE_US: u32 = 500;

/// Settle time rounded up to whole milliseconds
pub const OSCILLATOR_SETTLE_MS: u32 = OSCILLATOR_SETTLE_US.div_ceil(1000);

/// Demo firmware pin assignments
pub mod pins {
    //! GPIO pin assignments for the demo board

    /// I2C1 SCL (PCA9685)
    pub const I2C1_SCL: &str = "PB8";

    /// I2C1 SDA (PCA9685)
    pub const I2C1_SDA: &str = "PB9";

    /// PCA9685 output enable (active low)
    pub const PCA9685_OE: &str = "PA8";
}

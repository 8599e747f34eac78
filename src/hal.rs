//! Hardware Abstraction Layer
//!
//! Thin register-access layer between the driver and any blocking
//! embedded-hal I2C implementation. Delays use `embedded_hal::delay::DelayNs`
//! directly.

pub mod i2c;

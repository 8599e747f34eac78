//! Driver error taxonomy
//!
//! Two kinds of failure exist: the bus failed a transaction, or the caller
//! passed an argument outside the chip's range. Argument errors are always
//! reported before any bus traffic happens.

use core::fmt;

/// Driver operation result
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Errors returned by the PCA9685 driver, generic over the bus error `E`
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Error<E> {
    /// The I2C transport reported an error (NACK, arbitration loss, timeout)
    Bus(E),
    /// Channel index outside `0..16`
    InvalidChannel(u8),
    /// Duty cycle outside `0.0..=1.0` (or NaN)
    InvalidDutyCycle,
    /// PWM frequency outside 24..=1526 Hz (or NaN)
    InvalidFrequency,
    /// On or off time greater than 4096
    InvalidPwmTime(u16),
    /// Register block write of 0 or more than 4 bytes
    InvalidBlockLength(usize),
}

impl<E> Error<E> {
    /// Whether this error came from argument validation rather than the bus
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        !matches!(self, Self::Bus(_))
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "I2C bus error: {e:?}"),
            Self::InvalidChannel(ch) => write!(f, "channel {ch} out of range 0..16"),
            Self::InvalidDutyCycle => f.write_str("duty cycle out of range 0.0..=1.0"),
            Self::InvalidFrequency => f.write_str("PWM frequency out of range 24..=1526 Hz"),
            Self::InvalidPwmTime(t) => write!(f, "PWM time {t} out of range 0..=4096"),
            Self::InvalidBlockLength(n) => write!(f, "register block of {n} bytes, expected 1..=4"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E> defmt::Format for Error<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Bus(_) => defmt::write!(f, "I2C bus error"),
            Self::InvalidChannel(ch) => defmt::write!(f, "InvalidChannel({})", ch),
            Self::InvalidDutyCycle => defmt::write!(f, "InvalidDutyCycle"),
            Self::InvalidFrequency => defmt::write!(f, "InvalidFrequency"),
            Self::InvalidPwmTime(t) => defmt::write!(f, "InvalidPwmTime({})", t),
            Self::InvalidBlockLength(n) => defmt::write!(f, "InvalidBlockLength({})", n),
        }
    }
}

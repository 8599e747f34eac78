//! Shared types used across the driver
//!
//! This module defines domain-specific types that enforce the chip's
//! ranges at construction, so the driver only ever sees valid values.

use core::fmt;
#[cfg(not(any(feature = "std", test)))]
use micromath::F32Ext;

use crate::config::{
    CHANNEL_COUNT, CHANNEL_PHASE_STEP, MAX_PWM_FREQUENCY_HZ, MIN_PWM_FREQUENCY_HZ, OSCILLATOR_HZ,
    PWM_MAX_COUNT, PWM_RESOLUTION,
};
use crate::dimming;
use crate::registers::reg;

/// PWM output channel index (0-15)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Channel(u8);

impl Channel {
    /// Create a channel, returns None if `index >= 16`
    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if index < CHANNEL_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Get the channel index
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Address of this channel's `LEDn_ON_L` register
    #[must_use]
    pub const fn base_register(self) -> u8 {
        reg::LED0_ON_L + self.0 * reg::LED_STRIDE
    }

    /// On-time offset that staggers channel switching across the period
    ///
    /// Channel 0 starts at tick 0, channel `n` at `n * 256 - 1`.
    #[must_use]
    pub const fn phase_offset(self) -> u16 {
        if self.0 == 0 {
            0
        } else {
            self.0 as u16 * CHANNEL_PHASE_STEP - 1
        }
    }

    /// Iterate over all 16 channels in order
    pub fn all() -> impl Iterator<Item = Self> {
        (0..CHANNEL_COUNT).map(Self)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LED{}", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Channel {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "LED{}", self.0);
    }
}

/// Fraction of the PWM period an output is on, in `0.0..=1.0`
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct DutyCycle(f32);

impl DutyCycle {
    /// Always off
    pub const OFF: Self = Self(0.0);

    /// Always on
    pub const FULL: Self = Self(1.0);

    /// Create from a fraction, returns None outside `0.0..=1.0` or for NaN
    #[must_use]
    pub fn new(fraction: f32) -> Option<Self> {
        if (0.0..=1.0).contains(&fraction) {
            Some(Self(fraction))
        } else {
            None
        }
    }

    /// Get the fraction
    #[must_use]
    pub const fn fraction(self) -> f32 {
        self.0
    }

    /// Linear 12-bit on-time: `round(4095 * duty)`
    #[must_use]
    pub fn linear_count(self) -> u16 {
        (f32::from(PWM_MAX_COUNT) * self.0).round() as u16
    }

    /// Perceptual 12-bit on-time via the CIE lightness table
    #[must_use]
    pub fn logarithmic_count(self) -> u16 {
        let step = (255.0 * self.0).round().clamp(0.0, 255.0) as u8;
        dimming::lookup(step)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DutyCycle {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}%", self.0 * 100.0);
    }
}

/// PWM frequency in Hertz, limited to what the prescaler can produce
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct PwmFrequency(f32);

impl PwmFrequency {
    /// Create from Hz, returns None outside 24..=1526 Hz or for NaN
    #[must_use]
    pub fn from_hz(hz: f32) -> Option<Self> {
        if (MIN_PWM_FREQUENCY_HZ..=MAX_PWM_FREQUENCY_HZ).contains(&hz) {
            Some(Self(hz))
        } else {
            None
        }
    }

    /// Get the frequency in Hz
    #[must_use]
    pub const fn as_hz(self) -> f32 {
        self.0
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PwmFrequency {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} Hz", self.0);
    }
}

/// Value of the PRE_SCALE register
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Prescaler(u8);

impl Prescaler {
    /// Compute `round(25 MHz / (4096 * f)) - 1`
    #[must_use]
    pub fn from_frequency(frequency: PwmFrequency) -> Self {
        let divisor = OSCILLATOR_HZ as f32 / (f32::from(PWM_RESOLUTION) * frequency.as_hz());
        Self((divisor.round() - 1.0) as u8)
    }

    /// Wrap a raw register value
    #[must_use]
    pub const fn from_raw(value: u8) -> Self {
        Self(value)
    }

    /// Raw register value
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// PWM frequency this prescaler produces with the internal oscillator
    #[must_use]
    pub fn frequency_hz(self) -> f32 {
        OSCILLATOR_HZ as f32 / (f32::from(PWM_RESOLUTION) * (f32::from(self.0) + 1.0))
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Prescaler {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Prescaler({})", self.0);
    }
}

/// On/off counter values for one channel
///
/// `(0, 4096)` and `(4096, 0)` are the full-off and full-on encodings;
/// every other pair has both values in `0..=4095`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PwmTimes {
    on: u16,
    off: u16,
}

impl PwmTimes {
    /// Output permanently low
    pub const ALWAYS_OFF: Self = Self { on: 0, off: PWM_RESOLUTION };

    /// Output permanently high
    pub const ALWAYS_ON: Self = Self { on: PWM_RESOLUTION, off: 0 };

    /// Create from counter values, returns None if either exceeds 4096
    #[must_use]
    pub const fn new(on: u16, off: u16) -> Option<Self> {
        if on <= PWM_RESOLUTION && off <= PWM_RESOLUTION {
            Some(Self { on, off })
        } else {
            None
        }
    }

    /// Map a duty cycle to the timing pair for `channel`
    #[must_use]
    pub fn for_duty_cycle(channel: Channel, duty: DutyCycle, logarithmic: bool) -> Self {
        if duty == DutyCycle::OFF {
            return Self::ALWAYS_OFF;
        }
        if duty == DutyCycle::FULL {
            return Self::ALWAYS_ON;
        }

        let required_on_time = if logarithmic {
            duty.logarithmic_count()
        } else {
            duty.linear_count()
        };

        let on = channel.phase_offset();
        let off = (on + required_on_time) % PWM_RESOLUTION;
        Self { on, off }
    }

    /// Tick at which the output turns on
    #[must_use]
    pub const fn on(self) -> u16 {
        self.on
    }

    /// Tick at which the output turns off
    #[must_use]
    pub const fn off(self) -> u16 {
        self.off
    }

    /// Register block bytes: `ON_L, ON_H, OFF_L, OFF_H`
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 4] {
        [
            (self.on & 0xFF) as u8,
            (self.on >> 8) as u8,
            (self.off & 0xFF) as u8,
            (self.off >> 8) as u8,
        ]
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PwmTimes {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "on={} off={}", self.on, self.off);
    }
}

//! PCA9685 register map and MODE register bit helpers
//!
//! The bit helpers work on a local copy of a register value; nothing here
//! touches the bus.

/// PCA9685 register addresses
pub mod reg {
    /// Mode register 1 (sleep, restart, auto-increment)
    pub const MODE1: u8 = 0x00;
    /// Mode register 2 (output polarity, driver type)
    pub const MODE2: u8 = 0x01;
    /// `LED0_ON_L`; channel `n` starts at `LED0_ON_L + 4 * n`
    pub const LED0_ON_L: u8 = 0x06;
    /// Register stride between consecutive channels
    pub const LED_STRIDE: u8 = 4;
    /// Broadcast on-time low byte for all channels
    pub const ALL_LED_ON_L: u8 = 0xFA;
    /// Broadcast on-time high byte for all channels
    pub const ALL_LED_ON_H: u8 = 0xFB;
    /// Broadcast off-time low byte for all channels
    pub const ALL_LED_OFF_L: u8 = 0xFC;
    /// Broadcast off-time high byte for all channels
    pub const ALL_LED_OFF_H: u8 = 0xFD;
    /// PWM frequency prescaler
    pub const PRE_SCALE: u8 = 0xFE;
}

/// MODE1 bit positions
pub mod mode1 {
    /// Auto-increment register address after each byte
    pub const AI: u8 = 5;
    /// Low-power mode, oscillator off
    pub const SLEEP: u8 = 4;
    /// Restart pending / restart trigger
    pub const RESTART: u8 = 7;
}

/// MODE2 bit positions
pub mod mode2 {
    /// Invert output logic state
    pub const INVRT: u8 = 4;
    /// Totem-pole (1) or open-drain (0) outputs
    pub const OUTDRV: u8 = 2;
}

/// Mask with only bit `bit` set
#[must_use]
pub const fn mask(bit: u8) -> u8 {
    1 << bit
}

/// Return `value` with `bit` set
#[must_use]
pub const fn set_bit(value: u8, bit: u8) -> u8 {
    value | mask(bit)
}

/// Return `value` with `bit` cleared
#[must_use]
pub const fn clear_bit(value: u8, bit: u8) -> u8 {
    value & !mask(bit)
}

/// Whether `bit` is set in `value`
#[must_use]
pub const fn is_set(value: u8, bit: u8) -> bool {
    value & mask(bit) != 0
}

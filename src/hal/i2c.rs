//! I2C Register Access
//!
//! Single-register and small register-block transactions for the PCA9685.
//! Generic over any blocking `embedded_hal::i2c::I2c` implementation;
//! every call is one (or, for reads, two) bus transactions with no retry.

use embedded_hal::i2c::I2c;

use crate::config::{ADDRESS_PIN_MASK, DEFAULT_I2C_ADDR};
use crate::error::{Error, Result};
use crate::fmt::trace;

/// Longest auto-increment block the driver writes in one transaction
pub const MAX_BLOCK_LEN: usize = 4;

/// I2C device address wrapper
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct I2cAddress(u8);

impl I2cAddress {
    /// PCA9685 with A5..A0 tied low
    pub const DEFAULT: Self = Self(DEFAULT_I2C_ADDR);

    /// Create from a 7-bit address; `None` above `0x7F`
    #[must_use]
    pub const fn new(addr: u8) -> Option<Self> {
        if addr <= 0x7F {
            Some(Self(addr))
        } else {
            None
        }
    }

    /// Create from the 8-bit write address used in the datasheet (e.g. `0x80`)
    #[must_use]
    pub const fn from_8bit(addr: u8) -> Self {
        Self(addr >> 1)
    }

    /// Create from the state of the A5..A0 hardware address pins
    ///
    /// Bits above A5 do not exist on the chip and are ignored.
    #[must_use]
    pub const fn from_pins(pins: u8) -> Self {
        Self(DEFAULT_I2C_ADDR | (pins & ADDRESS_PIN_MASK))
    }

    /// Get the 7-bit address
    #[must_use]
    pub const fn addr(self) -> u8 {
        self.0
    }
}

impl Default for I2cAddress {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for I2cAddress {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "0x{:02X}", self.0);
    }
}

/// Register-level access to one I2C bus
pub struct RegisterBus<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> RegisterBus<I2C> {
    /// Create a new register bus wrapper
    #[must_use]
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Give the underlying bus back
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Write a single register
    pub fn write_reg(&mut self, addr: I2cAddress, reg: u8, value: u8) -> Result<(), I2C::Error> {
        trace!("i2c write reg 0x{:02x} = 0x{:02x}", reg, value);
        self.i2c.write(addr.addr(), &[reg, value]).map_err(Error::Bus)
    }

    /// Write 1-4 consecutive registers starting at `base_reg`
    ///
    /// Relies on MODE1 auto-increment. Rejects empty or oversized blocks
    /// without touching the bus.
    pub fn write_regs(&mut self, addr: I2cAddress, base_reg: u8, values: &[u8]) -> Result<(), I2C::Error> {
        if values.is_empty() || values.len() > MAX_BLOCK_LEN {
            return Err(Error::InvalidBlockLength(values.len()));
        }

        let mut buf = [0u8; MAX_BLOCK_LEN + 1];
        buf[0] = base_reg;
        buf[1..=values.len()].copy_from_slice(values);
        trace!("i2c write block at 0x{:02x}, {} bytes", base_reg, values.len());
        self.i2c.write(addr.addr(), &buf[..=values.len()]).map_err(Error::Bus)
    }

    /// Read a single register
    ///
    /// Two separate transactions: select the register, then read one byte.
    pub fn read_reg(&mut self, addr: I2cAddress, reg: u8) -> Result<u8, I2C::Error> {
        self.i2c.write(addr.addr(), &[reg]).map_err(Error::Bus)?;
        let mut buf = [0u8];
        self.i2c.read(addr.addr(), &mut buf).map_err(Error::Bus)?;
        trace!("i2c read reg 0x{:02x} = 0x{:02x}", reg, buf[0]);
        Ok(buf[0])
    }
}

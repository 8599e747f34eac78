//! `PCA9685` 16-Channel PWM Controller Driver
//!
//! Drives LEDs or servos from the PCA9685's 16 independent 12-bit PWM
//! outputs. The driver handles the MODE1 sleep/restart state machine,
//! converts frequencies to prescaler values and duty cycles to staggered
//! on/off counter pairs.
//!
//! All calls block until the bus transaction completes. The driver keeps no
//! shadow of the chip's registers; every state query reads MODE1.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::config::{
    DEFAULT_PWM_FREQUENCY_HZ, MODE1_DEFAULT, MODE2_DEFAULT, MODE2_INVERT, OSCILLATOR_SETTLE_MS,
};
use crate::error::{Error, Result};
use crate::fmt::debug;
use crate::hal::i2c::{I2cAddress, RegisterBus};
use crate::registers::{clear_bit, is_set, mode1, reg, set_bit};
use crate::sequence::{SequencePolicy, Steps};
use crate::types::{Channel, DutyCycle, Prescaler, PwmFrequency, PwmTimes};

/// Oscillator state as encoded in MODE1
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeState {
    /// Oscillator running, outputs active
    Awake,
    /// Low-power mode, outputs off
    Sleeping,
    /// Sleeping with RESTART set; waking needs the restart sequence
    RestartPending,
}

impl ModeState {
    /// Decode a MODE1 value
    #[must_use]
    pub const fn from_mode1(value: u8) -> Self {
        if !is_set(value, mode1::SLEEP) {
            Self::Awake
        } else if is_set(value, mode1::RESTART) {
            Self::RestartPending
        } else {
            Self::Sleeping
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ModeState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Awake => defmt::write!(f, "AWAKE"),
            Self::Sleeping => defmt::write!(f, "SLEEPING"),
            Self::RestartPending => defmt::write!(f, "RESTART_PENDING"),
        }
    }
}

/// `PCA9685` driver
pub struct Pca9685<I2C, D> {
    bus: RegisterBus<I2C>,
    delay: D,
    address: I2cAddress,
    inverted: bool,
    policy: SequencePolicy,
}

impl<I2C, D> Pca9685<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Create a new driver; nothing is sent until [`init`](Self::init)
    #[must_use]
    pub fn new(i2c: I2C, delay: D, address: I2cAddress) -> Self {
        Self {
            bus: RegisterBus::new(i2c),
            delay,
            address,
            inverted: false,
            policy: SequencePolicy::BestEffort,
        }
    }

    /// Invert output polarity (applied by `init`)
    #[must_use]
    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    /// Choose how composite operations handle a failed step
    #[must_use]
    pub fn with_policy(mut self, policy: SequencePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Change the sequence policy
    pub fn set_policy(&mut self, policy: SequencePolicy) {
        self.policy = policy;
    }

    /// Current sequence policy
    #[must_use]
    pub const fn policy(&self) -> SequencePolicy {
        self.policy
    }

    /// Device address
    #[must_use]
    pub const fn address(&self) -> I2cAddress {
        self.address
    }

    /// Whether outputs are configured inverted
    #[must_use]
    pub const fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Destroy the driver and return the bus and delay
    pub fn release(self) -> (I2C, D) {
        (self.bus.release(), self.delay)
    }

    /// Bring the chip to a known state
    ///
    /// Sets MODE1/MODE2 defaults, forces every output off, programs
    /// 1000 Hz and wakes the chip.
    pub fn init(&mut self) -> Result<(), I2C::Error> {
        debug!("pca9685 0x{:02x}: init", self.address.addr());
        let addr = self.address;
        let mode2 = if self.inverted {
            MODE2_DEFAULT | MODE2_INVERT
        } else {
            MODE2_DEFAULT
        };

        let mut steps = Steps::new(self.policy);
        steps.run("mode1 defaults", || self.bus.write_reg(addr, reg::MODE1, MODE1_DEFAULT));
        steps.run("mode2 defaults", || self.bus.write_reg(addr, reg::MODE2, mode2));
        steps.run("all off", || self.all_off());
        steps.run("default frequency", || self.set_pwm_frequency(DEFAULT_PWM_FREQUENCY_HZ));
        steps.run("wakeup", || self.wakeup());
        steps.finish()
    }

    /// Read MODE1 and decode the oscillator state
    pub fn mode_state(&mut self) -> Result<ModeState, I2C::Error> {
        self.read_mode1().map(ModeState::from_mode1)
    }

    /// Whether the SLEEP bit is set
    pub fn is_sleeping(&mut self) -> Result<bool, I2C::Error> {
        self.read_mode1().map(|m| is_set(m, mode1::SLEEP))
    }

    /// Enter low-power mode
    ///
    /// RESTART is written as 0 so a pending restart is preserved rather
    /// than triggered. If MODE1 cannot be read under `BestEffort`, the
    /// init defaults stand in for it.
    pub fn sleep(&mut self) -> Result<(), I2C::Error> {
        let mut steps = Steps::new(self.policy);
        let current = steps.run("read mode1", || self.read_mode1()).unwrap_or(MODE1_DEFAULT);

        let mode = set_bit(clear_bit(current, mode1::RESTART), mode1::SLEEP);
        steps.run("write mode1", || self.write_mode1(mode));
        debug!("pca9685 0x{:02x}: sleep", self.address.addr());
        steps.finish()
    }

    /// Leave low-power mode, running the restart sequence if MODE1 asks for it
    ///
    /// When RESTART was set, the oscillator gets at least 500 µs to settle
    /// before RESTART is written back as 1.
    pub fn wakeup(&mut self) -> Result<(), I2C::Error> {
        let mut steps = Steps::new(self.policy);
        let current = steps.run("read mode1", || self.read_mode1()).unwrap_or(MODE1_DEFAULT);
        let restart_required = is_set(current, mode1::RESTART);

        let mode = clear_bit(clear_bit(current, mode1::RESTART), mode1::SLEEP);
        steps.run("clear sleep", || self.write_mode1(mode));

        if restart_required && !steps.halted() {
            debug!("pca9685 0x{:02x}: restarting PWM channels", self.address.addr());
            self.delay.delay_ms(OSCILLATOR_SETTLE_MS);
            steps.run("restart", || self.write_mode1(set_bit(mode, mode1::RESTART)));
        }

        debug!("pca9685 0x{:02x}: awake", self.address.addr());
        steps.finish()
    }

    /// Set the PWM frequency for all channels, 24..=1526 Hz
    ///
    /// The prescaler only latches while sleeping, so an awake chip is put
    /// to sleep and woken again. A sleeping chip stays asleep.
    pub fn set_pwm_frequency(&mut self, frequency_hz: f32) -> Result<(), I2C::Error> {
        let frequency = PwmFrequency::from_hz(frequency_hz).ok_or(Error::InvalidFrequency)?;
        let prescaler = Prescaler::from_frequency(frequency);
        let addr = self.address;

        let mut steps = Steps::new(self.policy);
        let already_sleeping = steps.run("query sleep", || self.is_sleeping()).unwrap_or(false);

        if !already_sleeping {
            steps.run("sleep", || self.sleep());
        }

        debug!("pca9685 0x{:02x}: prescaler {}", addr.addr(), prescaler.raw());
        steps.run("write prescaler", || {
            self.bus.write_reg(addr, reg::PRE_SCALE, prescaler.raw())
        });

        if !already_sleeping {
            steps.run("wakeup", || self.wakeup());
        }

        steps.finish()
    }

    /// Read back the PRE_SCALE register
    pub fn prescaler(&mut self) -> Result<Prescaler, I2C::Error> {
        self.bus
            .read_reg(self.address, reg::PRE_SCALE)
            .map(Prescaler::from_raw)
    }

    /// Effective PWM frequency from the programmed prescaler
    pub fn pwm_frequency(&mut self) -> Result<f32, I2C::Error> {
        self.prescaler().map(Prescaler::frequency_hz)
    }

    /// Write raw on/off counter values for one channel
    ///
    /// Both values must be in `0..=4096`; 4096 selects full on / full off.
    pub fn set_channel_pwm_times(&mut self, channel: u8, on_time: u16, off_time: u16) -> Result<(), I2C::Error> {
        let channel = Channel::new(channel).ok_or(Error::InvalidChannel(channel))?;
        let times = Self::validate_times(on_time, off_time)?;
        self.write_channel(channel, times)
    }

    /// Set a channel's duty cycle, `0.0..=1.0`
    ///
    /// With `logarithmic` the duty cycle is treated as perceived brightness
    /// and mapped through the CIE lightness table.
    pub fn set_channel_duty_cycle(&mut self, channel: u8, duty_cycle: f32, logarithmic: bool) -> Result<(), I2C::Error> {
        let channel = Channel::new(channel).ok_or(Error::InvalidChannel(channel))?;
        let duty = DutyCycle::new(duty_cycle).ok_or(Error::InvalidDutyCycle)?;
        self.write_channel(channel, PwmTimes::for_duty_cycle(channel, duty, logarithmic))
    }

    /// Drive a channel fully on
    pub fn set_channel_on(&mut self, channel: u8) -> Result<(), I2C::Error> {
        let channel = Channel::new(channel).ok_or(Error::InvalidChannel(channel))?;
        self.write_channel(channel, PwmTimes::ALWAYS_ON)
    }

    /// Drive a channel fully off
    pub fn set_channel_off(&mut self, channel: u8) -> Result<(), I2C::Error> {
        let channel = Channel::new(channel).ok_or(Error::InvalidChannel(channel))?;
        self.write_channel(channel, PwmTimes::ALWAYS_OFF)
    }

    /// Write the same on/off counter values to every channel at once
    pub fn set_all_pwm_times(&mut self, on_time: u16, off_time: u16) -> Result<(), I2C::Error> {
        let times = Self::validate_times(on_time, off_time)?;
        self.bus
            .write_regs(self.address, reg::ALL_LED_ON_L, &times.to_bytes())
    }

    /// Force every output off with a single transaction
    pub fn all_off(&mut self) -> Result<(), I2C::Error> {
        self.bus
            .write_regs(self.address, reg::ALL_LED_ON_L, &PwmTimes::ALWAYS_OFF.to_bytes())
    }

    fn validate_times(on_time: u16, off_time: u16) -> Result<PwmTimes, I2C::Error> {
        PwmTimes::new(on_time, off_time).ok_or(Error::InvalidPwmTime(on_time.max(off_time)))
    }

    fn write_channel(&mut self, channel: Channel, times: PwmTimes) -> Result<(), I2C::Error> {
        self.bus
            .write_regs(self.address, channel.base_register(), &times.to_bytes())
    }

    fn read_mode1(&mut self) -> Result<u8, I2C::Error> {
        self.bus.read_reg(self.address, reg::MODE1)
    }

    fn write_mode1(&mut self, value: u8) -> Result<(), I2C::Error> {
        self.bus.write_reg(self.address, reg::MODE1, value)
    }
}

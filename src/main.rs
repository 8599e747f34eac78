//! PCA9685 Demo Firmware
//!
//! Entry point for an STM32G474 board with a PCA9685 on I2C1.
//! Initializes the chip, then breathes all 16 channels with a staggered
//! perceptual ramp.

#![no_std]
#![no_main]

use defmt::{error, info};
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_stm32::i2c::I2c;
use embassy_stm32::time::Hertz;
use embassy_time::{Delay, Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use pca9685_driver::prelude::*;

/// Steps per ramp direction
const RAMP_STEPS: u16 = 64;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("PCA9685 demo v{}", env!("CARGO_PKG_VERSION"));

    let p = embassy_stm32::init(embassy_stm32::Config::default());

    // pins::PCA9685_OE is active low; hold outputs enabled
    let _output_enable = Output::new(p.PA8, Level::Low, Speed::Low);

    // pins::I2C1_SCL, pins::I2C1_SDA
    let i2c = I2c::new_blocking(
        p.I2C1,
        p.PB8,
        p.PB9,
        Hertz(I2C_FREQUENCY_HZ),
        Default::default(),
    );

    info!(
        "I2C1 initialized at {} Hz (SCL {}, SDA {}, OE {})",
        I2C_FREQUENCY_HZ,
        pins::I2C1_SCL,
        pins::I2C1_SDA,
        pins::PCA9685_OE
    );

    let mut pwm = Pca9685::new(i2c, Delay, I2cAddress::DEFAULT);

    if let Err(e) = pwm.init() {
        error!("PCA9685 init failed: {}", e);
    }

    match pwm.pwm_frequency() {
        Ok(hz) => info!("PWM running at {} Hz", hz),
        Err(e) => error!("prescaler read failed: {}", e),
    }

    let mut step: u16 = 0;
    loop {
        for channel in Channel::all() {
            let offset = (step + u16::from(channel.index()) * 8) % (2 * RAMP_STEPS);
            let level = if offset < RAMP_STEPS {
                offset
            } else {
                2 * RAMP_STEPS - offset
            };
            let duty = f32::from(level) / f32::from(RAMP_STEPS);

            if let Err(e) = pwm.set_channel_duty_cycle(channel.index(), duty, true) {
                error!("{}: duty update failed: {}", channel, e);
            }
        }

        step = (step + 1) % (2 * RAMP_STEPS);
        Timer::after(Duration::from_millis(20)).await;
    }
}

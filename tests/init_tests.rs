//! Init Sequence Tests
//!
//! Tests for the startup sequence and its failure behavior.
//! Run with: cargo test --features std --test init_tests

mod common;

use common::{read_reg, write_block, write_reg, EventLog, RecordingBus, RecordingDelay};
use embedded_hal::i2c::ErrorKind;
use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
use pca9685_driver::{Error, I2cAddress, Pca9685, SequencePolicy};

/// Expected traffic for `init`, given what MODE1 reads back before wakeup
fn init_sequence(mode2: u8, mode1_at_wake: u8) -> Vec<I2cTransaction> {
    let mut t = vec![
        write_reg(0x00, 0x30),
        write_reg(0x01, mode2),
        write_block(0xFA, [0x00, 0x00, 0x00, 0x10]),
    ];
    // Frequency change while already asleep: no extra sleep/wake
    t.extend(read_reg(0x00, 0x30));
    t.push(write_reg(0xFE, 5));
    t.extend(read_reg(0x00, mode1_at_wake));
    t.push(write_reg(0x00, mode1_at_wake & !0x90));
    if mode1_at_wake & 0x80 != 0 {
        t.push(write_reg(0x00, (mode1_at_wake & !0x10) | 0x80));
    }
    t
}

#[test]
fn test_init_programs_defaults_and_wakes() {
    let mut pwm = Pca9685::new(I2cMock::new(&init_sequence(0x00, 0x30)), NoopDelay::new(), I2cAddress::DEFAULT);
    pwm.init().unwrap();
    pwm.release().0.done();
}

#[test]
fn test_init_inverted_sets_invert_bit() {
    let mut pwm = Pca9685::new(I2cMock::new(&init_sequence(0x10, 0x30)), NoopDelay::new(), I2cAddress::DEFAULT)
        .with_inverted(true);
    assert!(pwm.is_inverted());
    pwm.init().unwrap();
    pwm.release().0.done();
}

#[test]
fn test_init_restarts_when_chip_requests_it() {
    let mut pwm = Pca9685::new(I2cMock::new(&init_sequence(0x00, 0xB0)), NoopDelay::new(), I2cAddress::DEFAULT);
    pwm.init().unwrap();
    pwm.release().0.done();
}

#[test]
fn test_init_uses_configured_address() {
    let address = I2cAddress::from_pins(0b00_0011);
    let expectations = [
        I2cTransaction::write(0x43, vec![0x00, 0x30]),
        I2cTransaction::write(0x43, vec![0x01, 0x00]),
        I2cTransaction::write(0x43, vec![0xFA, 0x00, 0x00, 0x00, 0x10]),
        I2cTransaction::write(0x43, vec![0x00]),
        I2cTransaction::read(0x43, vec![0x30]),
        I2cTransaction::write(0x43, vec![0xFE, 5]),
        I2cTransaction::write(0x43, vec![0x00]),
        I2cTransaction::read(0x43, vec![0x30]),
        I2cTransaction::write(0x43, vec![0x00, 0x20]),
    ];
    let mut pwm = Pca9685::new(I2cMock::new(&expectations), NoopDelay::new(), address);
    assert_eq!(pwm.address(), address);
    pwm.init().unwrap();
    pwm.release().0.done();
}

#[test]
fn test_init_best_effort_runs_every_step_after_failure() {
    let mut expectations = init_sequence(0x00, 0x30);
    expectations[0] = write_reg(0x00, 0x30).with_error(ErrorKind::Other);
    let mut pwm = Pca9685::new(I2cMock::new(&expectations), NoopDelay::new(), I2cAddress::DEFAULT);

    assert_eq!(pwm.init(), Err(Error::Bus(ErrorKind::Other)));
    pwm.release().0.done();
}

#[test]
fn test_init_reports_first_failure_only() {
    let log = EventLog::default();
    // MODE2 write and the prescaler write both fail
    let bus = RecordingBus::new(&log, &[0x30, 0x30]).failing_write(1).failing_write(4);
    let mut pwm = Pca9685::new(bus, RecordingDelay::new(&log), I2cAddress::DEFAULT);

    assert_eq!(pwm.init(), Err(Error::Bus(ErrorKind::Other)));
    assert_eq!(log.writes().len(), 7);
}

#[test]
fn test_init_fail_fast_stops_at_first_failure() {
    let expectations = [write_reg(0x00, 0x30).with_error(ErrorKind::Other)];
    let mut pwm = Pca9685::new(I2cMock::new(&expectations), NoopDelay::new(), I2cAddress::DEFAULT)
        .with_policy(SequencePolicy::FailFast);

    assert_eq!(pwm.init(), Err(Error::Bus(ErrorKind::Other)));
    pwm.release().0.done();
}

#[test]
fn test_policy_can_be_changed_after_construction() {
    let none: [I2cTransaction; 0] = [];
    let mut pwm = Pca9685::new(I2cMock::new(&none), NoopDelay::new(), I2cAddress::DEFAULT);
    assert_eq!(pwm.policy(), SequencePolicy::BestEffort);
    pwm.set_policy(SequencePolicy::FailFast);
    assert_eq!(pwm.policy(), SequencePolicy::FailFast);
    pwm.release().0.done();
}

//! Shared test fixtures
//!
//! `embedded-hal-mock` checks exact transaction lists; the recording bus
//! below additionally interleaves delays with bus traffic so ordering
//! between writes and the oscillator settle time can be asserted.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};
use embedded_hal_mock::eh1::i2c::Transaction as I2cTransaction;

/// 7-bit address used by every test
pub const ADDR: u8 = 0x40;

/// Expect a two-byte register write
pub fn write_reg(reg: u8, value: u8) -> I2cTransaction {
    I2cTransaction::write(ADDR, vec![reg, value])
}

/// Expect a block write starting at `reg`
pub fn write_block(reg: u8, bytes: [u8; 4]) -> I2cTransaction {
    let mut data = vec![reg];
    data.extend_from_slice(&bytes);
    I2cTransaction::write(ADDR, data)
}

/// Expect a register read: address select, then one byte back
pub fn read_reg(reg: u8, value: u8) -> [I2cTransaction; 2] {
    [
        I2cTransaction::write(ADDR, vec![reg]),
        I2cTransaction::read(ADDR, vec![value]),
    ]
}

/// One observed bus or delay event
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Write(u8, Vec<u8>),
    Read(u8, usize),
    Delay(u32),
}

/// Event log shared between the recording bus and delay
#[derive(Clone, Default)]
pub struct EventLog(Rc<RefCell<Vec<Event>>>);

impl EventLog {
    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    /// Only the payloads written to the bus, in order
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Write(_, bytes) => Some(bytes),
                _ => None,
            })
            .collect()
    }

    /// Total nanoseconds delayed between the `first` and `second` write
    pub fn delay_between_writes(&self, first: usize, second: usize) -> u64 {
        let mut write_index = 0;
        let mut total = 0u64;
        for event in self.events() {
            match event {
                Event::Write(..) => {
                    if write_index == second {
                        return total;
                    }
                    write_index += 1;
                }
                Event::Delay(ns) if write_index > first => total += u64::from(ns),
                _ => {}
            }
        }
        total
    }

    fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }
}

/// Fake bus that answers reads from a queue and can fail chosen writes
pub struct RecordingBus {
    log: EventLog,
    reads: VecDeque<u8>,
    fail_writes: Vec<usize>,
    write_count: usize,
}

impl RecordingBus {
    pub fn new(log: &EventLog, reads: &[u8]) -> Self {
        Self {
            log: log.clone(),
            reads: reads.iter().copied().collect(),
            fail_writes: Vec::new(),
            write_count: 0,
        }
    }

    /// Make the n-th write (0-based, counting address selects) fail
    pub fn failing_write(mut self, n: usize) -> Self {
        self.fail_writes.push(n);
        self
    }
}

impl ErrorType for RecordingBus {
    type Error = ErrorKind;
}

impl I2c for RecordingBus {
    fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    self.log.push(Event::Write(address, bytes.to_vec()));
                    let n = self.write_count;
                    self.write_count += 1;
                    if self.fail_writes.contains(&n) {
                        return Err(ErrorKind::Other);
                    }
                }
                Operation::Read(buf) => {
                    self.log.push(Event::Read(address, buf.len()));
                    for byte in buf.iter_mut() {
                        *byte = self.reads.pop_front().unwrap_or(0);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Delay that only records how long it was asked to wait
pub struct RecordingDelay {
    log: EventLog,
}

impl RecordingDelay {
    pub fn new(log: &EventLog) -> Self {
        Self { log: log.clone() }
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.push(Event::Delay(ns));
    }
}

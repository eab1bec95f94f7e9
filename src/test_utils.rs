// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Host-side fakes shared by the unit tests.

use core::cell::{Cell, RefCell};
use core::convert::Infallible;
use std::collections::VecDeque;
use std::vec::Vec;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use embedded_hal::pwm::{self, SetDutyCycle};

use crate::clock::Clock;
use crate::drivers::rotary_encoder::QuadratureCounter;
use crate::drivers::tone::ToneOutput;
use crate::protocol::{Actionable, CommandWindow, Readable, SensorWindow, Steppable, Transport};

/// Observable state behind a fake pin: current level and number of writes.
pub struct LevelTrace {
    level: Cell<bool>,
    writes: Cell<u32>,
}

impl LevelTrace {
    pub fn new(initial_high: bool) -> Self {
        Self {
            level: Cell::new(initial_high),
            writes: Cell::new(0),
        }
    }

    pub fn record(&self, high: bool) {
        self.level.set(high);
        self.writes.set(self.writes.get() + 1);
    }

    pub fn level(&self) -> bool {
        self.level.get()
    }

    pub fn writes(&self) -> u32 {
        self.writes.get()
    }
}

/// Output pin that records into a [`LevelTrace`].
pub struct FakePin<'p> {
    trace: &'p LevelTrace,
}

impl<'p> FakePin<'p> {
    pub fn new(trace: &'p LevelTrace) -> Self {
        Self { trace }
    }
}

impl ErrorType for FakePin<'_> {
    type Error = Infallible;
}

impl OutputPin for FakePin<'_> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.trace.record(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.trace.record(true);
        Ok(())
    }
}

/// Input pin whose level the test sets.
pub struct FakeInput<'p> {
    level: &'p Cell<bool>,
}

impl<'p> FakeInput<'p> {
    pub fn new(level: &'p Cell<bool>) -> Self {
        Self { level }
    }
}

impl ErrorType for FakeInput<'_> {
    type Error = Infallible;
}

impl InputPin for FakeInput<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.level.get())
    }
}

/// Observable state behind a fake PWM channel.
#[derive(Default)]
pub struct DutyTrace {
    pub duty: Cell<u16>,
    pub writes: Cell<u32>,
}

pub struct FakePwm<'p> {
    trace: &'p DutyTrace,
    max: u16,
}

impl<'p> FakePwm<'p> {
    pub fn new(trace: &'p DutyTrace, max: u16) -> Self {
        Self { trace, max }
    }
}

impl pwm::ErrorType for FakePwm<'_> {
    type Error = Infallible;
}

impl SetDutyCycle for FakePwm<'_> {
    fn max_duty_cycle(&self) -> u16 {
        self.max
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.trace.duty.set(duty);
        self.trace.writes.set(self.trace.writes.get() + 1);
        Ok(())
    }
}

/// Observable state behind a fake quadrature counter.
#[derive(Default)]
pub struct CounterTrace {
    pub position: Cell<i32>,
    pub resets: Cell<u32>,
}

pub struct FakeCounter<'p> {
    trace: &'p CounterTrace,
}

impl<'p> FakeCounter<'p> {
    pub fn new(trace: &'p CounterTrace) -> Self {
        Self { trace }
    }
}

impl QuadratureCounter for FakeCounter<'_> {
    fn position(&self) -> i32 {
        self.trace.position.get()
    }

    fn reset(&mut self) {
        self.trace.position.set(0);
        self.trace.resets.set(self.trace.resets.get() + 1);
    }
}

/// Observable state behind a fake tone output. `playing` is `None` while silent.
#[derive(Default)]
pub struct ToneTrace {
    pub playing: Cell<Option<u16>>,
    pub writes: Cell<u32>,
}

pub struct FakeTone<'p> {
    trace: &'p ToneTrace,
}

impl<'p> FakeTone<'p> {
    pub fn new(trace: &'p ToneTrace) -> Self {
        Self { trace }
    }

    fn set(&mut self, playing: Option<u16>) {
        self.trace.playing.set(playing);
        self.trace.writes.set(self.trace.writes.get() + 1);
    }
}

impl ToneOutput for FakeTone<'_> {
    fn play(&mut self, hz: u16) {
        self.set(Some(hz));
    }

    fn silence(&mut self) {
        self.set(None);
    }
}

/// One observed device callback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Act { id: u8, bytes: Vec<u8> },
    Read { id: u8 },
    Step { id: u8 },
}

/// Shared, ordered record of device callbacks.
#[derive(Default)]
pub struct CallLog {
    calls: RefCell<Vec<Call>>,
    next_id: Cell<u8>,
}

impl CallLog {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn push(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn allocate_id(&self) -> u8 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }
}

/// Device with every role. Logs each callback and fills its sensor window with its own id.
pub struct RecordingDevice<'l> {
    pub id: u8,
    command_width: usize,
    sensor_width: usize,
    log: &'l CallLog,
}

impl<'l> RecordingDevice<'l> {
    pub fn new(command_width: usize, sensor_width: usize, log: &'l CallLog) -> Self {
        Self {
            id: log.allocate_id(),
            command_width,
            sensor_width,
            log,
        }
    }
}

impl Actionable for RecordingDevice<'_> {
    fn command_width(&self) -> usize {
        self.command_width
    }

    fn act(&mut self, command: CommandWindow<'_>, _clock: &Clock<'_>) {
        self.log.push(Call::Act {
            id: self.id,
            bytes: command.as_bytes().to_vec(),
        });
    }
}

impl Readable for RecordingDevice<'_> {
    fn sensor_width(&self) -> usize {
        self.sensor_width
    }

    fn read(&mut self, mut sensor: SensorWindow<'_>, _clock: &Clock<'_>) {
        self.log.push(Call::Read { id: self.id });
        sensor.as_mut_bytes().fill(self.id);
    }
}

impl Steppable for RecordingDevice<'_> {
    fn step(&mut self, _clock: &Clock<'_>) {
        self.log.push(Call::Step { id: self.id });
    }
}

/// In-memory transport. Tests queue host bytes into `rx` and inspect replies in `tx`.
#[derive(Default)]
pub struct Loopback {
    pub rx: VecDeque<u8>,
    pub tx: Vec<u8>,
    pub frames_sent: usize,
    pub fail_writes: bool,
}

impl Loopback {
    pub fn push(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes.iter().copied());
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct LinkDown;

impl Transport for Loopback {
    type Error = LinkDown;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        self.rx.pop_front().ok_or(nb::Error::WouldBlock)
    }

    fn write_frame(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(LinkDown);
        }
        self.tx.extend_from_slice(frame);
        self.frames_sent += 1;
        Ok(())
    }
}

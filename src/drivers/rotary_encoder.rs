// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Rotary encoder (running wheel) as a combined sensor and control.
//!
//! - Sensor window: 4 bytes, signed position in counts.
//! - Command window: 1 byte, `0x01` zeroes the position. Anything else leaves it alone.

use crate::clock::Clock;
use crate::protocol::{Actionable, CommandWindow, Readable, SensorWindow};

/// A hardware or software quadrature counter.
pub trait QuadratureCounter {
    fn position(&self) -> i32;
    fn reset(&mut self);
}

pub struct RotaryEncoder<C: QuadratureCounter> {
    counter: C,
}

impl<C: QuadratureCounter> RotaryEncoder<C> {
    pub fn new(counter: C) -> Self {
        Self { counter }
    }

    #[inline]
    pub fn position(&self) -> i32 {
        self.counter.position()
    }

    pub fn free(self) -> C {
        self.counter
    }
}

impl<C: QuadratureCounter> Readable for RotaryEncoder<C> {
    fn sensor_width(&self) -> usize {
        4
    }

    fn read(&mut self, mut sensor: SensorWindow<'_>, _clock: &Clock<'_>) {
        sensor.put_i32(self.counter.position());
    }
}

impl<C: QuadratureCounter> Actionable for RotaryEncoder<C> {
    fn act(&mut self, command: CommandWindow<'_>, _clock: &Clock<'_>) {
        if command.flag() {
            self.counter.reset();
        }
    }
}

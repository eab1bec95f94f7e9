// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Readers that report the shared clock counters to the host.

use crate::clock::Clock;
use crate::protocol::{Readable, SensorWindow};

/// Milliseconds since the last sync, 4 bytes.
#[derive(Copy, Clone, Debug, Default)]
pub struct MillisReader;

impl Readable for MillisReader {
    fn sensor_width(&self) -> usize {
        4
    }

    fn read(&mut self, mut sensor: SensorWindow<'_>, clock: &Clock<'_>) {
        sensor.put_i32(clock.millis_since_sync() as i32);
    }
}

/// Microseconds since the last hour boundary, 4 bytes.
#[derive(Copy, Clone, Debug, Default)]
pub struct MicrosReader;

impl Readable for MicrosReader {
    fn sensor_width(&self) -> usize {
        4
    }

    fn read(&mut self, mut sensor: SensorWindow<'_>, clock: &Clock<'_>) {
        sensor.put_i32(clock.micros_since_hour() as i32);
    }
}

// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Analog channel reported as a 2-byte little-endian sample.
//!
//! The sample source is a closure so one ADC can serve several sensors:
//!
//! ```ignore
//! let adc1 = RefCell::new(Adc::adc1(dp.ADC1));
//! let lever = RefCell::new(AnalogSensor::new(Adc::make_reader(&adc1, 3)));
//! ```

use crate::clock::Clock;
use crate::protocol::{Readable, SensorWindow};

pub struct AnalogSensor<F>
where
    F: FnMut() -> u16,
{
    sample: F,
    last: u16,
}

impl<F> AnalogSensor<F>
where
    F: FnMut() -> u16,
{
    pub fn new(sample: F) -> Self {
        Self { sample, last: 0 }
    }

    /// Most recent sample sent to the host.
    #[inline]
    pub fn last(&self) -> u16 {
        self.last
    }
}

impl<F> Readable for AnalogSensor<F>
where
    F: FnMut() -> u16,
{
    fn sensor_width(&self) -> usize {
        2
    }

    fn read(&mut self, mut sensor: SensorWindow<'_>, _clock: &Clock<'_>) {
        self.last = (self.sample)();
        sensor.put_u16(self.last);
    }
}

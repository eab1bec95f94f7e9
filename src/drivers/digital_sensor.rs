// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Digital input reported as a 1-byte boolean (lick sensor, beam break, button).

use embedded_hal::digital::InputPin;

use crate::clock::Clock;
use crate::protocol::{Readable, SensorWindow};

pub struct DigitalSensor<P: InputPin> {
    pin: P,
    inverted: bool,
}

impl<P: InputPin> DigitalSensor<P> {
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            inverted: false,
        }
    }

    /// Report `true` while the pin is low (pull-up wiring).
    pub fn active_low(pin: P) -> Self {
        Self {
            pin,
            inverted: true,
        }
    }

    /// Current logical state. A pin read error counts as `false`.
    pub fn is_active(&mut self) -> bool {
        self.pin.is_high().map(|high| high != self.inverted).unwrap_or(false)
    }

    pub fn free(self) -> P {
        self.pin
    }
}

impl<P: InputPin> Readable for DigitalSensor<P> {
    fn read(&mut self, mut sensor: SensorWindow<'_>, _clock: &Clock<'_>) {
        let active = self.is_active();
        sensor.put_flag(active);
    }
}

// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Square-wave sync signal locked to the shared clock.
//!
//! While the clock is active the output holds each level for `half_period_ms` milliseconds,
//! starting LOW at the sync instant:
//!
//! ```text
//! millis_since_sync   0 ........ h ........ 2h ........ 3h
//! level               LOW        HIGH       LOW         HIGH
//! ```
//!
//! While the clock is stopped the pin is left alone. The start/stop control drives it directly
//! through [`PulseOutput`], so the clock must know about it:
//!
//! ```ignore
//! let pulse = RefCell::new(PulseClock::new(pin, 100));
//! clock.attach_pulse_output(&pulse)?;
//! registry.add_readable(&pulse)?;
//! registry.add_steppable(&pulse)?;
//! ```

use embedded_hal::digital::{OutputPin, PinState};

use crate::clock::{Clock, PulseOutput};
use crate::protocol::{Readable, SensorWindow, Steppable};

pub struct PulseClock<P: OutputPin> {
    pin: P,
    half_period_ms: u32,
    level: PinState,
}

impl<P: OutputPin> PulseClock<P> {
    /// Idle HIGH until the first start. A half-period of zero is treated as one millisecond.
    pub fn new(mut pin: P, half_period_ms: u32) -> Self {
        pin.set_high().ok();
        Self {
            pin,
            half_period_ms: half_period_ms.max(1),
            level: PinState::High,
        }
    }

    #[inline]
    pub fn half_period_ms(&self) -> u32 {
        self.half_period_ms
    }

    #[inline]
    pub fn level(&self) -> PinState {
        self.level
    }

    /// Level the wave has `millis` after the sync.
    pub fn level_at(&self, millis: u32) -> PinState {
        // u64 so a large half-period cannot overflow the full period.
        let period = 2 * self.half_period_ms as u64;
        let phase = millis as u64 % period;
        PinState::from(phase >= self.half_period_ms as u64)
    }

    fn set_level(&mut self, level: PinState) {
        self.pin.set_state(level).ok();
        self.level = level;
    }

    pub fn free(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> Steppable for PulseClock<P> {
    fn step(&mut self, clock: &Clock<'_>) {
        if clock.is_active() {
            self.set_level(self.level_at(clock.millis_since_sync()));
        }
    }
}

impl<P: OutputPin> Readable for PulseClock<P> {
    fn read(&mut self, mut sensor: SensorWindow<'_>, _clock: &Clock<'_>) {
        sensor.put_flag(self.level == PinState::High);
    }
}

impl<P: OutputPin> PulseOutput for PulseClock<P> {
    fn drive(&mut self, level: PinState) {
        self.set_level(level);
    }
}

// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Output (valve, relay) that opens for a commanded number of milliseconds.
//!
//! Command window: 2 bytes, little-endian duration in ms. A nonzero duration opens the output
//! and stamps the start with `millis_since_sync`. Commands that arrive while it is open are
//! ignored, so the host cannot extend or re-trigger a running interval. The output closes on the
//! first step where `millis_since_sync - start > duration`.
//!
//! The interval is measured on the shared clock. A stop/start while open resets that clock, which
//! lengthens or shortens the interval accordingly.

use embedded_hal::digital::OutputPin;
use log::trace;

use crate::clock::Clock;
use crate::hw::output::{ActiveLevel, Output};
use crate::protocol::{Actionable, CommandWindow, Steppable};

pub struct TimedRelay<P: OutputPin> {
    output: Output<P>,
    open: bool,
    duration_ms: u16,
    start_ms: u32,
}

impl<P: OutputPin> TimedRelay<P> {
    pub fn new(pin: P, active: ActiveLevel) -> Self {
        Self {
            output: Output::new(pin, active),
            open: false,
            duration_ms: 0,
            start_ms: 0,
        }
    }

    pub fn active_high(pin: P) -> Self {
        Self::new(pin, ActiveLevel::High)
    }

    pub fn active_low(pin: P) -> Self {
        Self::new(pin, ActiveLevel::Low)
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[inline]
    pub fn duration_ms(&self) -> u16 {
        self.duration_ms
    }

    #[inline]
    pub fn start_ms(&self) -> u32 {
        self.start_ms
    }

    /// Open for `duration_ms` starting at `now_ms`. No effect while already open or for a zero
    /// duration.
    pub fn trigger(&mut self, duration_ms: u16, now_ms: u32) {
        if self.open || duration_ms == 0 {
            return;
        }
        self.open = true;
        self.duration_ms = duration_ms;
        self.start_ms = now_ms;
        self.output.on();
        trace!("relay open for {} ms at {}", duration_ms, now_ms);
    }

    /// Close once more than the commanded duration has passed since the start.
    pub fn update(&mut self, now_ms: u32) {
        if self.open && now_ms.wrapping_sub(self.start_ms) > self.duration_ms as u32 {
            self.open = false;
            self.output.off();
        }
    }

    pub fn free(self) -> P {
        self.output.free()
    }
}

impl<P: OutputPin> Actionable for TimedRelay<P> {
    fn command_width(&self) -> usize {
        2
    }

    fn act(&mut self, command: CommandWindow<'_>, clock: &Clock<'_>) {
        self.trigger(command.u16(), clock.millis_since_sync());
    }
}

impl<P: OutputPin> Steppable for TimedRelay<P> {
    fn step(&mut self, clock: &Clock<'_>) {
        self.update(clock.millis_since_sync());
    }
}

// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Loads on a single GPIO line, addressed by logical state rather than pin level.
//!
//! | wiring               | load on | load off |
//! | -------------------- | ------- | -------- |
//! | [`ActiveLevel::High`] | high    | low      |
//! | [`ActiveLevel::Low`]  | low     | high     |
//!
//! Valves, relays and the board LEDs all go through [`Output`]. The load is switched off as soon
//! as the wrapper is built.

use embedded_hal::digital::{OutputPin, PinState};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ActiveLevel {
    High,
    Low,
}

impl ActiveLevel {
    /// Pin level that puts the load in the logical state `on`.
    pub const fn pin_state(self, on: bool) -> PinState {
        match (self, on) {
            (Self::High, true) | (Self::Low, false) => PinState::High,
            (Self::High, false) | (Self::Low, true) => PinState::Low,
        }
    }
}

pub struct Output<PIN: OutputPin> {
    pin: PIN,
    wiring: ActiveLevel,
    on: bool,
}

impl<PIN: OutputPin> Output<PIN> {
    pub fn new(pin: PIN, wiring: ActiveLevel) -> Self {
        let mut output = Self {
            pin,
            wiring,
            on: false,
        };
        output.set(false);
        output
    }

    pub fn active_high(pin: PIN) -> Self {
        Self::new(pin, ActiveLevel::High)
    }

    pub fn active_low(pin: PIN) -> Self {
        Self::new(pin, ActiveLevel::Low)
    }

    /// Pin errors are dropped; the logical state is updated regardless.
    pub fn set(&mut self, on: bool) {
        self.pin.set_state(self.wiring.pin_state(on)).ok();
        self.on = on;
    }

    #[inline]
    pub fn on(&mut self) {
        self.set(true)
    }

    #[inline]
    pub fn off(&mut self) {
        self.set(false)
    }

    #[inline]
    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn free(self) -> PIN {
        self.pin
    }
}

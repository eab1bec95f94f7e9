// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Output switched straight from a 1-byte boolean command, every cycle.

use embedded_hal::digital::OutputPin;

use crate::clock::Clock;
use crate::hw::output::{ActiveLevel, Output};
use crate::protocol::{Actionable, CommandWindow};

pub struct DirectOutput<P: OutputPin> {
    output: Output<P>,
}

impl<P: OutputPin> DirectOutput<P> {
    pub fn new(pin: P, active: ActiveLevel) -> Self {
        Self {
            output: Output::new(pin, active),
        }
    }

    pub fn active_high(pin: P) -> Self {
        Self::new(pin, ActiveLevel::High)
    }

    pub fn active_low(pin: P) -> Self {
        Self::new(pin, ActiveLevel::Low)
    }

    #[inline]
    pub fn is_on(&self) -> bool {
        self.output.is_on()
    }

    pub fn free(self) -> P {
        self.output.free()
    }
}

impl<P: OutputPin> Actionable for DirectOutput<P> {
    fn act(&mut self, command: CommandWindow<'_>, _clock: &Clock<'_>) {
        self.output.set(command.flag());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{FakePin, LevelTrace};

    #[test]
    fn follows_the_command_flag() {
        let trace = LevelTrace::new(false);
        let mut out = DirectOutput::active_high(FakePin::new(&trace));
        let clock = Clock::new();

        out.act(CommandWindow::new(&[1]), &clock);
        assert!(trace.level());
        assert!(out.is_on());

        out.act(CommandWindow::new(&[0]), &clock);
        assert!(!trace.level());
    }

    #[test]
    fn bytes_other_than_one_switch_off() {
        let trace = LevelTrace::new(false);
        let mut out = DirectOutput::active_low(FakePin::new(&trace));
        let clock = Clock::new();

        out.act(CommandWindow::new(&[1]), &clock);
        assert!(!trace.level());
        out.act(CommandWindow::new(&[0xFF]), &clock);
        assert!(trace.level());
        assert!(!out.is_on());
    }
}

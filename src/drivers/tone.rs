// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Square-wave tone (buzzer or speaker).
//!
//! Command window: 2 bytes, little-endian frequency in Hz. `0` silences the output; any other
//! value plays a 50 % duty square wave at that frequency. The output is only reprogrammed when the
//! commanded frequency changes.

use crate::clock::Clock;
use crate::protocol::{Actionable, CommandWindow};

/// An output that can play a square wave at a programmable frequency.
pub trait ToneOutput {
    fn play(&mut self, hz: u16);
    fn silence(&mut self);
}

pub struct Tone<T: ToneOutput> {
    output: T,
    frequency: u16,
}

impl<T: ToneOutput> Tone<T> {
    /// Wrap `output` and make sure it starts silent.
    pub fn new(mut output: T) -> Self {
        output.silence();
        Self {
            output,
            frequency: 0,
        }
    }

    /// Frequency currently playing, `0` when silent.
    #[inline]
    pub fn frequency(&self) -> u16 {
        self.frequency
    }

    pub fn set_frequency(&mut self, hz: u16) {
        if hz == self.frequency {
            return;
        }
        match hz {
            0 => self.output.silence(),
            hz => self.output.play(hz),
        }
        self.frequency = hz;
    }

    pub fn free(self) -> T {
        self.output
    }
}

impl<T: ToneOutput> Actionable for Tone<T> {
    fn command_width(&self) -> usize {
        2
    }

    fn act(&mut self, command: CommandWindow<'_>, _clock: &Clock<'_>) {
        self.set_frequency(command.u16());
    }
}

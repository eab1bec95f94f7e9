// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Device capabilities.
//!
//! A concrete device implements any subset of these traits. A rotary encoder, for example, is
//! both [`Readable`] (position) and [`Actionable`] (reset to zero), and is registered once per
//! role through a shared `&RefCell`.

use core::fmt;

use super::window::{CommandWindow, SensorWindow};
use crate::clock::Clock;

/// Role a device is registered under.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Role {
    Actionable,
    Readable,
    Steppable,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Actionable => "actionable",
            Role::Readable => "readable",
            Role::Steppable => "steppable",
        })
    }
}

/// A device driven by a window of the command frame.
pub trait Actionable {
    /// Width of this device's command window. Read once at registration.
    fn command_width(&self) -> usize {
        1
    }

    /// Apply one command. `command` is exactly `command_width()` bytes.
    fn act(&mut self, command: CommandWindow<'_>, clock: &Clock<'_>);
}

/// A device that reports into a window of the sensor frame.
pub trait Readable {
    /// Width of this device's sensor window. Read once at registration.
    fn sensor_width(&self) -> usize {
        1
    }

    /// Fill `sensor`, which is exactly `sensor_width()` bytes.
    fn read(&mut self, sensor: SensorWindow<'_>, clock: &Clock<'_>);
}

/// Logic that runs on every scheduler iteration, independent of the frame cycle. Must not
/// block.
pub trait Steppable {
    fn step(&mut self, clock: &Clock<'_>);
}

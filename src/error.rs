// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Startup configuration errors.
//!
//! These are the only errors the bridge detects on its own. They are fatal: the board binary
//! reports them on the debug terminal and never enters the scheduler loop.

use core::fmt;

use crate::protocol::{FrameKind, Role};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ConfigurationError {
    /// A device declared a window of zero bytes or wider than `WINDOW_CAPACITY`.
    InvalidWidth {
        role: Role,
        index: usize,
        width: usize,
    },

    /// More than `MAX_DEVICES` devices were registered for one role.
    TooManyDevices { role: Role },

    /// The summed window widths do not fit in the static frame buffer.
    FrameTooLong {
        frame: FrameKind,
        len: usize,
        capacity: usize,
    },

    /// No Actionable-Device was registered, so a command frame can never complete.
    EmptyCommandFrame,

    /// A device was registered after the registry was finalized.
    AlreadyFinalized,

    /// More than `MAX_PULSE_OUTPUTS` pulse outputs were attached to the clock.
    TooManyPulseOutputs,
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::InvalidWidth { role, index, width } => {
                write!(f, "{role} #{index} declares invalid width {width}")
            }
            Self::TooManyDevices { role } => write!(f, "too many {role} devices"),
            Self::FrameTooLong {
                frame,
                len,
                capacity,
            } => write!(f, "{frame} frame needs {len} bytes, capacity is {capacity}"),
            Self::EmptyCommandFrame => f.write_str("no actionable device registered"),
            Self::AlreadyFinalized => f.write_str("registry already finalized"),
            Self::TooManyPulseOutputs => f.write_str("too many pulse outputs"),
        }
    }
}

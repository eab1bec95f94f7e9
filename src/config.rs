// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Compile-time limits and engine settings for the rig bridge.
//!
//! All buffers are sized from these constants once at startup; nothing grows at runtime.

/// Largest window a single device may declare, in bytes.
pub const WINDOW_CAPACITY: usize = 32;

/// Static capacity of the command buffer and of the sensor buffer, in bytes.
pub const FRAME_CAPACITY: usize = 256;

/// Maximum number of devices per role (Actionable, Readable, Steppable).
pub const MAX_DEVICES: usize = 32;

/// Maximum number of pulse outputs the start/stop control can drive directly.
pub const MAX_PULSE_OUTPUTS: usize = 8;

/// Default depth of a per-sensor sample history.
pub const HISTORY_DEPTH: usize = 1024;

/// `micros_since_hour` wraps back to zero at this value.
pub const HOUR_MICROS: u32 = 3_600_000_000;

/// Baud rate of the host link.
pub const HOST_BAUD: u32 = 115_200;

/// Baud rate of the debug terminal.
pub const DEBUG_BAUD: u32 = 115_200;

/// Log level installed by the board binary.
pub const LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;

/// How command frames are delimited on the transport.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum Framing {
    /// Fixed-length frames with no header, delimiter or checksum. Host and device must never
    /// disagree on the byte count, or every later frame is sliced at the wrong boundary.
    #[default]
    Raw,

    /// Protocol extension: each command frame is preceded by this marker byte. Bytes that
    /// arrive while the engine is looking for the marker are discarded and counted. The host
    /// must be configured to send the marker as well.
    Marker(u8),
}

/// Settings for the protocol engine.
#[derive(Copy, Clone, Debug, Default)]
pub struct EngineConfig {
    pub framing: Framing,
}

impl EngineConfig {
    pub fn with_framing(mut self, framing: Framing) -> Self {
        self.framing = framing;
        self
    }
}

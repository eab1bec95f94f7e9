// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Protocol engine: one fixed-length command frame in, one fixed-length sensor frame out.
//!
//! ```text
//! AwaitingFrame ──(command_len bytes buffered)──► Dispatching ──► Replying ──┐
//!       ▲                                                                     │
//!       └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Bytes are pulled from the transport without blocking; a partial frame stays buffered across
//! calls to [`Networker::poll`]. The engine never reads past the end of the current frame.
//!
//! With [`Framing::Raw`] there is no integrity check of any kind. If host and bridge ever disagree
//! on where a frame starts, every later frame is sliced at the wrong boundary and the engine has
//! no way to notice. [`Framing::Marker`] is an opt-in extension that makes the engine discard
//! bytes until it sees a marker byte before each frame.

use log::{trace, warn};

use super::registry::{FrameLayout, Registry};
use super::transport::Transport;
use crate::clock::Clock;
use crate::config::{EngineConfig, Framing, FRAME_CAPACITY};
use crate::error::ConfigurationError;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EngineState {
    AwaitingFrame,
    Dispatching,
    Replying,
}

/// Outcome of one [`Networker::poll`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Poll {
    /// Still waiting; `buffered` command bytes have arrived so far.
    Awaiting { buffered: usize },
    /// A full cycle ran and the sensor frame was sent.
    Replied { cycle: u32 },
}

pub struct Networker<'a> {
    registry: Registry<'a>,
    layout: FrameLayout,
    framing: Framing,
    state: EngineState,
    /// Only meaningful with `Framing::Marker`.
    seeking_marker: bool,
    command: [u8; FRAME_CAPACITY],
    received: usize,
    sensor: [u8; FRAME_CAPACITY],
    cycles: u32,
    discarded: u32,
}

impl<'a> Networker<'a> {
    /// Take ownership of the registry, finalizing it if that has not happened yet.
    pub fn new(mut registry: Registry<'a>, config: EngineConfig) -> Result<Self, ConfigurationError> {
        let layout = registry.finalize()?;
        Ok(Self {
            registry,
            layout,
            framing: config.framing,
            state: EngineState::AwaitingFrame,
            seeking_marker: matches!(config.framing, Framing::Marker(_)),
            command: [0; FRAME_CAPACITY],
            received: 0,
            sensor: [0; FRAME_CAPACITY],
            cycles: 0,
            discarded: 0,
        })
    }

    #[inline]
    pub fn state(&self) -> EngineState {
        self.state
    }

    #[inline]
    pub fn command_frame_len(&self) -> usize {
        self.layout.command_len
    }

    #[inline]
    pub fn sensor_frame_len(&self) -> usize {
        self.layout.sensor_len
    }

    /// Command bytes buffered toward the current frame.
    #[inline]
    pub fn buffered(&self) -> usize {
        self.received
    }

    /// Completed protocol cycles since boot (wrapping).
    #[inline]
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Bytes thrown away while looking for the frame marker.
    #[inline]
    pub fn discarded(&self) -> u32 {
        self.discarded
    }

    pub fn registry(&self) -> &Registry<'a> {
        &self.registry
    }

    /// Step every Steppable-Process once.
    pub fn step_processes(&self, clock: &Clock<'_>) {
        self.registry.step_all(clock);
    }

    /// Pull pending bytes from `transport`. Once a whole command frame has arrived, dispatch it,
    /// collect every sensor reading and send the sensor frame.
    ///
    /// On a write error the reply is dropped and the engine goes back to waiting; the commands
    /// in that frame have already been applied.
    pub fn poll<T: Transport>(
        &mut self,
        clock: &Clock<'_>,
        transport: &mut T,
    ) -> Result<Poll, T::Error> {
        if !self.fill(transport)? {
            return Ok(Poll::Awaiting {
                buffered: self.received,
            });
        }

        self.state = EngineState::Dispatching;
        self.registry
            .dispatch(&self.command[..self.layout.command_len], clock);

        self.state = EngineState::Replying;
        let sensor = &mut self.sensor[..self.layout.sensor_len];
        sensor.fill(0);
        self.registry.collect(sensor, clock);
        let sent = transport.write_frame(sensor);

        self.finish_cycle();
        sent?;

        trace!("cycle {} replied", self.cycles);
        Ok(Poll::Replied { cycle: self.cycles })
    }

    /// Buffer bytes until the frame is complete or the transport runs dry. Returns whether the
    /// frame is complete.
    fn fill<T: Transport>(&mut self, transport: &mut T) -> Result<bool, T::Error> {
        let needed = self.layout.command_len;
        while self.received < needed {
            let byte = match transport.read_byte() {
                Ok(b) => b,
                Err(nb::Error::WouldBlock) => return Ok(false),
                Err(nb::Error::Other(e)) => return Err(e),
            };

            if self.seeking_marker {
                if let Framing::Marker(marker) = self.framing {
                    if byte == marker {
                        self.seeking_marker = false;
                    } else {
                        self.discarded = self.discarded.wrapping_add(1);
                        warn!("discarded 0x{:02X} while seeking frame marker", byte);
                    }
                }
                continue;
            }

            self.command[self.received] = byte;
            self.received += 1;
        }
        Ok(true)
    }

    fn finish_cycle(&mut self) {
        self.command[..self.layout.command_len].fill(0);
        self.received = 0;
        self.cycles = self.cycles.wrapping_add(1);
        self.seeking_marker = matches!(self.framing, Framing::Marker(_));
        self.state = EngineState::AwaitingFrame;
    }
}

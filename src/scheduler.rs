// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Cooperative scheduler loop.
//!
//! Each iteration advances the clock from the time source, steps every Steppable-Process, then
//! gives the protocol engine a chance to make progress. Nothing in an iteration blocks on the
//! host: a stalled link leaves the engine waiting while processes keep running.

use log::warn;

use crate::clock::Clock;
use crate::protocol::{Networker, Poll, Transport};

/// Free-running microsecond counter. It may wrap at `u32::MAX`.
pub trait TimeSource {
    fn now_us(&mut self) -> u32;
}

pub struct Scheduler<'a, T, S> {
    clock: Clock<'a>,
    networker: Networker<'a>,
    transport: T,
    time: S,
    iterations: u32,
}

impl<'a, T, S> Scheduler<'a, T, S>
where
    T: Transport,
    S: TimeSource,
{
    pub fn new(clock: Clock<'a>, networker: Networker<'a>, transport: T, mut time: S) -> Self {
        clock.advance(time.now_us());
        Self {
            clock,
            networker,
            transport,
            time,
            iterations: 0,
        }
    }

    /// Run one loop iteration.
    pub fn iterate(&mut self) -> Result<Poll, T::Error> {
        self.iterations = self.iterations.wrapping_add(1);
        self.clock.advance(self.time.now_us());
        self.networker.step_processes(&self.clock);
        self.networker.poll(&self.clock, &mut self.transport)
    }

    /// Iterate forever. Transport errors are logged and the loop carries on.
    pub fn run(mut self) -> ! {
        loop {
            if let Err(e) = self.iterate() {
                warn!("transport error in cycle {}: {:?}", self.networker.cycles(), e);
            }
        }
    }

    #[inline]
    pub fn clock(&self) -> &Clock<'a> {
        &self.clock
    }

    #[inline]
    pub fn networker(&self) -> &Networker<'a> {
        &self.networker
    }

    #[inline]
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    #[inline]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }
}

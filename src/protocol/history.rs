// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Bounded history of timestamped sensor samples.
//!
//! For sensors sampled faster than the host polls, a driver can keep the readings it took
//! between two cycles here. The ring holds at most `N` samples and drops the oldest when full.
//! It is not part of the frame: how a history is drained to the host is left to the driver
//! that owns it.

use heapless::Deque;

use crate::config::HISTORY_DEPTH;

/// One reading of `W` encoded bytes, stamped with `millis_since_sync`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Sample<const W: usize> {
    pub millis: u32,
    pub bytes: [u8; W],
}

pub struct SampleHistory<const W: usize, const N: usize = HISTORY_DEPTH> {
    samples: Deque<Sample<W>, N>,
    dropped: u32,
}

impl<const W: usize, const N: usize> Default for SampleHistory<W, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const N: usize> SampleHistory<W, N> {
    pub const fn new() -> Self {
        Self {
            samples: Deque::new(),
            dropped: 0,
        }
    }

    /// Append a sample, evicting the oldest one if the ring is full.
    pub fn record(&mut self, millis: u32, bytes: [u8; W]) {
        if self.samples.is_full() {
            self.samples.pop_front();
            self.dropped = self.dropped.wrapping_add(1);
        }
        // Cannot fail: a slot was freed above if needed.
        let _ = self.samples.push_back(Sample { millis, bytes });
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        N
    }

    /// Samples evicted since construction.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Sample<W>> + '_ {
        self.samples.iter()
    }

    pub fn latest(&self) -> Option<&Sample<W>> {
        self.samples.back()
    }

    /// Remove and return the oldest sample.
    pub fn pop_oldest(&mut self) -> Option<Sample<W>> {
        self.samples.pop_front()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

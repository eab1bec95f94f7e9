// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Byte transport between host and bridge (USART, USB CDC, ...).

use core::fmt::Debug;

pub trait Transport {
    type Error: Debug;

    /// Non-blocking read of one byte. `WouldBlock` means nothing is pending right now.
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error>;

    /// Write a whole frame, blocking until every byte has been queued.
    fn write_frame(&mut self, frame: &[u8]) -> Result<(), Self::Error>;
}

// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! USART abstraction layer.
//!
//! [`Usart`] serves two jobs on the rig:
//!
//! - the host link (USART3 through the ST-LINK virtual COM port), where it implements the
//!   frame [`Transport`], and
//! - the debug side channel (USART1), where it backs the logger through `core::fmt::Write`.
//!
//! Note: When using `writeln!`, be sure to include `\r` (CR) in the format string to ensure correct
//! line endings on the terminal.
//!
//! To watch the debug channel on the host machine, use
//! ```text
//! $ screen /dev/tty.usbserial* <baud_rate>
//! ```
//!
//! To close the debug terminal, press `Ctrl+A` then `Ctrl+\` then `y`.

use core::fmt;
use nb::block;

use stm32f7xx_hal::{
    prelude::*,
    serial::{self, Instance, Pins, Rx, Serial, Tx},
};

use crate::protocol::Transport;

pub struct Usart<U: Instance> {
    tx: Tx<U>,
    rx: Rx<U>,
}

impl<U: Instance> Usart<U> {
    pub fn new<PINS: Pins<U>>(serial: Serial<U, PINS>) -> Self {
        let (tx, rx) = serial.split();
        Self { tx, rx }
    }

    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        let _ = block!(self.tx.write(b));
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.write_byte(b);
        }
    }

    pub fn write_str(&mut self, s: &str) {
        self.write_bytes(s.as_bytes());
    }

    /// Write string and CRLF terminator.
    #[inline]
    pub fn println(&mut self, s: &str) {
        self.write_str(s);
        self.write_str("\r\n");
    }

    /// Block until the hardware TX FIFO/drain is flushed.
    #[inline]
    pub fn flush(&mut self) {
        let _ = block!(self.tx.flush());
    }

    /// Non-blocking read of one received byte.
    #[inline]
    pub fn try_read(&mut self) -> nb::Result<u8, serial::Error> {
        self.rx.read()
    }
}

impl<U: Instance> Transport for Usart<U> {
    type Error = serial::Error;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        self.try_read()
    }

    fn write_frame(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
        self.write_bytes(frame);
        self.flush();
        Ok(())
    }
}

// Implement `core::fmt::Write` so we can use `write!` / `writeln!` on `Usart`.
impl<U: Instance> fmt::Write for Usart<U> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        Usart::write_str(self, s);
        Ok(())
    }
}

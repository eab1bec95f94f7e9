// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! `log` backend that prints records on the debug USART.
//!
//! ```text
//! [INFO  rigbridge::protocol::registry] frame layout: 3 command bytes, 9 sensor bytes
//! ```
//!
//! Records are written inside a critical section, so logging from an interrupt handler cannot
//! interleave with a line the main loop is printing.

use core::cell::RefCell;
use core::fmt::Write;

use cortex_m::interrupt::{self, Mutex};
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use stm32f7xx_hal::pac;

use super::usart::Usart;

type DebugUsart = Usart<pac::USART1>;

static SINK: Mutex<RefCell<Option<DebugUsart>>> = Mutex::new(RefCell::new(None));
static LOGGER: SerialLogger = SerialLogger;

struct SerialLogger;

impl Log for SerialLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        interrupt::free(|cs| {
            if let Some(usart) = SINK.borrow(cs).borrow_mut().as_mut() {
                let _ = write!(
                    usart,
                    "[{:<5} {}] {}\r\n",
                    record.level(),
                    record.target(),
                    record.args()
                );
            }
        });
    }

    fn flush(&self) {
        interrupt::free(|cs| {
            if let Some(usart) = SINK.borrow(cs).borrow_mut().as_mut() {
                usart.flush();
            }
        });
    }
}

/// Route `log` records to `usart`. Call once, before anything logs.
pub fn init(usart: DebugUsart, level: LevelFilter) -> Result<(), SetLoggerError> {
    interrupt::free(|cs| SINK.borrow(cs).replace(Some(usart)));
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

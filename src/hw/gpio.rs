// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Adapters from HAL GPIO pins to the `embedded-hal` 1.0 digital traits the drivers are
//! written against.

use embedded_hal::digital::{self, ErrorKind, ErrorType, InputPin, OutputPin};
use stm32f7xx_hal::prelude::*;

/// A HAL pin reported a failure.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PinFault;

impl digital::Error for PinFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Push-pull output pin.
pub struct HalOutput<PIN>(PIN);

impl<PIN> HalOutput<PIN>
where
    PIN: _embedded_hal_digital_v2_OutputPin,
{
    pub fn new(pin: PIN) -> Self {
        Self(pin)
    }

    pub fn free(self) -> PIN {
        self.0
    }
}

impl<PIN> ErrorType for HalOutput<PIN> {
    type Error = PinFault;
}

impl<PIN> OutputPin for HalOutput<PIN>
where
    PIN: _embedded_hal_digital_v2_OutputPin,
{
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set_low().map_err(|_| PinFault)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set_high().map_err(|_| PinFault)
    }
}

/// Input pin.
pub struct HalInput<PIN>(PIN);

impl<PIN> HalInput<PIN>
where
    PIN: _embedded_hal_digital_v2_InputPin,
{
    pub fn new(pin: PIN) -> Self {
        Self(pin)
    }

    pub fn free(self) -> PIN {
        self.0
    }
}

impl<PIN> ErrorType for HalInput<PIN> {
    type Error = PinFault;
}

impl<PIN> InputPin for HalInput<PIN>
where
    PIN: _embedded_hal_digital_v2_InputPin,
{
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        _embedded_hal_digital_v2_InputPin::is_high(&self.0).map_err(|_| PinFault)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        _embedded_hal_digital_v2_InputPin::is_low(&self.0).map_err(|_| PinFault)
    }
}

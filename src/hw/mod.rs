// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! MCU-level wrappers: USART, timers, ADC, GPIO adapters and the board pin map.
//!
//! Everything except [`output`] talks to STM32F7 peripherals and is only built with the `board`
//! feature.

pub mod output;

#[cfg(feature = "board")]
pub mod adc;
#[cfg(feature = "board")]
pub mod encoder;
#[cfg(feature = "board")]
pub mod gpio;
#[cfg(feature = "board")]
pub mod logger;
#[cfg(feature = "board")]
pub mod pins;
#[cfg(feature = "board")]
pub mod pwm;
#[cfg(feature = "board")]
pub mod timer;
#[cfg(feature = "board")]
pub mod tone;
#[cfg(feature = "board")]
pub mod usart;

pub use output::{ActiveLevel, Output};

#[cfg(feature = "board")]
pub use adc::Adc;
#[cfg(feature = "board")]
pub use encoder::Encoder;
#[cfg(feature = "board")]
pub use gpio::{HalInput, HalOutput};
#[cfg(feature = "board")]
pub use pwm::ServoPwm;
#[cfg(feature = "board")]
pub use timer::MicrosTimer;
#[cfg(feature = "board")]
pub use tone::TonePwm;
#[cfg(feature = "board")]
pub use usart::Usart;

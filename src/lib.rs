// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Rig Bridge Firmware
//!
//! This crate contains the firmware for the behavioral-rig bridge: a microcontroller that sits
//! between the experiment host and the rig's sensors, valves and sync outputs, written in Rust,
//! targeting an STM32F767 MCU.
//!
//! Every cycle the host sends one fixed-length command frame and gets back one fixed-length
//! sensor frame. Both frames are cut into per-device windows in registration order.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`protocol`] | Byte codec, device roles, registry/frame layout, the Networker engine |
//! | [`clock`] | Shared sync clock and the start/stop control |
//! | [`scheduler`] | Cooperative main loop |
//! | [`drivers`] | Rig devices (pulse clock, timed relay, encoder, servo, tone, sensors) |
//! | [`hw`] | MCU-level wrappers around USART, timers, ADC, GPIO |
//! | [`config`] | Capacities, baud rates and engine options |
//! | [`error`] | Startup configuration errors |
//!
//! ## Getting Started
//!
//! Run the host-side unit tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --features board --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod clock;
pub mod config;
pub mod drivers;
pub mod error;
pub mod hw;
pub mod protocol;
pub mod scheduler;

#[cfg(test)]
mod test_utils;

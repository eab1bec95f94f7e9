// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Rig Device Drivers
//!
//! Devices that sit above the raw `hw/` layer and plug into the frame protocol through the
//! [`Actionable`](crate::protocol::Actionable), [`Readable`](crate::protocol::Readable) and
//! [`Steppable`](crate::protocol::Steppable) roles.
//!
//! ## Existing drivers
//!
//! - [`clock_readers`] – `t_ms` / `t_us` counters of the shared clock
//! - [`pulse_clock`] – square wave locked to the shared clock
//! - [`timed_relay`] – output that stays on for a commanded number of milliseconds
//! - [`direct_output`] – output switched directly by a boolean command
//! - [`digital_sensor`] – boolean input pin
//! - [`analog_sensor`] – 16-bit ADC channel
//! - [`rotary_encoder`] – signed quadrature position with a reset command
//! - [`servo`] – hobby servo angle over a PWM channel
//! - [`tone`] – square-wave tone at a commanded frequency, `0` for silence

pub mod analog_sensor;
pub mod clock_readers;
pub mod digital_sensor;
pub mod direct_output;
pub mod pulse_clock;
pub mod rotary_encoder;
pub mod servo;
pub mod timed_relay;
pub mod tone;

pub use analog_sensor::AnalogSensor;
pub use clock_readers::{MicrosReader, MillisReader};
pub use digital_sensor::DigitalSensor;
pub use direct_output::DirectOutput;
pub use pulse_clock::PulseClock;
pub use rotary_encoder::{QuadratureCounter, RotaryEncoder};
pub use servo::Servo;
pub use timed_relay::TimedRelay;
pub use tone::{Tone, ToneOutput};

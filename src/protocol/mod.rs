// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Host link protocol: fixed-length command and sensor frames cut into per-device windows.

pub mod codec;
pub mod device;
pub mod history;
pub mod networker;
pub mod registry;
pub mod transport;
pub mod window;

pub use device::{Actionable, Readable, Role, Steppable};
pub use history::{Sample, SampleHistory};
pub use networker::{EngineState, Networker, Poll};
pub use registry::{FrameKind, FrameLayout, Registry};
pub use transport::Transport;
pub use window::{CommandWindow, SensorWindow, Window};

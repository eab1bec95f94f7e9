// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Device registry and frame layout.
//!
//! Devices are registered once at startup, in the order their windows appear on the wire.
//! [`Registry::finalize`] turns the declared widths into `(offset, width)` windows by prefix sum
//! and freezes the registry. After that, nothing can be added or removed.

use core::cell::RefCell;
use core::fmt;

use heapless::Vec;
use log::{debug, info};

use super::device::{Actionable, Readable, Role, Steppable};
use super::window::{CommandWindow, SensorWindow, Window};
use crate::clock::Clock;
use crate::config::{FRAME_CAPACITY, MAX_DEVICES, WINDOW_CAPACITY};
use crate::error::ConfigurationError;

pub type ActionableRef<'a> = &'a RefCell<dyn Actionable + 'a>;
pub type ReadableRef<'a> = &'a RefCell<dyn Readable + 'a>;
pub type SteppableRef<'a> = &'a RefCell<dyn Steppable + 'a>;

/// Which direction a frame travels.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FrameKind {
    /// Host to device.
    Command,
    /// Device to host.
    Sensor,
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FrameKind::Command => "command",
            FrameKind::Sensor => "sensor",
        })
    }
}

/// Frame lengths fixed by [`Registry::finalize`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FrameLayout {
    pub command_len: usize,
    pub sensor_len: usize,
}

pub struct Registry<'a> {
    actionables: Vec<(Window, ActionableRef<'a>), MAX_DEVICES>,
    readables: Vec<(Window, ReadableRef<'a>), MAX_DEVICES>,
    steppables: Vec<SteppableRef<'a>, MAX_DEVICES>,
    layout: Option<FrameLayout>,
}

impl<'a> Default for Registry<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Registry<'a> {
    pub fn new() -> Self {
        Self {
            actionables: Vec::new(),
            readables: Vec::new(),
            steppables: Vec::new(),
            layout: None,
        }
    }

    /// Append a device to the command frame.
    pub fn add_actionable(&mut self, device: ActionableRef<'a>) -> Result<(), ConfigurationError> {
        self.ensure_open()?;
        let index = self.actionables.len();
        let width = device.borrow().command_width();
        check_width(Role::Actionable, index, width)?;
        self.actionables
            .push((Window { offset: 0, width }, device))
            .map_err(|_| ConfigurationError::TooManyDevices {
                role: Role::Actionable,
            })?;
        debug!("registered actionable #{} ({} bytes)", index, width);
        Ok(())
    }

    /// Append a device to the sensor frame.
    pub fn add_readable(&mut self, device: ReadableRef<'a>) -> Result<(), ConfigurationError> {
        self.ensure_open()?;
        let index = self.readables.len();
        let width = device.borrow().sensor_width();
        check_width(Role::Readable, index, width)?;
        self.readables
            .push((Window { offset: 0, width }, device))
            .map_err(|_| ConfigurationError::TooManyDevices {
                role: Role::Readable,
            })?;
        debug!("registered readable #{} ({} bytes)", index, width);
        Ok(())
    }

    /// Add a process stepped on every scheduler iteration.
    pub fn add_steppable(&mut self, device: SteppableRef<'a>) -> Result<(), ConfigurationError> {
        self.ensure_open()?;
        let index = self.steppables.len();
        self.steppables
            .push(device)
            .map_err(|_| ConfigurationError::TooManyDevices {
                role: Role::Steppable,
            })?;
        debug!("registered steppable #{}", index);
        Ok(())
    }

    /// Compute every window and both frame lengths, then freeze the registry.
    ///
    /// Calling this again on a finalized registry returns the same layout.
    pub fn finalize(&mut self) -> Result<FrameLayout, ConfigurationError> {
        if let Some(layout) = self.layout {
            return Ok(layout);
        }

        let command_len = assign_offsets(self.actionables.iter_mut().map(|(w, _)| w));
        let sensor_len = assign_offsets(self.readables.iter_mut().map(|(w, _)| w));

        if command_len == 0 {
            return Err(ConfigurationError::EmptyCommandFrame);
        }
        check_frame(FrameKind::Command, command_len)?;
        check_frame(FrameKind::Sensor, sensor_len)?;

        let layout = FrameLayout {
            command_len,
            sensor_len,
        };
        self.layout = Some(layout);
        info!(
            "layout: {} actionable / {} cmd bytes, {} readable / {} sensor bytes, {} steppable",
            self.actionables.len(),
            command_len,
            self.readables.len(),
            sensor_len,
            self.steppables.len()
        );
        Ok(layout)
    }

    #[inline]
    pub fn layout(&self) -> Option<FrameLayout> {
        self.layout
    }

    #[inline]
    pub fn is_finalized(&self) -> bool {
        self.layout.is_some()
    }

    /// Command windows in registration order.
    pub fn command_windows(&self) -> Vec<Window, MAX_DEVICES> {
        self.actionables.iter().map(|(w, _)| *w).collect()
    }

    /// Sensor windows in registration order.
    pub fn sensor_windows(&self) -> Vec<Window, MAX_DEVICES> {
        self.readables.iter().map(|(w, _)| *w).collect()
    }

    pub fn steppable_count(&self) -> usize {
        self.steppables.len()
    }

    /// Hand every Actionable-Device its slice of a completed command frame, in registration
    /// order.
    pub(crate) fn dispatch(&self, frame: &[u8], clock: &Clock<'_>) {
        for (window, device) in self.actionables.iter() {
            let command = CommandWindow::new(&frame[window.range()]);
            device.borrow_mut().act(command, clock);
        }
    }

    /// Let every Readable-Device fill its slice of the sensor frame, in registration order.
    pub(crate) fn collect(&self, frame: &mut [u8], clock: &Clock<'_>) {
        for (window, device) in self.readables.iter() {
            let sensor = SensorWindow::new(&mut frame[window.range()]);
            device.borrow_mut().read(sensor, clock);
        }
    }

    pub(crate) fn step_all(&self, clock: &Clock<'_>) {
        for device in self.steppables.iter() {
            device.borrow_mut().step(clock);
        }
    }

    fn ensure_open(&self) -> Result<(), ConfigurationError> {
        if self.is_finalized() {
            Err(ConfigurationError::AlreadyFinalized)
        } else {
            Ok(())
        }
    }
}

fn check_width(role: Role, index: usize, width: usize) -> Result<(), ConfigurationError> {
    if width == 0 || width > WINDOW_CAPACITY {
        return Err(ConfigurationError::InvalidWidth { role, index, width });
    }
    Ok(())
}

fn check_frame(frame: FrameKind, len: usize) -> Result<(), ConfigurationError> {
    if len > FRAME_CAPACITY {
        return Err(ConfigurationError::FrameTooLong {
            frame,
            len,
            capacity: FRAME_CAPACITY,
        });
    }
    Ok(())
}

/// Lay windows end to end and return the total length.
fn assign_offsets<'w>(windows: impl Iterator<Item = &'w mut Window>) -> usize {
    let mut offset = 0;
    for window in windows {
        window.offset = offset;
        offset += window.width;
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{CallLog, RecordingDevice};
    use std::vec::Vec as StdVec;

    #[test]
    fn frame_lengths_are_sums_in_registration_order() {
        let log = CallLog::default();
        let a = RefCell::new(RecordingDevice::new(1, 4, &log));
        let b = RefCell::new(RecordingDevice::new(2, 1, &log));
        let c = RefCell::new(RecordingDevice::new(4, 2, &log));

        let mut reg = Registry::new();
        reg.add_actionable(&a).unwrap();
        reg.add_actionable(&b).unwrap();
        reg.add_actionable(&c).unwrap();
        reg.add_readable(&c).unwrap();
        reg.add_readable(&a).unwrap();

        let layout = reg.finalize().unwrap();
        assert_eq!(
            layout,
            FrameLayout {
                command_len: 7,
                sensor_len: 6
            }
        );

        let cmd: StdVec<_> = reg.command_windows().iter().map(|w| (w.offset, w.width)).collect();
        assert_eq!(cmd, [(0, 1), (1, 2), (3, 4)]);
        let sens: StdVec<_> = reg.sensor_windows().iter().map(|w| (w.offset, w.width)).collect();
        assert_eq!(sens, [(0, 2), (2, 4)]);
    }

    #[test]
    fn windows_tile_the_frame_for_any_order() {
        let log = CallLog::default();
        let widths = [3usize, 1, 32, 2, 4];
        let traces: StdVec<_> = widths
            .iter()
            .map(|&w| RefCell::new(RecordingDevice::new(w, w, &log)))
            .collect();

        for rotation in 0..widths.len() {
            let mut reg = Registry::new();
            for i in 0..widths.len() {
                reg.add_actionable(&traces[(i + rotation) % widths.len()])
                    .unwrap();
            }
            let layout = reg.finalize().unwrap();
            assert_eq!(layout.command_len, widths.iter().sum::<usize>());

            let mut expected = 0;
            for w in reg.command_windows() {
                assert_eq!(w.offset, expected);
                expected = w.end();
            }
            assert_eq!(expected, layout.command_len);
        }
    }

    #[test]
    fn registration_after_finalize_is_rejected() {
        let log = CallLog::default();
        let a = RefCell::new(RecordingDevice::new(1, 1, &log));
        let mut reg = Registry::new();
        reg.add_actionable(&a).unwrap();
        reg.finalize().unwrap();

        assert_eq!(
            reg.add_readable(&a),
            Err(ConfigurationError::AlreadyFinalized)
        );
        assert_eq!(
            reg.add_actionable(&a),
            Err(ConfigurationError::AlreadyFinalized)
        );
        assert_eq!(
            reg.add_steppable(&a),
            Err(ConfigurationError::AlreadyFinalized)
        );
        assert!(reg.finalize().is_ok());
    }

    #[test]
    fn invalid_widths_are_rejected_at_registration() {
        let log = CallLog::default();
        let zero = RefCell::new(RecordingDevice::new(0, 1, &log));
        let wide = RefCell::new(RecordingDevice::new(1, WINDOW_CAPACITY + 1, &log));
        let mut reg = Registry::new();

        assert_eq!(
            reg.add_actionable(&zero),
            Err(ConfigurationError::InvalidWidth {
                role: Role::Actionable,
                index: 0,
                width: 0
            })
        );
        assert_eq!(
            reg.add_readable(&wide),
            Err(ConfigurationError::InvalidWidth {
                role: Role::Readable,
                index: 0,
                width: WINDOW_CAPACITY + 1
            })
        );
    }

    #[test]
    fn oversized_frames_fail_finalize() {
        let log = CallLog::default();
        let wide = RefCell::new(RecordingDevice::new(1, WINDOW_CAPACITY, &log));
        let mut reg = Registry::new();
        reg.add_actionable(&wide).unwrap();
        for _ in 0..(FRAME_CAPACITY / WINDOW_CAPACITY + 1) {
            reg.add_readable(&wide).unwrap();
        }

        assert_eq!(
            reg.finalize(),
            Err(ConfigurationError::FrameTooLong {
                frame: FrameKind::Sensor,
                len: FRAME_CAPACITY + WINDOW_CAPACITY,
                capacity: FRAME_CAPACITY
            })
        );
        assert!(!reg.is_finalized());
    }

    #[test]
    fn an_empty_command_frame_is_a_configuration_error() {
        let log = CallLog::default();
        let a = RefCell::new(RecordingDevice::new(1, 1, &log));
        let mut reg = Registry::new();
        reg.add_readable(&a).unwrap();
        assert_eq!(reg.finalize(), Err(ConfigurationError::EmptyCommandFrame));
    }

    #[test]
    fn too_many_devices_of_one_role() {
        let log = CallLog::default();
        let a = RefCell::new(RecordingDevice::new(1, 1, &log));
        let mut reg = Registry::new();
        for _ in 0..MAX_DEVICES {
            reg.add_steppable(&a).unwrap();
        }
        assert_eq!(
            reg.add_steppable(&a),
            Err(ConfigurationError::TooManyDevices {
                role: Role::Steppable
            })
        );
    }
}

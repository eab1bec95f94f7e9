// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Shared synchronization clock and the start/stop control.
//!
//! The [`Clock`] holds the `active` flag, the milliseconds since the last sync and the
//! microseconds since the last hour boundary. Every device can read it. Only two things can
//! change it:
//!
//! - the scheduler, which advances the counters once per loop iteration, and
//! - the single [`StartStop`] control handed out by [`Clock::start_stop`].
//!
//! Each clock carries a process-unique id and its control only acts on the clock with that id, so
//! a control taken from another clock cannot start or stop this one.
//!
//! While inactive the counters are frozen at the value they held when the clock stopped.
//!
//! Pulse outputs attached with [`Clock::attach_pulse_output`] are driven directly by a start or
//! stop, without waiting for the next scheduler iteration: LOW on start so the first half-period
//! begins on a known edge, HIGH on stop.

use core::cell::{Cell, RefCell};
use core::sync::atomic::{AtomicU32, Ordering};

use embedded_hal::digital::PinState;
use heapless::Vec;
use log::{info, warn};

use crate::config::{HOUR_MICROS, MAX_PULSE_OUTPUTS};
use crate::error::ConfigurationError;
use crate::protocol::{Actionable, CommandWindow};

/// Level pulse outputs are driven to when the clock starts.
pub const START_LEVEL: PinState = PinState::Low;

/// Level pulse outputs are driven to when the clock stops.
pub const STOP_LEVEL: PinState = PinState::High;

/// An output the start/stop control drives directly on a sync event.
pub trait PulseOutput {
    fn drive(&mut self, level: PinState);
}

pub type PulseOutputRef<'a> = &'a RefCell<dyn PulseOutput + 'a>;

static NEXT_CLOCK_ID: AtomicU32 = AtomicU32::new(0);

/// Decoded start/stop command byte.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SyncCommand {
    /// Leave the clock as it is.
    Continue,
    /// Reset both counters and start.
    Start,
    Stop,
}

impl SyncCommand {
    pub const fn from_byte(byte: u8) -> Self {
        match byte {
            1 => Self::Start,
            2 => Self::Stop,
            _ => Self::Continue,
        }
    }
}

pub struct Clock<'a> {
    id: u32,
    active: Cell<bool>,
    millis_since_sync: Cell<u32>,
    micros_since_hour: Cell<u32>,
    /// Microseconds accumulated toward the next millisecond tick.
    sub_millis: Cell<u32>,
    last_tick_us: Cell<Option<u32>>,
    pulse_outputs: Vec<PulseOutputRef<'a>, MAX_PULSE_OUTPUTS>,
    control_issued: bool,
}

impl<'a> Default for Clock<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Clock<'a> {
    /// A stopped clock with both counters at zero.
    pub fn new() -> Self {
        Self {
            id: NEXT_CLOCK_ID.fetch_add(1, Ordering::Relaxed),
            active: Cell::new(false),
            millis_since_sync: Cell::new(0),
            micros_since_hour: Cell::new(0),
            sub_millis: Cell::new(0),
            last_tick_us: Cell::new(None),
            pulse_outputs: Vec::new(),
            control_issued: false,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    #[inline]
    pub fn millis_since_sync(&self) -> u32 {
        self.millis_since_sync.get()
    }

    #[inline]
    pub fn micros_since_hour(&self) -> u32 {
        self.micros_since_hour.get()
    }

    pub fn pulse_output_count(&self) -> usize {
        self.pulse_outputs.len()
    }

    /// Register an output that a start or stop drives directly.
    pub fn attach_pulse_output(
        &mut self,
        output: PulseOutputRef<'a>,
    ) -> Result<(), ConfigurationError> {
        self.pulse_outputs
            .push(output)
            .map_err(|_| ConfigurationError::TooManyPulseOutputs)
    }

    /// Take the start/stop control. There is exactly one per clock; later calls return `None`.
    pub fn start_stop(&mut self) -> Option<StartStop> {
        if self.control_issued {
            return None;
        }
        self.control_issued = true;
        Some(StartStop { clock_id: self.id })
    }

    /// Advance the counters to the monotonic timestamp `now_us`. Called once per scheduler
    /// iteration. The timestamp may wrap at `u32::MAX`.
    ///
    /// Starting does not rebase the timestamp: the first millisecond after a start counts from
    /// the last `advance` before it, which is the same scheduler iteration that dispatched the
    /// command.
    pub(crate) fn advance(&self, now_us: u32) {
        let Some(last) = self.last_tick_us.replace(Some(now_us)) else {
            return;
        };
        if !self.active.get() {
            return;
        }
        let elapsed = now_us.wrapping_sub(last);

        let micros = (self.micros_since_hour.get() as u64 + elapsed as u64) % HOUR_MICROS as u64;
        self.micros_since_hour.set(micros as u32);

        let pending = self.sub_millis.get() as u64 + elapsed as u64;
        let ticks = (pending / 1000) as u32;
        self.sub_millis.set((pending % 1000) as u32);
        self.millis_since_sync
            .set(self.millis_since_sync.get().wrapping_add(ticks));
    }

    fn start(&self) {
        self.millis_since_sync.set(0);
        self.micros_since_hour.set(0);
        self.sub_millis.set(0);
        self.active.set(true);
        self.drive_pulse_outputs(START_LEVEL);
        info!("clock started");
    }

    fn stop(&self) {
        self.active.set(false);
        self.drive_pulse_outputs(STOP_LEVEL);
        info!("clock stopped at {} ms", self.millis_since_sync.get());
    }

    fn drive_pulse_outputs(&self, level: PinState) {
        for (i, output) in self.pulse_outputs.iter().enumerate() {
            match output.try_borrow_mut() {
                Ok(mut out) => out.drive(level),
                Err(_) => warn!("pulse output #{} busy, not driven", i),
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn set_counters(&self, millis: u32, micros: u32) {
        self.millis_since_sync.set(millis);
        self.micros_since_hour.set(micros);
    }
}

/// The one control allowed to start and stop the clock.
///
/// One-byte command window: `0` continues, `1` resets the counters and starts, `2` stops. Any
/// other value is ignored.
#[derive(Debug)]
pub struct StartStop {
    clock_id: u32,
}

/// A [`StartStop`] was applied to a clock other than the one that issued it.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ForeignClock;

impl StartStop {
    /// Whether this control was issued by `clock`.
    #[inline]
    pub fn controls(&self, clock: &Clock<'_>) -> bool {
        self.clock_id == clock.id
    }

    pub fn apply(&self, command: SyncCommand, clock: &Clock<'_>) -> Result<(), ForeignClock> {
        if !self.controls(clock) {
            return Err(ForeignClock);
        }
        match command {
            SyncCommand::Continue => {}
            SyncCommand::Start => clock.start(),
            SyncCommand::Stop => clock.stop(),
        }
        Ok(())
    }
}

impl Actionable for StartStop {
    fn act(&mut self, command: CommandWindow<'_>, clock: &Clock<'_>) {
        if self.apply(SyncCommand::from_byte(command.u8()), clock).is_err() {
            warn!("start/stop control of another clock ignored");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::LevelTrace;

    struct Recorder<'p>(&'p LevelTrace);

    impl PulseOutput for Recorder<'_> {
        fn drive(&mut self, level: PinState) {
            self.0.record(level == PinState::High);
        }
    }

    #[test]
    fn counters_only_advance_while_active() {
        let mut clock = Clock::new();
        let control = clock.start_stop().unwrap();

        clock.advance(0);
        clock.advance(5_000);
        assert_eq!(clock.millis_since_sync(), 0);

        control.apply(SyncCommand::Start, &clock).unwrap();
        clock.advance(7_500);
        assert_eq!(clock.millis_since_sync(), 2);
        assert_eq!(clock.micros_since_hour(), 2_500);

        clock.advance(8_000);
        assert_eq!(clock.millis_since_sync(), 3);
        assert_eq!(clock.micros_since_hour(), 3_000);
    }

    #[test]
    fn stop_freezes_counters_without_zeroing() {
        let mut clock = Clock::new();
        let control = clock.start_stop().unwrap();
        clock.advance(0);
        control.apply(SyncCommand::Start, &clock).unwrap();
        clock.advance(42_000);

        control.apply(SyncCommand::Stop, &clock).unwrap();
        clock.advance(99_000);
        clock.advance(120_000);
        assert!(!clock.is_active());
        assert_eq!(clock.millis_since_sync(), 42);
        assert_eq!(clock.micros_since_hour(), 42_000);
    }

    #[test]
    fn start_resets_counters_from_any_state() {
        let mut clock = Clock::new();
        let control = clock.start_stop().unwrap();
        clock.set_counters(1234, 5678);
        control.apply(SyncCommand::Start, &clock).unwrap();
        assert!(clock.is_active());
        assert_eq!(clock.millis_since_sync(), 0);
        assert_eq!(clock.micros_since_hour(), 0);

        clock.set_counters(99, 99);
        control.apply(SyncCommand::Start, &clock).unwrap();
        assert_eq!(clock.millis_since_sync(), 0);
        assert_eq!(clock.micros_since_hour(), 0);
    }

    #[test]
    fn start_and_stop_drive_pulse_outputs_directly() {
        let a = LevelTrace::new(true);
        let b = LevelTrace::new(true);
        let out_a = RefCell::new(Recorder(&a));
        let out_b = RefCell::new(Recorder(&b));

        let mut clock = Clock::new();
        clock.attach_pulse_output(&out_a).unwrap();
        clock.attach_pulse_output(&out_b).unwrap();
        let control = clock.start_stop().unwrap();

        control.apply(SyncCommand::Start, &clock).unwrap();
        assert!(!a.level() && !b.level());

        control.apply(SyncCommand::Stop, &clock).unwrap();
        assert!(a.level() && b.level());
        assert_eq!(a.writes(), 2);
    }

    #[test]
    fn restarting_an_active_clock_returns_pulse_outputs_low() {
        let trace = LevelTrace::new(true);
        let out = RefCell::new(Recorder(&trace));
        let mut clock = Clock::new();
        clock.attach_pulse_output(&out).unwrap();
        let control = clock.start_stop().unwrap();

        clock.advance(0);
        control.apply(SyncCommand::Start, &clock).unwrap();
        clock.advance(150_000);
        // The pulse generator has moved the pin into its high half.
        trace.record(true);
        assert!(trace.level());

        control.apply(SyncCommand::Start, &clock).unwrap();
        assert!(clock.is_active());
        assert!(!trace.level());
        assert_eq!(clock.millis_since_sync(), 0);
        assert_eq!(clock.micros_since_hour(), 0);
    }

    #[test]
    fn first_millisecond_counts_from_the_dispatching_iteration() {
        let mut clock = Clock::new();
        let control = clock.start_stop().unwrap();
        clock.advance(0);
        clock.advance(10_000);
        control.apply(SyncCommand::Start, &clock).unwrap();

        clock.advance(10_900);
        assert_eq!(clock.millis_since_sync(), 0);
        assert_eq!(clock.micros_since_hour(), 900);
        clock.advance(11_000);
        assert_eq!(clock.millis_since_sync(), 1);
        assert_eq!(clock.micros_since_hour(), 1_000);
    }

    #[test]
    fn control_from_another_clock_is_rejected() {
        let mut clock = Clock::new();
        let mut other = Clock::new();
        let own = clock.start_stop().unwrap();
        let mut foreign = other.start_stop().unwrap();
        assert!(own.controls(&clock));
        assert!(!foreign.controls(&clock));

        assert_eq!(foreign.apply(SyncCommand::Start, &clock), Err(ForeignClock));
        foreign.act(CommandWindow::new(&[1]), &clock);
        assert!(!clock.is_active());

        own.apply(SyncCommand::Start, &clock).unwrap();
        assert_eq!(foreign.apply(SyncCommand::Stop, &clock), Err(ForeignClock));
        assert!(clock.is_active());
        assert!(!other.is_active());
    }

    #[test]
    fn continue_and_unknown_bytes_change_nothing() {
        let trace = LevelTrace::new(true);
        let out = RefCell::new(Recorder(&trace));
        let mut clock = Clock::new();
        clock.attach_pulse_output(&out).unwrap();
        let mut control = clock.start_stop().unwrap();
        clock.set_counters(10, 20);

        for byte in [0u8, 3, 0xFF] {
            control.act(CommandWindow::new(&[byte]), &clock);
        }
        assert!(!clock.is_active());
        assert_eq!(clock.millis_since_sync(), 10);
        assert_eq!(trace.writes(), 0);

        control.act(CommandWindow::new(&[1]), &clock);
        assert!(clock.is_active());
        control.act(CommandWindow::new(&[2]), &clock);
        assert!(!clock.is_active());
    }

    #[test]
    fn only_one_start_stop_control_exists() {
        let mut clock = Clock::new();
        assert!(clock.start_stop().is_some());
        assert!(clock.start_stop().is_none());
    }

    #[test]
    fn micros_wrap_at_the_hour() {
        let mut clock = Clock::new();
        let control = clock.start_stop().unwrap();
        clock.advance(0);
        control.apply(SyncCommand::Start, &clock).unwrap();
        clock.set_counters(0, HOUR_MICROS - 10);
        clock.advance(25);
        assert_eq!(clock.micros_since_hour(), 15);
    }

    #[test]
    fn timestamp_wraparound_is_a_small_step() {
        let mut clock = Clock::new();
        let control = clock.start_stop().unwrap();
        clock.advance(u32::MAX - 499);
        control.apply(SyncCommand::Start, &clock).unwrap();
        clock.advance(1_500);
        assert_eq!(clock.micros_since_hour(), 2_000);
        assert_eq!(clock.millis_since_sync(), 2);
    }

    #[test]
    fn too_many_pulse_outputs() {
        let trace = LevelTrace::new(false);
        let out = RefCell::new(Recorder(&trace));
        let mut clock = Clock::new();
        for _ in 0..MAX_PULSE_OUTPUTS {
            clock.attach_pulse_output(&out).unwrap();
        }
        assert_eq!(
            clock.attach_pulse_output(&out),
            Err(ConfigurationError::TooManyPulseOutputs)
        );
    }
}

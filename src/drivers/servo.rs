// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Hobby servo on a 50 Hz PWM channel.
//!
//! Command window: 1 byte, angle in degrees (`0..=180`, larger values are clamped). The angle maps
//! linearly onto a 1–2 ms pulse inside the 20 ms frame. The channel is only rewritten when the
//! commanded angle changes.

use embedded_hal::pwm::SetDutyCycle;

use crate::clock::Clock;
use crate::protocol::{Actionable, CommandWindow};

pub const MAX_ANGLE: u8 = 180;

/// Angle the servo is parked at on construction.
pub const HOME_ANGLE: u8 = 90;

const FRAME_US: u32 = 20_000;
const MIN_PULSE_US: u32 = 1_000;
const MAX_PULSE_US: u32 = 2_000;

pub struct Servo<PWM: SetDutyCycle> {
    pwm: PWM,
    angle: u8,
}

impl<PWM: SetDutyCycle> Servo<PWM> {
    /// Wrap a channel already running at a 20 ms period and park the servo at [`HOME_ANGLE`].
    pub fn new(pwm: PWM) -> Self {
        let mut servo = Self {
            pwm,
            angle: HOME_ANGLE,
        };
        servo.write(HOME_ANGLE);
        servo
    }

    #[inline]
    pub fn angle(&self) -> u8 {
        self.angle
    }

    pub fn set_angle(&mut self, angle: u8) {
        let angle = angle.min(MAX_ANGLE);
        if angle != self.angle {
            self.write(angle);
            self.angle = angle;
        }
    }

    /// Duty value for `angle` on this channel.
    pub fn duty_for(&self, angle: u8) -> u16 {
        let span = MAX_PULSE_US - MIN_PULSE_US;
        let pulse_us = MIN_PULSE_US + span * angle.min(MAX_ANGLE) as u32 / MAX_ANGLE as u32;
        let max = self.pwm.max_duty_cycle() as u32;
        (max * pulse_us / FRAME_US) as u16
    }

    fn write(&mut self, angle: u8) {
        let duty = self.duty_for(angle);
        self.pwm.set_duty_cycle(duty).ok();
    }

    pub fn free(self) -> PWM {
        self.pwm
    }
}

impl<PWM: SetDutyCycle> Actionable for Servo<PWM> {
    fn act(&mut self, command: CommandWindow<'_>, _clock: &Clock<'_>) {
        self.set_angle(command.u8());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{DutyTrace, FakePwm};

    #[test]
    fn maps_angle_onto_pulse_width() {
        let trace = DutyTrace::default();
        let servo = Servo::new(FakePwm::new(&trace, 20_000));
        assert_eq!(servo.duty_for(0), 1_000);
        assert_eq!(servo.duty_for(90), 1_500);
        assert_eq!(servo.duty_for(180), 2_000);
        assert_eq!(servo.duty_for(255), 2_000);
    }

    #[test]
    fn parks_at_home_on_construction() {
        let trace = DutyTrace::default();
        let servo = Servo::new(FakePwm::new(&trace, 20_000));
        assert_eq!(servo.angle(), HOME_ANGLE);
        assert_eq!(trace.duty.get(), 1_500);
        assert_eq!(trace.writes.get(), 1);
    }

    #[test]
    fn rewrites_only_on_change() {
        let trace = DutyTrace::default();
        let mut servo = Servo::new(FakePwm::new(&trace, 20_000));
        let clock = Clock::new();

        servo.act(CommandWindow::new(&[90]), &clock);
        assert_eq!(trace.writes.get(), 1);

        servo.act(CommandWindow::new(&[0]), &clock);
        servo.act(CommandWindow::new(&[0]), &clock);
        assert_eq!(trace.writes.get(), 2);
        assert_eq!(trace.duty.get(), 1_000);

        servo.act(CommandWindow::new(&[200]), &clock);
        assert_eq!(servo.angle(), MAX_ANGLE);
        assert_eq!(trace.duty.get(), 2_000);
    }
}

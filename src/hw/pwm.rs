// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! 50 Hz servo PWM on TIM4 channel 1 (PD12, AF2), set up through direct register access.
//!
//! The timer ticks at 1 MHz with a 20 000-tick period, so one duty step is one microsecond of
//! pulse width.

use core::convert::Infallible;

use embedded_hal::pwm::{ErrorType, SetDutyCycle};
use stm32f7xx_hal::pac;

/// Ticks per 20 ms servo frame.
const PERIOD_TICKS: u16 = 20_000;

pub struct ServoPwm {
    tim: pac::TIM4,
}

impl ServoPwm {
    /// Configure TIM4 CH1 for PWM mode 1 at 50 Hz. `timer_hz` is the APB1 timer kernel clock.
    pub fn tim4_ch1(tim4: pac::TIM4, timer_hz: u32) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim4en().set_bit());

        let tim = tim4;
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        let prescaler = (timer_hz / 1_000_000).saturating_sub(1);
        tim.psc.write(|w| unsafe { w.bits(prescaler) });
        tim.arr.write(|w| unsafe { w.bits(PERIOD_TICKS as u32 - 1) });
        tim.ccr1.write(|w| unsafe { w.bits(0) });

        // PWM mode 1 with preload, so a new duty takes effect at the next period
        tim.ccmr1_output()
            .modify(|_, w| unsafe { w.oc1m().bits(0b110).oc1pe().set_bit() });
        tim.ccer.modify(|_, w| w.cc1e().set_bit());
        tim.cr1.modify(|_, w| w.arpe().set_bit());

        tim.egr.write(|w| w.ug().set_bit());
        tim.cr1.modify(|_, w| w.cen().set_bit());

        Self { tim }
    }

    pub fn free(self) -> pac::TIM4 {
        self.tim
    }
}

impl ErrorType for ServoPwm {
    type Error = Infallible;
}

impl SetDutyCycle for ServoPwm {
    fn max_duty_cycle(&self) -> u16 {
        PERIOD_TICKS
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        let duty = duty.min(PERIOD_TICKS);
        self.tim.ccr1.write(|w| unsafe { w.bits(duty as u32) });
        Ok(())
    }
}

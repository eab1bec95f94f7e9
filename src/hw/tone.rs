// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Tone output on TIM3 channel 1 (PC6, AF2).
//!
//! The timer ticks at 1 MHz. A tone of `hz` sets the period to `1_000_000 / hz` ticks and the
//! compare value to half of that, giving a 50 % square wave. Silence parks the compare value at
//! zero so the pin sits low.

use stm32f7xx_hal::pac;

use crate::drivers::ToneOutput;

const TICK_HZ: u32 = 1_000_000;

/// Lowest frequency whose period still fits the 16-bit auto-reload register.
pub const MIN_HZ: u16 = 16;

pub struct TonePwm {
    tim: pac::TIM3,
}

impl TonePwm {
    /// Configure TIM3 CH1 for PWM mode 1, silent. `timer_hz` is the APB1 timer kernel clock.
    pub fn tim3_ch1(tim3: pac::TIM3, timer_hz: u32) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim3en().set_bit());

        let tim = tim3;
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        let prescaler = (timer_hz / TICK_HZ).saturating_sub(1);
        tim.psc.write(|w| unsafe { w.bits(prescaler) });
        tim.arr.write(|w| unsafe { w.bits(u16::MAX as u32) });
        tim.ccr1.write(|w| unsafe { w.bits(0) });

        tim.ccmr1_output()
            .modify(|_, w| unsafe { w.oc1m().bits(0b110).oc1pe().set_bit() });
        tim.ccer.modify(|_, w| w.cc1e().set_bit());
        tim.cr1.modify(|_, w| w.arpe().set_bit());

        tim.egr.write(|w| w.ug().set_bit());
        tim.cr1.modify(|_, w| w.cen().set_bit());

        Self { tim }
    }

    /// Auto-reload value for `hz`, clamped to what the 16-bit counter can hold.
    pub fn period_ticks(hz: u16) -> u32 {
        TICK_HZ / hz.max(MIN_HZ) as u32
    }

    pub fn free(self) -> pac::TIM3 {
        self.tim
    }
}

impl ToneOutput for TonePwm {
    fn play(&mut self, hz: u16) {
        let period = Self::period_ticks(hz);
        self.tim.arr.write(|w| unsafe { w.bits(period - 1) });
        self.tim.ccr1.write(|w| unsafe { w.bits(period / 2) });
        // Load the new period now instead of after the old one runs out
        self.tim.egr.write(|w| w.ug().set_bit());
    }

    fn silence(&mut self) {
        self.tim.ccr1.write(|w| unsafe { w.bits(0) });
        self.tim.egr.write(|w| w.ug().set_bit());
    }
}

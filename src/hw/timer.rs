// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Free-running 1 MHz microsecond counter on TIM5.
//!
//! TIM5 is 32 bits wide, so the count wraps every ~71.6 minutes. The scheduler only ever takes
//! differences between consecutive readings, which stay correct across the wrap.

use stm32f7xx_hal::pac;

use crate::scheduler::TimeSource;

pub struct MicrosTimer {
    tim: pac::TIM5,
}

impl MicrosTimer {
    /// Start TIM5 counting microseconds. `timer_hz` is the APB1 timer kernel clock.
    pub fn tim5(tim5: pac::TIM5, timer_hz: u32) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim5en().set_bit());

        let tim = tim5;
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        let prescaler = (timer_hz / 1_000_000).saturating_sub(1);
        tim.psc.write(|w| unsafe { w.bits(prescaler) });
        tim.arr.write(|w| unsafe { w.bits(0xFFFF_FFFF) });

        // Load the prescaler now instead of at the first overflow
        tim.egr.write(|w| w.ug().set_bit());
        tim.cnt.write(|w| unsafe { w.bits(0) });
        tim.cr1.modify(|_, w| w.cen().set_bit());

        Self { tim }
    }

    #[inline]
    pub fn now(&self) -> u32 {
        self.tim.cnt.read().bits()
    }

    pub fn free(self) -> pac::TIM5 {
        self.tim
    }
}

impl TimeSource for MicrosTimer {
    #[inline]
    fn now_us(&mut self) -> u32 {
        self.now()
    }
}

//! Quadrature encoder support via STM32F7 timers in encoder mode.
//!
//! TIM2 is a 32-bit timer, so the running-wheel position never wraps in practice. The wrapper
//! implements [`QuadratureCounter`] and plugs straight into a
//! [`RotaryEncoder`](crate::drivers::RotaryEncoder).

use stm32f7xx_hal::pac;

use crate::drivers::QuadratureCounter;

pub struct Encoder<TIM> {
    tim: TIM,
}

impl<TIM> Encoder<TIM> {
    /// Consume the wrapper and return the underlying timer peripheral.
    #[inline]
    pub fn free(self) -> TIM {
        self.tim
    }
}

impl Encoder<pac::TIM2> {
    /// Configure TIM2 as a quadrature encoder with full 32-bit range.
    ///
    /// CH1/CH2 must already be on PA0/PA1 (AF1).
    pub fn tim2(tim2: pac::TIM2) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim2en().set_bit());

        let tim = tim2;

        // Disable counter while configuring
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        tim.arr.write(|w| w.bits(0xFFFF_FFFF));

        // Encoder mode 3: count on both TI1 and TI2 edges
        tim.smcr.modify(|_, w| w.sms().bits(0b011));
        tim.ccmr1_input().modify(|_, w| w.cc1s().ti1().cc2s().ti2());

        // Non-inverted polarity on both channels
        tim.ccer.modify(|_, w| {
            w.cc1p()
                .clear_bit()
                .cc2p()
                .clear_bit()
                .cc1e()
                .set_bit()
                .cc2e()
                .set_bit()
        });

        tim.cnt.write(|w| w.bits(0));
        tim.cr1.modify(|_, w| w.cen().set_bit());

        Self { tim }
    }

    /// Read the raw 32-bit counter value.
    #[inline]
    pub fn raw(&self) -> u32 {
        self.tim.cnt.read().cnt().bits()
    }
}

impl QuadratureCounter for Encoder<pac::TIM2> {
    /// Counter as a signed position. Backwards rotation from zero reads negative.
    #[inline]
    fn position(&self) -> i32 {
        self.raw() as i32
    }

    #[inline]
    fn reset(&mut self) {
        self.tim.cnt.write(|w| w.bits(0));
    }
}

//! Basic ADC support for STM32F7 using direct PAC register access.
//!
//! Only ADC1 is used on the rig: blocking single-channel 12-bit conversions, shared between
//! analog sensors through [`Adc::make_reader`].
//!
//! Example:
//! ```ignore
//! let adc1 = RefCell::new(Adc::adc1(dp.ADC1));
//! let lever = AnalogSensor::new(Adc::make_reader(&adc1, 3));
//! ```

use core::cell::RefCell;

use stm32f7xx_hal::pac;

/// ADC wrapper over a PAC ADCx peripheral.
pub struct Adc<ADC> {
    adc: ADC,
}

impl<ADC> Adc<ADC> {
    #[inline]
    pub fn free(self) -> ADC {
        self.adc
    }
}

/// Trait for reading a single channel from an ADC peripheral.
pub trait AdcRead {
    fn read_channel(&mut self, ch: u8) -> u16;
}

impl Adc<pac::ADC1> {
    /// Create and initialize ADC1.
    pub fn adc1(adc1: pac::ADC1) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2enr.modify(|_, w| w.adc1en().set_bit());

        // ADC prescaler: PCLK2 / 4
        let common = unsafe { &*pac::ADC_COMMON::ptr() };
        common.ccr.modify(|_, w| w.adcpre().div4());

        // Power off to configure
        adc1.cr2.modify(|_, w| w.adon().clear_bit());

        // 12-bit, right-aligned, software trigger
        adc1.cr1.modify(|_, w| w.res().bits(0b00));
        adc1.cr2.modify(|_, w| {
            w.cont().clear_bit();
            w.align().right();
            w.exten().disabled();
            w
        });

        adc1.cr2.modify(|_, w| w.adon().set_bit());

        Self { adc: adc1 }
    }

    /// Blocking conversion of `channel` (0..=18).
    pub fn read(&self, channel: u8) -> u16 {
        let adc = &self.adc;

        // Long sample time on the low channels, where the rig's sensors sit
        if channel <= 9 {
            adc.smpr2.modify(|_, w| match channel {
                0 => w.smp0().bits(0b111),
                1 => w.smp1().bits(0b111),
                2 => w.smp2().bits(0b111),
                3 => w.smp3().bits(0b111),
                4 => w.smp4().bits(0b111),
                5 => w.smp5().bits(0b111),
                6 => w.smp6().bits(0b111),
                7 => w.smp7().bits(0b111),
                8 => w.smp8().bits(0b111),
                _ => w.smp9().bits(0b111),
            });
        }

        // One conversion in the regular sequence
        adc.sqr1.modify(|_, w| w.l().bits(0));
        adc.sqr3
            .modify(|_, w| unsafe { w.sq1().bits(channel & 0x1F) });

        adc.cr2.modify(|_, w| w.swstart().set_bit());
        while adc.sr.read().eoc().bit_is_clear() {}

        adc.dr.read().data().bits()
    }
}

impl AdcRead for Adc<pac::ADC1> {
    fn read_channel(&mut self, ch: u8) -> u16 {
        self.read(ch)
    }
}

impl<ADC> Adc<ADC>
where
    Adc<ADC>: AdcRead,
{
    /// Create a closure that reads the given channel from the ADC reference.
    pub fn make_reader<'a>(adc_ref: &'a RefCell<Self>, channel: u8) -> impl FnMut() -> u16 + 'a {
        move || adc_ref.borrow_mut().read_channel(channel)
    }
}

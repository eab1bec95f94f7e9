// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the rig bridge on the STM32F767ZI devboard (Nucleo-144).

use stm32f7xx_hal::{
    gpio::{gpioa, gpiob, gpioc, gpiod, gpioe, Alternate, Analog, Floating, Input, Output, PushPull},
    pac,
    prelude::*,
};

/// All board pins. Construct this once at startup using:
///
/// ```ignore
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOC, dp.GPIOD, dp.GPIOE);
/// ```
pub struct BoardPins {
    pub leds: Leds,
    pub host: Usart3Pins,
    pub debug: Usart1Pins,
    pub rig: RigPins,
    pub encoder: EncoderPins,
}

pub struct Leds {
    pub green: gpiob::PB0<Output<PushPull>>, // LD1
    pub blue: gpiob::PB7<Output<PushPull>>,  // LD2
    pub red: gpiob::PB14<Output<PushPull>>,  // LD3
}

/// Host link, routed to the ST-LINK virtual COM port
pub struct Usart3Pins {
    pub tx: gpiod::PD8<Alternate<7>>,
    pub rx: gpiod::PD9<Alternate<7>>,
}

/// Debug log side channel
pub struct Usart1Pins {
    pub tx: gpioa::PA9<Alternate<7>>,
    pub rx: gpioa::PA10<Alternate<7>>,
}

/// Experiment I/O on the Zio connectors
pub struct RigPins {
    pub pulse: gpioe::PE9<Output<PushPull>>,
    pub valve: gpioe::PE11<Output<PushPull>>,
    pub light: gpioe::PE13<Output<PushPull>>,
    pub lick: gpioe::PE14<Input<Floating>>,
    pub button: gpioc::PC13<Input<Floating>>, // B1 (USER)
    pub lever: gpioa::PA3<Analog>,            // ADC123_IN3
    pub servo: gpiod::PD12<Alternate<2>>,     // TIM4_CH1 (PWM)
    pub buzzer: gpioc::PC6<Alternate<2>>,     // TIM3_CH1 (tone)
}

/// TIM2 quadrature inputs for the running wheel
pub struct EncoderPins {
    pub ch1: gpioa::PA0<Alternate<1>>,
    pub ch2: gpioa::PA1<Alternate<1>>,
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(
        gpioa: pac::GPIOA,
        gpiob: pac::GPIOB,
        gpioc: pac::GPIOC,
        gpiod: pac::GPIOD,
        gpioe: pac::GPIOE,
    ) -> Self {
        let gpioa = gpioa.split();
        let gpiob = gpiob.split();
        let gpioc = gpioc.split();
        let gpiod = gpiod.split();
        let gpioe = gpioe.split();

        Self {
            leds: Leds {
                green: gpiob.pb0.into_push_pull_output(),
                blue: gpiob.pb7.into_push_pull_output(),
                red: gpiob.pb14.into_push_pull_output(),
            },

            host: Usart3Pins {
                tx: gpiod.pd8.into_alternate::<7>(),
                rx: gpiod.pd9.into_alternate::<7>(),
            },

            debug: Usart1Pins {
                tx: gpioa.pa9.into_alternate::<7>(),
                rx: gpioa.pa10.into_alternate::<7>(),
            },

            rig: RigPins {
                pulse: gpioe.pe9.into_push_pull_output(),
                valve: gpioe.pe11.into_push_pull_output(),
                light: gpioe.pe13.into_push_pull_output(),
                lick: gpioe.pe14.into_floating_input(),
                button: gpioc.pc13.into_floating_input(),
                lever: gpioa.pa3.into_analog(),
                servo: gpiod.pd12.into_alternate::<2>(),
                buzzer: gpioc.pc6.into_alternate::<2>(),
            },

            encoder: EncoderPins {
                ch1: gpioa.pa0.into_alternate::<1>(),
                ch2: gpioa.pa1.into_alternate::<1>(),
            },
        }
    }
}

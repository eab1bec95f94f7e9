// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Board entry point: wires the rig devices into the registry and runs the scheduler.
//!
//! The host manifest must list the same devices, in the same order, with the same widths:
//!
//! | Command window | Bytes | Sensor window | Bytes |
//! | -------------- | ----- | ------------- | ----- |
//! | `start_stop`   | 1     | `t_ms`        | 4     |
//! | `valve`        | 2     | `t_us`        | 4     |
//! | `light`        | 1     | `pulse`       | 1     |
//! | `wheel_reset`  | 1     | `lick`        | 1     |
//! | `servo`        | 1     | `button`      | 1     |
//! | `buzzer`       | 2     | `lever`       | 2     |
//! |                |       | `wheel`       | 4     |

#![no_main]
#![no_std]

use core::cell::RefCell;

use cortex_m_rt::entry;
use log::{error, info};
use panic_halt as _;

use hal::{
    pac,
    prelude::*,
    serial::{Config, Serial},
};
use stm32f7xx_hal as hal;

use rigbridge::{
    clock::Clock,
    config::{EngineConfig, DEBUG_BAUD, HOST_BAUD, LOG_LEVEL},
    drivers::{
        AnalogSensor, DigitalSensor, DirectOutput, MicrosReader, MillisReader, PulseClock,
        RotaryEncoder, Servo, TimedRelay, Tone,
    },
    error::ConfigurationError,
    hw::{
        logger, pins::BoardPins, Adc, Encoder, HalInput, HalOutput, MicrosTimer, Output, ServoPwm,
        TonePwm, Usart,
    },
    protocol::{Networker, Registry},
    scheduler::Scheduler,
};

/// Half-period of the sync pulse on PE9.
const PULSE_HALF_PERIOD_MS: u32 = 100;

/// ADC channel of the lever potentiometer on PA3.
const LEVER_CHANNEL: u8 = 3;

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();
    let timer_hz = clocks.timclk1().raw();

    let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOC, dp.GPIOD, dp.GPIOE);

    // USART1 (DBG)
    let debug_cfg = Config {
        baud_rate: DEBUG_BAUD.bps(),
        ..Default::default()
    };
    let debug = Serial::new(dp.USART1, (pins.debug.tx, pins.debug.rx), &clocks, debug_cfg);
    logger::init(Usart::new(debug), LOG_LEVEL).ok();

    // USART3 (host link)
    let host_cfg = Config {
        baud_rate: HOST_BAUD.bps(),
        ..Default::default()
    };
    let host = Usart::new(Serial::new(dp.USART3, (pins.host.tx, pins.host.rx), &clocks, host_cfg));

    let mut led_green = Output::active_high(HalOutput::new(pins.leds.green));
    let mut led_red = Output::active_high(HalOutput::new(pins.leds.red));

    // Rig devices. These outlive the clock and registry that borrow them.
    let adc1 = RefCell::new(Adc::adc1(dp.ADC1));
    let t_ms = RefCell::new(MillisReader);
    let t_us = RefCell::new(MicrosReader);
    let pulse = RefCell::new(PulseClock::new(
        HalOutput::new(pins.rig.pulse),
        PULSE_HALF_PERIOD_MS,
    ));
    let valve = RefCell::new(TimedRelay::active_high(HalOutput::new(pins.rig.valve)));
    let light = RefCell::new(DirectOutput::active_high(HalOutput::new(pins.rig.light)));
    let lick = RefCell::new(DigitalSensor::new(HalInput::new(pins.rig.lick)));
    let button = RefCell::new(DigitalSensor::new(HalInput::new(pins.rig.button)));
    let lever = RefCell::new(AnalogSensor::new(Adc::make_reader(&adc1, LEVER_CHANNEL)));
    let _encoder_pins = pins.encoder;
    let wheel = RefCell::new(RotaryEncoder::new(Encoder::tim2(dp.TIM2)));
    let _servo_pin = pins.rig.servo;
    let servo = RefCell::new(Servo::new(ServoPwm::tim4_ch1(dp.TIM4, timer_hz)));
    let _buzzer_pin = pins.rig.buzzer;
    let buzzer = RefCell::new(Tone::new(TonePwm::tim3_ch1(dp.TIM3, timer_hz)));

    let mut clock = Clock::new();
    checked(&mut led_red, clock.attach_pulse_output(&pulse));
    let Some(start_stop) = clock.start_stop() else {
        panic!("start/stop control already taken");
    };
    let start_stop = RefCell::new(start_stop);

    let mut registry = Registry::new();

    // Command frame: start/stop always comes first.
    checked(&mut led_red, registry.add_actionable(&start_stop));
    checked(&mut led_red, registry.add_actionable(&valve));
    checked(&mut led_red, registry.add_actionable(&light));
    checked(&mut led_red, registry.add_actionable(&wheel));
    checked(&mut led_red, registry.add_actionable(&servo));
    checked(&mut led_red, registry.add_actionable(&buzzer));

    // Sensor frame: t_ms always comes first.
    checked(&mut led_red, registry.add_readable(&t_ms));
    checked(&mut led_red, registry.add_readable(&t_us));
    checked(&mut led_red, registry.add_readable(&pulse));
    checked(&mut led_red, registry.add_readable(&lick));
    checked(&mut led_red, registry.add_readable(&button));
    checked(&mut led_red, registry.add_readable(&lever));
    checked(&mut led_red, registry.add_readable(&wheel));

    checked(&mut led_red, registry.add_steppable(&pulse));
    checked(&mut led_red, registry.add_steppable(&valve));

    let networker = checked(&mut led_red, Networker::new(registry, EngineConfig::default()));
    info!(
        "rig bridge up: {} command bytes, {} sensor bytes",
        networker.command_frame_len(),
        networker.sensor_frame_len()
    );

    let time = MicrosTimer::tim5(dp.TIM5, timer_hz);
    led_green.on();

    Scheduler::new(clock, networker, host, time).run()
}

/// Unwrap a startup result. On error: log it, light the red LED and halt before the loop starts.
fn checked<T, PIN>(led: &mut Output<PIN>, result: Result<T, ConfigurationError>) -> T
where
    PIN: embedded_hal::digital::OutputPin,
{
    match result {
        Ok(value) => value,
        Err(e) => {
            error!("configuration error: {}", e);
            led.on();
            panic!("configuration error");
        }
    }
}

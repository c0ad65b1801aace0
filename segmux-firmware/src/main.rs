//! segmux - multiplexed seven-segment display firmware
//!
//! Drives a multi-digit seven-segment LED module from an RP2040. Pin
//! tables, wiring polarity and the refresh rate come from `display.toml`,
//! compiled into the firmware.
//!
//! Task layout:
//!
//! - tick timer (from `segmux-hal-rp2040`): signals the display channel
//!   once per tick
//! - `mux_task`: lights one digit per tick
//! - `demo_task`: writes new strings into the display channel

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::Level;
use heapless::Vec;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use segmux_core::{Levels, MAX_DIGITS, SEGMENT_COUNT};
use segmux_drivers::{Multiplexer, SegmentRenderer};
use segmux_hal_rp2040::{GpioOutput, PinBank, TickerTimer};

mod channels;
mod config;
mod tasks;

/// Embedded display configuration
/// Edit display.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../display.toml");

// Pin tables are borrowed by the multiplexer task forever
static DIGIT_PINS: StaticCell<Vec<GpioOutput<'static>, MAX_DIGITS>> = StaticCell::new();
static SEGMENT_PINS: StaticCell<Vec<GpioOutput<'static>, SEGMENT_COUNT>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("segmux firmware starting...");

    let p = embassy_rp::init(Default::default());
    // A rejected config leaves every GPIO untouched
    let Some(config) = config::load(EMBEDDED_CONFIG) else {
        return;
    };
    let levels = Levels::new(config.wiring);

    // Claim every display line at its off level before anything lights up
    let mut bank = PinBank::new(p);
    let digits = match bank.outputs::<MAX_DIGITS>(&config.digit_pins, Level::from(levels.digit_off)) {
        Ok(pins) => DIGIT_PINS.init(pins),
        Err(e) => {
            error!("Digit pins unavailable: {}", e);
            return;
        }
    };
    let segments =
        match bank.outputs::<SEGMENT_COUNT>(&config.segment_pins, Level::from(levels.segment_off)) {
            Ok(pins) => SEGMENT_PINS.init(pins),
            Err(e) => {
                error!("Segment pins unavailable: {}", e);
                return;
            }
        };
    info!("Display pins configured");

    let renderer = match SegmentRenderer::new(digits, segments, config.wiring) {
        Ok(renderer) => renderer,
        Err(e) => {
            error!("Display rejected: {}", e);
            return;
        }
    };

    let mut timer = TickerTimer::new(spawner);
    let mux = match Multiplexer::init(
        renderer,
        &channels::DISPLAY,
        &mut timer,
        &config.timer,
        config.dot_blink_ticks,
    ) {
        Ok(mux) => mux,
        Err(e) => {
            error!("Multiplexer failed to start: {}", e);
            return;
        }
    };

    spawner.spawn(tasks::mux_task(mux).unwrap());
    spawner.spawn(tasks::demo_task(&channels::DISPLAY).unwrap());

    info!("All tasks spawned");
}

//! RP2040-specific HAL for the segmux display driver
//!
//! This crate provides RP2040 implementations of the shared `segmux-hal`
//! traits, plus RP2040-specific pin handling:
//!
//! - GPIO output pins ([`gpio`])
//! - Config-driven pin lookup by number ([`pins`])
//! - Tick timer slots backed by embassy-time tickers ([`timer`])

#![no_std]

pub mod gpio;
pub mod pins;
pub mod timer;

pub use gpio::{GpioOutput, GPIO_COUNT};
pub use pins::{PinBank, PinError};
pub use timer::{TickerTimer, TIMER_SLOTS};

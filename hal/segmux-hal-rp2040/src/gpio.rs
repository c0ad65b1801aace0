//! GPIO output pins
//!
//! Wraps embassy-rp outputs in the `segmux-hal` pin trait.

use embassy_rp::gpio::Output;

/// Maximum number of GPIO pins on RP2040
pub const GPIO_COUNT: usize = 30;

/// Push-pull output usable as a display line
pub struct GpioOutput<'d> {
    pin: Output<'d>,
}

impl<'d> GpioOutput<'d> {
    pub fn new(pin: Output<'d>) -> Self {
        Self { pin }
    }

    pub fn into_inner(self) -> Output<'d> {
        self.pin
    }
}

impl segmux_hal::OutputPin for GpioOutput<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}

//! Dynamic pin lookup for config-driven hardware setup
//!
//! Display pin tables come from `display.toml` as GPIO numbers, so pins are
//! handed out by number at runtime instead of by peripheral name.

use embassy_rp::gpio::{AnyPin, Level, Output};
use embassy_rp::{Peri, Peripherals};
use heapless::Vec;

use crate::gpio::{GpioOutput, GPIO_COUNT};

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin(u8),
    /// Pin already taken
    AlreadyTaken(u8),
    /// More pins requested than the table holds
    TooMany,
}

macro_rules! bank {
    ($p:ident, $($pin:ident),* $(,)?) => {
        [$(Some(Peri::<'static, AnyPin>::from($p.$pin))),*]
    };
}

/// Every GPIO of the chip, taken out by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT],
}

impl PinBank {
    /// Move all GPIO pins out of the peripherals
    ///
    /// Non-GPIO peripherals are not used by the display and are dropped.
    pub fn new(p: Peripherals) -> Self {
        Self {
            pins: bank!(
                p, PIN_0, PIN_1, PIN_2, PIN_3, PIN_4, PIN_5, PIN_6, PIN_7, PIN_8, PIN_9, PIN_10,
                PIN_11, PIN_12, PIN_13, PIN_14, PIN_15, PIN_16, PIN_17, PIN_18, PIN_19, PIN_20,
                PIN_21, PIN_22, PIN_23, PIN_24, PIN_25, PIN_26, PIN_27, PIN_28, PIN_29,
            ),
        }
    }

    /// Take a pin by number
    pub fn take(&mut self, pin_num: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        self.pins
            .get_mut(pin_num as usize)
            .ok_or(PinError::InvalidPin(pin_num))?
            .take()
            .ok_or(PinError::AlreadyTaken(pin_num))
    }

    /// Check if a pin is available
    pub fn is_available(&self, pin_num: u8) -> bool {
        matches!(self.pins.get(pin_num as usize), Some(Some(_)))
    }

    /// Take a pin and configure it as an output at `level`
    pub fn output(&mut self, pin_num: u8, level: Level) -> Result<GpioOutput<'static>, PinError> {
        let pin = self.take(pin_num)?;
        Ok(GpioOutput::new(Output::new(pin, level)))
    }

    /// Take a whole pin table as outputs, all starting at `level`
    pub fn outputs<const N: usize>(
        &mut self,
        pin_nums: &[u8],
        level: Level,
    ) -> Result<Vec<GpioOutput<'static>, N>, PinError> {
        let mut outputs = Vec::new();
        for &pin_num in pin_nums {
            let output = self.output(pin_num, level)?;
            outputs.push(output).map_err(|_| PinError::TooMany)?;
        }
        Ok(outputs)
    }
}

//! Configuration type definitions
//!
//! These types describe one display: its pin tables, wiring polarity,
//! tick timer and dot blinking.

use heapless::Vec;

use crate::glyph::SEGMENT_COUNT;
use crate::polarity::Wiring;
use crate::text::MAX_DIGITS;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default tick rate: 1 kHz, i.e. 250 Hz per digit on a four-digit module
pub const DEFAULT_TICK_HZ: u32 = 1000;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// No digit-select pins given
    NoDigits,
    /// Segment table does not have exactly A..G plus DP
    SegmentCount,
    /// The same pin appears twice across both tables
    DuplicatePin(u8),
    /// Clock division of zero
    ZeroDivision,
    /// Tick frequency of zero
    ZeroFrequency,
    /// Divided source clock is slower than the requested tick rate
    TickTooFast,
}

/// Tick timer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimerConfig {
    /// Which timer peripheral to use
    pub timer_id: u8,
    /// Prescaler applied to the timer source clock
    pub clock_division: u32,
    /// Tick frequency in Hz (one digit refreshed per tick)
    pub tick_hz: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            timer_id: 0,
            clock_division: 1,
            tick_hz: DEFAULT_TICK_HZ,
        }
    }
}

impl TimerConfig {
    /// Check chip-independent constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.clock_division == 0 {
            return Err(ConfigError::ZeroDivision);
        }
        if self.tick_hz == 0 {
            return Err(ConfigError::ZeroFrequency);
        }
        Ok(())
    }

    /// Timer counts per tick for a source clock of `source_hz`
    pub fn period_ticks(&self, source_hz: u32) -> Result<u32, ConfigError> {
        self.validate()?;
        match source_hz / self.clock_division / self.tick_hz {
            0 => Err(ConfigError::TickTooFast),
            period => Ok(period),
        }
    }
}

/// Complete display configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Common line polarity
    pub wiring: Wiring,
    /// Digit-select pins, leftmost digit first
    pub digit_pins: Vec<u8, MAX_DIGITS>,
    /// Segment pins in A, B, C, D, E, F, G, DP order
    pub segment_pins: Vec<u8, SEGMENT_COUNT>,
    /// Tick timer
    pub timer: TimerConfig,
    /// Dot blink half-period in ticks (0 = steady)
    pub dot_blink_ticks: u16,
}

impl DisplayConfig {
    /// Number of digit positions
    pub fn digit_count(&self) -> u8 {
        self.digit_pins.len() as u8
    }

    /// Check the pin tables and timer
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.digit_pins.is_empty() {
            return Err(ConfigError::NoDigits);
        }
        if self.segment_pins.len() != SEGMENT_COUNT {
            return Err(ConfigError::SegmentCount);
        }

        let all_pins = || self.digit_pins.iter().chain(self.segment_pins.iter());
        for (i, pin) in all_pins().enumerate() {
            if all_pins().skip(i + 1).any(|other| other == pin) {
                return Err(ConfigError::DuplicatePin(*pin));
            }
        }

        self.timer.validate()
    }
}

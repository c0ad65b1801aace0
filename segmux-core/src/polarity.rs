//! Wiring polarity
//!
//! Common-cathode modules are driven active-high: segment anodes high, and
//! the digit's cathode switched on through a driver that conducts when its
//! select line is high. Common-anode modules are active-low throughout.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the display's common lines are wired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Wiring {
    /// Shared cathode per digit (on = high)
    #[default]
    CommonCathode,
    /// Shared anode per digit (on = low)
    CommonAnode,
}

impl Wiring {
    /// Parse a config string (`common_cathode` / `common_anode`)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "common_cathode" | "cathode" => Some(Wiring::CommonCathode),
            "common_anode" | "anode" => Some(Wiring::CommonAnode),
            _ => None,
        }
    }
}

/// Electrical levels for the four logical states, `true` = high
///
/// Each on/off pair is complementary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Levels {
    pub digit_on: bool,
    pub digit_off: bool,
    pub segment_on: bool,
    pub segment_off: bool,
}

impl Levels {
    /// Derive the levels from the wiring
    pub const fn new(wiring: Wiring) -> Self {
        let on = matches!(wiring, Wiring::CommonCathode);
        Self {
            digit_on: on,
            digit_off: !on,
            segment_on: on,
            segment_off: !on,
        }
    }

    /// Level for a digit-select line
    pub const fn digit(&self, on: bool) -> bool {
        if on {
            self.digit_on
        } else {
            self.digit_off
        }
    }

    /// Level for a segment line
    pub const fn segment(&self, on: bool) -> bool {
        if on {
            self.segment_on
        } else {
            self.segment_off
        }
    }
}

impl From<Wiring> for Levels {
    fn from(wiring: Wiring) -> Self {
        Self::new(wiring)
    }
}

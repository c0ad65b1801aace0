//! Seven-segment glyph table
//!
//! Segment layout, bit 0 = A through bit 6 = G, bit 7 = decimal point:
//!
//! ```text
//!    AAA
//!   F   B
//!    GGG
//!   E   C
//!    DDD  DP
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of segment lines per digit, including the decimal point
pub const SEGMENT_COUNT: usize = 8;

/// One segment line of a digit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Segment {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    /// Decimal point
    Dp = 7,
}

impl Segment {
    /// The seven character segments, in pin-table order
    pub const CHARACTER: [Segment; 7] = [
        Segment::A,
        Segment::B,
        Segment::C,
        Segment::D,
        Segment::E,
        Segment::F,
        Segment::G,
    ];

    /// Index into the segment pin table
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Segment for a pin-table index
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Segment::A),
            1 => Some(Segment::B),
            2 => Some(Segment::C),
            3 => Some(Segment::D),
            4 => Some(Segment::E),
            5 => Some(Segment::F),
            6 => Some(Segment::G),
            7 => Some(Segment::Dp),
            _ => None,
        }
    }

    const fn mask(self) -> u8 {
        1 << (self as u8)
    }
}

/// Logical segment pattern for one digit
///
/// Only says which segments are lit; electrical levels come from the
/// wiring polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Glyph(u8);

impl Glyph {
    /// All segments off
    pub const BLANK: Glyph = Glyph(0x00);
    pub const DASH: Glyph = Glyph(0x40);

    /// Glyph for `c`, or `None` if `c` is outside the supported set
    ///
    /// Supported: `0`-`9`, `C`, `F`, `H`, `A`, `-`, and space.
    pub const fn lookup(c: char) -> Option<Glyph> {
        let bits = match c {
            '0' => 0x3F,
            '1' => 0x06,
            '2' => 0x5B,
            '3' => 0x4F,
            '4' => 0x66,
            '5' => 0x6D,
            '6' => 0x7D,
            '7' => 0x07,
            '8' => 0x7F,
            '9' => 0x6F,
            'C' => 0x39,
            'F' => 0x71,
            'H' => 0x76,
            'A' => 0x77,
            '-' => 0x40,
            ' ' => 0x00,
            _ => return None,
        };
        Some(Glyph(bits))
    }

    /// Glyph for `c`, blank if unsupported
    pub const fn from_char(c: char) -> Glyph {
        match Self::lookup(c) {
            Some(glyph) => glyph,
            None => Self::BLANK,
        }
    }

    /// Glyph from a raw bit pattern (bit 0 = A)
    pub const fn from_bits(bits: u8) -> Glyph {
        Glyph(bits)
    }

    /// Raw bit pattern (bit 0 = A)
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check whether a segment is lit
    pub const fn is_lit(self, segment: Segment) -> bool {
        self.0 & segment.mask() != 0
    }

    /// Same glyph with the decimal point set or cleared
    pub const fn with_dot(self, dot: bool) -> Glyph {
        if dot {
            Glyph(self.0 | Segment::Dp.mask())
        } else {
            Glyph(self.0 & !Segment::Dp.mask())
        }
    }
}

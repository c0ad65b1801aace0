//! Display strings and their per-digit layout

use heapless::{String, Vec};

use crate::glyph::Glyph;

/// Maximum number of characters accepted by `display()`
pub const SEG_MAX_STRING_SIZE: usize = 9;

/// Maximum number of digit positions a display may have
pub const MAX_DIGITS: usize = 8;

/// A bounded display string
///
/// Holds at most [`SEG_MAX_STRING_SIZE`] characters. Construction never
/// fails; longer input is cut off.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayText(String<SEG_MAX_STRING_SIZE>);

impl DisplayText {
    /// Copy up to [`SEG_MAX_STRING_SIZE`] characters of `text`
    pub fn new(text: &str) -> Self {
        let mut s = String::new();
        for c in text.chars().take(SEG_MAX_STRING_SIZE) {
            // A multi-byte char that no longer fits ends the copy
            if s.push(c).is_err() {
                break;
            }
        }
        Self(s)
    }

    /// Stored text
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Check if the text is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lay the text out onto digit positions
    ///
    /// A `.` lights the decimal point of the preceding position instead of
    /// taking a position of its own. A leading `.`, or one after a position
    /// that already has its dot, gets a blank position with the dot lit.
    pub fn layout(&self) -> Frame {
        let mut cells: Vec<Cell, MAX_DIGITS> = Vec::new();

        for c in self.0.chars() {
            if c == '.' {
                if let Some(last) = cells.last_mut() {
                    if !last.dot {
                        last.dot = true;
                        continue;
                    }
                }
                if cells.push(Cell::new(Glyph::BLANK, true)).is_err() {
                    break;
                }
            } else if cells.push(Cell::new(Glyph::from_char(c), false)).is_err() {
                break;
            }
        }

        Frame { cells }
    }
}

impl From<&str> for DisplayText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// What one digit position shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cell {
    /// Character segments (decimal point never set here)
    pub glyph: Glyph,
    /// Decimal point requested for this position
    pub dot: bool,
}

impl Cell {
    pub const fn new(glyph: Glyph, dot: bool) -> Self {
        Self { glyph, dot }
    }
}

/// A display string laid out onto digit positions
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    cells: Vec<Cell, MAX_DIGITS>,
}

impl Frame {
    /// Cell at a position; positions past the text are blank
    pub fn cell(&self, position: usize) -> Cell {
        self.cells.get(position).copied().unwrap_or_default()
    }

    /// Number of positions the text occupies
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if no position is occupied
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

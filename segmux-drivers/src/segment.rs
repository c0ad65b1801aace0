//! Seven-segment renderer
//!
//! Drives the segment and digit-select lines of a display directly. Every
//! call writes pins immediately; there is no frame buffer here.

use segmux_core::{Glyph, Levels, Segment, Wiring, MAX_DIGITS, SEGMENT_COUNT};
use segmux_hal::OutputPin;

/// Pin table validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderError {
    /// Digit pin table is empty
    NoDigits,
    /// More digit pins than supported
    TooManyDigits,
    /// Segment pin table is not A..G plus DP
    SegmentCount,
}

/// Renderer over borrowed digit and segment pin tables
///
/// Segment pins are indexed by [`Segment`]: A..G then the decimal point.
pub struct SegmentRenderer<'a, P> {
    digits: &'a mut [P],
    segments: &'a mut [P],
    levels: Levels,
}

impl<'a, P: OutputPin> SegmentRenderer<'a, P> {
    /// Create a renderer and switch everything off
    ///
    /// # Arguments
    /// - `digits`: Digit-select pins, one per position (1 to [`MAX_DIGITS`])
    /// - `segments`: Exactly [`SEGMENT_COUNT`] segment pins
    /// - `wiring`: Common line polarity
    pub fn new(
        digits: &'a mut [P],
        segments: &'a mut [P],
        wiring: Wiring,
    ) -> Result<Self, RenderError> {
        if digits.is_empty() {
            return Err(RenderError::NoDigits);
        }
        if digits.len() > MAX_DIGITS {
            return Err(RenderError::TooManyDigits);
        }
        if segments.len() != SEGMENT_COUNT {
            return Err(RenderError::SegmentCount);
        }

        let mut renderer = Self {
            digits,
            segments,
            levels: Levels::new(wiring),
        };
        renderer.clear_all_digits();
        renderer.clear_segments();
        Ok(renderer)
    }

    /// Number of digit positions
    pub fn digit_count(&self) -> u8 {
        self.digits.len() as u8
    }

    /// Electrical levels in use
    pub fn levels(&self) -> Levels {
        self.levels
    }

    /// Drive a segment to its on level; unknown ids are ignored
    pub fn segment_on(&mut self, segment_id: u8) {
        if let Some(segment) = Segment::from_index(segment_id as usize) {
            self.set_segment(segment, true);
        }
    }

    /// Drive a segment to its off level; unknown ids are ignored
    pub fn segment_off(&mut self, segment_id: u8) {
        if let Some(segment) = Segment::from_index(segment_id as usize) {
            self.set_segment(segment, false);
        }
    }

    /// Switch one segment
    pub fn set_segment(&mut self, segment: Segment, on: bool) {
        let level = self.levels.segment(on);
        self.segments[segment.index()].set_state(level);
    }

    /// Select exactly one digit
    ///
    /// All other digits are switched off first. An out-of-range id leaves
    /// every digit off.
    pub fn set_digit(&mut self, digit_id: u8) {
        self.clear_all_digits();
        let on = self.levels.digit_on;
        if let Some(pin) = self.digits.get_mut(digit_id as usize) {
            pin.set_state(on);
        }
    }

    /// Switch every digit on (static, non-multiplexed use)
    pub fn select_all_digits(&mut self) {
        let on = self.levels.digit_on;
        for pin in self.digits.iter_mut() {
            pin.set_state(on);
        }
    }

    /// Switch every digit off
    pub fn clear_all_digits(&mut self) {
        let off = self.levels.digit_off;
        for pin in self.digits.iter_mut() {
            pin.set_state(off);
        }
    }

    /// Render a character on segments A..G
    ///
    /// Unsupported characters render blank. The decimal point is untouched.
    pub fn render_char(&mut self, c: char) {
        self.render_glyph(Glyph::from_char(c));
    }

    /// Render a glyph on segments A..G
    pub fn render_glyph(&mut self, glyph: Glyph) {
        for segment in Segment::CHARACTER {
            self.set_segment(segment, glyph.is_lit(segment));
        }
    }

    /// Switch every segment off, decimal point included
    pub fn clear_segments(&mut self) {
        self.render_glyph(Glyph::BLANK);
        self.dot_off();
    }

    pub fn dot_on(&mut self) {
        self.set_segment(Segment::Dp, true);
    }

    pub fn dot_off(&mut self) {
        self.set_segment(Segment::Dp, false);
    }

    /// Logical pattern currently on the segment lines
    pub fn lit_segments(&self) -> Glyph {
        let on = self.levels.segment_on;
        let bits = self
            .segments
            .iter()
            .enumerate()
            .filter(|(_, pin)| pin.is_set_high() == on)
            .fold(0u8, |bits, (index, _)| bits | (1 << index));
        Glyph::from_bits(bits)
    }

    /// Bit mask of selected digits (bit 0 = digit 0)
    pub fn selected_digits(&self) -> u8 {
        let on = self.levels.digit_on;
        self.digits
            .iter()
            .enumerate()
            .filter(|(_, pin)| pin.is_set_high() == on)
            .fold(0u8, |mask, (index, _)| mask | (1 << index))
    }

    /// Digit pin table
    pub fn digit_pins(&self) -> &[P] {
        &*self.digits
    }

    /// Segment pin table
    pub fn segment_pins(&self) -> &[P] {
        &*self.segments
    }
}

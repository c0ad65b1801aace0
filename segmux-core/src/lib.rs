//! Board-agnostic core logic for the seven-segment display firmware
//!
//! This crate contains all display logic that does not touch hardware:
//!
//! - Glyph table for the supported character set
//! - Wiring polarity and the electrical levels it implies
//! - Bounded display strings and their per-digit layout
//! - Multiplex cursor and dot-blink counter
//! - Configuration type definitions and parser

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod cursor;
pub mod glyph;
pub mod polarity;
pub mod text;

pub use cursor::{DotBlinker, MuxCursor};
pub use glyph::{Glyph, Segment, SEGMENT_COUNT};
pub use polarity::{Levels, Wiring};
pub use text::{Cell, DisplayText, Frame, MAX_DIGITS, SEG_MAX_STRING_SIZE};

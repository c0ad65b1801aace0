//! Display drivers
//!
//! Concrete display logic on top of the `segmux-hal` traits:
//!
//! - [`segment`]: seven-segment renderer driving pins directly
//! - [`mux`]: multiplexing scheduler refreshing one digit per tick
//!
//! Everything here is generic over [`segmux_hal::OutputPin`] and
//! [`segmux_hal::TickTimer`], so it runs unchanged on the host against
//! mock pins.

#![no_std]
#![deny(unsafe_code)]

pub mod mux;
pub mod segment;

pub use mux::{MuxChannel, MuxError, Multiplexer};
pub use segment::{RenderError, SegmentRenderer};

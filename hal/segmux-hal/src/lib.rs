//! segmux Hardware Abstraction Layer
//!
//! This crate defines the hardware collaborators the display driver needs:
//! digital output pins and a periodic tick source. Chip-specific HALs
//! implement these so the same driver code runs on different boards.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  segmux-drivers (renderer, multiplexer) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  segmux-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ segmux-hal-   │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output used for segment and digit lines
//! - [`timer::TickTimer`] - Periodic tick source driving the multiplexer
//! - [`timer::TickTarget`] - Context the tick handler signals

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod timer;

// Re-export key traits at crate root for convenience
pub use gpio::OutputPin;
pub use timer::{TickTarget, TickTimer, TimerError};

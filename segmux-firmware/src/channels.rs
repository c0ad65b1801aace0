//! Inter-task communication channels
//!
//! The display mailbox is the only shared state: producers write strings
//! into it, the tick timer signals it, and the multiplexer task drains it.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use segmux_drivers::MuxChannel;

pub type DisplayChannel = MuxChannel<CriticalSectionRawMutex>;

/// Latest string requested for the display, plus the refresh tick
pub static DISPLAY: DisplayChannel = MuxChannel::new();

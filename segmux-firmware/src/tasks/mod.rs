//! Embassy async tasks
//!
//! Each task runs independently and communicates through the display
//! channel.

pub mod demo;
pub mod mux;

pub use demo::demo_task;
pub use mux::{mux_task, DisplayMux};

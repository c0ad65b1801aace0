//! Configuration loading
//!
//! The display configuration is compiled in from `display.toml`. `build.rs`
//! runs the same `parse_config`, so a file that builds also loads here.

use defmt::*;
use segmux_core::config::{parse_config, DisplayConfig};

/// Parse the embedded config
///
/// On failure nothing is returned and no pin is claimed.
pub fn load(source: &str) -> Option<DisplayConfig> {
    match parse_config(source) {
        Ok(config) => {
            info!(
                "display.toml: {} digits, {}, {} Hz",
                config.digit_count(),
                config.wiring,
                config.timer.tick_hz
            );
            Some(config)
        }
        Err(e) => {
            error!("display.toml rejected: {}", e);
            None
        }
    }
}

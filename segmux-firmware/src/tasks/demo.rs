//! Demo producer
//!
//! Exercises the display: a running counter, a temperature-style reading
//! with a decimal point, and a dash pattern every ten seconds.

use core::fmt::Write;

use defmt::*;
use embassy_time::{Duration, Ticker};
use heapless::String;
use segmux_core::SEG_MAX_STRING_SIZE;

use crate::channels::DisplayChannel;

/// Interval between new strings
const DEMO_INTERVAL_MS: u64 = 1000;

#[embassy_executor::task]
pub async fn demo_task(display: &'static DisplayChannel) {
    info!("Demo producer started");

    let mut ticker = Ticker::every(Duration::from_millis(DEMO_INTERVAL_MS));
    let mut count: u32 = 0;

    loop {
        match demo_text(count) {
            Ok(text) => {
                debug!("Demo: \"{}\"", text.as_str());
                display.display(&text);
            }
            Err(_) => warn!("Demo string {} does not fit, skipped", count),
        }

        count = count.wrapping_add(1);
        ticker.next().await;
    }
}

/// Text shown for the `count`th second
fn demo_text(count: u32) -> Result<String<SEG_MAX_STRING_SIZE>, core::fmt::Error> {
    let mut text = String::new();
    match count % 10 {
        0 => text.push_str("----").map_err(|_| core::fmt::Error)?,
        5 => write!(text, "{}.{}C", 18 + count % 7, (count / 10) % 10)?,
        _ => write!(text, "{:4}", count % 10_000)?,
    }
    Ok(text)
}

//! Multiplexer task
//!
//! Owns the display pins for the lifetime of the firmware and refreshes one
//! digit per timer tick.

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use segmux_drivers::Multiplexer;
use segmux_hal_rp2040::GpioOutput;

pub type DisplayMux = Multiplexer<'static, GpioOutput<'static>, CriticalSectionRawMutex>;

#[embassy_executor::task]
pub async fn mux_task(mut mux: DisplayMux) {
    info!(
        "Multiplexer task started ({} digits)",
        mux.renderer().digit_count()
    );
    mux.run().await
}

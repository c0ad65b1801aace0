//! Tick timer slots
//!
//! The RP2040 has a single 1 MHz microsecond timer shared by embassy-time,
//! so each "timer" here is an embassy task running a [`Ticker`] off that
//! clock. `timer_id` picks one of [`TIMER_SLOTS`] task slots; a slot can
//! only be started once.

use embassy_executor::Spawner;
use embassy_time::{Duration, Ticker, TICK_HZ};
use portable_atomic::{AtomicU8, Ordering};

use segmux_core::config::{ConfigError, TimerConfig};
use segmux_hal::{TickTarget, TickTimer, TimerError};

/// Number of independent tick timers
pub const TIMER_SLOTS: u8 = 4;

/// Bit per started slot
static IN_USE: AtomicU8 = AtomicU8::new(0);

/// Tick timer backed by embassy-time
pub struct TickerTimer {
    spawner: Spawner,
}

impl TickerTimer {
    pub fn new(spawner: Spawner) -> Self {
        Self { spawner }
    }
}

impl TickTimer for TickerTimer {
    fn start(
        &mut self,
        timer_id: u8,
        clock_division: u32,
        tick_hz: u32,
        target: &'static dyn TickTarget,
    ) -> Result<(), TimerError> {
        if timer_id >= TIMER_SLOTS {
            return Err(TimerError::InvalidTimer);
        }

        let config = TimerConfig {
            timer_id,
            clock_division,
            tick_hz,
        };
        let source_hz = u32::try_from(TICK_HZ).map_err(|_| TimerError::InvalidFrequency)?;
        let period = config.period_ticks(source_hz).map_err(|e| match e {
            ConfigError::ZeroDivision => TimerError::InvalidDivision,
            _ => TimerError::InvalidFrequency,
        })?;
        // The ticker counts source ticks, so apply the prescaler back
        let period = Duration::from_ticks(u64::from(period) * u64::from(clock_division));

        let bit = 1u8 << timer_id;
        if IN_USE.fetch_or(bit, Ordering::AcqRel) & bit != 0 {
            return Err(TimerError::InUse);
        }

        let token = tick_task(timer_id, period, target).map_err(|_| {
            IN_USE.fetch_and(!bit, Ordering::AcqRel);
            TimerError::Unavailable
        })?;
        self.spawner.spawn(token);
        Ok(())
    }
}

/// Calls the target once per period, forever
#[embassy_executor::task(pool_size = 4)]
async fn tick_task(timer_id: u8, period: Duration, target: &'static dyn TickTarget) {
    #[cfg(feature = "defmt")]
    defmt::info!("Tick timer {} running, period {} us", timer_id, period.as_micros());
    #[cfg(not(feature = "defmt"))]
    let _ = timer_id;

    let mut ticker = Ticker::every(period);
    loop {
        ticker.next().await;
        target.on_tick();
    }
}

//! Periodic tick source abstractions
//!
//! A tick timer fires at a fixed frequency and, on every tick, calls
//! [`TickTarget::on_tick`] on the context it was started with. The handler
//! runs in interrupt (or interrupt-like) context, so targets must only do
//! constant-time signalling work.

/// Receiver of timer ticks
///
/// This is the context reference handed to the timer at registration
/// instead of a bare function pointer.
pub trait TickTarget: Sync {
    /// Called once per tick. Must not block.
    fn on_tick(&self);
}

/// Errors from tick timer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerError {
    /// Timer id does not name a timer on this chip
    InvalidTimer,
    /// Clock division out of range for this timer
    InvalidDivision,
    /// Requested frequency cannot be produced from the divided clock
    InvalidFrequency,
    /// Timer is already running for another target
    InUse,
    /// Runtime could not start the tick handler
    Unavailable,
}

/// Periodic tick source
///
/// Configures one timer peripheral and attaches `target` as its tick
/// handler. Valid ranges for every parameter are chip-specific; a
/// configuration the chip cannot honor is rejected before anything is
/// started.
pub trait TickTimer {
    /// Configure and start a timer
    ///
    /// # Arguments
    /// - `timer_id`: Which timer peripheral (or alarm slot) to use
    /// - `clock_division`: Prescaler applied to the timer source clock
    /// - `tick_hz`: Tick frequency in Hz
    /// - `target`: Context signalled on every tick
    fn start(
        &mut self,
        timer_id: u8,
        clock_division: u32,
        tick_hz: u32,
        target: &'static dyn TickTarget,
    ) -> Result<(), TimerError>;
}

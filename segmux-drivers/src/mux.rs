//! Multiplexing scheduler
//!
//! One [`Multiplexer`] owns the pins of a display and lights one digit per
//! timer tick. Producers never touch it directly: they write the next
//! string into a [`MuxChannel`], a single-slot mailbox that the
//! multiplexer drains between ticks.
//!
//! ```text
//! producer ──display()──▶ MuxChannel ◀──on_tick()── tick timer
//!                             │
//!                             ▼
//!                   Multiplexer::run() ──▶ SegmentRenderer ──▶ pins
//! ```
//!
//! The mailbox is lossy: a string that is overwritten before the
//! multiplexer wakes is never shown. Only the latest request matters for a
//! display, so there is no queue and `display()` never waits.

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;

use segmux_core::config::{ConfigError, TimerConfig};
use segmux_core::{DisplayText, DotBlinker, Frame, MuxCursor};
use segmux_hal::{OutputPin, TickTarget, TickTimer, TimerError};

use crate::segment::SegmentRenderer;

/// Errors starting the multiplexer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MuxError {
    /// Timer parameters rejected before reaching the hardware
    Config(ConfigError),
    /// Timer peripheral refused the configuration
    Timer(TimerError),
}

impl From<ConfigError> for MuxError {
    fn from(e: ConfigError) -> Self {
        MuxError::Config(e)
    }
}

impl From<TimerError> for MuxError {
    fn from(e: TimerError) -> Self {
        MuxError::Timer(e)
    }
}

/// Hand-off between producers, the tick timer and the multiplexer
///
/// Usually a `static`, shared by the application (calling
/// [`display`](Self::display)) and the timer (calling
/// [`on_tick`](TickTarget::on_tick)).
pub struct MuxChannel<M: RawMutex> {
    /// Latest requested string, replaced on every write
    pending: Signal<M, DisplayText>,
    /// Set by the timer, cleared when the multiplexer refreshes
    tick: Signal<M, ()>,
}

impl<M: RawMutex> Default for MuxChannel<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex> MuxChannel<M> {
    pub const fn new() -> Self {
        Self {
            pending: Signal::new(),
            tick: Signal::new(),
        }
    }

    /// Request a new string
    ///
    /// Keeps the first [`SEG_MAX_STRING_SIZE`](segmux_core::SEG_MAX_STRING_SIZE)
    /// characters, replaces any string not yet picked up, and wakes the
    /// multiplexer. Never blocks; safe from interrupt context.
    pub fn display(&self, text: &str) {
        self.display_text(DisplayText::new(text));
    }

    /// Request an already-bounded string
    pub fn display_text(&self, text: DisplayText) {
        self.pending.signal(text);
    }

    /// Check if a string is waiting to be picked up
    pub fn has_pending(&self) -> bool {
        self.pending.signaled()
    }

    /// Ask for one refresh step
    pub fn tick(&self) {
        self.tick.signal(());
    }
}

impl<M: RawMutex + Sync> TickTarget for MuxChannel<M> {
    fn on_tick(&self) {
        self.tick();
    }
}

/// Multiplexing scheduler for one display
pub struct Multiplexer<'a, P, M: RawMutex> {
    renderer: SegmentRenderer<'a, P>,
    channel: &'a MuxChannel<M>,
    text: DisplayText,
    frame: Frame,
    cursor: MuxCursor,
    dots: DotBlinker,
}

impl<'a, P: OutputPin, M: RawMutex> Multiplexer<'a, P, M> {
    /// Create a multiplexer showing a blank string
    ///
    /// Nothing refreshes until something calls [`MuxChannel::tick`]; see
    /// [`init`](Self::init) to have a timer do it.
    pub fn new(
        renderer: SegmentRenderer<'a, P>,
        channel: &'a MuxChannel<M>,
        dot_blink_ticks: u16,
    ) -> Self {
        let cursor = MuxCursor::new(renderer.digit_count());
        Self {
            renderer,
            channel,
            text: DisplayText::default(),
            frame: Frame::default(),
            cursor,
            dots: DotBlinker::new(dot_blink_ticks),
        }
    }

    /// Start a tick timer for `channel` and create the multiplexer
    ///
    /// The caller still has to drive [`run`](Self::run) from a task. If the
    /// timer cannot be started the display never refreshes; nothing is
    /// retried here.
    pub fn init<T: TickTimer>(
        renderer: SegmentRenderer<'a, P>,
        channel: &'static MuxChannel<M>,
        timer: &mut T,
        config: &TimerConfig,
        dot_blink_ticks: u16,
    ) -> Result<Self, MuxError>
    where
        M: Sync + 'static,
    {
        config.validate()?;
        timer.start(
            config.timer_id,
            config.clock_division,
            config.tick_hz,
            channel,
        )?;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Multiplexer: timer {} started at {} Hz (div {})",
            config.timer_id,
            config.tick_hz,
            config.clock_division
        );

        Ok(Self::new(renderer, channel, dot_blink_ticks))
    }

    /// Refresh forever
    pub async fn run(&mut self) -> ! {
        loop {
            self.poll().await;
        }
    }

    /// Wait for the next tick or string and handle it
    ///
    /// A new string alone is only adopted; its first digit is lit by the
    /// following tick.
    pub async fn poll(&mut self) {
        let channel = self.channel;
        match select(channel.tick.wait(), channel.pending.wait()).await {
            Either::First(()) => self.refresh(),
            Either::Second(text) => self.adopt(text),
        }
    }

    /// One refresh step: light the next digit position
    pub fn refresh(&mut self) {
        if let Some(text) = self.channel.pending.try_take() {
            self.adopt(text);
        }

        let position = self.cursor.advance();
        let cell = self.frame.cell(position as usize);

        self.renderer.clear_all_digits();
        self.renderer.render_glyph(cell.glyph);
        if cell.dot && self.dots.is_on() {
            self.renderer.dot_on();
        } else {
            self.renderer.dot_off();
        }
        self.renderer.set_digit(position);

        self.dots.tick();
    }

    /// Make `text` the active string, starting over at position 0
    pub fn adopt(&mut self, text: DisplayText) {
        #[cfg(feature = "defmt")]
        defmt::debug!("Multiplexer: showing \"{}\"", text.as_str());

        self.frame = text.layout();
        self.text = text;
        self.cursor.reset();
    }

    /// Active string
    pub fn text(&self) -> &DisplayText {
        &self.text
    }

    /// Position the next refresh lights
    pub fn position(&self) -> u8 {
        self.cursor.position()
    }

    /// Renderer, read-only
    pub fn renderer(&self) -> &SegmentRenderer<'a, P> {
        &self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::tests::MockPin;
    use core::cell::Cell;
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
    use segmux_core::{Glyph, Levels, Wiring, SEGMENT_COUNT};

    type Channel = MuxChannel<CriticalSectionRawMutex>;

    /// Mock tick timer recording its configuration
    #[derive(Default)]
    struct MockTimer {
        started: Option<(u8, u32, u32)>,
        target: Option<&'static dyn TickTarget>,
        fail_with: Option<TimerError>,
    }

    impl TickTimer for MockTimer {
        fn start(
            &mut self,
            timer_id: u8,
            clock_division: u32,
            tick_hz: u32,
            target: &'static dyn TickTarget,
        ) -> Result<(), TimerError> {
            if let Some(e) = self.fail_with {
                return Err(e);
            }
            self.started = Some((timer_id, clock_division, tick_hz));
            self.target = Some(target);
            Ok(())
        }
    }

    /// Shared record of which digit lines are asserted
    struct DigitBus {
        on_level: bool,
        lit: Cell<u8>,
        peak: Cell<u32>,
    }

    /// Pin reporting every write to a `DigitBus`; segment lines have no index
    struct BusPin<'a> {
        bus: &'a DigitBus,
        index: Option<u8>,
        high: bool,
    }

    impl BusPin<'_> {
        fn record(&mut self, high: bool) {
            self.high = high;
            if let Some(index) = self.index {
                let bit = 1 << index;
                let lit = if high == self.bus.on_level {
                    self.bus.lit.get() | bit
                } else {
                    self.bus.lit.get() & !bit
                };
                self.bus.lit.set(lit);
                self.bus.peak.set(self.bus.peak.get().max(lit.count_ones()));
            }
        }
    }

    impl OutputPin for BusPin<'_> {
        fn set_high(&mut self) {
            self.record(true);
        }

        fn set_low(&mut self) {
            self.record(false);
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    fn tick<P: OutputPin>(mux: &mut Multiplexer<'_, P, CriticalSectionRawMutex>) {
        mux.channel.tick();
        block_on(mux.poll());
    }

    #[test]
    fn test_four_digit_scenario() {
        static CHANNEL: Channel = MuxChannel::new();
        let mut digits = [MockPin::default(); 4];
        let mut segments = [MockPin::default(); SEGMENT_COUNT];
        let renderer =
            SegmentRenderer::new(&mut digits, &mut segments, Wiring::CommonCathode).unwrap();
        let mut mux = Multiplexer::new(renderer, &CHANNEL, 0);

        CHANNEL.display("1234");
        block_on(mux.poll());
        assert_eq!(mux.text().as_str(), "1234");
        // Adopted but not yet rendered
        assert_eq!(mux.renderer().selected_digits(), 0);

        for (position, c) in "1234".chars().enumerate() {
            tick(&mut mux);
            assert_eq!(mux.renderer().selected_digits(), 1 << position);
            assert_eq!(mux.renderer().lit_segments(), Glyph::from_char(c));
            // Common cathode: only the active digit is driven high
            for (index, pin) in mux.renderer().digit_pins().iter().enumerate() {
                assert_eq!(pin.is_set_high(), index == position);
            }
        }
    }

    #[test]
    fn test_positions_wrap_in_order() {
        static CHANNEL: Channel = MuxChannel::new();
        let mut digits = [MockPin::default(); 3];
        let mut segments = [MockPin::default(); SEGMENT_COUNT];
        let renderer =
            SegmentRenderer::new(&mut digits, &mut segments, Wiring::CommonAnode).unwrap();
        let mut mux = Multiplexer::new(renderer, &CHANNEL, 0);

        let mut visited = [0u8; 7];
        for slot in visited.iter_mut() {
            tick(&mut mux);
            let mask = mux.renderer().selected_digits();
            assert_eq!(mask.count_ones(), 1);
            *slot = mask.trailing_zeros() as u8;
        }
        assert_eq!(visited, [0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn test_last_write_wins() {
        static CHANNEL: Channel = MuxChannel::new();
        let mut digits = [MockPin::default(); 2];
        let mut segments = [MockPin::default(); SEGMENT_COUNT];
        let renderer =
            SegmentRenderer::new(&mut digits, &mut segments, Wiring::CommonCathode).unwrap();
        let mut mux = Multiplexer::new(renderer, &CHANNEL, 0);

        CHANNEL.display("42");
        CHANNEL.display("7");
        assert!(CHANNEL.has_pending());
        block_on(mux.poll());
        assert!(!CHANNEL.has_pending());
        assert_eq!(mux.text().as_str(), "7");

        tick(&mut mux);
        assert_eq!(mux.renderer().lit_segments(), Glyph::from_char('7'));
        tick(&mut mux);
        assert_eq!(mux.renderer().lit_segments(), Glyph::BLANK);
    }

    #[test]
    fn test_new_string_restarts_at_zero() {
        static CHANNEL: Channel = MuxChannel::new();
        let mut digits = [MockPin::default(); 4];
        let mut segments = [MockPin::default(); SEGMENT_COUNT];
        let renderer =
            SegmentRenderer::new(&mut digits, &mut segments, Wiring::CommonCathode).unwrap();
        let mut mux = Multiplexer::new(renderer, &CHANNEL, 0);

        CHANNEL.display("1234");
        tick(&mut mux);
        tick(&mut mux);
        assert_eq!(mux.position(), 2);

        // String and tick arrive together: adopted, then digit 0 lit
        CHANNEL.display("56");
        tick(&mut mux);
        assert_eq!(mux.text().as_str(), "56");
        assert_eq!(mux.renderer().selected_digits(), 0b0001);
        assert_eq!(mux.renderer().lit_segments(), Glyph::from_char('5'));
        assert_eq!(mux.position(), 1);
    }

    #[test]
    fn test_long_string_truncated() {
        static CHANNEL: Channel = MuxChannel::new();
        let mut digits = [MockPin::default(); 8];
        let mut segments = [MockPin::default(); SEGMENT_COUNT];
        let renderer =
            SegmentRenderer::new(&mut digits, &mut segments, Wiring::CommonCathode).unwrap();
        let mut mux = Multiplexer::new(renderer, &CHANNEL, 0);

        CHANNEL.display("0123456789AB");
        block_on(mux.poll());
        assert_eq!(mux.text().as_str(), "012345678");
    }

    #[test]
    fn test_steady_and_blinking_dots() {
        static CHANNEL: Channel = MuxChannel::new();
        let mut digits = [MockPin::default(); 1];
        let mut segments = [MockPin::default(); SEGMENT_COUNT];
        let renderer =
            SegmentRenderer::new(&mut digits, &mut segments, Wiring::CommonCathode).unwrap();
        let mut mux = Multiplexer::new(renderer, &CHANNEL, 2);

        CHANNEL.display("8.");
        let with_dot = Glyph::from_char('8').with_dot(true);
        let without_dot = Glyph::from_char('8');

        let mut seen = [Glyph::BLANK; 6];
        for glyph in seen.iter_mut() {
            tick(&mut mux);
            *glyph = mux.renderer().lit_segments();
        }
        assert_eq!(
            seen,
            [with_dot, with_dot, without_dot, without_dot, with_dot, with_dot]
        );
    }

    #[test]
    fn test_init_starts_timer() {
        static CHANNEL: Channel = MuxChannel::new();
        let mut digits = [MockPin::default(); 2];
        let mut segments = [MockPin::default(); SEGMENT_COUNT];
        let renderer =
            SegmentRenderer::new(&mut digits, &mut segments, Wiring::CommonCathode).unwrap();

        let mut timer = MockTimer::default();
        let config = TimerConfig {
            timer_id: 2,
            clock_division: 8,
            tick_hz: 500,
        };
        let mut mux = Multiplexer::init(renderer, &CHANNEL, &mut timer, &config, 0).unwrap();
        assert_eq!(timer.started, Some((2, 8, 500)));

        CHANNEL.display("H");
        block_on(mux.poll());

        // The timer's handler is the only thing driving this refresh
        timer.target.unwrap().on_tick();
        block_on(mux.poll());
        assert_eq!(mux.renderer().lit_segments(), Glyph::from_char('H'));
        assert_eq!(mux.renderer().selected_digits(), 0b01);
    }

    #[test]
    fn test_init_reports_failures() {
        static CHANNEL: Channel = MuxChannel::new();
        let mut digits = [MockPin::default(); 2];
        let mut segments = [MockPin::default(); SEGMENT_COUNT];

        let mut timer = MockTimer::default();
        let bad = TimerConfig {
            tick_hz: 0,
            ..TimerConfig::default()
        };
        let renderer =
            SegmentRenderer::new(&mut digits, &mut segments, Wiring::CommonCathode).unwrap();
        let result = Multiplexer::init(renderer, &CHANNEL, &mut timer, &bad, 0);
        assert_eq!(
            result.err(),
            Some(MuxError::Config(ConfigError::ZeroFrequency))
        );
        assert_eq!(timer.started, None);

        let mut busy = MockTimer {
            fail_with: Some(TimerError::InUse),
            ..MockTimer::default()
        };
        let renderer =
            SegmentRenderer::new(&mut digits, &mut segments, Wiring::CommonCathode).unwrap();
        let result = Multiplexer::init(renderer, &CHANNEL, &mut busy, &TimerConfig::default(), 0);
        assert_eq!(result.err(), Some(MuxError::Timer(TimerError::InUse)));
    }

    #[test]
    fn test_never_two_digits_at_once() {
        static CHANNEL: Channel = MuxChannel::new();

        for wiring in [Wiring::CommonCathode, Wiring::CommonAnode] {
            let levels = Levels::new(wiring);
            let bus = DigitBus {
                on_level: levels.digit_on,
                lit: Cell::new(0),
                peak: Cell::new(0),
            };
            let mut digits: [BusPin<'_>; 4] = core::array::from_fn(|i| BusPin {
                bus: &bus,
                index: Some(i as u8),
                high: levels.digit_off,
            });
            let mut segments: [BusPin<'_>; SEGMENT_COUNT] = core::array::from_fn(|_| BusPin {
                bus: &bus,
                index: None,
                high: levels.segment_off,
            });
            let renderer = SegmentRenderer::new(&mut digits, &mut segments, wiring).unwrap();
            let mut mux = Multiplexer::new(renderer, &CHANNEL, 2);

            CHANNEL.display("8.8.8.8.");
            for i in 0..20 {
                if i == 9 {
                    CHANNEL.display("12.34");
                }
                tick(&mut mux);
                assert_eq!(bus.lit.get().count_ones(), 1);
            }
            // Checked after every single pin write, not only between ticks
            assert_eq!(bus.peak.get(), 1);
        }
    }
}

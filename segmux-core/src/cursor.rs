//! Multiplex cursor and dot-blink counter
//!
//! Pure state advanced once per timer tick by the multiplexer.

/// Which digit position the next refresh lights
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MuxCursor {
    next: u8,
    digit_count: u8,
}

impl MuxCursor {
    /// Create a cursor for `digit_count` positions, starting at 0
    ///
    /// A zero count is treated as one position.
    pub const fn new(digit_count: u8) -> Self {
        Self {
            next: 0,
            digit_count: if digit_count == 0 { 1 } else { digit_count },
        }
    }

    /// Position the next [`advance`](Self::advance) returns
    pub const fn position(&self) -> u8 {
        self.next
    }

    pub const fn digit_count(&self) -> u8 {
        self.digit_count
    }

    /// Restart the cycle at position 0
    pub fn reset(&mut self) {
        self.next = 0;
    }

    /// Take the current position and move to the next one, wrapping
    pub fn advance(&mut self) -> u8 {
        let position = self.next;
        self.next = (self.next + 1) % self.digit_count;
        position
    }
}

/// Periodic counter gating the decimal points
///
/// Dots are shown for `half_period` ticks, hidden for `half_period`
/// ticks, and so on. A half period of 0 keeps dots steady.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DotBlinker {
    counter: u32,
    half_period: u16,
}

impl DotBlinker {
    pub const fn new(half_period: u16) -> Self {
        Self {
            counter: 0,
            half_period,
        }
    }

    /// Steady dots, no blinking
    pub const fn steady() -> Self {
        Self::new(0)
    }

    /// Whether dots are in their visible phase
    pub const fn is_on(&self) -> bool {
        self.half_period == 0 || self.counter < self.half_period as u32
    }

    /// Count one tick
    pub fn tick(&mut self) {
        if self.half_period == 0 {
            return;
        }
        self.counter = (self.counter + 1) % (2 * self.half_period as u32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_visits_positions_in_order() {
        let mut cursor = MuxCursor::new(4);
        let visited: [u8; 9] = core::array::from_fn(|_| cursor.advance());
        assert_eq!(visited, [0, 1, 2, 3, 0, 1, 2, 3, 0]);
    }

    #[test]
    fn test_cursor_reset() {
        let mut cursor = MuxCursor::new(4);
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.position(), 2);

        cursor.reset();
        assert_eq!(cursor.advance(), 0);
    }

    #[test]
    fn test_single_digit_cursor() {
        let mut cursor = MuxCursor::new(1);
        assert_eq!(cursor.advance(), 0);
        assert_eq!(cursor.advance(), 0);

        let cursor = MuxCursor::new(0);
        assert_eq!(cursor.digit_count(), 1);
    }

    #[test]
    fn test_steady_dots() {
        let mut blinker = DotBlinker::steady();
        for _ in 0..100 {
            assert!(blinker.is_on());
            blinker.tick();
        }
    }

    #[test]
    fn test_blinking_dots() {
        let mut blinker = DotBlinker::new(3);
        let mut phases = [false; 12];
        for phase in phases.iter_mut() {
            *phase = blinker.is_on();
            blinker.tick();
        }
        assert_eq!(
            phases,
            [true, true, true, false, false, false, true, true, true, false, false, false]
        );
    }
}

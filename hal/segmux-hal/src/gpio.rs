//! GPIO pin abstractions
//!
//! Provides the output pin trait used for segment and digit-select lines.

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct LevelPin {
        high: bool,
        writes: u8,
    }

    impl OutputPin for LevelPin {
        fn set_high(&mut self) {
            self.high = true;
            self.writes += 1;
        }

        fn set_low(&mut self) {
            self.high = false;
            self.writes += 1;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_set_state_writes_once() {
        let mut pin = LevelPin {
            high: false,
            writes: 0,
        };

        pin.set_state(true);
        assert!(pin.is_set_high());
        assert!(!pin.is_set_low());

        pin.set_state(false);
        assert!(pin.is_set_low());
        assert_eq!(pin.writes, 2);
    }
}

//! Test utilities for driving a button through mock hardware

pub mod gestures {
    //! Button gesture simulation against `MockInput` and `MockClock`

    use crate::hal::mock::{MockClock, MockInput};
    use crate::types::{ButtonConfig, PinLevel};

    /// Plays gestures on a mock input, polling once per simulated millisecond
    pub struct GestureSim<'a> {
        input: &'a MockInput,
        clock: &'a MockClock,
        pressed_level: PinLevel,
        settle_ms: u64,
    }

    impl<'a> GestureSim<'a> {
        /// Gestures shaped for `config` (polarity and timing)
        pub fn new(input: &'a MockInput, clock: &'a MockClock, config: &ButtonConfig) -> Self {
            Self {
                input,
                clock,
                pressed_level: config.pressed_level(),
                settle_ms: config.debounce.as_millis() * 2,
            }
        }

        /// Hold `level` for `ms`, calling `poll` every millisecond
        pub fn hold<F: FnMut()>(&self, level: PinLevel, ms: u64, mut poll: F) {
            self.input.set_level(level);
            for _ in 0..ms {
                poll();
                self.clock.advance(1);
            }
        }

        pub fn press_for<F: FnMut()>(&self, ms: u64, poll: F) {
            self.hold(self.pressed_level, ms, poll);
        }

        pub fn release_for<F: FnMut()>(&self, ms: u64, poll: F) {
            self.hold(self.pressed_level.inverted(), ms, poll);
        }

        /// Press for `hold_ms`, then release long enough to settle
        pub fn tap<F: FnMut()>(&self, hold_ms: u64, mut poll: F) {
            self.press_for(hold_ms, &mut poll);
            self.release_for(self.settle_ms, &mut poll);
        }

        /// A press comfortably inside the short-press window
        pub fn short_press<F: FnMut()>(&self, poll: F) {
            self.tap(self.settle_ms * 2, poll);
        }

        /// Contact chatter: `count` press/release pairs of `ms` each
        pub fn bounce<F: FnMut()>(&self, count: u32, ms: u64, mut poll: F) {
            for _ in 0..count {
                self.press_for(ms, &mut poll);
                self.release_for(ms, &mut poll);
            }
        }

        /// Let the input sit released long enough to settle
        pub fn idle<F: FnMut()>(&self, poll: F) {
            self.release_for(self.settle_ms, poll);
        }
    }
}

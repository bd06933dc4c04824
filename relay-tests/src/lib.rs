//! Host integration tests for the button-driven relay
//!
//! Run with `cargo test -p relay-tests`.

use relay_core::hal::mock::{MockClock, MockInput, MockOutput};
use relay_core::{ButtonConfig, PinLevel};

#[cfg(test)]
mod relay_scenarios;
#[cfg(test)]
mod toggle_properties;

/// Button input pin of the reference board
pub const BUTTON_PIN: u8 = 2;
/// Relay output pin of the reference board
pub const RELAY_PIN: u8 = 13;

/// Mock hardware for one relay wired like the reference board
pub struct Bench {
    pub input: MockInput,
    pub output: MockOutput,
    pub clock: MockClock,
    pub config: ButtonConfig,
}

impl Bench {
    pub fn new() -> Self {
        Self::with_config(ButtonConfig::default())
    }

    pub fn with_config(config: ButtonConfig) -> Self {
        Self {
            input: MockInput::new(BUTTON_PIN, config.idle_level()),
            output: MockOutput::new(RELAY_PIN),
            clock: MockClock::new(),
            config,
        }
    }

    /// Levels written to the relay pin so far
    pub fn writes(&self) -> Vec<PinLevel> {
        self.output.writes().iter().copied().collect()
    }
}

impl Default for Bench {
    fn default() -> Self {
        Self::new()
    }
}

#![cfg_attr(not(feature = "std"), no_std)]

//! # Relay Core
//!
//! Relay output toggled by a debounced push button, for polled
//! run-to-completion firmware loops. Hardware access goes through the
//! traits in [`hal`] so the same logic runs on embedded-hal pins or on the
//! mocks in `hal::mock`.

pub mod types;
pub mod button;
pub mod relay;
pub mod hal;

#[cfg(feature = "test-utils")]
pub mod test_utils;


pub use types::*;
pub use button::*;
pub use relay::*;
pub use hal::{*, Instant, Duration};

/// Relay library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Button timing suited to common tactile switches
pub fn default_button_config() -> ButtonConfig {
    ButtonConfig::default()
}

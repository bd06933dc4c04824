#![no_std]

//! Firmware library: board wiring, time driver and the relay task

// Define simple logging macros when defmt is not available
#[cfg(not(feature = "defmt"))]
macro_rules! info {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "defmt"))]
macro_rules! warn {
    ($($arg:tt)*) => {};
}

pub use embassy_executor::Spawner;
pub use embassy_time::Duration;

pub use relay_core::*;

pub use crate::board::*;
pub use crate::tasks::*;

pub mod board;
pub mod time_driver;

/// How often the control loop polls the relay
pub const POLL_PERIOD: Duration = Duration::from_millis(1);

// Embassy tasks module
pub mod tasks {
    use super::*;
    use embassy_time::Ticker;

    #[cfg(feature = "defmt")]
    use defmt::{info, warn};

    /// Board relay type
    pub type BoardRelay = Relay<EmbeddedHalInput<GpioInput>, EmbeddedHalOutput<GpioOutput>, SystemClock>;

    /// Control loop: poll the relay every `POLL_PERIOD`
    ///
    /// The time driver has no alarm interrupt, so every pending timer spins
    /// the executor until its deadline. This must stay the only task that
    /// waits on a timer, otherwise its wait would stall the poll.
    #[embassy_executor::task]
    pub async fn relay_task(button: GpioInput, output: GpioOutput) {
        let relay = Relay::with_config(
            EmbeddedHalInput::new(button),
            SystemClock,
            EmbeddedHalOutput::new(output),
            default_button_config(),
        );
        let mut relay: BoardRelay = match relay {
            Ok(relay) => relay,
            Err(_e) => {
                warn!("relay init failed: {}", _e);
                return;
            }
        };
        info!("relay task started");

        let mut ticker = Ticker::every(POLL_PERIOD);
        loop {
            match relay.process() {
                Ok(true) => info!("button: relay {}", if relay.status() { "ON" } else { "OFF" }),
                Ok(false) => {}
                Err(_e) => warn!("relay poll failed: {}", _e),
            }
            ticker.next().await;
        }
    }
}

//! Button-toggled relay output

use crate::button::Button;
use crate::hal::{ButtonInput, Clock, HalError, RelayOutput};
use crate::types::{ButtonConfig, ButtonEvent, PinLevel};

/// One relay output toggled by one debounced button
///
/// `status` always equals the level last written to the output: it is only
/// updated after the write succeeds.
pub struct Relay<I, O, C> {
    status: bool,
    output: O,
    button: Button<I, C>,
}

impl<I, O, C> Relay<I, O, C>
where
    I: ButtonInput,
    O: RelayOutput,
    C: Clock,
{
    /// Create a relay with the default button timing
    pub fn new(input: I, clock: C, output: O) -> Result<Self, HalError> {
        Self::with_config(input, clock, output, ButtonConfig::default())
    }

    /// Configure the output, start OFF and listen for short releases
    ///
    /// Fails with `HalError::InvalidConfig` before touching the output if
    /// `config` is out of range.
    pub fn with_config(input: I, clock: C, mut output: O, config: ButtonConfig) -> Result<Self, HalError> {
        config.validate().map_err(|_| HalError::InvalidConfig)?;
        output.configure().map_err(Into::into)?;

        let mut button = Button::new(input, clock, config);
        button.subscribe(ButtonEvent::ShortRelease);

        #[cfg(feature = "defmt")]
        defmt::info!("relay ready, status OFF");

        Ok(Self {
            status: false,
            output,
            button,
        })
    }

    /// Current logical state (true = ON)
    pub fn status(&self) -> bool {
        self.status
    }

    /// Level currently driven on the output
    pub fn level(&self) -> PinLevel {
        PinLevel::from(self.status)
    }

    /// Invert the state and drive the output accordingly
    pub fn switch_status(&mut self) -> Result<(), HalError> {
        self.set_status(!self.status)
    }

    /// Drive the output to `status`, even if it already holds that value
    pub fn set_status(&mut self, status: bool) -> Result<(), HalError> {
        self.output.write(PinLevel::from(status)).map_err(Into::into)?;
        self.status = status;

        #[cfg(feature = "defmt")]
        defmt::debug!("relay {}", if status { "ON" } else { "OFF" });

        Ok(())
    }

    /// Poll the button; call on every loop iteration
    ///
    /// Returns true when a short release toggled the relay.
    pub fn process(&mut self) -> Result<bool, HalError> {
        match self.button.poll()? {
            Some(ButtonEvent::ShortRelease) => {
                self.on_button_short_release()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn on_button_short_release(&mut self) -> Result<(), HalError> {
        self.switch_status()
    }

    pub fn button(&self) -> &Button<I, C> {
        &self.button
    }

    /// Access the button, e.g. to subscribe further events
    ///
    /// Events other than `ShortRelease` are consumed by `process` without
    /// effect on the relay.
    pub fn button_mut(&mut self) -> &mut Button<I, C> {
        &mut self.button
    }

    /// Tear down and give the peripherals back
    pub fn release(self) -> (I, O, C) {
        let (input, clock) = self.button.release();
        (input, self.output, clock)
    }
}

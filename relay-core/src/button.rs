//! Polled, debounced push button with gesture detection

use crate::hal::{ButtonInput, Clock, HalError, Instant};
use crate::types::{ButtonConfig, ButtonEvent, EventMask};

/// Debounced button reader
///
/// `poll` must be called every loop iteration. A raw level change is only
/// accepted after it has held for `config.debounce`; any change inside that
/// window restarts it. Hold time is measured between the start of the
/// accepted press edge and the start of the accepted release edge.
pub struct Button<I, C> {
    input: I,
    clock: C,
    config: ButtonConfig,
    subscriptions: EventMask,
    raw_pressed: bool,
    raw_changed_at: Instant,
    pressed: bool,
    pressed_at: Instant,
    long_reported: bool,
}

impl<I, C> Button<I, C>
where
    I: ButtonInput,
    C: Clock,
{
    /// Create a released button with no subscriptions
    pub fn new(input: I, clock: C, config: ButtonConfig) -> Self {
        let now = clock.now();
        Self {
            input,
            clock,
            config,
            subscriptions: EventMask::empty(),
            raw_pressed: false,
            raw_changed_at: now,
            pressed: false,
            pressed_at: now,
            long_reported: false,
        }
    }

    pub fn subscribe(&mut self, event: ButtonEvent) {
        self.subscriptions.insert(event);
    }

    pub fn unsubscribe(&mut self, event: ButtonEvent) {
        self.subscriptions.remove(event);
    }

    pub fn is_subscribed(&self, event: ButtonEvent) -> bool {
        self.subscriptions.contains(event)
    }

    pub fn subscriptions(&self) -> EventMask {
        self.subscriptions
    }

    /// Debounced state
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn config(&self) -> &ButtonConfig {
        &self.config
    }

    /// Sample the input and advance the debounce state machine
    ///
    /// Returns the event completed by this sample if it is subscribed.
    /// Unsubscribed events still update the internal state.
    pub fn poll(&mut self) -> Result<Option<ButtonEvent>, HalError> {
        let now = self.clock.now();
        let high = self.input.is_high().map_err(Into::into)?;
        let raw_pressed = high != self.config.active_low;

        if raw_pressed != self.raw_pressed {
            self.raw_pressed = raw_pressed;
            self.raw_changed_at = now;
            return Ok(None);
        }

        let event = if self.raw_pressed != self.pressed {
            if now.saturating_duration_since(self.raw_changed_at) < self.config.debounce {
                return Ok(None);
            }
            Some(self.accept_edge())
        } else if self.pressed
            && !self.long_reported
            && now.saturating_duration_since(self.pressed_at) >= self.config.long_press
        {
            self.long_reported = true;
            Some(ButtonEvent::LongPress)
        } else {
            None
        };

        #[cfg(feature = "defmt")]
        if let Some(event) = event {
            defmt::trace!("button event: {}", event);
        }

        Ok(event.filter(|e| self.subscriptions.contains(*e)))
    }

    fn accept_edge(&mut self) -> ButtonEvent {
        self.pressed = self.raw_pressed;
        if self.pressed {
            self.pressed_at = self.raw_changed_at;
            self.long_reported = false;
            return ButtonEvent::Press;
        }

        let held = self.raw_changed_at.saturating_duration_since(self.pressed_at);
        if self.long_reported || held >= self.config.long_press {
            ButtonEvent::LongRelease
        } else {
            ButtonEvent::ShortRelease
        }
    }

    /// Give the input and clock back
    pub fn release(self) -> (I, C) {
        (self.input, self.clock)
    }
}

//! Core data types for the relay and its button

use crate::hal::Duration;

/// Electrical level of a digital pin
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinLevel {
    Low,
    High,
}

impl PinLevel {
    pub const fn is_high(&self) -> bool {
        matches!(self, PinLevel::High)
    }

    pub const fn is_low(&self) -> bool {
        matches!(self, PinLevel::Low)
    }

    /// Returns the other level
    pub const fn inverted(&self) -> PinLevel {
        match self {
            PinLevel::Low => PinLevel::High,
            PinLevel::High => PinLevel::Low,
        }
    }
}

impl From<bool> for PinLevel {
    fn from(high: bool) -> Self {
        if high {
            PinLevel::High
        } else {
            PinLevel::Low
        }
    }
}

impl From<PinLevel> for bool {
    fn from(level: PinLevel) -> Self {
        level.is_high()
    }
}

/// Gestures reported by a debounced button
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Debounced press
    Press,
    /// Release after a hold shorter than the long-press time
    ShortRelease,
    /// Hold reached the long-press time (reported once per press)
    LongPress,
    /// Release after a long press
    LongRelease,
}

impl ButtonEvent {
    pub const ALL: [ButtonEvent; 4] = [
        ButtonEvent::Press,
        ButtonEvent::ShortRelease,
        ButtonEvent::LongPress,
        ButtonEvent::LongRelease,
    ];

    const fn bit(&self) -> u8 {
        match self {
            ButtonEvent::Press => 1 << 0,
            ButtonEvent::ShortRelease => 1 << 1,
            ButtonEvent::LongPress => 1 << 2,
            ButtonEvent::LongRelease => 1 << 3,
        }
    }
}

/// Set of button events a subscriber wants reported
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EventMask(u8);

impl EventMask {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn all() -> Self {
        Self(0b1111)
    }

    pub fn insert(&mut self, event: ButtonEvent) {
        self.0 |= event.bit();
    }

    pub fn remove(&mut self, event: ButtonEvent) {
        self.0 &= !event.bit();
    }

    pub const fn contains(&self, event: ButtonEvent) -> bool {
        self.0 & event.bit() != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// Button timing and polarity
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ButtonConfig {
    /// Time the raw level must stay unchanged before it is accepted
    pub debounce: Duration,
    /// Hold time separating a short press from a long press
    pub long_press: Duration,
    /// Pressed reads LOW (pull-up wiring)
    pub active_low: bool,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(50),
            long_press: Duration::from_millis(1000),
            active_low: true,
        }
    }
}

impl ButtonConfig {
    /// Create a new configuration with validation
    pub fn new(debounce_ms: u64, long_press_ms: u64, active_low: bool) -> Result<Self, &'static str> {
        let config = Self {
            debounce: Duration::from_millis(debounce_ms),
            long_press: Duration::from_millis(long_press_ms),
            active_low,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the timing bounds; fields are public, so literals can bypass `new`
    pub fn validate(&self) -> Result<(), &'static str> {
        let debounce_ms = self.debounce.as_millis();
        let long_press_ms = self.long_press.as_millis();

        if debounce_ms == 0 || debounce_ms > 500 {
            return Err("Debounce must be between 1 and 500ms");
        }
        if long_press_ms <= debounce_ms {
            return Err("Long press must be longer than debounce");
        }
        if long_press_ms > 10_000 {
            return Err("Long press must be <= 10000ms");
        }
        Ok(())
    }

    /// Level the input reads while the button is released
    pub const fn idle_level(&self) -> PinLevel {
        if self.active_low {
            PinLevel::High
        } else {
            PinLevel::Low
        }
    }

    /// Level the input reads while the button is held
    pub const fn pressed_level(&self) -> PinLevel {
        self.idle_level().inverted()
    }
}

//! Hardware Abstraction Layer for the relay and its button

// Re-export time types based on feature
#[cfg(feature = "embassy-time")]
pub use embassy_time::{Duration, Instant};

#[cfg(not(feature = "embassy-time"))]
pub use self::mock_time::{Duration, Instant};

#[cfg(not(feature = "embassy-time"))]
mod mock_time {
    /// Millisecond instant used when embassy-time is not linked in
    #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
    pub struct Instant(u64);

    impl Instant {
        pub const fn from_millis(ms: u64) -> Self {
            Self(ms)
        }

        pub const fn as_millis(&self) -> u64 {
            self.0
        }

        pub fn saturating_duration_since(&self, earlier: Instant) -> Duration {
            Duration::from_millis(self.0.saturating_sub(earlier.0))
        }
    }

    impl core::ops::Add<Duration> for Instant {
        type Output = Instant;

        fn add(self, rhs: Duration) -> Instant {
            Instant(self.0 + rhs.as_millis())
        }
    }

    /// Millisecond duration used when embassy-time is not linked in
    #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
    pub struct Duration(u64);

    impl Duration {
        pub const fn from_millis(ms: u64) -> Self {
            Self(ms)
        }

        pub const fn as_millis(&self) -> u64 {
            self.0
        }
    }
}

use embedded_hal::digital::{InputPin, OutputPin};
use crate::types::PinLevel;

/// Error types for HAL operations
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError {
    /// GPIO operation failed
    GpioError,
    /// Hardware not initialized
    NotInitialized,
    /// Button timing out of range
    InvalidConfig,
}

#[cfg(feature = "std")]
impl core::fmt::Display for HalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HalError::GpioError => write!(f, "GPIO operation failed"),
            HalError::NotInitialized => write!(f, "Hardware not initialized"),
            HalError::InvalidConfig => write!(f, "Invalid configuration"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

/// Raw digital input the button is wired to
pub trait ButtonInput {
    type Error: Into<HalError>;

    /// Read the undebounced electrical level (true = HIGH)
    fn is_high(&mut self) -> Result<bool, Self::Error>;
}

/// Digital output driving the relay coil
pub trait RelayOutput {
    type Error: Into<HalError>;

    /// One-time setup of the line as a digital output
    fn configure(&mut self) -> Result<(), Self::Error>;

    /// Drive the line to the given level
    fn write(&mut self, level: PinLevel) -> Result<(), Self::Error>;
}

/// Monotonic millisecond time source
pub trait Clock {
    fn now(&self) -> Instant;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Clock backed by the embassy time driver
#[cfg(feature = "embassy-time")]
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

#[cfg(feature = "embassy-time")]
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Generic implementation for embedded-hal compatible input pins
pub struct EmbeddedHalInput<P> {
    pin: P,
}

impl<P> EmbeddedHalInput<P>
where
    P: InputPin,
{
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Give the pin back
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P> ButtonInput for EmbeddedHalInput<P>
where
    P: InputPin,
{
    type Error = HalError;

    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.pin.is_high().map_err(|_| HalError::GpioError)
    }
}

/// Generic implementation for embedded-hal compatible output pins
///
/// An embedded-hal output pin is already in output mode by type, so
/// `configure` only drives it low to match the relay's initial OFF state.
pub struct EmbeddedHalOutput<P> {
    pin: P,
}

impl<P> EmbeddedHalOutput<P>
where
    P: OutputPin,
{
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Give the pin back
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P> RelayOutput for EmbeddedHalOutput<P>
where
    P: OutputPin,
{
    type Error = HalError;

    fn configure(&mut self) -> Result<(), Self::Error> {
        self.pin.set_low().map_err(|_| HalError::GpioError)
    }

    fn write(&mut self, level: PinLevel) -> Result<(), Self::Error> {
        let result = match level {
            PinLevel::High => self.pin.set_high(),
            PinLevel::Low => self.pin.set_low(),
        };
        result.map_err(|_| HalError::GpioError)
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    //! Mock implementations for testing
    //!
    //! The HAL traits are implemented for shared references so a test can
    //! keep inspecting a mock after handing it to a `Relay`.

    use super::*;
    use core::cell::{Cell, RefCell};
    use heapless::Vec;

    /// Number of writes a `MockOutput` keeps in its log
    pub const WRITE_LOG_CAPACITY: usize = 128;

    /// Manually advanced clock
    #[derive(Default)]
    pub struct MockClock {
        now_ms: Cell<u64>,
    }

    impl MockClock {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn at(ms: u64) -> Self {
            Self { now_ms: Cell::new(ms) }
        }

        pub fn advance(&self, ms: u64) {
            self.now_ms.set(self.now_ms.get() + ms);
        }

        pub fn set(&self, ms: u64) {
            self.now_ms.set(ms);
        }

        pub fn millis(&self) -> u64 {
            self.now_ms.get()
        }
    }

    impl Clock for MockClock {
        fn now(&self) -> Instant {
            Instant::from_millis(self.now_ms.get())
        }
    }

    /// Input pin with a settable raw level
    pub struct MockInput {
        pin: u8,
        high: Cell<bool>,
        reads: Cell<u32>,
    }

    impl MockInput {
        /// New input idling at `level`
        pub fn new(pin: u8, level: PinLevel) -> Self {
            Self {
                pin,
                high: Cell::new(level.is_high()),
                reads: Cell::new(0),
            }
        }

        pub fn pin(&self) -> u8 {
            self.pin
        }

        pub fn set_level(&self, level: PinLevel) {
            self.high.set(level.is_high());
        }

        pub fn level(&self) -> PinLevel {
            PinLevel::from(self.high.get())
        }

        pub fn read_count(&self) -> u32 {
            self.reads.get()
        }
    }

    impl ButtonInput for &MockInput {
        type Error = HalError;

        fn is_high(&mut self) -> Result<bool, Self::Error> {
            self.reads.set(self.reads.get() + 1);
            Ok(self.high.get())
        }
    }

    /// Output pin that records every write
    pub struct MockOutput {
        pin: u8,
        configured: Cell<bool>,
        level: Cell<PinLevel>,
        failing: Cell<bool>,
        writes: RefCell<Vec<PinLevel, WRITE_LOG_CAPACITY>>,
    }

    impl MockOutput {
        pub fn new(pin: u8) -> Self {
            Self {
                pin,
                configured: Cell::new(false),
                level: Cell::new(PinLevel::Low),
                failing: Cell::new(false),
                writes: RefCell::new(Vec::new()),
            }
        }

        pub fn pin(&self) -> u8 {
            self.pin
        }

        pub fn is_configured(&self) -> bool {
            self.configured.get()
        }

        /// Current electrical level of the line
        pub fn level(&self) -> PinLevel {
            self.level.get()
        }

        /// Writes recorded so far, oldest first
        pub fn writes(&self) -> Vec<PinLevel, WRITE_LOG_CAPACITY> {
            self.writes.borrow().clone()
        }

        pub fn write_count(&self) -> usize {
            self.writes.borrow().len()
        }

        pub fn last_write(&self) -> Option<PinLevel> {
            self.writes.borrow().last().copied()
        }

        pub fn clear_writes(&self) {
            self.writes.borrow_mut().clear();
        }

        /// Make subsequent writes fail with `HalError::GpioError`
        pub fn set_failing(&self, failing: bool) {
            self.failing.set(failing);
        }
    }

    impl RelayOutput for &MockOutput {
        type Error = HalError;

        fn configure(&mut self) -> Result<(), Self::Error> {
            self.configured.set(true);
            self.level.set(PinLevel::Low);
            Ok(())
        }

        fn write(&mut self, level: PinLevel) -> Result<(), Self::Error> {
            if !self.configured.get() {
                return Err(HalError::NotInitialized);
            }
            if self.failing.get() {
                return Err(HalError::GpioError);
            }
            self.level.set(level);
            // Log is bounded; writes past capacity still change the level
            self.writes.borrow_mut().push(level).ok();
            Ok(())
        }
    }
}

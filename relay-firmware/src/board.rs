//! CH32V203 GPIO wiring for the relay board
//!
//! 64KB Flash / 20KB RAM. GPIO follows the F1-style CRL/CRH layout.

use core::convert::Infallible;
use core::ptr::{read_volatile, write_volatile};

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

const RCC_BASE: usize = 0x4002_1000;
const GPIOA_BASE: usize = 0x4001_0800;
const GPIOC_BASE: usize = 0x4001_1000;

/// RCC Register offsets
const RCC_APB2PCENR: usize = 0x18;
const RCC_IOPAEN: u32 = 1 << 2;
const RCC_IOPCEN: u32 = 1 << 4;

/// GPIO Register offsets
const GPIO_CRL: usize = 0x00;
const GPIO_CRH: usize = 0x04;
const GPIO_IDR: usize = 0x08;
const GPIO_BSHR: usize = 0x10;
const GPIO_BCR: usize = 0x14;

/// CNF/MODE nibbles
const MODE_INPUT_PULL: u32 = 0b1000;
const MODE_OUTPUT_PUSH_PULL_10MHZ: u32 = 0b0001;

/// Board pin assignment
pub mod pins {
    /// Push button input (PA2, to ground, internal pull-up)
    pub const BUTTON_PIN: u8 = 2;

    /// Relay driver output (PC13)
    pub const RELAY_PIN: u8 = 13;
}

/// Set the 4-bit CNF/MODE field of `pin`
unsafe fn set_pin_mode(port: usize, pin: u8, mode: u32) {
    let (reg, shift) = if pin < 8 {
        (port + GPIO_CRL, pin as u32 * 4)
    } else {
        (port + GPIO_CRH, (pin as u32 - 8) * 4)
    };
    let value = read_volatile(reg as *const u32);
    write_volatile(reg as *mut u32, (value & !(0xF << shift)) | (mode << shift));
}

/// Input pin with pull-up
pub struct GpioInput {
    port: usize,
    pin: u8,
}

impl GpioInput {
    fn pull_up(port: usize, pin: u8) -> Self {
        unsafe {
            set_pin_mode(port, pin, MODE_INPUT_PULL);
            // ODR bit selects pull-up in pull mode
            write_volatile((port + GPIO_BSHR) as *mut u32, 1 << pin);
        }
        Self { port, pin }
    }
}

impl ErrorType for GpioInput {
    type Error = Infallible;
}

impl InputPin for GpioInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let idr = unsafe { read_volatile((self.port + GPIO_IDR) as *const u32) };
        Ok(idr & (1 << self.pin) != 0)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

/// Push-pull output pin
pub struct GpioOutput {
    port: usize,
    pin: u8,
}

impl GpioOutput {
    fn push_pull(port: usize, pin: u8) -> Self {
        unsafe {
            set_pin_mode(port, pin, MODE_OUTPUT_PUSH_PULL_10MHZ);
        }
        Self { port, pin }
    }
}

impl ErrorType for GpioOutput {
    type Error = Infallible;
}

impl OutputPin for GpioOutput {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        unsafe { write_volatile((self.port + GPIO_BSHR) as *mut u32, 1 << self.pin) };
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        unsafe { write_volatile((self.port + GPIO_BCR) as *mut u32, 1 << self.pin) };
        Ok(())
    }
}

/// Pins the relay task needs
pub struct Board {
    pub button: GpioInput,
    pub relay: GpioOutput,
}

impl Board {
    /// Clock the GPIO ports and configure the board pins
    ///
    /// Call once at startup; a second call would alias the pins.
    pub fn init() -> Self {
        unsafe {
            let enr = (RCC_BASE + RCC_APB2PCENR) as *mut u32;
            write_volatile(enr, read_volatile(enr) | RCC_IOPAEN | RCC_IOPCEN);
        }

        #[cfg(feature = "defmt")]
        defmt::info!("board: button PA{}, relay PC{}", pins::BUTTON_PIN, pins::RELAY_PIN);

        Self {
            button: GpioInput::pull_up(GPIOA_BASE, pins::BUTTON_PIN),
            relay: GpioOutput::push_pull(GPIOC_BASE, pins::RELAY_PIN),
        }
    }
}

//! Embassy time driver on the CH32V203 system timer (STK)
//!
//! STK runs from HCLK/8. With the reset clock tree (8 MHz HSI) that is
//! 1 MHz, matching the `tick-hz-1_000_000` embassy feature.

use core::cell::Cell;
use core::ptr::{read_volatile, write_volatile};

use critical_section::Mutex;
use embassy_time_driver::{AlarmHandle, Driver};

const STK_BASE: usize = 0xE000_F000;
const STK_CTLR: usize = STK_BASE + 0x00;
const STK_CNTL: usize = STK_BASE + 0x08;
const STK_CNTH: usize = STK_BASE + 0x0C;

/// Counter enable, up-counting, HCLK/8 clock source
const STK_CTLR_STE: u32 = 1 << 0;

/// Free-running counter driver
///
/// No alarm interrupt is wired up: `set_alarm` always reports the deadline
/// as reached, so the generic timer queue spins until it expires. Only the
/// 1 ms relay poll ticker waits on it.
pub struct SysTickDriver {
    alarm_taken: Mutex<Cell<bool>>,
}

impl SysTickDriver {
    const fn new() -> Self {
        Self {
            alarm_taken: Mutex::new(Cell::new(false)),
        }
    }

    /// Start the counter from zero
    fn start(&self) {
        unsafe {
            write_volatile(STK_CTLR as *mut u32, 0);
            write_volatile(STK_CNTL as *mut u32, 0);
            write_volatile(STK_CNTH as *mut u32, 0);
            write_volatile(STK_CTLR as *mut u32, STK_CTLR_STE);
        }
    }
}

impl Driver for SysTickDriver {
    fn now(&self) -> u64 {
        // Re-read until the high word is stable across the low read
        loop {
            let (high, low, high_again) = unsafe {
                (
                    read_volatile(STK_CNTH as *const u32),
                    read_volatile(STK_CNTL as *const u32),
                    read_volatile(STK_CNTH as *const u32),
                )
            };
            if high == high_again {
                return ((high as u64) << 32) | low as u64;
            }
        }
    }

    unsafe fn allocate_alarm(&self) -> Option<AlarmHandle> {
        critical_section::with(|cs| {
            let taken = self.alarm_taken.borrow(cs);
            if taken.get() {
                None
            } else {
                taken.set(true);
                Some(AlarmHandle::new(0))
            }
        })
    }

    fn set_alarm_callback(&self, _alarm: AlarmHandle, _callback: fn(*mut ()), _ctx: *mut ()) {}

    fn set_alarm(&self, _alarm: AlarmHandle, _timestamp: u64) -> bool {
        false
    }
}

embassy_time_driver::time_driver_impl!(static DRIVER: SysTickDriver = SysTickDriver::new());

/// Start the system timer; call once before any embassy-time use
pub fn init() {
    DRIVER.start();
}

// Critical section implementation for single-core RISC-V
critical_section::set_impl!(RiscvCriticalSection);

struct RiscvCriticalSection;

unsafe impl critical_section::Impl for RiscvCriticalSection {
    unsafe fn acquire() -> critical_section::RawRestoreState {
        let mstatus = riscv::register::mstatus::read();
        riscv::register::mstatus::clear_mie();
        mstatus.mie() as u8
    }

    unsafe fn release(was_enabled: critical_section::RawRestoreState) {
        if was_enabled != 0 {
            riscv::register::mstatus::set_mie();
        }
    }
}

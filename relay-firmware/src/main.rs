#![no_std]
#![no_main]

#[cfg(feature = "defmt")]
use defmt_rtt as _;

// RISC-V runtime
use riscv_rt as _;

// Panic handler
use panic_halt as _;

use relay_firmware::*;

/// Main firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    time_driver::init();

    #[cfg(feature = "defmt")]
    defmt::info!("Relay firmware v{} starting", VERSION);

    let board = Board::init();

    spawner.must_spawn(relay_task(board.button, board.relay));

    #[cfg(feature = "defmt")]
    defmt::info!("Relay firmware ready");
}

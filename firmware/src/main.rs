#![no_std]
#![no_main]

#[cfg(feature = "defmt")]
use defmt_rtt as _;

// RISC-V runtime
use riscv_rt as _;

// Panic handler
#[cfg(not(feature = "defmt"))]
use panic_halt as _;
#[cfg(feature = "defmt")]
use panic_probe as _;

use embassy_executor::Spawner;
use embassy_time::Duration;
use static_cell::StaticCell;

use rustymorse_firmware::*;

// Static resources
static HAL: StaticCell<Ch32v203DecoderHal> = StaticCell::new();

/// Main firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    #[cfg(feature = "defmt")]
    defmt::info!("Morse decoder firmware v{}", VERSION);

    time_driver::init_systick();
    unsafe { riscv::interrupt::enable() };

    let hal = HAL.init(Ch32v203DecoderHal::new());

    let config = default_config();
    #[cfg(feature = "defmt")]
    defmt::info!(
        "Timing: dot < {} ms, long dash >= {} ms, letter gap {} ms",
        config.dot_threshold.as_millis(),
        config.dash_threshold.as_millis(),
        config.letter_gap.as_millis()
    );

    spawner.must_spawn(decoder_task_wrapper(hal, config));

    // Main supervision loop
    loop {
        embassy_time::Timer::after(Duration::from_secs(1)).await;
        #[cfg(feature = "defmt")]
        defmt::trace!("Heartbeat");
    }
}

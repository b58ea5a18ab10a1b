#![no_std]

//! Firmware library: CH32V203 board support and embassy tasks

pub use embassy_executor::Spawner;
pub use static_cell::StaticCell;

pub use decoder_core::*;

pub use crate::ch32v203_hardware::*;
pub use crate::tasks::*;

// Embassy tasks module
pub mod tasks {
    use super::*;

    /// Decoder loop; returns only if the hardware reports an error
    #[embassy_executor::task]
    pub async fn decoder_task_wrapper(
        hal: &'static mut Ch32v203DecoderHal,
        config: DecoderConfig,
    ) {
        #[cfg(feature = "defmt")]
        defmt::info!("Decoder task started");

        match decoder_core::decoder_task(hal, config).await {
            Ok(never) => match never {},
            Err(_err) => {
                #[cfg(feature = "defmt")]
                defmt::error!("Decoder stopped: {}", _err);
            }
        }
    }
}

// CH32V203 hardware module
pub mod ch32v203_hardware;

// HD44780 character LCD
pub mod lcd;

// Time driver for embassy
pub mod time_driver;

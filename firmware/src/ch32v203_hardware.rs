//! CH32V203 Hardware Implementation
//!
//! Register-level GPIO for the two buttons and the LCD bus.

use core::convert::Infallible;

use embassy_time::{Delay, Instant};
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use decoder_core::{DecoderHal, EmbeddedHalButton, HalError};

use crate::lcd::Hd44780;

/// RCC APB2 peripheral clock enable register
const RCC_APB2PCENR: usize = 0x4002_1018;
const RCC_IOPAEN: u32 = 1 << 2;
const RCC_IOPBEN: u32 = 1 << 3;

pub const GPIOA_BASE: usize = 0x4001_0800;
pub const GPIOB_BASE: usize = 0x4001_0C00;

/// GPIO register offsets
const GPIO_CFGLR: usize = 0x00;
const GPIO_CFGHR: usize = 0x04;
const GPIO_INDR: usize = 0x08;
const GPIO_BSHR: usize = 0x10;

/// CNF/MODE nibbles
const MODE_INPUT_PULL: u32 = 0b1000;
const MODE_OUTPUT_PUSH_PULL_10MHZ: u32 = 0b0001;

fn read_reg(addr: usize) -> u32 {
    unsafe { core::ptr::read_volatile(addr as *const u32) }
}

fn write_reg(addr: usize, value: u32) {
    unsafe { core::ptr::write_volatile(addr as *mut u32, value) }
}

/// Set the 4-bit configuration field of one pin
fn configure_pin(port: usize, pin: u8, nibble: u32) {
    let (reg, shift) = if pin < 8 {
        (port + GPIO_CFGLR, pin as u32 * 4)
    } else {
        (port + GPIO_CFGHR, (pin as u32 - 8) * 4)
    };
    critical_section::with(|_| {
        let value = read_reg(reg) & !(0xF << shift);
        write_reg(reg, value | (nibble << shift));
    });
}

/// Input pin with pull-up
pub struct GpioInput {
    port: usize,
    pin: u8,
}

impl GpioInput {
    pub fn pull_up(port: usize, pin: u8) -> Self {
        configure_pin(port, pin, MODE_INPUT_PULL);
        // OUTDR selects pull-up (1) or pull-down (0) in input-pull mode
        write_reg(port + GPIO_BSHR, 1 << pin);
        Self { port, pin }
    }
}

impl ErrorType for GpioInput {
    type Error = Infallible;
}

impl InputPin for GpioInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(read_reg(self.port + GPIO_INDR) & (1 << self.pin) != 0)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(read_reg(self.port + GPIO_INDR) & (1 << self.pin) == 0)
    }
}

/// Push-pull output pin
pub struct GpioOutput {
    port: usize,
    pin: u8,
}

impl GpioOutput {
    pub fn push_pull(port: usize, pin: u8) -> Self {
        write_reg(port + GPIO_BSHR, 1 << (pin + 16));
        configure_pin(port, pin, MODE_OUTPUT_PUSH_PULL_10MHZ);
        Self { port, pin }
    }
}

impl ErrorType for GpioOutput {
    type Error = Infallible;
}

impl OutputPin for GpioOutput {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        write_reg(self.port + GPIO_BSHR, 1 << self.pin);
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        write_reg(self.port + GPIO_BSHR, 1 << (self.pin + 16));
        Ok(())
    }
}

pub type Button = EmbeddedHalButton<GpioInput>;
pub type Lcd = Hd44780<GpioOutput, GpioOutput, GpioOutput, Delay>;

/// CH32V203 hardware abstraction layer implementation
pub struct Ch32v203DecoderHal {
    morse_button: Button,
    show_button: Button,
    lcd: Lcd,
    delay: Delay,
}

impl Ch32v203DecoderHal {
    /// Enable GPIO clocks and configure all pins
    pub fn new() -> Self {
        write_reg(RCC_APB2PCENR, read_reg(RCC_APB2PCENR) | RCC_IOPAEN | RCC_IOPBEN);

        Self {
            morse_button: Button::new(GpioInput::pull_up(GPIOA_BASE, pins::MORSE_BUTTON)),
            show_button: Button::new(GpioInput::pull_up(GPIOA_BASE, pins::SHOW_BUTTON)),
            lcd: Hd44780::new(
                GpioOutput::push_pull(GPIOB_BASE, pins::LCD_RS),
                GpioOutput::push_pull(GPIOB_BASE, pins::LCD_EN),
                [
                    GpioOutput::push_pull(GPIOB_BASE, pins::LCD_D4),
                    GpioOutput::push_pull(GPIOB_BASE, pins::LCD_D5),
                    GpioOutput::push_pull(GPIOB_BASE, pins::LCD_D6),
                    GpioOutput::push_pull(GPIOB_BASE, pins::LCD_D7),
                ],
                Delay,
            ),
            delay: Delay,
        }
    }
}

impl Default for Ch32v203DecoderHal {
    fn default() -> Self {
        Self::new()
    }
}

impl DecoderHal for Ch32v203DecoderHal {
    type MorseButton = Button;
    type ShowButton = Button;
    type Display = Lcd;
    type Delay = Delay;
    type Error = HalError;

    fn initialize(&mut self) -> Result<(), Self::Error> {
        self.lcd.init()?;

        #[cfg(feature = "defmt")]
        defmt::info!("CH32V203 HAL initialized");

        Ok(())
    }

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn morse_button(&mut self) -> &mut Self::MorseButton {
        &mut self.morse_button
    }

    fn show_button(&mut self) -> &mut Self::ShowButton {
        &mut self.show_button
    }

    fn display(&mut self) -> &mut Self::Display {
        &mut self.lcd
    }

    fn display_and_delay(&mut self) -> (&mut Self::Display, &mut Self::Delay) {
        (&mut self.lcd, &mut self.delay)
    }
}

/// CH32V203 pin assignments
pub mod pins {
    /// Morse key button (PA0, active low)
    pub const MORSE_BUTTON: u8 = 0;
    /// Show-text button (PA1, active low)
    pub const SHOW_BUTTON: u8 = 1;

    /// LCD register select (PB0)
    pub const LCD_RS: u8 = 0;
    /// LCD enable strobe (PB1)
    pub const LCD_EN: u8 = 1;
    /// LCD data bus, 4-bit mode (PB4..PB7)
    pub const LCD_D4: u8 = 4;
    pub const LCD_D5: u8 = 5;
    pub const LCD_D6: u8 = 6;
    pub const LCD_D7: u8 = 7;
}

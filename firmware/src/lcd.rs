//! HD44780-compatible 16x2 character LCD on a 4-bit bus

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use decoder_core::{CharDisplay, HalError, DISPLAY_COLS, DISPLAY_ROWS};

/// Commands
const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE_INCREMENT: u8 = 0x06;
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_FUNCTION_4BIT_2LINE: u8 = 0x28;
const CMD_SET_DDRAM: u8 = 0x80;

/// DDRAM address of each row start
const ROW_OFFSETS: [u8; DISPLAY_ROWS] = [0x00, 0x40];

/// Write-only HD44780 driver (R/W tied low)
pub struct Hd44780<RS, EN, D, DL> {
    rs: RS,
    en: EN,
    data: [D; 4],
    delay: DL,
}

impl<RS, EN, D, DL> Hd44780<RS, EN, D, DL>
where
    RS: OutputPin,
    EN: OutputPin,
    D: OutputPin,
    DL: DelayNs,
{
    /// `data` is D4..D7
    pub fn new(rs: RS, en: EN, data: [D; 4], delay: DL) -> Self {
        Self { rs, en, data, delay }
    }

    /// Power-on initialization into 4-bit, two-line mode
    pub fn init(&mut self) -> Result<(), HalError> {
        self.delay.delay_ms(50);
        self.set_rs(false)?;

        // Three 8-bit function sets resynchronize the controller, then switch to 4-bit
        self.write_nibble(0x3)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x3)?;
        self.delay.delay_us(150);
        self.write_nibble(0x3)?;
        self.delay.delay_us(150);
        self.write_nibble(0x2)?;
        self.delay.delay_us(150);

        self.command(CMD_FUNCTION_4BIT_2LINE)?;
        self.command(CMD_DISPLAY_ON)?;
        self.command(CMD_CLEAR)?;
        self.delay.delay_ms(2);
        self.command(CMD_ENTRY_MODE_INCREMENT)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("LCD initialized");

        Ok(())
    }

    fn set_rs(&mut self, data: bool) -> Result<(), HalError> {
        let result = if data { self.rs.set_high() } else { self.rs.set_low() };
        result.map_err(|_| HalError::GpioError)
    }

    fn write_nibble(&mut self, nibble: u8) -> Result<(), HalError> {
        for (bit, pin) in self.data.iter_mut().enumerate() {
            let result = if nibble & (1 << bit) != 0 {
                pin.set_high()
            } else {
                pin.set_low()
            };
            result.map_err(|_| HalError::GpioError)?;
        }

        self.en.set_high().map_err(|_| HalError::GpioError)?;
        self.delay.delay_us(1);
        self.en.set_low().map_err(|_| HalError::GpioError)?;
        self.delay.delay_us(1);
        Ok(())
    }

    fn write_byte(&mut self, byte: u8, data: bool) -> Result<(), HalError> {
        self.set_rs(data)?;
        self.write_nibble(byte >> 4)?;
        self.write_nibble(byte & 0x0F)?;
        // Longest non-clear instruction takes 37 us
        self.delay.delay_us(50);
        Ok(())
    }

    fn command(&mut self, cmd: u8) -> Result<(), HalError> {
        self.write_byte(cmd, false)
    }
}

impl<RS, EN, D, DL> CharDisplay for Hd44780<RS, EN, D, DL>
where
    RS: OutputPin,
    EN: OutputPin,
    D: OutputPin,
    DL: DelayNs,
{
    type Error = HalError;

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.command(CMD_CLEAR)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), Self::Error> {
        if col as usize >= DISPLAY_COLS || row as usize >= DISPLAY_ROWS {
            return Err(HalError::DisplayError);
        }
        self.command(CMD_SET_DDRAM | (ROW_OFFSETS[row as usize] + col))
    }

    fn print(&mut self, text: &str) -> Result<(), Self::Error> {
        for byte in text.bytes() {
            self.write_byte(byte, true)?;
        }
        Ok(())
    }
}

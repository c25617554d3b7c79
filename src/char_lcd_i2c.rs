//! Settings renderer for HD44780-compatible character LCDs with a PCF8574 I2C backpack.

use core::fmt::Write;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use heapless::String;

use crate::setting_display::{SettingDisplay, SettingValue};
use crate::{Error, Result};

/// Most common PCF8574 backpack address. Some boards use `0x3F`.
pub const DEFAULT_ADDRESS: u8 = 0x27;
/// Characters per line on the usual 16x2 module.
pub const COLUMNS: usize = 16;

// PCF8574 pin mapping: P0=RS, P1=RW, P2=E, P3=Backlight, P4-P7=Data
const LCD_BACKLIGHT: u8 = 0x08;
const LCD_ENABLE: u8 = 0x04;
const LCD_RS: u8 = 0x01;

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_INCREMENT: u8 = 0x06;
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_DISPLAY_ON_BLINK: u8 = 0x0F;
const CMD_FUNCTION_4BIT_2LINE: u8 = 0x28;
const CMD_SET_DDRAM: u8 = 0x80;
const LINE_2: u8 = 0x40;

/// Character LCD with I2C interface (HD44780 + PCF8574 backpack).
///
/// Line 1 shows the setting's long name, line 2 its value. A flashing setting gets a blinking
/// cursor after the value. The backpack can only switch the backlight, so any brightness turns
/// it on.
pub struct CharLcdI2c<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    backlight: u8,
}

impl<I2C: I2c, D: DelayNs> CharLcdI2c<I2C, D> {
    /// Create an LCD at [`DEFAULT_ADDRESS`] and initialize it.
    ///
    /// # Errors
    /// Returns an error if the backpack does not acknowledge.
    pub fn new(i2c: I2C, delay: D) -> Result<Self> {
        Self::new_with_address(i2c, delay, DEFAULT_ADDRESS)
    }

    /// Create an LCD at a custom I2C address and initialize it.
    ///
    /// # Errors
    /// Returns an error if the backpack does not acknowledge.
    pub fn new_with_address(i2c: I2C, delay: D, address: u8) -> Result<Self> {
        let mut lcd = Self {
            i2c,
            delay,
            address,
            backlight: LCD_BACKLIGHT,
        };
        lcd.init()?;
        Ok(lcd)
    }

    /// Give back the bus and delay.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn write_nibble(&mut self, nibble: u8, rs: bool) -> Result<()> {
        let rs_bit = if rs { LCD_RS } else { 0 };
        let data = (nibble << 4) | self.backlight | rs_bit;

        self.i2c
            .write(self.address, &[data | LCD_ENABLE])
            .map_err(|err| Error::i2c(&err))?;
        self.delay.delay_us(1);
        self.i2c
            .write(self.address, &[data])
            .map_err(|err| Error::i2c(&err))?;
        self.delay.delay_us(50);
        Ok(())
    }

    fn write_raw(&mut self, byte: u8, rs: bool) -> Result<()> {
        self.write_nibble(byte >> 4, rs)?;
        self.write_nibble(byte & 0x0F, rs)
    }

    fn command(&mut self, command: u8) -> Result<()> {
        self.write_raw(command, false)
    }

    fn init(&mut self) -> Result<()> {
        self.delay.delay_ms(50);

        // Initialize in 4-bit mode
        self.write_nibble(0x03, false)?;
        self.delay.delay_ms(5);
        self.write_nibble(0x03, false)?;
        self.delay.delay_us(150);
        self.write_nibble(0x03, false)?;
        self.write_nibble(0x02, false)?;

        self.command(CMD_FUNCTION_4BIT_2LINE)?;
        self.command(CMD_DISPLAY_ON)?;
        self.clear()?;
        self.command(CMD_ENTRY_INCREMENT)
    }

    /// Clear the display and home the cursor.
    ///
    /// # Errors
    /// Returns an error if the backpack does not acknowledge.
    pub fn clear(&mut self) -> Result<()> {
        self.command(CMD_CLEAR)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    /// Print `text` on `line` (0 or 1), padded with spaces to the full width.
    ///
    /// # Errors
    /// Returns an error if the backpack does not acknowledge.
    #[expect(clippy::arithmetic_side_effects, reason = "Bounded by COLUMNS")]
    pub fn print_line(&mut self, line: u8, text: &str) -> Result<()> {
        let row = if line == 0 { 0 } else { LINE_2 };
        self.command(CMD_SET_DDRAM | row)?;
        let mut written = 0;
        for byte in text.bytes().take(COLUMNS) {
            self.write_raw(byte, true)?;
            written += 1;
        }
        for _ in written..COLUMNS {
            self.write_raw(b' ', true)?;
        }
        Ok(())
    }
}

impl<I2C: I2c, D: DelayNs> SettingDisplay for CharLcdI2c<I2C, D> {
    fn render_setting(
        &mut self,
        _short_name: &'static str,
        long_name: &'static str,
        value: SettingValue,
        flash: bool,
    ) -> Result<()> {
        let mut text: String<COLUMNS> = String::new();
        // Values are at most four characters; anything longer is cut at the line end.
        let _ = write!(text, "{value}");

        self.command(CMD_DISPLAY_ON)?;
        self.print_line(0, long_name)?;
        self.print_line(1, &text)?;
        if flash {
            let column = u8::try_from(text.len().min(COLUMNS.saturating_sub(1))).unwrap_or(0);
            self.command(CMD_SET_DDRAM | LINE_2 | column)?;
            self.command(CMD_DISPLAY_ON_BLINK)?;
        }
        Ok(())
    }

    fn set_brightness(&mut self, brightness: u8) -> Result<()> {
        self.backlight = if brightness == 0 { 0 } else { LCD_BACKLIGHT };
        // The backlight bit is latched with any write; re-send display-on to apply it.
        self.command(CMD_DISPLAY_ON)
    }
}

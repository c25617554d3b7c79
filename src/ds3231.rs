//! DS3231 real-time clock over I2C.
//!
//! Time registers `0x00..=0x06` hold seconds, minutes, hours, weekday, date, month and
//! two-digit year in BCD. The oscillator-stop flag in the status register says the time was
//! lost (first power-up or a flat backup battery) and must not be trusted.

use embedded_hal::i2c::I2c;

use crate::calendar::CalendarRecord;
use crate::rtc::Rtc;
use crate::{Error, Result};

/// Fixed I2C address of the DS3231.
pub const ADDRESS: u8 = 0x68;

const REG_SECONDS: u8 = 0x00;
const REG_STATUS: u8 = 0x0F;
const REG_TEMPERATURE_MSB: u8 = 0x11;

const STATUS_OSF: u8 = 0x80;
const HOURS_12H: u8 = 0x40;
const HOURS_PM: u8 = 0x20;
const MONTH_CENTURY: u8 = 0x80;

/// DS3231 driver.
pub struct Ds3231<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> Ds3231<I2C> {
    pub const fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    pub fn into_inner(self) -> I2C {
        self.i2c
    }

    fn read_registers(&mut self, first: u8, buffer: &mut [u8]) -> Result<()> {
        self.i2c
            .write_read(ADDRESS, &[first], buffer)
            .map_err(|err| Error::i2c(&err))
    }

    fn read_register(&mut self, register: u8) -> Result<u8> {
        let mut value = [0u8];
        self.read_registers(register, &mut value)?;
        Ok(value[0])
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<()> {
        self.i2c
            .write(ADDRESS, &[register, value])
            .map_err(|err| Error::i2c(&err))
    }

    /// True if the oscillator stopped since the time was last set.
    ///
    /// # Errors
    /// Returns an error if the chip cannot be read.
    pub fn oscillator_stopped(&mut self) -> Result<bool> {
        Ok(self.read_register(REG_STATUS)? & STATUS_OSF != 0)
    }

    /// Die temperature in whole degrees Celsius, rounded toward negative infinity.
    ///
    /// # Errors
    /// Returns an error if the chip cannot be read.
    pub fn temperature_celsius(&mut self) -> Result<i8> {
        Ok(i8::from_ne_bytes([self.read_register(REG_TEMPERATURE_MSB)?]))
    }
}

impl<I2C: I2c> Rtc for Ds3231<I2C> {
    fn time(&mut self) -> Result<CalendarRecord> {
        if self.oscillator_stopped()? {
            #[cfg(feature = "defmt")]
            defmt::warn!("DS3231 oscillator-stop flag is set");
            return Err(Error::ClockStopped);
        }

        let mut registers = [0u8; 7];
        self.read_registers(REG_SECONDS, &mut registers)?;
        let [seconds, minutes, hours, _weekday, day, month, year] = registers;

        Ok(CalendarRecord::new(
            from_bcd(year)?,
            from_bcd(month & !MONTH_CENTURY)?,
            from_bcd(day)?,
            decode_hours(hours)?,
            from_bcd(minutes)?,
            from_bcd(seconds)?,
        ))
    }

    fn set_time(&mut self, record: &CalendarRecord) -> Result<()> {
        // Invalid dates are written as-is; the weekday register then falls back to Sunday.
        let weekday = record
            .date()
            .map_or(1, |date| date.weekday().number_from_sunday());
        self.i2c
            .write(
                ADDRESS,
                &[
                    REG_SECONDS,
                    to_bcd(record.second),
                    to_bcd(record.minute),
                    to_bcd(record.hour),
                    weekday,
                    to_bcd(record.day),
                    to_bcd(record.month),
                    to_bcd(record.year),
                ],
            )
            .map_err(|err| Error::i2c(&err))?;

        let status = self.read_register(REG_STATUS)?;
        self.write_register(REG_STATUS, status & !STATUS_OSF)
    }

    fn has_temperature(&self) -> bool {
        true
    }
}

/// Decode one packed-BCD register byte.
///
/// # Errors
/// Returns [`Error::InvalidBcd`] if either nibble is above 9.
#[expect(clippy::arithmetic_side_effects, reason = "Nibbles are checked to be below 10")]
pub const fn from_bcd(value: u8) -> Result<u8> {
    let tens = value >> 4;
    let ones = value & 0x0F;
    if tens > 9 || ones > 9 {
        return Err(Error::InvalidBcd(value));
    }
    Ok(tens * 10 + ones)
}

/// Encode a value below 100 as packed BCD.
#[must_use]
#[expect(
    clippy::arithmetic_side_effects,
    clippy::integer_division_remainder_used,
    reason = "Two decimal digits"
)]
pub const fn to_bcd(value: u8) -> u8 {
    let value = value % 100;
    ((value / 10) << 4) | (value % 10)
}

#[expect(
    clippy::arithmetic_side_effects,
    clippy::integer_division_remainder_used,
    reason = "12-hour values are 1..=12"
)]
const fn decode_hours(register: u8) -> Result<u8> {
    if register & HOURS_12H == 0 {
        return from_bcd(register & 0x3F);
    }
    let hour = match from_bcd(register & 0x1F) {
        Ok(hour) => hour % 12,
        Err(err) => return Err(err),
    };
    Ok(if register & HOURS_PM == 0 { hour } else { hour + 12 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bcd_covers_two_digits() {
        assert_eq!(to_bcd(59), 0x59);
        assert_eq!(from_bcd(0x59), Ok(59));
        assert_eq!(from_bcd(0x3A), Err(Error::InvalidBcd(0x3A)));
    }

    #[test]
    fn twelve_hour_registers_become_24_hour() {
        assert_eq!(decode_hours(0x23), Ok(23));
        assert_eq!(decode_hours(HOURS_12H | 0x12), Ok(0));
        assert_eq!(decode_hours(HOURS_12H | HOURS_PM | 0x12), Ok(12));
        assert_eq!(decode_hours(HOURS_12H | HOURS_PM | 0x07), Ok(19));
    }
}

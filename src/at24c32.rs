//! AT24C32 EEPROM as [`ByteStore`]. DS3231 breakout boards carry one at `0x57`.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::byte_store::ByteStore;
use crate::{Error, Result};

/// Address of the EEPROM on common DS3231 modules (A0..A2 pulled high).
pub const DS3231_MODULE_ADDRESS: u8 = 0x57;
/// Capacity in bytes (32 kbit).
pub const CAPACITY: u16 = 4096;
/// Worst-case self-timed write cycle.
pub const WRITE_CYCLE_MS: u32 = 10;

/// AT24C32 driver with 16-bit word addresses.
///
/// Writes are skipped when the stored byte already matches, so re-saving an unchanged
/// setting costs no write endurance.
pub struct At24c32<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
}

impl<I2C: I2c, D: DelayNs> At24c32<I2C, D> {
    pub const fn new(i2c: I2C, delay: D) -> Self {
        Self::new_with_address(i2c, delay, DS3231_MODULE_ADDRESS)
    }

    pub const fn new_with_address(i2c: I2C, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
        }
    }

    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    const fn check(address: u16) -> Result<[u8; 2]> {
        if address >= CAPACITY {
            return Err(Error::StorageAddressOutOfRange(address));
        }
        Ok(address.to_be_bytes())
    }
}

impl<I2C: I2c, D: DelayNs> ByteStore for At24c32<I2C, D> {
    fn read_byte(&mut self, address: u16) -> Result<u8> {
        let word_address = Self::check(address)?;
        let mut value = [0u8];
        self.i2c
            .write_read(self.address, &word_address, &mut value)
            .map_err(|err| Error::i2c(&err))?;
        Ok(value[0])
    }

    fn write_byte(&mut self, address: u16, value: u8) -> Result<()> {
        if self.read_byte(address)? == value {
            return Ok(());
        }
        let [high, low] = Self::check(address)?;
        self.i2c
            .write(self.address, &[high, low, value])
            .map_err(|err| Error::i2c(&err))?;
        self.delay.delay_ms(WRITE_CYCLE_MS);
        Ok(())
    }
}

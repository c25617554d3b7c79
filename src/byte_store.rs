//! Durable single-byte storage for settings.
//!
//! Each persisted setting owns one byte at a fixed [`SettingAddress`]. The layout never moves,
//! so a clock keeps its settings across firmware updates.

use crate::Result;

/// Durable byte storage, such as an EEPROM.
pub trait ByteStore {
    /// Read the byte at `address`.
    ///
    /// # Errors
    /// Returns an error if the underlying device cannot be read.
    fn read_byte(&mut self, address: u16) -> Result<u8>;

    /// Write `value` at `address`. Must survive power loss once it returns.
    ///
    /// # Errors
    /// Returns an error if the underlying device cannot be written.
    fn write_byte(&mut self, address: u16, value: u8) -> Result<()>;
}

impl<T: ByteStore + ?Sized> ByteStore for &mut T {
    fn read_byte(&mut self, address: u16) -> Result<u8> {
        (**self).read_byte(address)
    }

    fn write_byte(&mut self, address: u16, value: u8) -> Result<()> {
        (**self).write_byte(address, value)
    }
}

/// Storage address of every persisted setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum SettingAddress {
    Brightness = 0x00,
    Clock24h = 0x01,
    Year = 0x02,
    Month = 0x03,
    Day = 0x04,
    AutoDate = 0x05,
    Region = 0x06,
    DstMode = 0x07,
    DstOffset = 0x08,
    ShowTemperature = 0x09,
    FeatureDatabase = 0x0A,
    /// Calendar day of the last daylight-saving adjustment, as the RTC saw it afterwards.
    DstAdjustedYear = 0x0B,
    DstAdjustedMonth = 0x0C,
    DstAdjustedDay = 0x0D,
}

impl SettingAddress {
    #[must_use]
    pub const fn address(self) -> u16 {
        self as u16
    }
}

/// Number of bytes the settings occupy.
pub const SETTINGS_LEN: usize = 14;

/// Volatile storage for boards without an EEPROM, and for tests.
///
/// Starts out like a blank EEPROM (every byte `0xFF`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RamByteStore<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> Default for RamByteStore<N> {
    fn default() -> Self {
        Self { bytes: [0xFF; N] }
    }
}

impl<const N: usize> RamByteStore<N> {
    /// Storage pre-filled with `bytes`.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; N]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub const fn bytes(&self) -> &[u8; N] {
        &self.bytes
    }
}

impl<const N: usize> ByteStore for RamByteStore<N> {
    fn read_byte(&mut self, address: u16) -> Result<u8> {
        self.bytes
            .get(usize::from(address))
            .copied()
            .ok_or(crate::Error::StorageAddressOutOfRange(address))
    }

    fn write_byte(&mut self, address: u16, value: u8) -> Result<()> {
        let slot = self
            .bytes
            .get_mut(usize::from(address))
            .ok_or(crate::Error::StorageAddressOutOfRange(address))?;
        *slot = value;
        Ok(())
    }
}

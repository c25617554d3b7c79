use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
///
/// These errors come from the hardware collaborators (RTC, EEPROM, LCD). The menu and the
/// daylight-saving engine never return them to their callers; they log and carry on.
#[expect(missing_docs, reason = "The variants are self-explanatory.")]
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // `#[error(not(source))]` below tells `derive_more` that `ErrorKind` should not be
    // reported as the source of this error.
    #[display("I2C bus error: {_0:?}")]
    I2c(#[error(not(source))] embedded_hal::i2c::ErrorKind),

    #[display("Register value {_0:#04x} is not valid BCD")]
    InvalidBcd(#[error(not(source))] u8),

    #[display("RTC oscillator was stopped; time is not valid")]
    ClockStopped,

    #[display("Calendar record does not name a real date and time")]
    InvalidCalendar,

    #[display("Storage address {_0} is out of range")]
    StorageAddressOutOfRange(#[error(not(source))] u16),
}

impl Error {
    /// Wrap any `embedded-hal` I2C error.
    pub fn i2c(err: &impl embedded_hal::i2c::Error) -> Self {
        Self::I2c(err.kind())
    }
}

impl From<time::error::ComponentRange> for Error {
    fn from(_: time::error::ComponentRange) -> Self {
        Self::InvalidCalendar
    }
}

//! Linear time count used when the clock is shifted by a daylight-saving delta.

use time::{OffsetDateTime, PrimitiveDateTime};

/// Seconds in one hour.
pub const SECONDS_PER_HOUR: i64 = 60 * 60;

/// Units-safe wrapper for Unix timestamps (seconds since 1970-01-01 00:00:00).
///
/// The clock keeps wall-clock time with no zone attached, so the timestamp is the wall-clock
/// reading interpreted as if it were UTC.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnixSeconds(pub i64);

impl UnixSeconds {
    /// Get the underlying i64 value
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }

    /// Interpret a wall-clock date-time as a linear count.
    #[must_use]
    pub const fn from_primitive(date_time: PrimitiveDateTime) -> Self {
        Self(date_time.assume_utc().unix_timestamp())
    }

    /// Convert back to wall-clock fields, or `None` if outside the supported range.
    #[must_use]
    pub fn to_primitive(self) -> Option<PrimitiveDateTime> {
        OffsetDateTime::from_unix_timestamp(self.as_i64())
            .ok()
            .map(|date_time| PrimitiveDateTime::new(date_time.date(), date_time.time()))
    }

    /// Shift by a whole number of hours (negative moves backwards).
    #[must_use]
    pub const fn checked_add_hours(self, hours: i8) -> Option<Self> {
        match (hours as i64).checked_mul(SECONDS_PER_HOUR) {
            Some(delta) => match self.0.checked_add(delta) {
                Some(seconds) => Some(Self(seconds)),
                None => None,
            },
            None => None,
        }
    }
}

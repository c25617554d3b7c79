//! The calendar record exchanged with the RTC, and the two year representations.
//!
//! The RTC stores a two-digit year (`24` for 2024). Date arithmetic works on full calendar
//! years. [`full_year`] and [`two_digit_year`] convert between the two and are the only place
//! the century is assumed.

use time::{Date, Month, PrimitiveDateTime, Time};

use crate::unix_seconds::UnixSeconds;
use crate::{Error, Result};

/// Century the two-digit RTC year belongs to.
pub const CENTURY: i32 = 2000;

/// Full calendar year for a two-digit RTC year (`24` -> `2024`).
#[must_use]
pub fn full_year(two_digit: u8) -> i32 {
    CENTURY + i32::from(two_digit % 100)
}

/// Two-digit RTC year for a full calendar year, or `None` outside the RTC's century.
#[must_use]
pub fn two_digit_year(full: i32) -> Option<u8> {
    full.checked_sub(CENTURY)
        .filter(|years| (0..100).contains(years))
        .and_then(|years| u8::try_from(years).ok())
}

/// A structured date-time as the RTC reports it: two-digit year, month 1-12, day 1-31,
/// 24-hour time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalendarRecord {
    pub year: u8,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl CalendarRecord {
    #[must_use]
    pub const fn new(year: u8, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Same time of day on a different date. The date is not validated; RTC chips accept
    /// any register values.
    #[must_use]
    pub const fn with_date(self, year: u8, month: u8, day: u8) -> Self {
        Self {
            year,
            month,
            day,
            ..self
        }
    }

    /// The full calendar date, if the record names a real day.
    ///
    /// # Errors
    /// Returns [`Error::InvalidCalendar`] for dates like February 31.
    pub fn date(&self) -> Result<Date> {
        let month = Month::try_from(self.month)?;
        Ok(Date::from_calendar_date(full_year(self.year), month, self.day)?)
    }

    /// Convert to a full-year wall-clock date-time.
    ///
    /// # Errors
    /// Returns [`Error::InvalidCalendar`] if any field is out of range.
    pub fn to_primitive(&self) -> Result<PrimitiveDateTime> {
        let time = Time::from_hms(self.hour, self.minute, self.second)?;
        Ok(PrimitiveDateTime::new(self.date()?, time))
    }

    /// Convert from a full-year wall-clock date-time.
    ///
    /// # Errors
    /// Returns [`Error::InvalidCalendar`] if the year is outside the RTC's century.
    pub fn from_primitive(date_time: PrimitiveDateTime) -> Result<Self> {
        let year = two_digit_year(date_time.year()).ok_or(Error::InvalidCalendar)?;
        Ok(Self {
            year,
            month: u8::from(date_time.month()),
            day: date_time.day(),
            hour: date_time.hour(),
            minute: date_time.minute(),
            second: date_time.second(),
        })
    }

    /// Linear time count for this record.
    ///
    /// # Errors
    /// Returns [`Error::InvalidCalendar`] if the record is not a real date-time.
    pub fn to_unix_seconds(&self) -> Result<UnixSeconds> {
        Ok(UnixSeconds::from_primitive(self.to_primitive()?))
    }

    /// Calendar record for a linear time count.
    ///
    /// # Errors
    /// Returns [`Error::InvalidCalendar`] if the count falls outside the RTC's century.
    pub fn from_unix_seconds(unix_seconds: UnixSeconds) -> Result<Self> {
        Self::from_primitive(unix_seconds.to_primitive().ok_or(Error::InvalidCalendar)?)
    }

    /// Move the wall clock by whole hours, carrying across day, month and year boundaries.
    ///
    /// # Errors
    /// Returns [`Error::InvalidCalendar`] if the record is not a real date-time or the result
    /// leaves the RTC's century.
    pub fn shifted_by_hours(&self, hours: i8) -> Result<Self> {
        let shifted = self
            .to_unix_seconds()?
            .checked_add_hours(hours)
            .ok_or(Error::InvalidCalendar)?;
        Self::from_unix_seconds(shifted)
    }

    /// True if both records fall on the same calendar day.
    #[must_use]
    pub const fn same_day(&self, other: &Self) -> bool {
        self.year == other.year && self.month == other.month && self.day == other.day
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_digit_year_maps_into_this_century() {
        assert_eq!(full_year(0), 2000);
        assert_eq!(full_year(24), 2024);
        assert_eq!(full_year(99), 2099);
    }

    #[test]
    fn full_year_maps_back_or_rejects() {
        assert_eq!(two_digit_year(2024), Some(24));
        assert_eq!(two_digit_year(2000), Some(0));
        assert_eq!(two_digit_year(2099), Some(99));
        assert_eq!(two_digit_year(1999), None);
        assert_eq!(two_digit_year(2100), None);
    }

    #[test]
    fn zero_shift_reproduces_every_field() {
        let record = CalendarRecord::new(24, 2, 29, 23, 59, 58);
        assert_eq!(record.shifted_by_hours(0), Ok(record));

        let seconds = record.to_unix_seconds().expect("valid record");
        assert_eq!(CalendarRecord::from_unix_seconds(seconds), Ok(record));
    }

    #[test]
    fn shift_carries_across_year_end() {
        let record = CalendarRecord::new(24, 12, 31, 23, 30, 0);
        assert_eq!(
            record.shifted_by_hours(1),
            Ok(CalendarRecord::new(25, 1, 1, 0, 30, 0))
        );
        assert_eq!(
            CalendarRecord::new(25, 1, 1, 0, 30, 0).shifted_by_hours(-1),
            Ok(record)
        );
    }

    #[test]
    fn impossible_dates_are_rejected() {
        assert_eq!(
            CalendarRecord::new(23, 2, 29, 12, 0, 0).to_unix_seconds(),
            Err(Error::InvalidCalendar)
        );
        assert_eq!(
            CalendarRecord::new(24, 13, 1, 12, 0, 0).to_unix_seconds(),
            Err(Error::InvalidCalendar)
        );
        assert_eq!(
            CalendarRecord::new(24, 1, 1, 24, 0, 0).to_unix_seconds(),
            Err(Error::InvalidCalendar)
        );
    }

    #[test]
    fn shift_out_of_century_is_rejected() {
        assert_eq!(
            CalendarRecord::new(99, 12, 31, 23, 0, 0).shifted_by_hours(1),
            Err(Error::InvalidCalendar)
        );
    }
}

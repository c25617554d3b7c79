//! Daylight-saving rules and the seasonal boundaries they produce for a year.
//!
//! A rule names a weekday-of-month transition the way POSIX `TZ` strings do (`M3.2.0/2` is
//! "the second Sunday of March at 02:00"). Week `5` means the last such weekday of the month.
//!
//! Boundaries are compared against the clock's wall-clock reading: the start instant is in
//! standard time and the end instant is in daylight time. Right after falling back, the
//! repeated hour reads as daylight time again; the engine's once-per-day guard covers that.

use time::{Date, Duration, Month, PrimitiveDateTime, Time, Weekday};

use crate::{Error, Result};

/// Week number meaning "the last one in the month".
pub const LAST_WEEK: u8 = 5;

/// One transition: the `week`-th `weekday` of `month`, at `hour` o'clock wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DstRule {
    pub month: Month,
    pub week: u8,
    pub weekday: Weekday,
    pub hour: u8,
}

impl DstRule {
    #[must_use]
    pub const fn new(month: Month, week: u8, weekday: Weekday, hour: u8) -> Self {
        Self {
            month,
            week,
            weekday,
            hour,
        }
    }

    /// The calendar day this rule falls on in `year`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidCalendar`] if `year` is outside the supported range or `week`
    /// is zero.
    #[expect(
        clippy::arithmetic_side_effects,
        clippy::integer_division_remainder_used,
        reason = "Weekday numbers are below 7 and week is at most 4 on this path"
    )]
    pub fn date_in(&self, year: i32) -> Result<Date> {
        if self.week == 0 {
            return Err(Error::InvalidCalendar);
        }
        let wanted = self.weekday.number_days_from_sunday();

        if self.week >= LAST_WEEK {
            let last = last_day_of_month(year, self.month)?;
            let back = (7 + last.weekday().number_days_from_sunday() - wanted) % 7;
            return last
                .checked_sub(Duration::days(i64::from(back)))
                .ok_or(Error::InvalidCalendar);
        }

        let first = Date::from_calendar_date(year, self.month, 1)?;
        let ahead = (7 + wanted - first.weekday().number_days_from_sunday()) % 7;
        first
            .checked_add(Duration::days(i64::from(ahead + 7 * (self.week - 1))))
            .ok_or(Error::InvalidCalendar)
    }

    /// The wall-clock instant of this transition in `year`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidCalendar`] if the rule does not name a real instant.
    pub fn instant_in(&self, year: i32) -> Result<PrimitiveDateTime> {
        let time = Time::from_hms(self.hour, 0, 0)?;
        Ok(PrimitiveDateTime::new(self.date_in(year)?, time))
    }
}

fn last_day_of_month(year: i32, month: Month) -> Result<Date> {
    let next_first = if month == Month::December {
        let next_year = year.checked_add(1).ok_or(Error::InvalidCalendar)?;
        Date::from_calendar_date(next_year, Month::January, 1)?
    } else {
        Date::from_calendar_date(year, month.next(), 1)?
    };
    next_first.previous_day().ok_or(Error::InvalidCalendar)
}

/// A complete daylight-saving rule set: when it starts, when it ends, and by how much.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DstRules {
    pub start: DstRule,
    pub end: DstRule,
    pub offset_hours: u8,
}

impl DstRules {
    /// United States: second Sunday of March 02:00 to first Sunday of November 02:00.
    pub const US: Self = Self {
        start: DstRule::new(Month::March, 2, Weekday::Sunday, 2),
        end: DstRule::new(Month::November, 1, Weekday::Sunday, 2),
        offset_hours: 1,
    };

    /// European Union, as observed in Central European Time: last Sunday of March 02:00 to
    /// last Sunday of October 03:00.
    pub const EU: Self = Self {
        start: DstRule::new(Month::March, LAST_WEEK, Weekday::Sunday, 2),
        end: DstRule::new(Month::October, LAST_WEEK, Weekday::Sunday, 3),
        offset_hours: 1,
    };

    /// South-east Australia: first Sunday of October 02:00 to first Sunday of April 03:00.
    /// Daylight time spans the new year.
    pub const AU: Self = Self {
        start: DstRule::new(Month::October, 1, Weekday::Sunday, 2),
        end: DstRule::new(Month::April, 1, Weekday::Sunday, 3),
        offset_hours: 1,
    };

    /// Look up a preset by region code (`"US"`, `"EU"`, `"AU"`), ignoring case.
    #[must_use]
    pub fn from_region_code(code: &str) -> Option<Self> {
        let code = code.trim();
        [("US", Self::US), ("EU", Self::EU), ("AU", Self::AU)]
            .into_iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(code))
            .map(|(_, rules)| rules)
    }
}

impl Default for DstRules {
    fn default() -> Self {
        Self::US
    }
}

/// The start and end instants of daylight time for one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DstBoundaries {
    year: i32,
    start: PrimitiveDateTime,
    end: PrimitiveDateTime,
    offset_hours: u8,
}

impl DstBoundaries {
    /// Derive the boundaries of `rules` for `year`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidCalendar`] if either rule does not name a real instant in
    /// `year`.
    pub fn for_year(rules: &DstRules, year: i32) -> Result<Self> {
        Ok(Self {
            year,
            start: rules.start.instant_in(year)?,
            end: rules.end.instant_in(year)?,
            offset_hours: rules.offset_hours,
        })
    }

    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub const fn start(&self) -> PrimitiveDateTime {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> PrimitiveDateTime {
        self.end
    }

    /// The daylight-saving offset, in hours, that applies at wall-clock time `now`.
    #[must_use]
    pub fn offset_at(&self, now: PrimitiveDateTime) -> u8 {
        let in_dst = if self.start <= self.end {
            self.start <= now && now < self.end
        } else {
            // Southern hemisphere: daylight time wraps over the new year.
            self.start <= now || now < self.end
        };
        if in_dst { self.offset_hours } else { 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn us_2024_boundaries() {
        let boundaries = DstBoundaries::for_year(&DstRules::US, 2024).expect("valid rules");
        assert_eq!(boundaries.start(), datetime!(2024-03-10 02:00));
        assert_eq!(boundaries.end(), datetime!(2024-11-03 02:00));
    }

    #[test]
    fn eu_2024_boundaries_use_last_sunday() {
        let boundaries = DstBoundaries::for_year(&DstRules::EU, 2024).expect("valid rules");
        assert_eq!(boundaries.start(), datetime!(2024-03-31 02:00));
        assert_eq!(boundaries.end(), datetime!(2024-10-27 03:00));
    }

    #[test]
    fn last_week_finds_the_final_weekday_of_december() {
        let rule = DstRule::new(Month::December, LAST_WEEK, Weekday::Friday, 0);
        assert_eq!(rule.date_in(2027), Ok(date!(2027-12-31)));
    }

    #[test]
    fn first_weekday_that_is_the_first_of_the_month() {
        // 1 September 2024 is a Sunday.
        let rule = DstRule::new(Month::September, 1, Weekday::Sunday, 2);
        assert_eq!(rule.date_in(2024), Ok(date!(2024-09-01)));
    }

    #[test]
    fn week_zero_is_rejected() {
        let rule = DstRule::new(Month::March, 0, Weekday::Sunday, 2);
        assert_eq!(rule.date_in(2024), Err(Error::InvalidCalendar));
    }

    #[test]
    fn offset_switches_exactly_at_the_boundaries() {
        let boundaries = DstBoundaries::for_year(&DstRules::US, 2024).expect("valid rules");
        assert_eq!(boundaries.offset_at(datetime!(2024-03-10 01:59:59)), 0);
        assert_eq!(boundaries.offset_at(datetime!(2024-03-10 02:00)), 1);
        assert_eq!(boundaries.offset_at(datetime!(2024-07-04 12:00)), 1);
        assert_eq!(boundaries.offset_at(datetime!(2024-11-03 01:59:59)), 1);
        assert_eq!(boundaries.offset_at(datetime!(2024-11-03 02:00)), 0);
        assert_eq!(boundaries.offset_at(datetime!(2024-12-25 12:00)), 0);
    }

    #[test]
    fn southern_hemisphere_wraps_over_new_year() {
        let boundaries = DstBoundaries::for_year(&DstRules::AU, 2024).expect("valid rules");
        assert_eq!(boundaries.offset_at(datetime!(2024-01-15 12:00)), 1);
        assert_eq!(boundaries.offset_at(datetime!(2024-06-15 12:00)), 0);
        assert_eq!(boundaries.offset_at(datetime!(2024-12-15 12:00)), 1);
    }

    #[test]
    fn region_codes_ignore_case() {
        assert_eq!(DstRules::from_region_code("us"), Some(DstRules::US));
        assert_eq!(DstRules::from_region_code(" EU "), Some(DstRules::EU));
        assert_eq!(DstRules::from_region_code("Au"), Some(DstRules::AU));
        assert_eq!(DstRules::from_region_code("XX"), None);
    }
}

//! Real-time clock collaborator.

use crate::calendar::CalendarRecord;
use crate::Result;

/// A battery-backed calendar clock.
pub trait Rtc {
    /// Current wall-clock time.
    ///
    /// # Errors
    /// Returns an error if the chip cannot be read or reports that its time is not valid
    /// (for example, after the backup battery ran flat).
    fn time(&mut self) -> Result<CalendarRecord>;

    /// Set the wall-clock time.
    ///
    /// # Errors
    /// Returns an error if the chip cannot be written.
    fn set_time(&mut self, record: &CalendarRecord) -> Result<()>;

    /// True if the chip has a temperature sensor the clock can display.
    fn has_temperature(&self) -> bool {
        false
    }
}

impl<T: Rtc + ?Sized> Rtc for &mut T {
    fn time(&mut self) -> Result<CalendarRecord> {
        (**self).time()
    }

    fn set_time(&mut self, record: &CalendarRecord) -> Result<()> {
        (**self).set_time(record)
    }

    fn has_temperature(&self) -> bool {
        (**self).has_temperature()
    }
}

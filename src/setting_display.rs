//! Display collaborator: how a setting reaches the user.

use core::fmt;

use crate::Result;

/// The formatted value of a setting.
///
/// Numbers render as digits. Text values are already space-padded so every value of one
/// setting has the same width (`" on"`/`"off"`, `"YMD"`, `"  on"`/`"auto"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingValue {
    Number(u8),
    Text(&'static str),
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// A display that can show one setting at a time.
pub trait SettingDisplay {
    /// Show a setting.
    ///
    /// `flash` is true when the value was just changed (or the item was just selected) and
    /// should be highlighted; false for a plain redraw.
    ///
    /// # Errors
    /// Returns an error if the display cannot be written.
    fn render_setting(
        &mut self,
        short_name: &'static str,
        long_name: &'static str,
        value: SettingValue,
        flash: bool,
    ) -> Result<()>;

    /// Apply a brightness level in `1..=10`.
    ///
    /// # Errors
    /// Returns an error if the display cannot be written.
    fn set_brightness(&mut self, brightness: u8) -> Result<()>;

    /// True if the display has separator dots the user can turn off.
    fn has_dots(&self) -> bool {
        false
    }
}

impl<T: SettingDisplay + ?Sized> SettingDisplay for &mut T {
    fn render_setting(
        &mut self,
        short_name: &'static str,
        long_name: &'static str,
        value: SettingValue,
        flash: bool,
    ) -> Result<()> {
        (**self).render_setting(short_name, long_name, value, flash)
    }

    fn set_brightness(&mut self, brightness: u8) -> Result<()> {
        (**self).set_brightness(brightness)
    }

    fn has_dots(&self) -> bool {
        (**self).has_dots()
    }
}

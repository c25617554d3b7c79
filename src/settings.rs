//! The user-adjustable settings and their update rules.
//!
//! Every rule wraps at its own boundary, so an out-of-range value can never be produced by an
//! update. Values read from storage are checked the same way and replaced by defaults.

use core::ops::RangeInclusive;

use crate::byte_store::{ByteStore, SettingAddress};

/// Display brightness levels.
pub const BRIGHTNESS_RANGE: RangeInclusive<u8> = 1..=10;
/// Two-digit years the date menu offers.
pub const YEAR_RANGE: RangeInclusive<u8> = 10..=29;
/// Months of the year.
pub const MONTH_RANGE: RangeInclusive<u8> = 1..=12;
/// Days of the month. Not checked against the month's length.
pub const DAY_RANGE: RangeInclusive<u8> = 1..=31;

/// Increment `value`, wrapping to the start of `range` past its end.
#[must_use]
pub fn wrap_increment(value: u8, range: &RangeInclusive<u8>) -> u8 {
    match value.checked_add(1) {
        Some(next) if range.contains(&next) => next,
        _ => *range.start(),
    }
}

/// Text for an on/off setting.
#[must_use]
pub const fn on_off(value: bool) -> &'static str {
    if value { " on" } else { "off" }
}

fn bool_from_byte(byte: u8) -> Option<bool> {
    match byte {
        0 => Some(false),
        1 => Some(true),
        _ => None,
    }
}

/// The order the date is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DateFormat {
    #[default]
    Ymd = 0,
    Mdy = 1,
    Dmy = 2,
}

impl DateFormat {
    /// YMD -> MDY -> DMY -> YMD.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Ymd => Self::Mdy,
            Self::Mdy => Self::Dmy,
            Self::Dmy => Self::Ymd,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ymd => "YMD",
            Self::Mdy => "MDY",
            Self::Dmy => "DMY",
        }
    }

    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Ymd),
            1 => Some(Self::Mdy),
            2 => Some(Self::Dmy),
            _ => None,
        }
    }
}

/// How the daylight-saving offset is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DstMode {
    /// Offset fixed at zero hours.
    #[default]
    Off = 0,
    /// Offset fixed at one hour.
    On = 1,
    /// Offset follows the configured rules for the current date.
    Auto = 2,
}

impl DstMode {
    /// Off -> On -> Auto -> Off.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Off => Self::On,
            Self::On => Self::Auto,
            Self::Auto => Self::Off,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Off => " off",
            Self::On => "  on",
            Self::Auto => "auto",
        }
    }

    /// The offset a manual mode pins the clock to; `None` for [`DstMode::Auto`].
    #[must_use]
    pub const fn fixed_offset(self) -> Option<u8> {
        match self {
            Self::Off => Some(0),
            Self::On => Some(1),
            Self::Auto => None,
        }
    }

    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Off),
            1 => Some(Self::On),
            2 => Some(Self::Auto),
            _ => None,
        }
    }
}

/// Whether the scrolling-word feature reads its database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum FeatureDatabaseMode {
    #[default]
    Off = 0,
    On = 1,
    Full = 2,
}

impl FeatureDatabaseMode {
    /// Off -> On -> Full -> Off.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Off => Self::On,
            Self::On => Self::Full,
            Self::Full => Self::Off,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Off => " off",
            Self::On => "  on",
            Self::Full => "full",
        }
    }

    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Off),
            1 => Some(Self::On),
            2 => Some(Self::Full),
            _ => None,
        }
    }
}

/// The date as edited through the menu: two-digit year, month, day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateParts {
    pub year: u8,
    pub month: u8,
    pub day: u8,
}

impl Default for DateParts {
    fn default() -> Self {
        Self {
            year: *YEAR_RANGE.start(),
            month: *MONTH_RANGE.start(),
            day: *DAY_RANGE.start(),
        }
    }
}

/// In-memory values of every setting. The single source of truth during a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    pub brightness: u8,
    pub clock_24h: bool,
    pub date: DateParts,
    pub auto_date: bool,
    pub date_format: DateFormat,
    pub dst_mode: DstMode,
    pub show_temperature: bool,
    /// Not persisted: the dots come back on after every power cycle.
    pub show_dots: bool,
    pub feature_database: FeatureDatabaseMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            brightness: 8,
            clock_24h: true,
            date: DateParts::default(),
            auto_date: false,
            date_format: DateFormat::Ymd,
            dst_mode: DstMode::Off,
            show_temperature: false,
            show_dots: true,
            feature_database: FeatureDatabaseMode::Off,
        }
    }
}

impl Settings {
    /// Read every persisted setting from `store`.
    ///
    /// Unreadable or out-of-range bytes (a blank EEPROM reads `0xFF`) fall back to the
    /// default for that setting.
    pub fn load(store: &mut impl ByteStore) -> Self {
        let defaults = Self::default();
        let mut read = |address: SettingAddress| match store.read_byte(address.address()) {
            Ok(byte) => Some(byte),
            Err(_err) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Cannot read setting {}: {}", address, _err);
                None
            }
        };

        let in_range =
            |byte: Option<u8>, range: RangeInclusive<u8>| byte.filter(|value| range.contains(value));

        Self {
            brightness: in_range(read(SettingAddress::Brightness), BRIGHTNESS_RANGE)
                .unwrap_or(defaults.brightness),
            clock_24h: read(SettingAddress::Clock24h)
                .and_then(bool_from_byte)
                .unwrap_or(defaults.clock_24h),
            date: DateParts {
                year: in_range(read(SettingAddress::Year), YEAR_RANGE)
                    .unwrap_or(defaults.date.year),
                month: in_range(read(SettingAddress::Month), MONTH_RANGE)
                    .unwrap_or(defaults.date.month),
                day: in_range(read(SettingAddress::Day), DAY_RANGE).unwrap_or(defaults.date.day),
            },
            auto_date: read(SettingAddress::AutoDate)
                .and_then(bool_from_byte)
                .unwrap_or(defaults.auto_date),
            date_format: read(SettingAddress::Region)
                .and_then(DateFormat::from_byte)
                .unwrap_or(defaults.date_format),
            dst_mode: read(SettingAddress::DstMode)
                .and_then(DstMode::from_byte)
                .unwrap_or(defaults.dst_mode),
            show_temperature: read(SettingAddress::ShowTemperature)
                .and_then(bool_from_byte)
                .unwrap_or(defaults.show_temperature),
            show_dots: defaults.show_dots,
            feature_database: read(SettingAddress::FeatureDatabase)
                .and_then(FeatureDatabaseMode::from_byte)
                .unwrap_or(defaults.feature_database),
        }
    }
}

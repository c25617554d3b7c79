//! All process-wide state of the clock core, owned in one place.

use crate::byte_store::{ByteStore, SettingAddress};
use crate::calendar::{full_year, CalendarRecord};
use crate::config::Config;
use crate::dst::DstBoundaries;
use crate::settings::Settings;
use crate::Result;

/// Daylight-saving bookkeeping.
///
/// `applied_offset` always equals the offset last physically added to the RTC's time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DstState {
    pub(crate) applied_offset: u8,
    pub(crate) adjusted_today: bool,
    pub(crate) boundaries: Option<DstBoundaries>,
    pub(crate) last_seen: Option<CalendarRecord>,
}

impl DstState {
    /// Restore the applied offset and the day of the last adjustment persisted by a previous
    /// session.
    ///
    /// A stored adjustment day arms the guard. The first [`tick`](crate::dst_engine::tick)
    /// re-arms it if the RTC has moved on to another day since.
    pub fn load(store: &mut impl ByteStore, max_offset: u8) -> Self {
        let applied_offset = match store.read_byte(SettingAddress::DstOffset.address()) {
            Ok(byte) if byte <= max_offset => byte,
            Ok(_) => 0,
            Err(_err) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Cannot read DST offset: {}", _err);
                0
            }
        };
        let last_seen = load_adjusted_day(store);
        Self {
            applied_offset,
            adjusted_today: last_seen.is_some(),
            last_seen,
            ..Self::default()
        }
    }

    /// Hours of daylight-saving offset currently reflected in the RTC.
    #[must_use]
    pub const fn applied_offset(&self) -> u8 {
        self.applied_offset
    }

    /// True once an adjustment has been made and not yet re-armed by a mode or date change.
    #[must_use]
    pub const fn adjusted_today(&self) -> bool {
        self.adjusted_today
    }

    /// Allow the engine to adjust the clock again.
    pub const fn clear_adjusted(&mut self) {
        self.adjusted_today = false;
    }

    /// The cached boundaries, if any have been derived.
    #[must_use]
    pub const fn boundaries(&self) -> Option<&DstBoundaries> {
        self.boundaries.as_ref()
    }

    /// Re-derive the boundaries for the two-digit `year`.
    pub(crate) fn refresh_boundaries(
        &mut self,
        config: &Config,
        year: u8,
    ) -> Result<DstBoundaries> {
        let boundaries = DstBoundaries::for_year(&config.dst_rules, full_year(year))?;
        self.boundaries = Some(boundaries);
        Ok(boundaries)
    }

    /// The rule offset at `now`, re-deriving boundaries when the year has moved on.
    pub(crate) fn rule_offset(&mut self, config: &Config, now: &CalendarRecord) -> Result<u8> {
        let date_time = now.to_primitive()?;
        let boundaries = match self.boundaries {
            Some(boundaries) if boundaries.year() == date_time.year() => boundaries,
            _ => self.refresh_boundaries(config, now.year)?,
        };
        Ok(boundaries.offset_at(date_time))
    }
}

/// Midnight of the persisted adjustment day, or `None` if storage holds no real date.
fn load_adjusted_day(store: &mut impl ByteStore) -> Option<CalendarRecord> {
    let mut read = |address: SettingAddress| store.read_byte(address.address()).ok();
    let year = read(SettingAddress::DstAdjustedYear).filter(|year| *year < 100)?;
    let month = read(SettingAddress::DstAdjustedMonth)?;
    let day = read(SettingAddress::DstAdjustedDay)?;
    let record = CalendarRecord::new(year, month, day, 0, 0, 0);
    record.date().is_ok().then_some(record)
}

/// Settings, DST bookkeeping and startup configuration, passed by `&mut` into the menu and
/// the DST engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemState {
    pub settings: Settings,
    pub dst: DstState,
    config: Config,
}

impl SystemState {
    #[must_use]
    pub const fn new(config: Config, settings: Settings, dst: DstState) -> Self {
        Self {
            settings,
            dst,
            config,
        }
    }

    /// Load every persisted value from `store`.
    pub fn load(config: Config, store: &mut impl ByteStore) -> Self {
        let settings = Settings::load(store);
        let dst = DstState::load(store, config.dst_rules.offset_hours);
        #[cfg(feature = "defmt")]
        defmt::info!(
            "Loaded settings: {}, DST offset {}",
            settings,
            dst.applied_offset
        );
        Self::new(config, settings, dst)
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }
}

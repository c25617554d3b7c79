//! Keeps the RTC's wall-clock time in step with the daylight-saving mode.
//!
//! The engine compares the offset the mode asks for with the offset already applied to the
//! RTC and moves the clock by the difference. Under `Auto` it adjusts at most once, until a
//! mode or date change re-arms it. [`tick`] also re-arms it on each new calendar day. The day
//! of the last adjustment is persisted, so a restart on that day keeps the guard.

use crate::buzzer::{Buzzer, Tone};
use crate::byte_store::{ByteStore, SettingAddress};
use crate::calendar::CalendarRecord;
use crate::devices::Devices;
use crate::rtc::Rtc;
use crate::setting_display::SettingDisplay;
use crate::settings::DstMode;
use crate::system_state::SystemState;

/// What one run of the engine did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DstOutcome {
    /// This clock has no daylight-saving support configured.
    Disabled,
    /// `Auto` mode already adjusted the clock; nothing was read or written.
    AlreadyAdjusted,
    /// The applied offset is already correct.
    Unchanged,
    /// The RTC had no valid time (or rejected the write); all state is unchanged.
    ClockUnavailable,
    /// The clock was moved by `delta_hours`.
    Shifted { delta_hours: i8 },
}

/// Bring the applied offset in line with `mode`, shifting the RTC if needed.
pub fn apply_dst_mode<S, R, D, B>(
    state: &mut SystemState,
    devices: &mut Devices<S, R, D, B>,
    mode: DstMode,
) -> DstOutcome
where
    S: ByteStore,
    R: Rtc,
    D: SettingDisplay,
    B: Buzzer,
{
    let config = *state.config();
    if !config.capabilities.auto_dst {
        return DstOutcome::Disabled;
    }
    if mode == DstMode::Auto && state.dst.adjusted_today {
        return DstOutcome::AlreadyAdjusted;
    }

    let mut now = None;
    let desired = match mode.fixed_offset() {
        Some(offset) => offset,
        None => {
            let Some(current) = read_clock(&mut devices.rtc) else {
                return DstOutcome::ClockUnavailable;
            };
            match state.dst.rule_offset(&config, &current) {
                Ok(offset) => {
                    now = Some(current);
                    offset
                }
                Err(_err) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("No DST rule offset for {}: {}", current, _err);
                    return DstOutcome::ClockUnavailable;
                }
            }
        }
    };

    let Ok(delta_hours) = i8::try_from(i16::from(desired) - i16::from(state.dst.applied_offset))
    else {
        return DstOutcome::Unchanged;
    };
    if delta_hours == 0 {
        return DstOutcome::Unchanged;
    }

    let now = match now {
        Some(now) => now,
        None => match read_clock(&mut devices.rtc) {
            Some(now) => now,
            None => return DstOutcome::ClockUnavailable,
        },
    };
    let shifted = match now.shifted_by_hours(delta_hours) {
        Ok(shifted) => shifted,
        Err(_err) => {
            #[cfg(feature = "defmt")]
            defmt::warn!("Cannot shift {} by {} h: {}", now, delta_hours, _err);
            return DstOutcome::ClockUnavailable;
        }
    };

    devices.buzzer.play_tone(if delta_hours > 0 {
        Tone::SPRING_AHEAD
    } else {
        Tone::FALL_BACK
    });

    if let Err(_err) = devices.rtc.set_time(&shifted) {
        #[cfg(feature = "defmt")]
        defmt::warn!("Cannot write DST-adjusted time: {}", _err);
        return DstOutcome::ClockUnavailable;
    }

    state.dst.applied_offset = desired;
    devices.persist(SettingAddress::DstOffset, desired);
    state.dst.adjusted_today = true;
    state.dst.last_seen = Some(shifted);
    devices.persist(SettingAddress::DstAdjustedYear, shifted.year);
    devices.persist(SettingAddress::DstAdjustedMonth, shifted.month);
    devices.persist(SettingAddress::DstAdjustedDay, shifted.day);

    #[cfg(feature = "defmt")]
    defmt::info!(
        "DST {}: moved clock {} h, {} -> {}",
        mode,
        delta_hours,
        now,
        shifted
    );
    DstOutcome::Shifted { delta_hours }
}

/// Set the RTC's date, keeping its time of day, and re-run the engine for the new date.
///
/// If the RTC has no valid time, the new date starts at midnight.
pub fn set_date<S, R, D, B>(
    state: &mut SystemState,
    devices: &mut Devices<S, R, D, B>,
    year: u8,
    month: u8,
    day: u8,
) -> DstOutcome
where
    S: ByteStore,
    R: Rtc,
    D: SettingDisplay,
    B: Buzzer,
{
    let record = read_clock(&mut devices.rtc)
        .unwrap_or_default()
        .with_date(year, month, day);
    if let Err(_err) = devices.rtc.set_time(&record) {
        #[cfg(feature = "defmt")]
        defmt::warn!("Cannot set date {}: {}", record, _err);
    }
    state.dst.last_seen = Some(record);

    let config = *state.config();
    if !config.capabilities.auto_dst {
        return DstOutcome::Disabled;
    }
    if let Err(_err) = state.dst.refresh_boundaries(&config, year) {
        #[cfg(feature = "defmt")]
        defmt::warn!("Cannot derive DST boundaries for {}: {}", year, _err);
    }
    state.dst.clear_adjusted();
    let mode = state.settings.dst_mode;
    apply_dst_mode(state, devices, mode)
}

/// Periodic entry point: re-arm the engine on a new calendar day, then run it.
pub fn tick<S, R, D, B>(state: &mut SystemState, devices: &mut Devices<S, R, D, B>) -> DstOutcome
where
    S: ByteStore,
    R: Rtc,
    D: SettingDisplay,
    B: Buzzer,
{
    if !state.config().capabilities.auto_dst {
        return DstOutcome::Disabled;
    }
    let Some(now) = read_clock(&mut devices.rtc) else {
        return DstOutcome::ClockUnavailable;
    };
    let new_day = state
        .dst
        .last_seen
        .is_some_and(|last_seen| !last_seen.same_day(&now));
    if new_day {
        #[cfg(feature = "defmt")]
        defmt::debug!("New day {}: DST adjustment re-armed", now);
        state.dst.clear_adjusted();
    }
    state.dst.last_seen = Some(now);
    let mode = state.settings.dst_mode;
    apply_dst_mode(state, devices, mode)
}

fn read_clock(rtc: &mut impl Rtc) -> Option<CalendarRecord> {
    match rtc.time() {
        Ok(now) => Some(now),
        Err(_err) => {
            #[cfg(feature = "defmt")]
            defmt::warn!("RTC has no valid time: {}", _err);
            None
        }
    }
}

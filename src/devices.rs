//! The hardware collaborators the core drives, bundled so they can be passed as one.

use crate::buzzer::Buzzer;
use crate::byte_store::{ByteStore, SettingAddress};
use crate::rtc::Rtc;
use crate::setting_display::SettingDisplay;

/// Byte storage, RTC, display and buzzer.
#[derive(Debug)]
pub struct Devices<S, R, D, B> {
    pub store: S,
    pub rtc: R,
    pub display: D,
    pub buzzer: B,
}

impl<S, R, D, B> Devices<S, R, D, B> {
    pub const fn new(store: S, rtc: R, display: D, buzzer: B) -> Self {
        Self {
            store,
            rtc,
            display,
            buzzer,
        }
    }
}

impl<S, R, D, B> Devices<S, R, D, B>
where
    S: ByteStore,
    R: Rtc,
    D: SettingDisplay,
    B: Buzzer,
{
    /// Write a setting byte. A failed write is logged; the in-memory value stays authoritative.
    pub(crate) fn persist(&mut self, address: SettingAddress, value: u8) {
        if let Err(_err) = self.store.write_byte(address.address(), value) {
            #[cfg(feature = "defmt")]
            defmt::warn!("Cannot persist {} = {}: {}", address, value, _err);
        }
    }
}

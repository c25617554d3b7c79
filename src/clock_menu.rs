//! The clock core as one value: settings, DST state, menu cursor and the hardware.

use crate::buzzer::Buzzer;
use crate::byte_store::ByteStore;
use crate::config::Config;
use crate::devices::Devices;
use crate::dst_engine::{self, DstOutcome};
use crate::menu::{Menu, MenuState};
use crate::rtc::Rtc;
use crate::setting_display::SettingDisplay;
use crate::settings::Settings;
use crate::system_state::SystemState;

/// Settings menu and daylight-saving engine for a clock with an RTC, byte storage, a display
/// and a buzzer.
///
/// The outer loop turns button presses into [`ClockMenu::enter_menu`], [`ClockMenu::advance`]
/// and [`ClockMenu::dispatch`] calls, and calls [`ClockMenu::tick`] periodically.
///
/// # Example
///
/// ```rust,ignore
/// let devices = Devices::new(eeprom, rtc, lcd, buzzer);
/// let mut clock_menu = ClockMenu::new(Config::from_build_env(capabilities), devices);
///
/// clock_menu.enter_menu();
/// clock_menu.dispatch(false, true);
/// clock_menu.dispatch(true, true); // brightness + 1
/// clock_menu.advance();
/// ```
#[derive(Debug)]
pub struct ClockMenu<S, R, D, B> {
    state: SystemState,
    menu: Menu,
    devices: Devices<S, R, D, B>,
}

impl<S, R, D, B> ClockMenu<S, R, D, B>
where
    S: ByteStore,
    R: Rtc,
    D: SettingDisplay,
    B: Buzzer,
{
    /// Load the persisted settings and start on the clock face.
    pub fn new(config: Config, mut devices: Devices<S, R, D, B>) -> Self {
        let state = SystemState::load(config, &mut devices.store);
        Self::from_state(state, devices)
    }

    /// Start from an already-built state, skipping the startup load.
    pub const fn from_state(state: SystemState, devices: Devices<S, R, D, B>) -> Self {
        Self {
            state,
            menu: Menu::new(),
            devices,
        }
    }

    pub fn enter_menu(&mut self) {
        self.menu.enter(&self.state.config().capabilities);
    }

    pub fn advance(&mut self) {
        self.menu.advance(&self.state.config().capabilities);
    }

    /// Update (if `update`) and render the current menu item.
    pub fn dispatch(&mut self, update: bool, show: bool) {
        self.menu
            .dispatch(&mut self.state, &mut self.devices, update, show);
    }

    /// Set the date, keeping the time of day, and re-run the DST engine.
    pub fn set_date(&mut self, year: u8, month: u8, day: u8) -> DstOutcome {
        dst_engine::set_date(&mut self.state, &mut self.devices, year, month, day)
    }

    /// Run the DST engine with the configured mode.
    pub fn apply_dst(&mut self) -> DstOutcome {
        let mode = self.state.settings.dst_mode;
        dst_engine::apply_dst_mode(&mut self.state, &mut self.devices, mode)
    }

    /// Periodic entry point; see [`dst_engine::tick`].
    pub fn tick(&mut self) -> DstOutcome {
        dst_engine::tick(&mut self.state, &mut self.devices)
    }
}

impl<S, R, D, B> ClockMenu<S, R, D, B> {
    #[must_use]
    pub const fn state(&self) -> &SystemState {
        &self.state
    }

    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.state.settings
    }

    #[must_use]
    pub fn menu_state(&self) -> MenuState {
        self.menu.state()
    }

    #[must_use]
    pub const fn devices(&self) -> &Devices<S, R, D, B> {
        &self.devices
    }

    pub const fn devices_mut(&mut self) -> &mut Devices<S, R, D, B> {
        &mut self.devices
    }

    #[must_use]
    pub fn into_devices(self) -> Devices<S, R, D, B> {
        self.devices
    }
}

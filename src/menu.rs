//! The settings menu: an ordered list of items with an index cursor.
//!
//! The cursor is `None` while the clock face is showing. Navigation only ever lands on items
//! the startup [`Capabilities`] enable.

use crate::buzzer::Buzzer;
use crate::byte_store::{ByteStore, SettingAddress};
use crate::config::Capabilities;
use crate::devices::Devices;
use crate::dst_engine;
use crate::rtc::Rtc;
use crate::setting_display::{SettingDisplay, SettingValue};
use crate::settings::{
    BRIGHTNESS_RANGE, DAY_RANGE, MONTH_RANGE, Settings, YEAR_RANGE, on_off, wrap_increment,
};
use crate::system_state::SystemState;

/// One editable setting, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuItem {
    Brightness,
    Clock24h,
    Year,
    Month,
    Day,
    AutoDate,
    Region,
    Dst,
    Temperature,
    Dots,
    FeatureDatabase,
}

/// Every menu item, in the order [`Menu::advance`] visits them.
pub const MENU_ITEMS: [MenuItem; 11] = [
    MenuItem::Brightness,
    MenuItem::Clock24h,
    MenuItem::Year,
    MenuItem::Month,
    MenuItem::Day,
    MenuItem::AutoDate,
    MenuItem::Region,
    MenuItem::Dst,
    MenuItem::Temperature,
    MenuItem::Dots,
    MenuItem::FeatureDatabase,
];

impl MenuItem {
    /// Code for a four-character display.
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Brightness => "BRIT",
            Self::Clock24h => "24H",
            Self::Year => "YEAR",
            Self::Month => "MNTH",
            Self::Day => "DAY",
            Self::AutoDate => "ADTE",
            Self::Region => "REGN",
            Self::Dst => "DST",
            Self::Temperature => "TEMP",
            Self::Dots => "DOTS",
            Self::FeatureDatabase => "FLW",
        }
    }

    /// Name for a display with room for it.
    #[must_use]
    pub const fn long_name(self) -> &'static str {
        match self {
            Self::Brightness => "BRITE",
            Self::Clock24h => "24H",
            Self::Year => "YEAR",
            Self::Month => "MONTH",
            Self::Day => "DAY",
            Self::AutoDate => "ADATE",
            Self::Region => "REGION",
            Self::Dst => "DST",
            Self::Temperature => "TEMP",
            Self::Dots => "DOTS",
            Self::FeatureDatabase => "FLW",
        }
    }

    /// Where the item is persisted. The separator dots are not.
    #[must_use]
    pub const fn address(self) -> Option<SettingAddress> {
        match self {
            Self::Brightness => Some(SettingAddress::Brightness),
            Self::Clock24h => Some(SettingAddress::Clock24h),
            Self::Year => Some(SettingAddress::Year),
            Self::Month => Some(SettingAddress::Month),
            Self::Day => Some(SettingAddress::Day),
            Self::AutoDate => Some(SettingAddress::AutoDate),
            Self::Region => Some(SettingAddress::Region),
            Self::Dst => Some(SettingAddress::DstMode),
            Self::Temperature => Some(SettingAddress::ShowTemperature),
            Self::Dots => None,
            Self::FeatureDatabase => Some(SettingAddress::FeatureDatabase),
        }
    }

    #[must_use]
    pub const fn is_enabled(self, capabilities: &Capabilities) -> bool {
        match self {
            Self::Year | Self::Month | Self::Day => capabilities.set_date,
            Self::Dst => capabilities.auto_dst,
            Self::Temperature => capabilities.temperature,
            Self::Dots => capabilities.dots,
            Self::FeatureDatabase => capabilities.feature_database,
            Self::Brightness | Self::Clock24h | Self::AutoDate | Self::Region => true,
        }
    }

    /// The item's current value, formatted for the display.
    #[must_use]
    pub const fn value(self, settings: &Settings) -> SettingValue {
        match self {
            Self::Brightness => SettingValue::Number(settings.brightness),
            Self::Clock24h => SettingValue::Text(on_off(settings.clock_24h)),
            Self::Year => SettingValue::Number(settings.date.year),
            Self::Month => SettingValue::Number(settings.date.month),
            Self::Day => SettingValue::Number(settings.date.day),
            Self::AutoDate => SettingValue::Text(on_off(settings.auto_date)),
            Self::Region => SettingValue::Text(settings.date_format.label()),
            Self::Dst => SettingValue::Text(settings.dst_mode.label()),
            Self::Temperature => SettingValue::Text(on_off(settings.show_temperature)),
            Self::Dots => SettingValue::Text(on_off(settings.show_dots)),
            Self::FeatureDatabase => SettingValue::Text(settings.feature_database.label()),
        }
    }

    /// Apply the item's update rule and return the byte to persist.
    pub fn update(self, settings: &mut Settings) -> u8 {
        match self {
            Self::Brightness => {
                settings.brightness = wrap_increment(settings.brightness, &BRIGHTNESS_RANGE);
                settings.brightness
            }
            Self::Clock24h => {
                settings.clock_24h = !settings.clock_24h;
                u8::from(settings.clock_24h)
            }
            Self::Year => {
                settings.date.year = wrap_increment(settings.date.year, &YEAR_RANGE);
                settings.date.year
            }
            Self::Month => {
                settings.date.month = wrap_increment(settings.date.month, &MONTH_RANGE);
                settings.date.month
            }
            Self::Day => {
                settings.date.day = wrap_increment(settings.date.day, &DAY_RANGE);
                settings.date.day
            }
            Self::AutoDate => {
                settings.auto_date = !settings.auto_date;
                u8::from(settings.auto_date)
            }
            Self::Region => {
                settings.date_format = settings.date_format.next();
                settings.date_format as u8
            }
            Self::Dst => {
                settings.dst_mode = settings.dst_mode.next();
                settings.dst_mode as u8
            }
            Self::Temperature => {
                settings.show_temperature = !settings.show_temperature;
                u8::from(settings.show_temperature)
            }
            Self::Dots => {
                settings.show_dots = !settings.show_dots;
                u8::from(settings.show_dots)
            }
            Self::FeatureDatabase => {
                settings.feature_database = settings.feature_database.next();
                settings.feature_database as u8
            }
        }
    }
}

/// Where the menu is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuState {
    /// No menu is active; the clock face is showing.
    Clock,
    /// The given item is being edited.
    Item(MenuItem),
}

/// Menu cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Menu {
    position: Option<usize>,
}

impl Menu {
    /// A menu showing the clock face.
    #[must_use]
    pub const fn new() -> Self {
        Self { position: None }
    }

    #[must_use]
    pub fn state(&self) -> MenuState {
        self.position
            .and_then(|index| MENU_ITEMS.get(index).copied())
            .map_or(MenuState::Clock, MenuState::Item)
    }

    /// Open the menu on the first enabled item.
    pub fn enter(&mut self, capabilities: &Capabilities) {
        self.position = Self::next_enabled(0, capabilities);
    }

    /// Move to the next enabled item, or back to the clock face after the last one.
    ///
    /// From the clock face this opens the menu, like [`Menu::enter`].
    pub fn advance(&mut self, capabilities: &Capabilities) {
        let from = self.position.map_or(0, |index| index.saturating_add(1));
        self.position = Self::next_enabled(from, capabilities);
    }

    fn next_enabled(from: usize, capabilities: &Capabilities) -> Option<usize> {
        MENU_ITEMS
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, item)| item.is_enabled(capabilities))
            .map(|(index, _)| index)
    }

    /// Update (if asked) and render the current item. A no-op on the clock face.
    pub fn dispatch<S, R, D, B>(
        &self,
        state: &mut SystemState,
        devices: &mut Devices<S, R, D, B>,
        update: bool,
        show: bool,
    ) where
        S: ByteStore,
        R: Rtc,
        D: SettingDisplay,
        B: Buzzer,
    {
        let MenuState::Item(item) = self.state() else {
            return;
        };

        #[cfg(feature = "defmt")]
        defmt::debug!("menu({}, {}) on {}", update, show, item);

        if update {
            let byte = item.update(&mut state.settings);
            if let Some(address) = item.address() {
                devices.persist(address, byte);
            }
            match item {
                MenuItem::Brightness => {
                    if let Err(_err) = devices.display.set_brightness(state.settings.brightness) {
                        #[cfg(feature = "defmt")]
                        defmt::warn!("Cannot apply brightness: {}", _err);
                    }
                }
                MenuItem::Year | MenuItem::Month | MenuItem::Day => {
                    let date = state.settings.date;
                    dst_engine::set_date(state, devices, date.year, date.month, date.day);
                }
                MenuItem::Dst => {
                    state.dst.clear_adjusted();
                    let mode = state.settings.dst_mode;
                    dst_engine::apply_dst_mode(state, devices, mode);
                }
                _ => {}
            }
        }

        let value = item.value(&state.settings);
        if let Err(_err) =
            devices
                .display
                .render_setting(item.short_name(), item.long_name(), value, show)
        {
            #[cfg(feature = "defmt")]
            defmt::warn!("Cannot render {}: {}", item, _err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(capabilities: &Capabilities) -> usize {
        let mut menu = Menu::new();
        menu.enter(capabilities);
        let mut steps = 0;
        while menu.state() != MenuState::Clock {
            menu.advance(capabilities);
            steps += 1;
            assert!(steps <= MENU_ITEMS.len(), "menu never returned to the clock");
        }
        steps
    }

    #[test]
    fn every_item_is_visited_once_when_all_are_enabled() {
        assert_eq!(walk(&Capabilities::default()), MENU_ITEMS.len());
    }

    #[test]
    fn disabled_items_are_skipped() {
        let capabilities = Capabilities::detect(false, false, false);
        assert_eq!(walk(&capabilities), MENU_ITEMS.len() - 3);

        let mut menu = Menu::new();
        menu.enter(&capabilities);
        let mut seen = [false; MENU_ITEMS.len()];
        while let MenuState::Item(item) = menu.state() {
            seen[item as usize] = true;
            menu.advance(&capabilities);
        }
        assert!(!seen[MenuItem::Temperature as usize]);
        assert!(!seen[MenuItem::Dots as usize]);
        assert!(!seen[MenuItem::FeatureDatabase as usize]);
        assert!(seen[MenuItem::Dst as usize]);
    }

    #[test]
    fn without_date_editing_region_follows_24h() {
        let capabilities = Capabilities {
            set_date: false,
            ..Capabilities::default()
        };
        let mut menu = Menu::new();
        menu.enter(&capabilities);
        menu.advance(&capabilities);
        assert_eq!(menu.state(), MenuState::Item(MenuItem::Clock24h));
        menu.advance(&capabilities);
        assert_eq!(menu.state(), MenuState::Item(MenuItem::AutoDate));
    }

    #[test]
    fn advance_from_clock_opens_the_menu() {
        let capabilities = Capabilities::default();
        let mut menu = Menu::new();
        assert_eq!(menu.state(), MenuState::Clock);
        menu.advance(&capabilities);
        assert_eq!(menu.state(), MenuState::Item(MenuItem::Brightness));
    }

    #[test]
    fn update_rules_wrap() {
        let mut settings = Settings {
            brightness: 10,
            ..Settings::default()
        };
        assert_eq!(MenuItem::Brightness.update(&mut settings), 1);
        assert_eq!(settings.brightness, 1);

        settings.date.year = 29;
        assert_eq!(MenuItem::Year.update(&mut settings), 10);

        assert_eq!(MenuItem::Dst.update(&mut settings), 1);
        assert_eq!(MenuItem::Dst.update(&mut settings), 2);
        assert_eq!(MenuItem::Dst.update(&mut settings), 0);
    }

    #[test]
    fn labels_fit_a_four_character_display() {
        for item in MENU_ITEMS {
            assert!(item.short_name().len() <= 4);
        }
    }
}

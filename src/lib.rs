//! Settings menu and daylight-saving adjustment for an RTC-backed clock.
#![cfg_attr(not(test), no_std)]

pub mod at24c32;
pub mod buzzer;
pub mod byte_store;
pub mod calendar;
pub mod char_lcd_i2c;
mod clock_menu;
pub mod config;
mod devices;
pub mod ds3231;
pub mod dst;
pub mod dst_engine;
mod error;
pub mod menu;
#[cfg(feature = "pico1")]
pub mod pwm_buzzer;
pub mod rtc;
pub mod setting_display;
pub mod settings;
pub mod system_state;
pub mod unix_seconds;

// Re-export commonly used items
pub use at24c32::At24c32;
pub use buzzer::{Buzzer, Tone};
pub use byte_store::{ByteStore, RamByteStore, SettingAddress};
pub use calendar::CalendarRecord;
pub use char_lcd_i2c::CharLcdI2c;
pub use clock_menu::ClockMenu;
pub use config::{Capabilities, Config};
pub use devices::Devices;
pub use ds3231::Ds3231;
pub use dst::{DstBoundaries, DstRule, DstRules};
pub use dst_engine::DstOutcome;
pub use error::{Error, Result};
pub use menu::{Menu, MenuItem, MenuState};
#[cfg(feature = "pico1")]
pub use pwm_buzzer::PwmBuzzer;
pub use rtc::Rtc;
pub use setting_display::{SettingDisplay, SettingValue};
pub use settings::{DateFormat, DateParts, DstMode, FeatureDatabaseMode, Settings};
pub use system_state::{DstState, SystemState};
pub use unix_seconds::UnixSeconds;

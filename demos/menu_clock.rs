//! Menu clock: DS3231 + AT24C32 module and a 16x2 I2C LCD on I2C0, piezo on GPIO14.
//!
//! MENU (GPIO13) opens the settings menu and steps through it; SET (GPIO12) changes the
//! current setting. Once a second the daylight-saving engine runs and, on the clock face,
//! the time is redrawn.

#![no_std]
#![no_main]

use core::cell::RefCell;
use core::convert::Infallible;
use core::fmt::{self, Write};

use clock_menu::{
    At24c32, CalendarRecord, Capabilities, CharLcdI2c, ClockMenu, Config, Devices, Ds3231,
    MenuState, PwmBuzzer, Result, Rtc, SettingDisplay,
};
use defmt::{info, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_futures::select::{Either3, select3};
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{Config as I2cConfig, I2c};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_time::{Delay, Duration, Ticker, Timer};
use embedded_hal_bus::i2c::RefCellDevice;
use heapless::String;
use panic_probe as _;

const DEBOUNCE: Duration = Duration::from_millis(30);

#[embassy_executor::main]
pub async fn main(_spawner: Spawner) -> ! {
    // If it returns, something went wrong.
    match inner_main().await {
        Ok(never) => match never {},
        Err(err) => core::panic!("{err}"),
    }
}

async fn inner_main() -> Result<Infallible> {
    info!("Starting menu clock");
    let p = embassy_rp::init(Default::default());

    let bus = RefCell::new(I2c::new_blocking(
        p.I2C0,
        p.PIN_5,
        p.PIN_4,
        I2cConfig::default(),
    ));
    let rtc = Ds3231::new(RefCellDevice::new(&bus));
    let eeprom = At24c32::new(RefCellDevice::new(&bus), Delay);
    let lcd = CharLcdI2c::new(RefCellDevice::new(&bus), Delay)?;
    let buzzer = PwmBuzzer::new(Pwm::new_output_a(
        p.PWM_SLICE7,
        p.PIN_14,
        PwmConfig::default(),
    ));

    let capabilities = Capabilities::detect(rtc.has_temperature(), lcd.has_dots(), false);
    let config = Config::from_build_env(capabilities);
    info!("Capabilities: {}", capabilities);
    let mut clock_menu = ClockMenu::new(config, Devices::new(eeprom, rtc, lcd, buzzer));

    let mut menu_button = Input::new(p.PIN_13, Pull::Up);
    let mut set_button = Input::new(p.PIN_12, Pull::Up);
    let mut ticker = Ticker::every(Duration::from_secs(1));

    loop {
        match select3(
            menu_button.wait_for_falling_edge(),
            set_button.wait_for_falling_edge(),
            ticker.next(),
        )
        .await
        {
            Either3::First(()) => {
                if clock_menu.menu_state() == MenuState::Clock {
                    clock_menu.enter_menu();
                } else {
                    clock_menu.advance();
                }
                info!("Menu: {}", clock_menu.menu_state());
                clock_menu.dispatch(false, true);
                Timer::after(DEBOUNCE).await;
            }
            Either3::Second(()) => {
                clock_menu.dispatch(true, true);
                Timer::after(DEBOUNCE).await;
            }
            Either3::Third(()) => {
                let outcome = clock_menu.tick();
                info!("Tick: {}", outcome);
                if clock_menu.menu_state() == MenuState::Clock {
                    show_clock_face(&mut clock_menu);
                }
            }
        }
    }
}

fn show_clock_face<S, R, BUS, B>(clock_menu: &mut ClockMenu<S, R, CharLcdI2c<BUS, Delay>, B>)
where
    R: Rtc,
    BUS: embedded_hal::i2c::I2c,
{
    let clock_24h = clock_menu.settings().clock_24h;
    let devices = clock_menu.devices_mut();
    let (time, date) = match devices.rtc.time() {
        Ok(now) => match (format_time(&now, clock_24h), format_date(&now)) {
            (Ok(time), Ok(date)) => (time, date),
            _ => {
                warn!("Clock face text does not fit the LCD");
                return;
            }
        },
        Err(err) => {
            warn!("No time to show: {}", err);
            let time = String::try_from("--:--:--").unwrap_or_default();
            (time, String::new())
        }
    };
    for (line, text) in [(0, time), (1, date)] {
        if let Err(err) = devices.display.print_line(line, &text) {
            warn!("Cannot draw clock face line {}: {}", line, err);
        }
    }
}

fn format_time(
    now: &CalendarRecord,
    clock_24h: bool,
) -> core::result::Result<String<16>, fmt::Error> {
    let mut text = String::new();
    let hour = if clock_24h || (1..=12).contains(&now.hour) {
        now.hour
    } else if now.hour == 0 {
        12
    } else {
        now.hour - 12
    };
    write!(text, "{hour:02}:{:02}:{:02}", now.minute, now.second)?;
    Ok(text)
}

fn format_date(now: &CalendarRecord) -> core::result::Result<String<16>, fmt::Error> {
    let mut text = String::new();
    write!(text, "20{:02}-{:02}-{:02}", now.year, now.month, now.day)?;
    Ok(text)
}

//! Hand-written fake collaborators shared by the host-level tests.
#![allow(dead_code, reason = "each test binary uses a different subset")]

use clock_menu::{
    Buzzer, ByteStore, CalendarRecord, Capabilities, ClockMenu, Config, Devices, DstRules, Error,
    Result, Rtc, SettingDisplay, SettingValue, Tone,
};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};

/// Byte storage that records every successful write.
#[derive(Debug, Clone)]
pub struct FakeStore {
    pub bytes: [u8; 16],
    pub writes: Vec<(u16, u8)>,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

impl Default for FakeStore {
    fn default() -> Self {
        Self {
            bytes: [0xFF; 16],
            writes: Vec::new(),
            fail_reads: false,
            fail_writes: false,
        }
    }
}

impl FakeStore {
    pub fn with(pairs: &[(u16, u8)]) -> Self {
        let mut store = Self::default();
        for &(address, value) in pairs {
            store.bytes[usize::from(address)] = value;
        }
        store
    }

    pub fn writes_to(&self, address: u16) -> Vec<u8> {
        self.writes
            .iter()
            .filter(|(written, _)| *written == address)
            .map(|(_, value)| *value)
            .collect()
    }
}

impl ByteStore for FakeStore {
    fn read_byte(&mut self, address: u16) -> Result<u8> {
        if self.fail_reads {
            return Err(Error::I2c(ErrorKind::Other));
        }
        self.bytes
            .get(usize::from(address))
            .copied()
            .ok_or(Error::StorageAddressOutOfRange(address))
    }

    fn write_byte(&mut self, address: u16, value: u8) -> Result<()> {
        if self.fail_writes {
            return Err(Error::I2c(ErrorKind::Other));
        }
        let slot = self
            .bytes
            .get_mut(usize::from(address))
            .ok_or(Error::StorageAddressOutOfRange(address))?;
        *slot = value;
        self.writes.push((address, value));
        Ok(())
    }
}

/// RTC whose time only moves when set. `None` means the chip has no valid time.
#[derive(Debug, Clone, Default)]
pub struct FakeRtc {
    pub now: Option<CalendarRecord>,
    pub sets: Vec<CalendarRecord>,
    pub fail_sets: bool,
}

impl FakeRtc {
    pub fn at(now: CalendarRecord) -> Self {
        Self {
            now: Some(now),
            ..Self::default()
        }
    }
}

impl Rtc for FakeRtc {
    fn time(&mut self) -> Result<CalendarRecord> {
        self.now.ok_or(Error::ClockStopped)
    }

    fn set_time(&mut self, record: &CalendarRecord) -> Result<()> {
        if self.fail_sets {
            return Err(Error::I2c(ErrorKind::Other));
        }
        self.now = Some(*record);
        self.sets.push(*record);
        Ok(())
    }

    fn has_temperature(&self) -> bool {
        true
    }
}

/// One `render_setting` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rendered {
    pub short_name: &'static str,
    pub long_name: &'static str,
    pub value: SettingValue,
    pub flash: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingDisplay {
    pub renders: Vec<Rendered>,
    pub brightness: Vec<u8>,
}

impl SettingDisplay for RecordingDisplay {
    fn render_setting(
        &mut self,
        short_name: &'static str,
        long_name: &'static str,
        value: SettingValue,
        flash: bool,
    ) -> Result<()> {
        self.renders.push(Rendered {
            short_name,
            long_name,
            value,
            flash,
        });
        Ok(())
    }

    fn set_brightness(&mut self, brightness: u8) -> Result<()> {
        self.brightness.push(brightness);
        Ok(())
    }

    fn has_dots(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingBuzzer {
    pub tones: Vec<Tone>,
}

impl Buzzer for RecordingBuzzer {
    fn play_tone(&mut self, tone: Tone) {
        self.tones.push(tone);
    }
}

pub type TestMenu = ClockMenu<FakeStore, FakeRtc, RecordingDisplay, RecordingBuzzer>;

pub fn clock_menu(store: FakeStore, rtc: FakeRtc) -> TestMenu {
    clock_menu_with(Config::new(Capabilities::default(), DstRules::US), store, rtc)
}

pub fn clock_menu_with(config: Config, store: FakeStore, rtc: FakeRtc) -> TestMenu {
    ClockMenu::new(
        config,
        Devices::new(
            store,
            rtc,
            RecordingDisplay::default(),
            RecordingBuzzer::default(),
        ),
    )
}

/// One I2C device behind a register pointer, like the DS3231 (8-bit pointer) or the
/// AT24C32 (16-bit pointer). Pointers auto-increment on every byte.
#[derive(Debug, Clone)]
pub struct FakeI2cDevice {
    pub address: u8,
    pub pointer_bytes: usize,
    pub memory: Vec<u8>,
    pointer: usize,
    /// Every completed `write` payload (pointer bytes included).
    pub writes: Vec<Vec<u8>>,
}

impl FakeI2cDevice {
    pub fn new(address: u8, pointer_bytes: usize, size: usize) -> Self {
        Self {
            address,
            pointer_bytes,
            memory: vec![0; size],
            pointer: 0,
            writes: Vec::new(),
        }
    }

    fn write(&mut self, bytes: &[u8]) {
        let (pointer, data) = bytes.split_at(self.pointer_bytes.min(bytes.len()));
        if pointer.len() == self.pointer_bytes {
            self.pointer = pointer
                .iter()
                .fold(0, |acc, byte| (acc << 8) | usize::from(*byte));
        }
        for byte in data {
            let size = self.memory.len();
            self.memory[self.pointer % size] = *byte;
            self.pointer += 1;
        }
        self.writes.push(bytes.to_vec());
    }

    fn read(&mut self, buffer: &mut [u8]) {
        for byte in buffer {
            *byte = self.memory[self.pointer % self.memory.len()];
            self.pointer += 1;
        }
    }
}

/// Bus with any number of fake devices. Transactions to an unknown address fail with a NACK.
#[derive(Debug, Clone, Default)]
pub struct FakeI2cBus {
    pub devices: Vec<FakeI2cDevice>,
}

impl FakeI2cBus {
    pub fn with(device: FakeI2cDevice) -> Self {
        Self {
            devices: vec![device],
        }
    }

    pub fn device(&self, address: u8) -> &FakeI2cDevice {
        self.devices
            .iter()
            .find(|device| device.address == address)
            .expect("device on bus")
    }

    pub fn device_mut(&mut self, address: u8) -> &mut FakeI2cDevice {
        self.devices
            .iter_mut()
            .find(|device| device.address == address)
            .expect("device on bus")
    }
}

impl ErrorType for FakeI2cBus {
    type Error = ErrorKind;
}

impl I2c for FakeI2cBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> core::result::Result<(), Self::Error> {
        let device = self
            .devices
            .iter_mut()
            .find(|device| device.address == address)
            .ok_or(ErrorKind::NoAcknowledge(
                embedded_hal::i2c::NoAcknowledgeSource::Address,
            ))?;
        for operation in operations {
            match operation {
                Operation::Write(bytes) => device.write(bytes),
                Operation::Read(buffer) => device.read(buffer),
            }
        }
        Ok(())
    }
}

/// Delay that only adds up how long it was asked to wait.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountingDelay {
    pub total_ns: u64,
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

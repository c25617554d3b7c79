//! Audible feedback collaborator.

/// A4, played when the clock falls back an hour.
pub const NOTE_A4: u16 = 440;
/// A5, played when the clock springs ahead an hour.
pub const NOTE_A5: u16 = 880;

/// A tone to play on the piezo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tone {
    pub frequency_hz: u16,
    pub duration_ms: u16,
}

impl Tone {
    /// The cue for a forward daylight-saving shift.
    pub const SPRING_AHEAD: Self = Self {
        frequency_hz: NOTE_A5,
        duration_ms: 100,
    };

    /// The cue for a backward daylight-saving shift.
    pub const FALL_BACK: Self = Self {
        frequency_hz: NOTE_A4,
        duration_ms: 100,
    };
}

/// A piezo buzzer. Playing is best-effort and cannot fail.
pub trait Buzzer {
    fn play_tone(&mut self, tone: Tone);
}

impl<T: Buzzer + ?Sized> Buzzer for &mut T {
    fn play_tone(&mut self, tone: Tone) {
        (**self).play_tone(tone);
    }
}

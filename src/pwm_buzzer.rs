//! Piezo buzzer on an RP2040 PWM slice.
//! - Square wave at the tone's frequency, 50% duty
//! - Divider computed from clk_sys so `top` fits in 16 bits
//! - Blocks for the tone's duration, then silences the slice

use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pwm::{Config, Pwm};
use embassy_time::{Duration, block_for};

use crate::buzzer::{Buzzer, Tone};

pub struct PwmBuzzer<'d> {
    pwm: Pwm<'d>,
    cfg: Config, // Kept so the divider survives set_config calls
}

impl<'d> PwmBuzzer<'d> {
    /// Wrap an already-created PWM output, e.g.
    /// `PwmBuzzer::new(Pwm::new_output_a(p.PWM_SLICE7, p.PIN_14, Config::default()))`.
    pub fn new(mut pwm: Pwm<'d>) -> Self {
        let mut cfg = Config::default();
        cfg.enable = false;
        pwm.set_config(&cfg);
        Self { pwm, cfg }
    }

    #[expect(
        clippy::arithmetic_side_effects,
        clippy::integer_division_remainder_used,
        reason = "Divider is at least 1 and frequency is checked non-zero"
    )]
    fn start(&mut self, frequency_hz: u16) {
        let clk = u64::from(clk_sys_freq());
        let cycles_per_period = clk / u64::from(frequency_hz);
        let divider = cycles_per_period.div_ceil(u64::from(u16::MAX) + 1).clamp(1, 255);
        let top = u16::try_from(cycles_per_period / divider - 1).unwrap_or(u16::MAX);

        self.cfg.top = top;
        self.cfg.phase_correct = false;
        self.cfg.divider = u8::try_from(divider).unwrap_or(u8::MAX).into();
        self.cfg.compare_a = top / 2;
        self.cfg.compare_b = top / 2;
        self.cfg.enable = true;
        self.pwm.set_config(&self.cfg);

        #[cfg(feature = "defmt")]
        defmt::debug!("buzzer {}Hz div={} top={}", frequency_hz, divider, top);
    }

    fn stop(&mut self) {
        self.cfg.enable = false;
        self.pwm.set_config(&self.cfg);
    }
}

impl Buzzer for PwmBuzzer<'_> {
    fn play_tone(&mut self, tone: Tone) {
        if tone.frequency_hz == 0 {
            return;
        }
        self.start(tone.frequency_hz);
        block_for(Duration::from_millis(u64::from(tone.duration_ms)));
        self.stop();
    }
}

//! Startup configuration: which optional settings this clock offers, and its DST rules.

use crate::dst::DstRules;

/// Optional parts of the menu, decided once at startup from the attached hardware.
///
/// A disabled capability removes its menu item from navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[expect(
    clippy::struct_excessive_bools,
    reason = "Each flag is an independent capability"
)]
pub struct Capabilities {
    /// Year, month and day can be edited from the menu.
    pub set_date: bool,
    /// The DST item is offered and `Auto` mode follows the DST rules.
    pub auto_dst: bool,
    /// The RTC has a temperature sensor, so the temperature item is offered.
    pub temperature: bool,
    /// The display has separator dots, so the dots item is offered.
    pub dots: bool,
    /// A word database is attached, so the feature-database item is offered.
    pub feature_database: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            set_date: true,
            auto_dst: true,
            temperature: true,
            dots: true,
            feature_database: true,
        }
    }
}

impl Capabilities {
    /// Capabilities for the attached hardware, with date editing and auto-DST available.
    #[must_use]
    pub const fn detect(
        rtc_has_temperature: bool,
        display_has_dots: bool,
        has_database: bool,
    ) -> Self {
        Self {
            set_date: true,
            auto_dst: true,
            temperature: rtc_has_temperature,
            dots: display_has_dots,
            feature_database: has_database,
        }
    }
}

/// Everything the clock needs to know before it loads its settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    pub capabilities: Capabilities,
    pub dst_rules: DstRules,
}

impl Config {
    #[must_use]
    pub const fn new(capabilities: Capabilities, dst_rules: DstRules) -> Self {
        Self {
            capabilities,
            dst_rules,
        }
    }

    /// Configuration with the DST region chosen at build time.
    ///
    /// `build.rs` exports `CLOCK_DST_RULES` (from the environment or a `.env` file). Unknown
    /// or missing codes fall back to [`DstRules::US`].
    #[must_use]
    pub fn from_build_env(capabilities: Capabilities) -> Self {
        let dst_rules = option_env!("CLOCK_DST_RULES")
            .and_then(DstRules::from_region_code)
            .unwrap_or_default();
        Self::new(capabilities, dst_rules)
    }
}

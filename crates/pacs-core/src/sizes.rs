//! # Static Product Rules
//!
//! Build-time tables: size profiles and the option lists a selector shows.
//!
//! ```text
//! ┌──────────┬──────────┬─────────┬────────────┬─────────────────────┐
//! │ key      │ display  │ outputs │ max analog │ relay tap choices   │
//! ├──────────┼──────────┼─────────┼────────────┼─────────────────────┤
//! │ 7035E    │ 3.5 inch │    5    │     2      │ 5                   │
//! │ 7070E2   │ 7 inch   │   12    │     3      │ 12, 6               │
//! │ 7101E    │ 10 inch  │   20    │     4      │ 20, 15, 10, 5       │
//! └──────────┴──────────┴─────────┴────────────┴─────────────────────┘
//! ```

use serde::Serialize;

/// Attributes of one chassis size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeProfile {
    pub key: &'static str,
    pub display_name: &'static str,
    pub output_count: u8,
    pub max_analog_channels: u8,
    /// Descending. The first entry is the default tap count.
    pub relay_tap_choices: &'static [u8],
}

impl SizeProfile {
    /// Tap count a size change resets to.
    pub fn default_relay_taps(&self) -> u8 {
        self.relay_tap_choices.first().copied().unwrap_or(0)
    }

    /// Outputs left as transistors when `relay_taps` are wired as relays.
    pub fn transistor_remainder(&self, relay_taps: u8) -> u8 {
        self.output_count.saturating_sub(relay_taps)
    }
}

/// Indexed in [`crate::HmiSize`] order.
pub static SIZE_PROFILES: [SizeProfile; 3] = [
    SizeProfile {
        key: "7035E",
        display_name: "3.5 اینچ",
        output_count: 5,
        max_analog_channels: 2,
        relay_tap_choices: &[5],
    },
    SizeProfile {
        key: "7070E2",
        display_name: "7 اینچ",
        output_count: 12,
        max_analog_channels: 3,
        relay_tap_choices: &[12, 6],
    },
    SizeProfile {
        key: "7101E",
        display_name: "10 اینچ",
        output_count: 20,
        max_analog_channels: 4,
        relay_tap_choices: &[20, 15, 10, 5],
    },
];

// =============================================================================
// Selector Labels
// =============================================================================

/// A value/label pair for a fixed option list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OptionLabel {
    pub code: &'static str,
    pub label: &'static str,
}

pub const VOLTAGE_OPTIONS: [OptionLabel; 2] = [
    OptionLabel { code: "DC", label: "24V DC تغذیه" },
    OptionLabel { code: "AC", label: "220V AC تغذیه" },
];

pub const OUTPUT_OPTIONS: [OptionLabel; 2] = [
    OptionLabel { code: "T", label: "خروجی ترانزیستوری" },
    OptionLabel { code: "R", label: "خروجی رله ای" },
];

pub const SD_CARD_OPTIONS: [OptionLabel; 2] = [
    OptionLabel { code: "S", label: "دارد" },
    OptionLabel { code: "N", label: "ندارد" },
];

pub const LAN_OPTIONS: [OptionLabel; 2] = [
    OptionLabel { code: "L", label: "دارد" },
    OptionLabel { code: "N", label: "ندارد" },
];

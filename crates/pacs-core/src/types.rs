//! # Domain Types
//!
//! Configuration value types for the HMI configurator.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Configuration                                   │
//! │                                                                         │
//! │  size ───────► HmiSize      7035E | 7070E2 | 7101E                     │
//! │  voltage ────► Voltage      AC | DC                                    │
//! │  output_mode ► OutputMode   T (transistor) | R (relay)                 │
//! │  analog_inputs / analog_outputs    0..=4, jointly capped per size      │
//! │  relay_taps ─► member of size.relay_tap_choices (relay mode only)      │
//! │  sd_card ────► Presence     S | N                                      │
//! │  lan ────────► Presence     L | N  (editable on 7035E only)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Values are plain `Copy` data. Transitions live in [`crate::resolver`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;
use crate::sizes::{SizeProfile, SIZE_PROFILES};

// =============================================================================
// Size
// =============================================================================

/// Chassis size, selected first. Gates every other limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum HmiSize {
    #[serde(rename = "7035E")]
    Size7035E,
    #[serde(rename = "7070E2")]
    Size7070E2,
    #[serde(rename = "7101E")]
    Size7101E,
}

impl HmiSize {
    /// All sizes in catalog order.
    pub const ALL: [HmiSize; 3] = [HmiSize::Size7035E, HmiSize::Size7070E2, HmiSize::Size7101E];

    /// The smallest chassis; carries the extra analog cap and the optional LAN.
    pub const SMALLEST: HmiSize = HmiSize::Size7035E;

    /// Returns the static profile for this size.
    pub fn profile(self) -> &'static SizeProfile {
        match self {
            HmiSize::Size7035E => &SIZE_PROFILES[0],
            HmiSize::Size7070E2 => &SIZE_PROFILES[1],
            HmiSize::Size7101E => &SIZE_PROFILES[2],
        }
    }

    /// Size key as it appears in part numbers and price rows.
    pub fn key(self) -> &'static str {
        self.profile().key
    }

    #[inline]
    pub fn is_smallest(self) -> bool {
        self == HmiSize::SMALLEST
    }
}

impl fmt::Display for HmiSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for HmiSize {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        HmiSize::ALL
            .into_iter()
            .find(|size| size.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::UnknownSize(wanted.to_string()))
    }
}

// =============================================================================
// Voltage
// =============================================================================

/// Supply voltage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Voltage {
    /// 220V AC
    #[serde(rename = "AC")]
    Ac,
    /// 24V DC
    #[serde(rename = "DC")]
    Dc,
}

impl Voltage {
    pub fn code(self) -> &'static str {
        match self {
            Voltage::Ac => "AC",
            Voltage::Dc => "DC",
        }
    }
}

impl FromStr for Voltage {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AC" => Ok(Voltage::Ac),
            "DC" => Ok(Voltage::Dc),
            other => Err(unknown_option("voltage", other)),
        }
    }
}

// =============================================================================
// Output Mode
// =============================================================================

/// How the digital outputs are wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    Transistor,
    Relay,
}

impl OutputMode {
    pub fn code(self) -> &'static str {
        match self {
            OutputMode::Transistor => "T",
            OutputMode::Relay => "R",
        }
    }
}

impl FromStr for OutputMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "T" | "TRANSISTOR" => Ok(OutputMode::Transistor),
            "R" | "RELAY" => Ok(OutputMode::Relay),
            other => Err(unknown_option("output", other)),
        }
    }
}

// =============================================================================
// Presence (SD card, LAN)
// =============================================================================

/// Whether an optional module is fitted.
///
/// The same value type backs two fields with different letter codes:
/// SD card uses `S`/`N`, LAN uses `L`/`N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    Present,
    Absent,
}

impl Presence {
    #[inline]
    pub fn is_present(self) -> bool {
        self == Presence::Present
    }

    pub fn sd_code(self) -> &'static str {
        match self {
            Presence::Present => "S",
            Presence::Absent => "N",
        }
    }

    pub fn lan_code(self) -> &'static str {
        match self {
            Presence::Present => "L",
            Presence::Absent => "N",
        }
    }

    /// Parses an SD card code (`S`/`N`, or yes/no).
    pub fn parse_sd(s: &str) -> Result<Self, CoreError> {
        match s.trim().to_ascii_uppercase().as_str() {
            "S" | "Y" | "YES" => Ok(Presence::Present),
            "N" | "NO" => Ok(Presence::Absent),
            other => Err(unknown_option("sd", other)),
        }
    }

    /// Parses a LAN code (`L`/`N`, or yes/no).
    pub fn parse_lan(s: &str) -> Result<Self, CoreError> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" | "Y" | "YES" => Ok(Presence::Present),
            "N" | "NO" => Ok(Presence::Absent),
            other => Err(unknown_option("lan", other)),
        }
    }
}

fn unknown_option(field: &str, value: &str) -> CoreError {
    CoreError::UnknownOption {
        field: field.to_string(),
        value: value.to_string(),
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// One in-progress HMI selection.
///
/// ## Invariants (maintained by [`crate::resolver`])
/// - `analog_inputs + analog_outputs <= size.max_analog_channels`
/// - on the smallest size each analog count is at most 2
/// - `lan` is `Present` for every size except the smallest
/// - `relay_taps` is a member of `size.relay_tap_choices`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub size: HmiSize,
    pub voltage: Voltage,
    pub output_mode: OutputMode,
    pub analog_inputs: u8,
    pub analog_outputs: u8,
    /// Only meaningful in relay mode; see [`Configuration::effective_relay_taps`].
    pub relay_taps: u8,
    pub sd_card: Presence,
    pub lan: Presence,
}

impl Configuration {
    /// Relay tap count as used by pricing and descriptions: zero unless the
    /// outputs are in relay mode.
    pub fn effective_relay_taps(&self) -> u8 {
        match self.output_mode {
            OutputMode::Relay => self.relay_taps,
            OutputMode::Transistor => 0,
        }
    }
}

/// The configuration a fresh session starts with.
impl Default for Configuration {
    fn default() -> Self {
        let size = HmiSize::SMALLEST;
        Configuration {
            size,
            voltage: Voltage::Ac,
            output_mode: OutputMode::Transistor,
            analog_inputs: 0,
            analog_outputs: 0,
            relay_taps: size.profile().default_relay_taps(),
            sd_card: Presence::Absent,
            lan: Presence::Present,
        }
    }
}

// =============================================================================
// Field Edit
// =============================================================================

/// A single user edit to one configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum FieldEdit {
    Size(HmiSize),
    Voltage(Voltage),
    OutputMode(OutputMode),
    AnalogInputs(u8),
    AnalogOutputs(u8),
    RelayTaps(u8),
    SdCard(Presence),
    Lan(Presence),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration() {
        let config = Configuration::default();
        assert_eq!(config.size, HmiSize::Size7035E);
        assert_eq!(config.voltage, Voltage::Ac);
        assert_eq!(config.output_mode, OutputMode::Transistor);
        assert_eq!(config.relay_taps, 5);
        assert_eq!(config.sd_card, Presence::Absent);
        assert_eq!(config.lan, Presence::Present);
        assert_eq!(config.effective_relay_taps(), 0);
    }

    #[test]
    fn test_size_parsing() {
        assert_eq!("7070E2".parse::<HmiSize>().unwrap(), HmiSize::Size7070E2);
        assert_eq!(" 7101e ".parse::<HmiSize>().unwrap(), HmiSize::Size7101E);
        assert!(matches!(
            "9000".parse::<HmiSize>(),
            Err(CoreError::UnknownSize(_))
        ));
    }

    #[test]
    fn test_option_codes() {
        assert_eq!("dc".parse::<Voltage>().unwrap(), Voltage::Dc);
        assert_eq!("R".parse::<OutputMode>().unwrap(), OutputMode::Relay);
        assert_eq!(Presence::parse_sd("S").unwrap(), Presence::Present);
        assert_eq!(Presence::parse_lan("L").unwrap(), Presence::Present);
        assert!(Presence::parse_lan("S").is_err());
        assert_eq!(Presence::Absent.sd_code(), "N");
        assert_eq!(Presence::Present.lan_code(), "L");
    }

    #[test]
    fn test_configuration_serde_uses_codes() {
        let json = serde_json::to_value(Configuration::default()).unwrap();
        assert_eq!(json["size"], "7035E");
        assert_eq!(json["voltage"], "AC");
        assert_eq!(json["outputMode"], "transistor");
        assert_eq!(json["sdCard"], "absent");
    }
}

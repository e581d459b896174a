//! # Part Number Encoder
//!
//! The part number is the canonical identity of a configured product. The
//! cart merges lines by it.
//!
//! ```text
//!   PACs 7035E - AC  T  0  0  N  L
//!   │    │       │   │  │  │  │  └─ LAN      L | N
//!   │    │       │   │  │  │  └──── SD card  S | N
//!   │    │       │   │  │  └─────── analog outputs
//!   │    │       │   │  └────────── analog inputs
//!   │    │       │   └───────────── output mode T | R
//!   │    │       └───────────────── voltage AC | DC
//!   │    └───────────────────────── size key
//!   └────────────────────────────── prefix
//! ```
//!
//! The relay tap count is not encoded. Two configurations that differ only
//! in taps share a part number and merge in the cart.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::types::Configuration;
use crate::PART_PREFIX;

/// Canonical product identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(transparent)]
pub struct PartNumber(String);

impl PartNumber {
    /// Wraps an already-formed identity, such as a PLC model label.
    pub fn new(value: impl Into<String>) -> Self {
        PartNumber(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PartNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Encodes the identity of an HMI configuration.
pub fn encode(config: &Configuration) -> PartNumber {
    PartNumber(format!(
        "{}{}-{}{}{}{}{}{}",
        PART_PREFIX,
        config.size.key(),
        config.voltage.code(),
        config.output_mode.code(),
        config.analog_inputs,
        config.analog_outputs,
        config.sd_card.sd_code(),
        config.lan.lan_code(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HmiSize, OutputMode, Presence, Voltage};

    #[test]
    fn test_initial_configuration() {
        assert_eq!(
            encode(&Configuration::default()).as_str(),
            "PACs7035E-ACT00NL"
        );
    }

    #[test]
    fn test_every_field_is_encoded() {
        let config = Configuration {
            size: HmiSize::Size7101E,
            voltage: Voltage::Dc,
            output_mode: OutputMode::Relay,
            analog_inputs: 1,
            analog_outputs: 3,
            relay_taps: 15,
            sd_card: Presence::Present,
            lan: Presence::Present,
        };
        assert_eq!(encode(&config).to_string(), "PACs7101E-DCR13SL");
    }

    #[test]
    fn test_relay_taps_do_not_change_identity() {
        let base = Configuration {
            size: HmiSize::Size7101E,
            output_mode: OutputMode::Relay,
            relay_taps: 20,
            ..Configuration::default()
        };
        for taps in [15, 10, 5] {
            let other = Configuration {
                relay_taps: taps,
                ..base
            };
            assert_eq!(encode(&base), encode(&other));
        }
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&PartNumber::new("NIC 500AI")).unwrap();
        assert_eq!(json, "\"NIC 500AI\"");
    }
}

//! # Constraint Resolver
//!
//! Decides which option values are selectable and keeps a configuration
//! inside its limits.
//!
//! ## Edit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  User picks a value                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  on_field_change(config, edit) ← pure, returns a new Configuration      │
//! │       │                                                                 │
//! │       ├── Size(..)       → on_size_change: analog 0/0, relay default,  │
//! │       │                    LAN forced unless smallest                   │
//! │       ├── value enabled? → applied                                     │
//! │       └── value disabled → configuration returned unchanged            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  option_availability(config) → what the selectors offer next           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The resolver is the only gate on validity. There is no error path: a
//! disabled value is simply never applied.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::types::{Configuration, FieldEdit, HmiSize, OutputMode, Presence};
use crate::{MAX_ANALOG_SELECTION, SMALLEST_SIZE_ANALOG_CAP};

// =============================================================================
// Availability
// =============================================================================

/// One selector entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OptionChoice {
    pub value: u8,
    pub enabled: bool,
}

/// Selectable values for the constrained fields of a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OptionAvailability {
    pub analog_input_choices: Vec<OptionChoice>,
    pub analog_output_choices: Vec<OptionChoice>,
    pub relay_tap_choices: Vec<OptionChoice>,
    /// False in transistor mode; the field then shows a single `0`.
    pub relay_field_enabled: bool,
    /// Only the smallest size lets the user choose LAN.
    pub lan_editable: bool,
}

/// Computes the selector contents for `config`.
pub fn option_availability(config: &Configuration) -> OptionAvailability {
    let analog_input_choices = (0..=MAX_ANALOG_SELECTION)
        .map(|v| OptionChoice {
            value: v,
            enabled: analog_allowed(config.size, v, config.analog_outputs),
        })
        .collect();

    let analog_output_choices = (0..=MAX_ANALOG_SELECTION)
        .map(|v| OptionChoice {
            value: v,
            enabled: analog_allowed(config.size, v, config.analog_inputs),
        })
        .collect();

    let relay_field_enabled = config.output_mode == OutputMode::Relay;
    let relay_tap_choices = if relay_field_enabled {
        config
            .size
            .profile()
            .relay_tap_choices
            .iter()
            .map(|&value| OptionChoice {
                value,
                enabled: true,
            })
            .collect()
    } else {
        vec![OptionChoice {
            value: 0,
            enabled: false,
        }]
    };

    OptionAvailability {
        analog_input_choices,
        analog_output_choices,
        relay_tap_choices,
        relay_field_enabled,
        lan_editable: config.size.is_smallest(),
    }
}

/// Whether `candidate` channels may be chosen for one analog direction
/// while the other direction holds `other`.
fn analog_allowed(size: HmiSize, candidate: u8, other: u8) -> bool {
    let within_joint = u16::from(candidate) + u16::from(other)
        <= u16::from(size.profile().max_analog_channels);
    let within_cap = !size.is_smallest() || candidate <= SMALLEST_SIZE_ANALOG_CAP;
    candidate <= MAX_ANALOG_SELECTION && within_joint && within_cap
}

// =============================================================================
// Transitions
// =============================================================================

/// Switches to `new_size`, resetting the size-dependent fields.
pub fn on_size_change(config: &Configuration, new_size: HmiSize) -> Configuration {
    Configuration {
        size: new_size,
        analog_inputs: 0,
        analog_outputs: 0,
        relay_taps: new_size.profile().default_relay_taps(),
        lan: if new_size.is_smallest() {
            config.lan
        } else {
            Presence::Present
        },
        ..*config
    }
}

/// Applies one edit. Edits to values the resolver does not offer are ignored.
pub fn on_field_change(config: &Configuration, edit: FieldEdit) -> Configuration {
    let next = match edit {
        FieldEdit::Size(size) => return on_size_change(config, size),
        FieldEdit::Voltage(voltage) => Some(Configuration { voltage, ..*config }),
        FieldEdit::OutputMode(output_mode) => Some(Configuration {
            output_mode,
            ..*config
        }),
        FieldEdit::AnalogInputs(n) => analog_allowed(config.size, n, config.analog_outputs)
            .then_some(Configuration {
                analog_inputs: n,
                ..*config
            }),
        FieldEdit::AnalogOutputs(n) => analog_allowed(config.size, n, config.analog_inputs)
            .then_some(Configuration {
                analog_outputs: n,
                ..*config
            }),
        FieldEdit::RelayTaps(taps) => (config.output_mode == OutputMode::Relay
            && config.size.profile().relay_tap_choices.contains(&taps))
        .then_some(Configuration {
            relay_taps: taps,
            ..*config
        }),
        FieldEdit::SdCard(sd_card) => Some(Configuration { sd_card, ..*config }),
        FieldEdit::Lan(lan) => config
            .size
            .is_smallest()
            .then_some(Configuration { lan, ..*config }),
    };

    match next {
        Some(next) => next,
        None => {
            debug!(?edit, size = %config.size, "edit rejected by resolver");
            *config
        }
    }
}

/// Force-corrects a configuration that did not come through the edit path.
///
/// ## Corrections, in order
/// 1. LAN forced to `Present` for sizes other than the smallest
/// 2. Relay taps reset to the size default when not a valid choice
/// 3. Each analog count clamped to the selector range and per-size cap
/// 4. Analog outputs reduced until the joint limit holds
pub fn resolve(config: &Configuration) -> Configuration {
    let profile = config.size.profile();
    let mut fixed = *config;

    if !fixed.size.is_smallest() {
        fixed.lan = Presence::Present;
    }

    if !profile.relay_tap_choices.contains(&fixed.relay_taps) {
        fixed.relay_taps = profile.default_relay_taps();
    }

    let cap = if fixed.size.is_smallest() {
        SMALLEST_SIZE_ANALOG_CAP
    } else {
        MAX_ANALOG_SELECTION
    };
    fixed.analog_inputs = fixed.analog_inputs.min(cap).min(profile.max_analog_channels);
    fixed.analog_outputs = fixed.analog_outputs.min(cap);
    let room = profile.max_analog_channels - fixed.analog_inputs;
    fixed.analog_outputs = fixed.analog_outputs.min(room);

    if fixed != *config {
        debug!(before = ?config, after = ?fixed, "configuration force-corrected");
    }
    fixed
}

/// Whether every invariant holds for `config`.
pub fn is_valid(config: &Configuration) -> bool {
    resolve(config) == *config
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Voltage;

    fn enabled(choices: &[OptionChoice]) -> Vec<u8> {
        choices.iter().filter(|c| c.enabled).map(|c| c.value).collect()
    }

    fn config_for(size: HmiSize) -> Configuration {
        on_size_change(&Configuration::default(), size)
    }

    #[test]
    fn test_enabled_pairs_respect_joint_limit() {
        for size in HmiSize::ALL {
            let max = size.profile().max_analog_channels;
            for ai in 0..=MAX_ANALOG_SELECTION {
                for ao in 0..=MAX_ANALOG_SELECTION {
                    let config = Configuration {
                        analog_inputs: ai,
                        analog_outputs: ao,
                        ..config_for(size)
                    };
                    let availability = option_availability(&config);
                    let ai_ok = availability.analog_input_choices[ai as usize].enabled;
                    let ao_ok = availability.analog_output_choices[ao as usize].enabled;
                    if ai_ok && ao_ok {
                        assert!(ai + ao <= max, "{size}: {ai}+{ao} > {max}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_smallest_size_caps_each_direction() {
        let availability = option_availability(&config_for(HmiSize::Size7035E));
        assert_eq!(enabled(&availability.analog_input_choices), vec![0, 1, 2]);
        assert_eq!(enabled(&availability.analog_output_choices), vec![0, 1, 2]);
        assert!(availability.lan_editable);
    }

    #[test]
    fn test_largest_size_choices_shrink_with_other_direction() {
        let config = Configuration {
            analog_outputs: 3,
            ..config_for(HmiSize::Size7101E)
        };
        let availability = option_availability(&config);
        assert_eq!(enabled(&availability.analog_input_choices), vec![0, 1]);
        assert_eq!(enabled(&availability.analog_output_choices), vec![0, 1, 2, 3, 4]);
        assert!(!availability.lan_editable);
    }

    #[test]
    fn test_relay_choices_follow_output_mode() {
        let transistor = config_for(HmiSize::Size7101E);
        let availability = option_availability(&transistor);
        assert!(!availability.relay_field_enabled);
        assert_eq!(
            availability.relay_tap_choices,
            vec![OptionChoice {
                value: 0,
                enabled: false
            }]
        );

        let relay = on_field_change(&transistor, FieldEdit::OutputMode(OutputMode::Relay));
        let availability = option_availability(&relay);
        assert!(availability.relay_field_enabled);
        assert_eq!(enabled(&availability.relay_tap_choices), vec![20, 15, 10, 5]);
    }

    #[test]
    fn test_size_change_resets_regardless_of_prior_state() {
        let start = Configuration {
            size: HmiSize::Size7101E,
            voltage: Voltage::Dc,
            output_mode: OutputMode::Relay,
            analog_inputs: 2,
            analog_outputs: 2,
            relay_taps: 10,
            sd_card: Presence::Present,
            lan: Presence::Present,
        };
        for size in HmiSize::ALL {
            let next = on_size_change(&start, size);
            assert_eq!(next.size, size);
            assert_eq!(next.analog_inputs, 0);
            assert_eq!(next.analog_outputs, 0);
            assert_eq!(next.relay_taps, size.profile().relay_tap_choices[0]);
            assert_eq!(next.voltage, Voltage::Dc);
            assert_eq!(next.sd_card, Presence::Present);
        }
    }

    #[test]
    fn test_size_change_forces_lan_off_smallest() {
        let no_lan = Configuration {
            lan: Presence::Absent,
            ..Configuration::default()
        };
        assert_eq!(on_size_change(&no_lan, HmiSize::Size7070E2).lan, Presence::Present);
        assert_eq!(on_size_change(&no_lan, HmiSize::Size7035E).lan, Presence::Absent);
    }

    #[test]
    fn test_disabled_edits_are_ignored() {
        let small = Configuration::default();
        assert_eq!(on_field_change(&small, FieldEdit::AnalogInputs(3)), small);

        let medium = config_for(HmiSize::Size7070E2);
        let with_ai = on_field_change(&medium, FieldEdit::AnalogInputs(2));
        assert_eq!(with_ai.analog_inputs, 2);
        assert_eq!(on_field_change(&with_ai, FieldEdit::AnalogOutputs(2)), with_ai);
        assert_eq!(on_field_change(&with_ai, FieldEdit::AnalogOutputs(1)).analog_outputs, 1);

        assert_eq!(on_field_change(&medium, FieldEdit::Lan(Presence::Absent)), medium);
        // relay taps are not editable in transistor mode
        assert_eq!(on_field_change(&medium, FieldEdit::RelayTaps(6)), medium);
    }

    #[test]
    fn test_relay_tap_edit_must_be_a_choice() {
        let relay = on_field_change(
            &config_for(HmiSize::Size7070E2),
            FieldEdit::OutputMode(OutputMode::Relay),
        );
        assert_eq!(on_field_change(&relay, FieldEdit::RelayTaps(6)).relay_taps, 6);
        assert_eq!(on_field_change(&relay, FieldEdit::RelayTaps(7)).relay_taps, 12);
    }

    #[test]
    fn test_resolve_fixes_out_of_range_configuration() {
        let broken = Configuration {
            size: HmiSize::Size7070E2,
            analog_inputs: 4,
            analog_outputs: 4,
            relay_taps: 5,
            lan: Presence::Absent,
            ..Configuration::default()
        };
        let fixed = resolve(&broken);
        assert_eq!(fixed.analog_inputs, 3);
        assert_eq!(fixed.analog_outputs, 0);
        assert_eq!(fixed.relay_taps, 12);
        assert_eq!(fixed.lan, Presence::Present);
        assert!(is_valid(&fixed));
        assert!(!is_valid(&broken));
    }

    #[test]
    fn test_every_edit_sequence_stays_valid() {
        let edits = [
            FieldEdit::Size(HmiSize::Size7101E),
            FieldEdit::AnalogInputs(3),
            FieldEdit::AnalogOutputs(4),
            FieldEdit::AnalogOutputs(1),
            FieldEdit::OutputMode(OutputMode::Relay),
            FieldEdit::RelayTaps(15),
            FieldEdit::Size(HmiSize::Size7035E),
            FieldEdit::AnalogInputs(2),
            FieldEdit::AnalogOutputs(1),
            FieldEdit::Lan(Presence::Absent),
        ];
        let mut config = Configuration::default();
        for edit in edits {
            config = on_field_change(&config, edit);
            assert!(is_valid(&config), "invalid after {edit:?}: {config:?}");
        }
        assert_eq!(config.analog_inputs, 2);
        assert_eq!(config.analog_outputs, 0);
        assert_eq!(config.relay_taps, 5);
        assert_eq!(config.lan, Presence::Absent);
    }
}

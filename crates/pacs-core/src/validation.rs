//! # Validation Module
//!
//! Parsing and validation of raw user input.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: Shell input (strings)                                        │
//! │  └── THIS MODULE: codes → enums, counts → numbers, names trimmed       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Resolver                                                      │
//! │  └── disabled values silently ignored, never an error                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Malformed counts are not errors: they fall back to 0, which the resolver
//! and the cart then treat as they would any other 0.

use crate::category::PlcModel;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{FieldEdit, HmiSize, OutputMode, Presence, Voltage};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Field names accepted by [`parse_field_edit`].
pub const HMI_FIELDS: [&str; 8] = ["size", "voltage", "output", "ai", "ao", "relay", "sd", "lan"];

/// Field names accepted by [`parse_plc_edit`].
pub const PLC_FIELDS: [&str; 2] = ["model", "sd"];

// =============================================================================
// Numeric Input
// =============================================================================

/// Parses an option count, falling back to 0 on anything malformed.
///
/// ## Example
/// ```rust
/// use pacs_core::validation::parse_count;
///
/// assert_eq!(parse_count("3"), 3);
/// assert_eq!(parse_count(" 2 "), 2);
/// assert_eq!(parse_count("abc"), 0);
/// assert_eq!(parse_count("-1"), 0);
/// ```
pub fn parse_count(raw: &str) -> u8 {
    raw.trim().parse().unwrap_or(0)
}

/// Parses a cart quantity, falling back to 0 (which the cart ignores).
pub fn parse_quantity(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}

// =============================================================================
// Field Edits
// =============================================================================

/// Turns `set <field> <value>` input into an HMI edit.
pub fn parse_field_edit(field: &str, value: &str) -> CoreResult<FieldEdit> {
    let edit = match field.trim().to_ascii_lowercase().as_str() {
        "size" => FieldEdit::Size(value.parse::<HmiSize>()?),
        "voltage" | "power" => FieldEdit::Voltage(value.parse::<Voltage>()?),
        "output" => FieldEdit::OutputMode(value.parse::<OutputMode>()?),
        "ai" => FieldEdit::AnalogInputs(parse_count(value)),
        "ao" => FieldEdit::AnalogOutputs(parse_count(value)),
        "relay" | "r" => FieldEdit::RelayTaps(parse_count(value)),
        "sd" => FieldEdit::SdCard(Presence::parse_sd(value)?),
        "lan" => FieldEdit::Lan(Presence::parse_lan(value)?),
        _ => return Err(not_allowed(field, &HMI_FIELDS).into()),
    };
    Ok(edit)
}

/// A PLC selector edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlcEdit {
    Model(PlcModel),
    SdCard(Presence),
}

/// Turns `set <field> <value>` input into a PLC edit.
pub fn parse_plc_edit(field: &str, value: &str) -> CoreResult<PlcEdit> {
    match field.trim().to_ascii_lowercase().as_str() {
        "model" => Ok(PlcEdit::Model(value.parse::<PlcModel>()?)),
        "sd" => Ok(PlcEdit::SdCard(Presence::parse_sd(value)?)),
        _ => Err(CoreError::from(not_allowed(field, &PLC_FIELDS))),
    }
}

fn not_allowed(field: &str, allowed: &[&str]) -> ValidationError {
    ValidationError::NotAllowed {
        field: format!("field '{}'", field.trim()),
        allowed: allowed.iter().map(|f| f.to_string()).collect(),
    }
}

// =============================================================================
// Customer Fields
// =============================================================================

/// Trims a required customer field.
///
/// ## Example
/// ```rust
/// use pacs_core::validation::validate_customer_field;
///
/// assert_eq!(validate_customer_field("name", "  Ali ").unwrap(), "Ali");
/// assert!(validate_customer_field("company", "   ").is_err());
/// ```
pub fn validate_customer_field(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::required(field));
    }
    if value.chars().any(char::is_control) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must not contain control characters".to_string(),
        });
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_edit() {
        assert_eq!(
            parse_field_edit("size", "7070E2").unwrap(),
            FieldEdit::Size(HmiSize::Size7070E2)
        );
        assert_eq!(
            parse_field_edit("Output", "r").unwrap(),
            FieldEdit::OutputMode(OutputMode::Relay)
        );
        assert_eq!(parse_field_edit("ai", "x").unwrap(), FieldEdit::AnalogInputs(0));
        assert_eq!(parse_field_edit("relay", "15").unwrap(), FieldEdit::RelayTaps(15));
        assert_eq!(
            parse_field_edit("lan", "N").unwrap(),
            FieldEdit::Lan(Presence::Absent)
        );
    }

    #[test]
    fn test_parse_field_edit_errors() {
        assert!(matches!(
            parse_field_edit("size", "1234"),
            Err(CoreError::UnknownSize(_))
        ));
        assert!(matches!(
            parse_field_edit("voltage", "110"),
            Err(CoreError::UnknownOption { .. })
        ));
        assert!(matches!(
            parse_field_edit("colour", "red"),
            Err(CoreError::Validation(ValidationError::NotAllowed { .. }))
        ));
    }

    #[test]
    fn test_parse_plc_edit() {
        assert_eq!(
            parse_plc_edit("model", "NIC 500AI").unwrap(),
            PlcEdit::Model(PlcModel::Nic500Ai)
        );
        assert_eq!(
            parse_plc_edit("sd", "S").unwrap(),
            PlcEdit::SdCard(Presence::Present)
        );
        assert!(parse_plc_edit("ai", "1").is_err());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("12"), 12);
        assert_eq!(parse_quantity("1.5"), 0);
        assert_eq!(parse_quantity(""), 0);
    }

    #[test]
    fn test_customer_field() {
        assert!(matches!(
            validate_customer_field("name", ""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_customer_field("name", "a\u{7}b"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }
}

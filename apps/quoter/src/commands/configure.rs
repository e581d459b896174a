//! # Configure Commands
//!
//! Reading and editing the selection of the open tab.
//!
//! ## Edit Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  set ai 2                                                               │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  parse_field_edit("ai", "2") ─── bad field/code ──► ApiError           │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  resolver::on_field_change ─── disabled value ──► unchanged            │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  QuoteResponse (part number, price, description)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! While the catalog loads, quotes price at zero with an empty description.

use pacs_core::resolver::{self, OptionAvailability};
use pacs_core::sizes::{OptionLabel, LAN_OPTIONS, OUTPUT_OPTIONS, SD_CARD_OPTIONS, VOLTAGE_OPTIONS};
use pacs_core::validation::{parse_field_edit, parse_plc_edit, PlcEdit};
use pacs_core::pricer::PriceBreakdown;
use pacs_core::{
    pricer, Configurable, Configuration, FieldEdit, HmiSize, Money, PartNumber, PlcModel,
    PriceCatalog, Presence, Selection,
};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{CatalogState, CatalogStatus, SessionState, Tab};

// =============================================================================
// Responses
// =============================================================================

/// The live quote for the open tab.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub tab: Tab,
    pub selection: Selection,
    pub part_number: PartNumber,
    pub unit_price: Money,
    pub description: String,
    pub options_summary: String,
    /// HMI only.
    pub breakdown: Option<PriceBreakdown>,
    pub catalog: CatalogStatus,
    /// False when the resolver refused the edit.
    pub accepted: bool,
}

/// One selectable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub value: String,
    pub label: String,
    pub enabled: bool,
    pub selected: bool,
}

/// Selectable values of one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOptions {
    pub field: &'static str,
    pub editable: bool,
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsResponse {
    pub tab: Tab,
    pub fields: Vec<FieldOptions>,
}

// =============================================================================
// Commands
// =============================================================================

/// Quotes the open tab's selection.
pub fn show(catalog: &CatalogState, session: &SessionState) -> QuoteResponse {
    debug!("show command");
    let (tab, selection) = session.with_session(|s| (s.tab, s.selection()));
    quote_response(catalog, tab, selection, true)
}

/// Switches the open tab.
pub fn switch_tab(catalog: &CatalogState, session: &SessionState, tab: &str) -> Result<QuoteResponse, ApiError> {
    let tab: Tab = tab.parse()?;
    debug!(tab = %tab, "tab command");
    let selection = session.with_session_mut(|s| {
        s.tab = tab;
        s.selection()
    });
    Ok(quote_response(catalog, tab, selection, true))
}

/// Applies one edit to the open tab's selection.
pub fn set_field(
    catalog: &CatalogState,
    session: &SessionState,
    field: &str,
    value: &str,
) -> Result<QuoteResponse, ApiError> {
    debug!(field = %field, value = %value, "set command");
    let tab = session.with_session(|s| s.tab);

    let (selection, accepted) = match tab {
        Tab::Hmi => {
            let edit = parse_field_edit(field, value)?;
            session.with_session_mut(|s| {
                let accepted = edit_accepted(&s.hmi, edit);
                s.hmi = resolver::on_field_change(&s.hmi, edit);
                (s.selection(), accepted)
            })
        }
        Tab::Plc => {
            let edit = parse_plc_edit(field, value)?;
            session.with_session_mut(|s| {
                match edit {
                    PlcEdit::Model(model) => s.plc.model = model,
                    PlcEdit::SdCard(sd_card) => s.plc.sd_card = sd_card,
                }
                (s.selection(), true)
            })
        }
    };

    Ok(quote_response(catalog, tab, selection, accepted))
}

/// Whether the resolver will take `edit`; refused edits leave the
/// configuration unchanged.
fn edit_accepted(config: &Configuration, edit: FieldEdit) -> bool {
    let availability = resolver::option_availability(config);
    let offered = |choices: &[resolver::OptionChoice], value: u8| {
        choices.iter().any(|c| c.value == value && c.enabled)
    };
    match edit {
        FieldEdit::AnalogInputs(n) => offered(&availability.analog_input_choices, n),
        FieldEdit::AnalogOutputs(n) => offered(&availability.analog_output_choices, n),
        FieldEdit::RelayTaps(n) => {
            availability.relay_field_enabled && offered(&availability.relay_tap_choices, n)
        }
        FieldEdit::Lan(_) => availability.lan_editable,
        _ => true,
    }
}

/// Lists every field with its selectable values.
pub fn options(session: &SessionState) -> OptionsResponse {
    debug!("options command");
    session.with_session(|s| match s.tab {
        Tab::Hmi => OptionsResponse {
            tab: Tab::Hmi,
            fields: hmi_fields(&s.hmi, &resolver::option_availability(&s.hmi)),
        },
        Tab::Plc => OptionsResponse {
            tab: Tab::Plc,
            fields: plc_fields(s.plc.model, s.plc.sd_card),
        },
    })
}

// =============================================================================
// Helpers
// =============================================================================

fn quote_response(catalog: &CatalogState, tab: Tab, selection: Selection, accepted: bool) -> QuoteResponse {
    let snapshot = catalog.snapshot();
    let empty = PriceCatalog::default();
    let prices = snapshot.catalog().unwrap_or(&empty);

    let quote = selection.quote(prices);
    let breakdown = match selection {
        Selection::Hmi(config) => Some(pricer::price_breakdown(&config, prices)),
        Selection::Plc(_) => None,
    };

    QuoteResponse {
        tab,
        selection,
        part_number: quote.identity,
        unit_price: quote.unit_price,
        description: quote.description,
        options_summary: quote.options_summary,
        breakdown,
        catalog: CatalogStatus::from(&snapshot),
        accepted,
    }
}

fn labelled(field: &'static str, options: &[OptionLabel], current: &str, editable: bool) -> FieldOptions {
    FieldOptions {
        field,
        editable,
        choices: options
            .iter()
            .map(|o| Choice {
                value: o.code.to_string(),
                label: o.label.to_string(),
                enabled: editable,
                selected: o.code == current,
            })
            .collect(),
    }
}

fn counted(field: &'static str, choices: &[resolver::OptionChoice], current: u8, editable: bool) -> FieldOptions {
    FieldOptions {
        field,
        editable,
        choices: choices
            .iter()
            .map(|c| Choice {
                value: c.value.to_string(),
                label: c.value.to_string(),
                enabled: c.enabled,
                selected: c.value == current,
            })
            .collect(),
    }
}

fn hmi_fields(config: &Configuration, availability: &OptionAvailability) -> Vec<FieldOptions> {
    let sizes = FieldOptions {
        field: "size",
        editable: true,
        choices: HmiSize::ALL
            .iter()
            .map(|size| Choice {
                value: size.key().to_string(),
                label: size.profile().display_name.to_string(),
                enabled: true,
                selected: *size == config.size,
            })
            .collect(),
    };

    vec![
        sizes,
        labelled("voltage", &VOLTAGE_OPTIONS, config.voltage.code(), true),
        labelled("output", &OUTPUT_OPTIONS, config.output_mode.code(), true),
        counted("relay", &availability.relay_tap_choices, config.effective_relay_taps(), availability.relay_field_enabled),
        counted("ai", &availability.analog_input_choices, config.analog_inputs, true),
        counted("ao", &availability.analog_output_choices, config.analog_outputs, true),
        labelled("sd", &SD_CARD_OPTIONS, config.sd_card.sd_code(), true),
        labelled("lan", &LAN_OPTIONS, config.lan.lan_code(), availability.lan_editable),
    ]
}

fn plc_fields(model: PlcModel, sd_card: Presence) -> Vec<FieldOptions> {
    let models = FieldOptions {
        field: "model",
        editable: true,
        choices: PlcModel::ALL
            .iter()
            .map(|m| Choice {
                value: m.row_name().to_string(),
                label: m.label().to_string(),
                enabled: true,
                selected: *m == model,
            })
            .collect(),
    };
    vec![models, labelled("sd", &SD_CARD_OPTIONS, sd_card.sd_code(), true)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pacs_core::catalog::{ExtraRole, SheetRow};
    use pacs_core::OutputMode;

    fn catalog() -> CatalogState {
        CatalogState::ready(
            PriceCatalog::builder()
                .row(SheetRow::new("PACs 7035E", Money::from_rials(1_000_000), "HMI 3.5"))
                .row(SheetRow::new("PACs 5250", Money::from_rials(700_000), "PLC"))
                .extra(ExtraRole::SdCard, Money::from_rials(50_000))
                .extra(ExtraRole::Lan, Money::from_rials(70_000))
                .build(),
        )
    }

    #[test]
    fn test_show_initial_quote() {
        let quote = show(&catalog(), &SessionState::new());
        assert_eq!(quote.part_number.as_str(), "PACs7035E-ACT00NL");
        assert_eq!(quote.unit_price.rials(), 1_070_000);
        assert!(matches!(quote.catalog, CatalogStatus::Ready { .. }));
    }

    #[test]
    fn test_quote_while_loading_is_zero() {
        let quote = show(&CatalogState::new(), &SessionState::new());
        assert!(quote.unit_price.is_zero());
        assert_eq!(quote.description, "");
        assert_eq!(quote.part_number.as_str(), "PACs7035E-ACT00NL");
        assert_eq!(quote.catalog, CatalogStatus::Loading);
    }

    #[test]
    fn test_set_field_applies_and_refuses() {
        let catalog = catalog();
        let session = SessionState::new();

        let quote = set_field(&catalog, &session, "sd", "S").unwrap();
        assert!(quote.accepted);
        assert_eq!(quote.unit_price.rials(), 1_120_000);

        let quote = set_field(&catalog, &session, "ai", "3").unwrap();
        assert!(!quote.accepted);
        assert_eq!(session.with_session(|s| s.hmi.analog_inputs), 0);

        let quote = set_field(&catalog, &session, "sd", "S").unwrap();
        assert!(quote.accepted);

        assert!(set_field(&catalog, &session, "colour", "red").is_err());
    }

    #[test]
    fn test_size_edit_resets_dependent_fields() {
        let catalog = catalog();
        let session = SessionState::new();
        set_field(&catalog, &session, "ai", "2").unwrap();
        set_field(&catalog, &session, "output", "R").unwrap();
        set_field(&catalog, &session, "size", "7101E").unwrap();

        let config = session.with_session(|s| s.hmi);
        assert_eq!(config.analog_inputs, 0);
        assert_eq!(config.relay_taps, 20);
        assert_eq!(config.output_mode, OutputMode::Relay);
    }

    #[test]
    fn test_plc_tab() {
        let catalog = catalog();
        let session = SessionState::new();
        switch_tab(&catalog, &session, "plc").unwrap();

        let quote = set_field(&catalog, &session, "model", "PACs 5250").unwrap();
        assert_eq!(quote.part_number.as_str(), "PACs 5250");
        assert_eq!(quote.unit_price.rials(), 700_000);
        assert!(quote.breakdown.is_none());
        assert!(set_field(&catalog, &session, "ai", "1").is_err());
    }

    #[test]
    fn test_options_mark_disabled_values() {
        let session = SessionState::new();
        let response = options(&session);
        let ai = response.fields.iter().find(|f| f.field == "ai").unwrap();
        let enabled: Vec<&str> = ai
            .choices
            .iter()
            .filter(|c| c.enabled)
            .map(|c| c.value.as_str())
            .collect();
        assert_eq!(enabled, vec!["0", "1", "2"]);

        let relay = response.fields.iter().find(|f| f.field == "relay").unwrap();
        assert!(!relay.editable);
    }
}

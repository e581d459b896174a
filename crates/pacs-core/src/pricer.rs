//! # Configuration Pricer
//!
//! Price, itemized breakdown and customer-facing description of an HMI
//! configuration against a [`PriceCatalog`].
//!
//! ## Pricing Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  base      row "PACs <size>"                (missing → 0)               │
//! │  + relay   extra.relay × taps               (relay mode only)           │
//! │  + ai      extra.analogInput × inputs                                   │
//! │  + ao      extra.analogOutput × outputs                                 │
//! │  + sd      extra.sdCard                     (when fitted)               │
//! │  + lan     extra.lan                        (smallest size, when fitted)│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A missing row contributes zero. Nothing here fails.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::catalog::{ExtraRole, PriceCatalog};
use crate::money::Money;
use crate::types::{Configuration, OutputMode, Voltage};

/// Separator between description clauses.
const CLAUSE_SEPARATOR: &str = " - ";

/// Separator between options summary entries.
const SUMMARY_SEPARATOR: &str = "\n         ";

// =============================================================================
// Price
// =============================================================================

/// One priced extra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExtraLine {
    pub role: ExtraRole,
    pub quantity: u8,
    pub unit_price: Money,
    pub line_total: Money,
}

/// Base unit plus every extra that contributes to the price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub base: Money,
    pub extras: Vec<ExtraLine>,
    pub total: Money,
}

/// Unit price of `config`.
pub fn price(config: &Configuration, catalog: &PriceCatalog) -> Money {
    price_breakdown(config, catalog).total
}

/// Itemized price. Extras with a zero count are left out; `total` is the
/// exact sum of `base` and the listed lines.
pub fn price_breakdown(config: &Configuration, catalog: &PriceCatalog) -> PriceBreakdown {
    let base = match catalog.base_unit(config.size) {
        Some(entry) => entry.unit_price,
        None => {
            debug!(size = %config.size, "no base unit row, pricing base at zero");
            Money::zero()
        }
    };

    let counts = [
        (ExtraRole::Relay, config.effective_relay_taps()),
        (ExtraRole::AnalogInput, config.analog_inputs),
        (ExtraRole::AnalogOutput, config.analog_outputs),
        (ExtraRole::SdCard, u8::from(config.sd_card.is_present())),
        (
            ExtraRole::Lan,
            u8::from(config.size.is_smallest() && config.lan.is_present()),
        ),
    ];

    let extras: Vec<ExtraLine> = counts
        .into_iter()
        .filter(|&(_, quantity)| quantity > 0)
        .map(|(role, quantity)| {
            let unit_price = catalog.extra_price(role);
            ExtraLine {
                role,
                quantity,
                unit_price,
                line_total: unit_price * quantity,
            }
        })
        .collect();

    let total = base + extras.iter().map(|line| line.line_total).sum::<Money>();

    PriceBreakdown {
        base,
        extras,
        total,
    }
}

// =============================================================================
// Description
// =============================================================================

/// Customer-facing description: the base row's text, then one clause per
/// option. Empty when the catalog has no base row for the size.
pub fn describe(config: &Configuration, catalog: &PriceCatalog) -> String {
    let Some(base) = catalog.base_unit(config.size) else {
        return String::new();
    };

    let profile = config.size.profile();
    let mut clauses: Vec<String> = vec!["آپشن ها:".to_string()];

    clauses.push(
        match config.voltage {
            Voltage::Ac => "تغذیه 220 ولت AC",
            Voltage::Dc => "منبع تغذیه 24 ولت DC",
        }
        .to_string(),
    );

    clauses.push(match config.output_mode {
        OutputMode::Transistor => {
            format!("دارای {} عدد خروجی ترانزیستوری", profile.output_count)
        }
        OutputMode::Relay => {
            let remainder = profile.transistor_remainder(config.relay_taps);
            let transistor_clause = if remainder > 0 {
                format!("و {} عدد خروجی ترانزیستوری", remainder)
            } else {
                String::new()
            };
            format!(
                "دارای {} عدد خروجی رله‌ای  {}",
                config.relay_taps, transistor_clause
            )
        }
    });

    if config.analog_inputs != 0 {
        clauses.push(format!("دارای {} عدد ورودی آنالوگ", config.analog_inputs));
    }
    if config.analog_outputs != 0 {
        clauses.push(format!("دارای {} عدد خروجی آنالوگ", config.analog_outputs));
    }

    clauses.push(
        if config.sd_card.is_present() {
            "دارای کارت حافظه 16 گیگ"
        } else {
            "فاقد کارت حافظه"
        }
        .to_string(),
    );

    if config.size.is_smallest() {
        clauses.push(
            if config.lan.is_present() {
                "دارای پورت اترنت"
            } else {
                "بدون پورت اترنت"
            }
            .to_string(),
        );
    }

    format!(
        " {} \n    {}",
        base.base_description,
        clauses.join(CLAUSE_SEPARATOR)
    )
}

/// Compact `Key: code` summary stored on a line item and quoted in the
/// order message. Unlike the part number it carries the relay tap count.
pub fn options_summary(config: &Configuration) -> String {
    let mut parts = vec![
        format!("Power: {}", config.voltage.code()),
        format!("Output: {}", config.output_mode.code()),
        format!("AI: {}", config.analog_inputs),
        format!("AO: {}", config.analog_outputs),
        format!("SD: {}", config.sd_card.sd_code()),
        format!("R: {}", config.effective_relay_taps()),
    ];
    if config.size.is_smallest() {
        parts.push(format!("Lan: {}", config.lan.lan_code()));
    }
    parts.join(SUMMARY_SEPARATOR)
}

// =============================================================================
// Unit Tests
// =============================================================================

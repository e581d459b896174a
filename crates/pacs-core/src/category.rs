//! # Product Categories
//!
//! Every configurable product category answers the same questions: what is
//! its identity, what does it cost, how is it described. [`Configurable`]
//! captures that; [`Selection`] is the closed set the cart and the order
//! composer work with.
//!
//! ```text
//! ┌────────────────────┐     quote(catalog)     ┌─────────────────────────┐
//! │ Selection::Hmi(..) │ ─────────────────────► │ Quote                   │
//! │ Selection::Plc(..) │                        │  identity  PartNumber   │
//! └────────────────────┘                        │  unit_price, texts      │
//!                                               └───────────┬─────────────┘
//!                                                           ▼
//!                                                      Cart::add
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::catalog::PriceCatalog;
use crate::error::CoreError;
use crate::money::Money;
use crate::part_number::{self, PartNumber};
use crate::pricer;
use crate::types::{Configuration, Presence};

// =============================================================================
// Capability Interface
// =============================================================================

/// Which product family a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Hmi,
    Plc,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Hmi => "HMI",
            Category::Plc => "PLC",
        })
    }
}

/// Everything needed to put a configured product in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub identity: PartNumber,
    pub unit_price: Money,
    pub description: String,
    pub options_summary: String,
    pub category: Category,
}

/// A product selection that can be priced and described.
pub trait Configurable {
    fn category(&self) -> Category;

    fn part_number(&self) -> PartNumber;

    fn price(&self, catalog: &PriceCatalog) -> Money;

    fn describe(&self, catalog: &PriceCatalog) -> String;

    fn options_summary(&self) -> String;

    fn quote(&self, catalog: &PriceCatalog) -> Quote {
        Quote {
            identity: self.part_number(),
            unit_price: self.price(catalog),
            description: self.describe(catalog),
            options_summary: self.options_summary(),
            category: self.category(),
        }
    }
}

impl Configurable for Configuration {
    fn category(&self) -> Category {
        Category::Hmi
    }

    fn part_number(&self) -> PartNumber {
        part_number::encode(self)
    }

    fn price(&self, catalog: &PriceCatalog) -> Money {
        pricer::price(self, catalog)
    }

    fn describe(&self, catalog: &PriceCatalog) -> String {
        pricer::describe(self, catalog)
    }

    fn options_summary(&self) -> String {
        pricer::options_summary(self)
    }
}

// =============================================================================
// PLC
// =============================================================================

/// PLC and network interface models. Priced by the row named after the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PlcModel {
    #[serde(rename = "PACs 5100")]
    Pacs5100,
    #[serde(rename = "PACs 5110")]
    Pacs5110,
    #[serde(rename = "PACs 5120")]
    Pacs5120,
    #[serde(rename = "PACs 5130")]
    Pacs5130,
    #[serde(rename = "PACs 5131")]
    Pacs5131,
    #[serde(rename = "PACs 5250")]
    Pacs5250,
    #[serde(rename = "NIC 500")]
    Nic500,
    #[serde(rename = "NIC 500 +")]
    Nic500Plus,
    #[serde(rename = "NIC 500AI")]
    Nic500Ai,
}

impl PlcModel {
    pub const ALL: [PlcModel; 9] = [
        PlcModel::Pacs5100,
        PlcModel::Pacs5110,
        PlcModel::Pacs5120,
        PlcModel::Pacs5130,
        PlcModel::Pacs5131,
        PlcModel::Pacs5250,
        PlcModel::Nic500,
        PlcModel::Nic500Plus,
        PlcModel::Nic500Ai,
    ];

    /// Catalog row name.
    pub fn row_name(self) -> &'static str {
        match self {
            PlcModel::Pacs5100 => "PACs 5100",
            PlcModel::Pacs5110 => "PACs 5110",
            PlcModel::Pacs5120 => "PACs 5120",
            PlcModel::Pacs5130 => "PACs 5130",
            PlcModel::Pacs5131 => "PACs 5131",
            PlcModel::Pacs5250 => "PACs 5250",
            PlcModel::Nic500 => "NIC 500",
            PlcModel::Nic500Plus => "NIC 500 +",
            PlcModel::Nic500Ai => "NIC 500AI",
        }
    }

    /// Display label, which doubles as the part number.
    pub fn label(self) -> &'static str {
        match self {
            PlcModel::Nic500Plus => " +NIC 500",
            other => other.row_name(),
        }
    }
}

impl fmt::Display for PlcModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.row_name())
    }
}

impl FromStr for PlcModel {
    type Err = CoreError;

    /// Accepts the row name or the label, ignoring case and surrounding or
    /// repeated whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_model(s);
        PlcModel::ALL
            .into_iter()
            .find(|m| {
                normalize_model(m.row_name()) == wanted || normalize_model(m.label()) == wanted
            })
            .ok_or_else(|| CoreError::UnknownModel(s.trim().to_string()))
    }
}

fn normalize_model(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_lowercase()
}

/// One in-progress PLC selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PlcConfiguration {
    pub model: PlcModel,
    pub sd_card: Presence,
}

impl Default for PlcConfiguration {
    fn default() -> Self {
        PlcConfiguration {
            model: PlcModel::Pacs5100,
            sd_card: Presence::Absent,
        }
    }
}

impl Configurable for PlcConfiguration {
    fn category(&self) -> Category {
        Category::Plc
    }

    fn part_number(&self) -> PartNumber {
        PartNumber::new(self.model.label())
    }

    fn price(&self, catalog: &PriceCatalog) -> Money {
        catalog
            .lookup(self.model.row_name())
            .map(|entry| entry.unit_price)
            .unwrap_or_default()
    }

    fn describe(&self, catalog: &PriceCatalog) -> String {
        catalog
            .lookup(self.model.row_name())
            .map(|entry| entry.base_description.clone())
            .unwrap_or_default()
    }

    fn options_summary(&self) -> String {
        format!("SD: {}", self.sd_card.sd_code())
    }
}

// =============================================================================
// Selection
// =============================================================================

/// The active selection of whichever category tab is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "category", content = "config", rename_all = "snake_case")]
pub enum Selection {
    Hmi(Configuration),
    Plc(PlcConfiguration),
}

impl Configurable for Selection {
    fn category(&self) -> Category {
        match self {
            Selection::Hmi(c) => c.category(),
            Selection::Plc(c) => c.category(),
        }
    }

    fn part_number(&self) -> PartNumber {
        match self {
            Selection::Hmi(c) => c.part_number(),
            Selection::Plc(c) => c.part_number(),
        }
    }

    fn price(&self, catalog: &PriceCatalog) -> Money {
        match self {
            Selection::Hmi(c) => c.price(catalog),
            Selection::Plc(c) => c.price(catalog),
        }
    }

    fn describe(&self, catalog: &PriceCatalog) -> String {
        match self {
            Selection::Hmi(c) => c.describe(catalog),
            Selection::Plc(c) => c.describe(catalog),
        }
    }

    fn options_summary(&self) -> String {
        match self {
            Selection::Hmi(c) => c.options_summary(),
            Selection::Plc(c) => c.options_summary(),
        }
    }
}

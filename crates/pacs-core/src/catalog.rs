//! # Price Catalog
//!
//! Immutable price lookup built once from the price sheet rows.
//!
//! ## Symbolic Roles Instead of Row Positions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Price sheet (ordered rows)            PriceCatalog                     │
//! │  ─────────────────────────             ────────────                     │
//! │  0  PACs 7035E     ...                 by name:                         │
//! │  1  PACs 7070E2    ...        bind     "PACs 7035E"  → entry            │
//! │  2  PACs 7101E     ...      ───────►   "PACs 7070E2" → entry            │
//! │  3  کارت حافظه     ...      (once,                                      │
//! │  4  پورت شبکه      ...       at load)  by role:                         │
//! │  5  ورودی آنالوگ   ...                 extra.sdCard  → entry            │
//! │  6  خروجی آنالوگ   ...                 extra.relay   → entry            │
//! │  7  رله            ...                 ...                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Binding resolves each [`ExtraRole`] to a row exactly once. Pricing only
//! asks for roles, so reordering the sheet cannot silently change prices as
//! long as the bindings are by name.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use ts_rs::TS;

use crate::money::Money;
use crate::types::HmiSize;
use crate::PART_PREFIX;

// =============================================================================
// Sheet Row
// =============================================================================

/// One row of the price sheet after parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRow {
    pub name: String,
    pub price: Money,
    pub description: String,
    /// Index in the source sheet, counting rows the loader skipped.
    /// `None` means the row's index in the list it is built from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}

impl SheetRow {
    pub fn new(name: impl Into<String>, price: Money, description: impl Into<String>) -> Self {
        SheetRow {
            name: name.into(),
            price,
            description: description.into(),
            position: None,
        }
    }

    /// Records where the row sat in the source sheet.
    pub fn at_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }
}

// =============================================================================
// Price Entry
// =============================================================================

/// A priced catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceEntry {
    pub key: String,
    pub unit_price: Money,
    pub base_description: String,
}

impl From<SheetRow> for PriceEntry {
    fn from(row: SheetRow) -> Self {
        PriceEntry {
            key: row.name,
            unit_price: row.price,
            base_description: row.description,
        }
    }
}

// =============================================================================
// Extra Roles
// =============================================================================

/// Priced add-ons, addressed by a stable symbolic name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ExtraRole {
    SdCard,
    Lan,
    AnalogInput,
    AnalogOutput,
    Relay,
}

impl ExtraRole {
    pub const ALL: [ExtraRole; 5] = [
        ExtraRole::SdCard,
        ExtraRole::Lan,
        ExtraRole::AnalogInput,
        ExtraRole::AnalogOutput,
        ExtraRole::Relay,
    ];

    /// Symbolic key, also the default row name a sheet uses for the role.
    pub fn key(self) -> &'static str {
        match self {
            ExtraRole::SdCard => "extra.sdCard",
            ExtraRole::Lan => "extra.lan",
            ExtraRole::AnalogInput => "extra.analogInput",
            ExtraRole::AnalogOutput => "extra.analogOutput",
            ExtraRole::Relay => "extra.relay",
        }
    }

    /// Row position of the role in the legacy spreadsheet layout.
    pub fn legacy_position(self) -> usize {
        match self {
            ExtraRole::SdCard => 3,
            ExtraRole::Lan => 4,
            ExtraRole::AnalogInput => 5,
            ExtraRole::AnalogOutput => 6,
            ExtraRole::Relay => 7,
        }
    }
}

impl fmt::Display for ExtraRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// =============================================================================
// Role Bindings
// =============================================================================

/// How one role finds its row in the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleBinding {
    /// Row whose `name` equals this string.
    Name(String),
    /// Row at this zero-based index of the source sheet (legacy sheets).
    Position(usize),
}

/// One binding per extra role.
///
/// Deserializes from a TOML table such as:
/// ```toml
/// [catalog.roles]
/// relay = { position = 7 }
/// sd_card = { name = "SD 16G" }
/// ```
/// Roles left out bind by their symbolic key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleBindings {
    pub sd_card: RoleBinding,
    pub lan: RoleBinding,
    pub analog_input: RoleBinding,
    pub analog_output: RoleBinding,
    pub relay: RoleBinding,
}

impl RoleBindings {
    /// Binds every role to its row position in the legacy sheet layout.
    pub fn legacy_positional() -> Self {
        let at = |role: ExtraRole| RoleBinding::Position(role.legacy_position());
        RoleBindings {
            sd_card: at(ExtraRole::SdCard),
            lan: at(ExtraRole::Lan),
            analog_input: at(ExtraRole::AnalogInput),
            analog_output: at(ExtraRole::AnalogOutput),
            relay: at(ExtraRole::Relay),
        }
    }

    pub fn get(&self, role: ExtraRole) -> &RoleBinding {
        match role {
            ExtraRole::SdCard => &self.sd_card,
            ExtraRole::Lan => &self.lan,
            ExtraRole::AnalogInput => &self.analog_input,
            ExtraRole::AnalogOutput => &self.analog_output,
            ExtraRole::Relay => &self.relay,
        }
    }
}

impl Default for RoleBindings {
    fn default() -> Self {
        let by_key = |role: ExtraRole| RoleBinding::Name(role.key().to_string());
        RoleBindings {
            sd_card: by_key(ExtraRole::SdCard),
            lan: by_key(ExtraRole::Lan),
            analog_input: by_key(ExtraRole::AnalogInput),
            analog_output: by_key(ExtraRole::AnalogOutput),
            relay: by_key(ExtraRole::Relay),
        }
    }
}

// =============================================================================
// Price Catalog
// =============================================================================

/// Read-only price lookup: entries by exact name, extras by role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceCatalog {
    entries: HashMap<String, PriceEntry>,
    extras: HashMap<ExtraRole, PriceEntry>,
    row_count: usize,
}

impl PriceCatalog {
    /// Builds the catalog from sheet rows, binding extras as configured.
    ///
    /// Duplicate names keep the first row. Roles whose binding matches no
    /// row stay unbound and price at zero; see [`PriceCatalog::unbound_roles`].
    pub fn from_rows(rows: Vec<SheetRow>, bindings: &RoleBindings) -> Self {
        let mut extras = HashMap::new();
        for role in ExtraRole::ALL {
            let row = match bindings.get(role) {
                RoleBinding::Name(name) => rows.iter().find(|r| &r.name == name),
                RoleBinding::Position(index) => rows
                    .iter()
                    .enumerate()
                    .find(|(n, r)| r.position.unwrap_or(*n) == *index)
                    .map(|(_, r)| r),
            };
            if let Some(row) = row {
                extras.insert(role, PriceEntry::from(row.clone()));
            }
        }

        let row_count = rows.len();
        let mut entries = HashMap::with_capacity(row_count);
        for row in rows {
            entries
                .entry(row.name.clone())
                .or_insert_with(|| PriceEntry::from(row));
        }

        PriceCatalog {
            entries,
            extras,
            row_count,
        }
    }

    pub fn builder() -> PriceCatalogBuilder {
        PriceCatalogBuilder::default()
    }

    /// Entry with exactly this name.
    pub fn lookup(&self, key: &str) -> Option<&PriceEntry> {
        self.entries.get(key)
    }

    /// Row key of the base unit for a size: `"PACs <size>"`.
    pub fn base_unit_key(size: HmiSize) -> String {
        format!("{} {}", PART_PREFIX, size.key())
    }

    pub fn base_unit(&self, size: HmiSize) -> Option<&PriceEntry> {
        self.lookup(&Self::base_unit_key(size))
    }

    pub fn extra(&self, role: ExtraRole) -> Option<&PriceEntry> {
        self.extras.get(&role)
    }

    /// Unit price of an extra, zero when the role is unbound.
    pub fn extra_price(&self, role: ExtraRole) -> Money {
        self.extra(role).map(|e| e.unit_price).unwrap_or_default()
    }

    pub fn unbound_roles(&self) -> Vec<ExtraRole> {
        ExtraRole::ALL
            .into_iter()
            .filter(|role| !self.extras.contains_key(role))
            .collect()
    }

    /// Number of sheet rows the catalog was built from.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Convenience builder, mostly for tests.
#[derive(Debug, Default)]
pub struct PriceCatalogBuilder {
    rows: Vec<SheetRow>,
}

impl PriceCatalogBuilder {
    pub fn row(mut self, row: SheetRow) -> Self {
        self.rows.push(row);
        self
    }

    /// Adds a row named with the role's symbolic key.
    pub fn extra(self, role: ExtraRole, price: Money) -> Self {
        self.row(SheetRow::new(role.key(), price, ""))
    }

    pub fn build(self) -> PriceCatalog {
        PriceCatalog::from_rows(self.rows, &RoleBindings::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy_rows() -> Vec<SheetRow> {
        let rials = Money::from_rials;
        vec![
            SheetRow::new("PACs 7035E", rials(1_000_000), "HMI 3.5"),
            SheetRow::new("PACs 7070E2", rials(2_000_000), "HMI 7"),
            SheetRow::new("PACs 7101E", rials(3_000_000), "HMI 10"),
            SheetRow::new("SD", rials(50_000), ""),
            SheetRow::new("LAN", rials(70_000), ""),
            SheetRow::new("AI", rials(90_000), ""),
            SheetRow::new("AO", rials(110_000), ""),
            SheetRow::new("Relay", rials(30_000), ""),
        ]
    }

    #[test]
    fn test_legacy_positional_binding() {
        let catalog = PriceCatalog::from_rows(legacy_rows(), &RoleBindings::legacy_positional());
        assert_eq!(catalog.extra_price(ExtraRole::SdCard).rials(), 50_000);
        assert_eq!(catalog.extra_price(ExtraRole::Relay).rials(), 30_000);
        assert!(catalog.unbound_roles().is_empty());
        assert_eq!(catalog.row_count(), 8);
    }

    #[test]
    fn test_positional_binding_uses_source_index() {
        // Row 2 was dropped by the loader; the extras keep their sheet positions.
        let rows: Vec<SheetRow> = legacy_rows()
            .into_iter()
            .enumerate()
            .filter(|(n, _)| *n != 2)
            .map(|(n, row)| row.at_position(n))
            .collect();
        let catalog = PriceCatalog::from_rows(rows, &RoleBindings::legacy_positional());
        assert_eq!(catalog.extra_price(ExtraRole::SdCard).rials(), 50_000);
        assert_eq!(catalog.extra_price(ExtraRole::Lan).rials(), 70_000);
        assert_eq!(catalog.extra_price(ExtraRole::Relay).rials(), 30_000);
        assert!(catalog.unbound_roles().is_empty());
    }

    #[test]
    fn test_name_binding_survives_reordering() {
        let mut rows = legacy_rows();
        rows.reverse();
        let bindings = RoleBindings {
            sd_card: RoleBinding::Name("SD".into()),
            lan: RoleBinding::Name("LAN".into()),
            analog_input: RoleBinding::Name("AI".into()),
            analog_output: RoleBinding::Name("AO".into()),
            relay: RoleBinding::Name("Relay".into()),
        };
        let catalog = PriceCatalog::from_rows(rows, &bindings);
        assert_eq!(catalog.extra_price(ExtraRole::AnalogOutput).rials(), 110_000);
        assert_eq!(catalog.extra_price(ExtraRole::Lan).rials(), 70_000);
    }

    #[test]
    fn test_unbound_roles_price_zero() {
        let catalog = PriceCatalog::from_rows(legacy_rows(), &RoleBindings::default());
        assert_eq!(catalog.unbound_roles().len(), 5);
        assert!(catalog.extra_price(ExtraRole::Relay).is_zero());
    }

    #[test]
    fn test_base_unit_lookup() {
        let catalog = PriceCatalog::from_rows(legacy_rows(), &RoleBindings::default());
        assert_eq!(PriceCatalog::base_unit_key(HmiSize::Size7070E2), "PACs 7070E2");
        let base = catalog.base_unit(HmiSize::Size7101E).unwrap();
        assert_eq!(base.unit_price.rials(), 3_000_000);
        assert_eq!(base.base_description, "HMI 10");
    }

    #[test]
    fn test_duplicate_names_keep_first_row() {
        let catalog = PriceCatalog::builder()
            .row(SheetRow::new("PACs 5100", Money::from_rials(10), "first"))
            .row(SheetRow::new("PACs 5100", Money::from_rials(20), "second"))
            .build();
        assert_eq!(catalog.lookup("PACs 5100").unwrap().base_description, "first");
    }

    #[test]
    fn test_role_bindings_from_toml_shape() {
        let json = serde_json::json!({ "relay": { "position": 7 } });
        let bindings: RoleBindings = serde_json::from_value(json).unwrap();
        assert_eq!(bindings.relay, RoleBinding::Position(7));
        assert_eq!(bindings.lan, RoleBinding::Name("extra.lan".into()));
    }
}

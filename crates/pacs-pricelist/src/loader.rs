//! # Sheet Loader
//!
//! Decodes sheet rows and builds the catalog.
//!
//! ## Row Handling
//! ```text
//! ┌───────────────────────────────┬─────────────────────────────────────────┐
//! │ Row                           │ Result                                  │
//! ├───────────────────────────────┼─────────────────────────────────────────┤
//! │ name empty / whitespace       │ skipped, warn!                          │
//! │ price missing                 │ 0                                       │
//! │ price 1250000.6               │ 1,250,001 (rounded once, here)          │
//! │ price "1,250,000" (text cell) │ 1,250,000                               │
//! │ price "n/a" / negative        │ InvalidRow error                        │
//! │ description missing           │ ""                                      │
//! └───────────────────────────────┴─────────────────────────────────────────┘
//! ```

use std::path::Path;

use pacs_core::catalog::{PriceCatalog, RoleBindings, SheetRow};
use pacs_core::Money;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{PriceListError, PriceListResult};

/// A price cell as spreadsheet exports write it.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PriceCell {
    Number(f64),
    Text(String),
}

impl Default for PriceCell {
    fn default() -> Self {
        PriceCell::Number(0.0)
    }
}

/// One row exactly as it appears in the sheet file.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default)]
    name: String,
    #[serde(default)]
    price: PriceCell,
    #[serde(default)]
    description: String,
}

fn cell_to_money(index: usize, cell: PriceCell) -> PriceListResult<Money> {
    let value = match cell {
        PriceCell::Number(n) => n,
        PriceCell::Text(text) => {
            let cleaned: String = text.chars().filter(|c| !matches!(c, ',' | ' ')).collect();
            if cleaned.is_empty() {
                0.0
            } else {
                cleaned.parse::<f64>().map_err(|_| PriceListError::InvalidRow {
                    index,
                    reason: format!("price '{}' is not a number", text),
                })?
            }
        }
    };

    if !value.is_finite() || value < 0.0 {
        return Err(PriceListError::InvalidRow {
            index,
            reason: format!("price {} is out of range", value),
        });
    }
    Ok(Money::from_sheet_number(value))
}

/// Decodes sheet JSON into rows, in sheet order.
///
/// Rows with a blank name are dropped. Every kept row remembers its index
/// in the sheet, so positional role bindings still see the sheet layout.
pub fn parse_rows(json: &str) -> PriceListResult<Vec<SheetRow>> {
    let raw: Vec<RawRow> = serde_json::from_str(json)?;
    let mut rows = Vec::with_capacity(raw.len());

    for (index, row) in raw.into_iter().enumerate() {
        let name = row.name.trim();
        if name.is_empty() {
            warn!(index, "skipping price row with empty name");
            continue;
        }
        let price = cell_to_money(index, row.price)?;
        rows.push(SheetRow::new(name, price, row.description).at_position(index));
    }

    Ok(rows)
}

/// Reads and decodes the sheet at `path`.
pub async fn load_rows(path: impl AsRef<Path>) -> PriceListResult<Vec<SheetRow>> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading price sheet");

    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| PriceListError::io(path, e))?;
    parse_rows(&json)
}

/// Reads the sheet at `path` and binds extra roles.
///
/// Unbound roles are logged and price at zero.
pub async fn load_catalog(
    path: impl AsRef<Path>,
    bindings: &RoleBindings,
) -> PriceListResult<PriceCatalog> {
    let path = path.as_ref();
    let rows = load_rows(path).await?;
    let catalog = PriceCatalog::from_rows(rows, bindings);

    for role in catalog.unbound_roles() {
        warn!(%role, binding = ?bindings.get(role), "extra role unbound, priced at zero");
    }

    info!(
        path = %path.display(),
        rows = catalog.row_count(),
        "price catalog loaded"
    );
    Ok(catalog)
}

/// Fails on the first unbound role. For sheets that must price every extra.
pub fn ensure_all_bound(catalog: &PriceCatalog) -> PriceListResult<()> {
    match catalog.unbound_roles().first() {
        Some(role) => Err(PriceListError::UnboundRole {
            role: role.key().to_string(),
        }),
        None => Ok(()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pacs_core::catalog::ExtraRole;
    use pacs_core::{pricer, Configuration, HmiSize, OutputMode, Presence};
    use std::io::Write;

    const LEGACY_SHEET: &str = r#"[
        { "name": "PACs 7035E", "price": 1000000, "description": "HMI 3.5" },
        { "name": "PACs 7070E2", "price": 2000000, "description": "HMI 7" },
        { "name": "PACs 7101E", "price": 3000000, "description": "HMI 10" },
        { "name": "SD", "price": 50000 },
        { "name": "LAN", "price": 70000 },
        { "name": "AI", "price": 90000 },
        { "name": "AO", "price": 110000 },
        { "name": "Relay", "price": 10000 }
    ]"#;

    const NAMED_SHEET: &str = r#"[
        { "name": "extra.relay", "price": 10000 },
        { "name": "PACs 7101E", "price": 3000000, "description": "HMI 10" },
        { "name": "extra.analogOutput", "price": 110000 },
        { "name": "PACs 7035E", "price": 1000000, "description": "HMI 3.5" },
        { "name": "extra.sdCard", "price": 50000 },
        { "name": "extra.lan", "price": 70000 },
        { "name": "PACs 7070E2", "price": 2000000, "description": "HMI 7" },
        { "name": "extra.analogInput", "price": 90000 }
    ]"#;

    fn write_sheet(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_rounds_and_defaults() {
        let rows = parse_rows(
            r#"[
                { "name": " PACs 5100 ", "price": 1250000.6 },
                { "name": "NIC 500", "price": "1,200,000", "description": "card" },
                { "name": "NIC 500AI" }
            ]"#,
        )
        .unwrap();

        assert_eq!(rows[0].name, "PACs 5100");
        assert_eq!(rows[0].price.rials(), 1_250_001);
        assert_eq!(rows[0].description, "");
        assert_eq!(rows[1].price.rials(), 1_200_000);
        assert!(rows[2].price.is_zero());
    }

    #[test]
    fn test_parse_skips_blank_names() {
        let rows = parse_rows(
            r#"[{ "name": "", "price": 5 }, { "name": "   " }, { "name": "A", "price": 1 }]"#,
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "A");
        assert_eq!(rows[0].position, Some(2));
    }

    #[test]
    fn test_parse_rejects_bad_prices() {
        assert!(matches!(
            parse_rows(r#"[{ "name": "A", "price": "n/a" }]"#),
            Err(PriceListError::InvalidRow { index: 0, .. })
        ));
        assert!(matches!(
            parse_rows(r#"[{ "name": "A", "price": 1 }, { "name": "B", "price": -5 }]"#),
            Err(PriceListError::InvalidRow { index: 1, .. })
        ));
        assert!(matches!(
            parse_rows(r#"{ "name": "A" }"#),
            Err(PriceListError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_file_reports_path() {
        let err = load_rows("/definitely/not/here.json").await.unwrap_err();
        match err {
            PriceListError::Io { path, .. } => assert!(path.ends_with("here.json")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_legacy_and_named_bindings_price_identically() {
        let legacy_file = write_sheet(LEGACY_SHEET);
        let named_file = write_sheet(NAMED_SHEET);

        let legacy = load_catalog(legacy_file.path(), &RoleBindings::legacy_positional())
            .await
            .unwrap();
        let named = load_catalog(named_file.path(), &RoleBindings::default())
            .await
            .unwrap();

        assert!(legacy.unbound_roles().is_empty());
        assert!(named.unbound_roles().is_empty());

        let configs = [
            Configuration {
                sd_card: Presence::Present,
                analog_inputs: 1,
                ..Configuration::default()
            },
            Configuration {
                size: HmiSize::Size7101E,
                output_mode: OutputMode::Relay,
                relay_taps: 15,
                analog_inputs: 2,
                analog_outputs: 2,
                ..Configuration::default()
            },
        ];
        for config in configs {
            assert_eq!(pricer::price(&config, &legacy), pricer::price(&config, &named));
        }
    }

    #[tokio::test]
    async fn test_legacy_positions_ignore_blank_rows() {
        let file = write_sheet(
            r#"[
                { "name": "PACs 7035E", "price": 1000000, "description": "HMI 3.5" },
                { "name": "PACs 7070E2", "price": 2000000, "description": "HMI 7" },
                { "description": "--- extras ---" },
                { "name": "SD", "price": 50000 },
                { "name": "LAN", "price": 70000 },
                { "name": "AI", "price": 90000 },
                { "name": "AO", "price": 110000 },
                { "name": "Relay", "price": 10000 }
            ]"#,
        );
        let catalog = load_catalog(file.path(), &RoleBindings::legacy_positional())
            .await
            .unwrap();

        assert!(catalog.unbound_roles().is_empty());
        assert_eq!(catalog.extra_price(ExtraRole::SdCard).rials(), 50_000);
        assert_eq!(catalog.extra_price(ExtraRole::Lan).rials(), 70_000);
        assert_eq!(catalog.extra_price(ExtraRole::Relay).rials(), 10_000);
    }

    #[tokio::test]
    async fn test_unbound_roles_price_at_zero() {
        let file = write_sheet(r#"[{ "name": "PACs 7035E", "price": 1000000 }]"#);
        let catalog = load_catalog(file.path(), &RoleBindings::default())
            .await
            .unwrap();

        assert_eq!(catalog.unbound_roles().len(), ExtraRole::ALL.len());
        let config = Configuration {
            sd_card: Presence::Present,
            ..Configuration::default()
        };
        assert_eq!(pricer::price(&config, &catalog).rials(), 1_000_000);
        assert!(matches!(
            ensure_all_bound(&catalog),
            Err(PriceListError::UnboundRole { .. })
        ));
    }
}

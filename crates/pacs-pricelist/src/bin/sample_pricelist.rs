//! # Sample Price Sheet Generator
//!
//! Writes a complete price sheet for development.
//!
//! ## Usage
//! ```bash
//! # Named extras (default)
//! cargo run -p pacs-pricelist --bin sample-pricelist
//!
//! # Legacy positional layout, custom path
//! cargo run -p pacs-pricelist --bin sample-pricelist -- --legacy --out ./legacy.json
//! ```
//!
//! The written file is read back through the loader before exiting, so a
//! sheet this tool produces always loads.

use std::env;

use pacs_core::catalog::{ExtraRole, RoleBindings};
use pacs_core::{HmiSize, PlcModel, PriceCatalog};
use serde_json::{json, Value};

/// Base unit prices in Rials, in [`HmiSize::ALL`] order.
const HMI_PRICES: [(i64, &str); 3] = [
    (185_000_000, "پنل HMI با نمایشگر 3.5 اینچ و PLC داخلی"),
    (265_000_000, "پنل HMI با نمایشگر 7 اینچ و PLC داخلی"),
    (390_000_000, "پنل HMI با نمایشگر 10 اینچ و PLC داخلی"),
];

/// Extra prices in legacy sheet order, with the row names legacy sheets use.
const EXTRA_PRICES: [(ExtraRole, &str, i64); 5] = [
    (ExtraRole::SdCard, "کارت حافظه", 4_500_000),
    (ExtraRole::Lan, "پورت اترنت", 12_000_000),
    (ExtraRole::AnalogInput, "ورودی آنالوگ", 7_500_000),
    (ExtraRole::AnalogOutput, "خروجی آنالوگ", 8_500_000),
    (ExtraRole::Relay, "رله", 900_000),
];

const PLC_PRICES: [i64; 9] = [
    95_000_000,
    105_000_000,
    118_000_000,
    126_000_000,
    131_000_000,
    160_000_000,
    42_000_000,
    48_000_000,
    55_000_000,
];

fn sheet(legacy: bool) -> Vec<Value> {
    let mut rows: Vec<Value> = HmiSize::ALL
        .iter()
        .zip(HMI_PRICES)
        .map(|(size, (price, description))| {
            json!({
                "name": PriceCatalog::base_unit_key(*size),
                "price": price,
                "description": description,
            })
        })
        .collect();

    // legacy sheets keep the extras directly after the base units
    rows.extend(EXTRA_PRICES.iter().map(|(role, legacy_name, price)| {
        let name = if legacy { *legacy_name } else { role.key() };
        json!({ "name": name, "price": price })
    }));

    rows.extend(PlcModel::ALL.iter().zip(PLC_PRICES).map(|(model, price)| {
        json!({
            "name": model.row_name(),
            "price": price,
            "description": format!("کنترلر {}", model.label().trim()),
        })
    }));

    rows
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut out = String::from("./prices.json");
    let mut legacy = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--out" | "-o" => {
                if i + 1 < args.len() {
                    out = args[i + 1].clone();
                    i += 1;
                }
            }
            "--legacy" => legacy = true,
            "--help" | "-h" => {
                println!("PACs Sample Price Sheet Generator");
                println!();
                println!("Usage: sample-pricelist [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -o, --out <PATH>   Output file (default: ./prices.json)");
                println!("      --legacy       Positional extras instead of extra.* names");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let rows = sheet(legacy);
    tokio::fs::write(&out, serde_json::to_string_pretty(&rows)?).await?;
    println!("✓ Wrote {} rows to {}", rows.len(), out);

    let bindings = if legacy {
        RoleBindings::legacy_positional()
    } else {
        RoleBindings::default()
    };
    let catalog = pacs_pricelist::load_catalog(&out, &bindings).await?;
    pacs_pricelist::ensure_all_bound(&catalog)?;
    println!("✓ Sheet loads with every extra bound");

    Ok(())
}

//! # pacs-core: Pure Business Logic for the PACs Configurator
//!
//! This crate is the **heart** of the configurator. It holds the option
//! rules, pricing, part number encoding and the cart as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     PACs Configurator Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    quoter (apps/quoter)                         │   │
//! │  │    set field ──► show quote ──► confirm ──► order message       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pacs-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐         │   │
//! │  │   │ resolver │ │  pricer  │ │ part_num │ │   cart   │         │   │
//! │  │   │  limits  │ │  extras  │ │ identity │ │ LineItem │         │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘         │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────▲───────────────────────────────────┘   │
//! │                                │ Vec<SheetRow>                          │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │               pacs-pricelist (price sheet loader)               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Configuration value types and option enums
//! - [`sizes`] - Static size profiles and option tables
//! - [`money`] - Integer Rial amounts
//! - [`catalog`] - Price catalog with symbolic extra roles
//! - [`resolver`] - Option availability and force-correction
//! - [`pricer`] - Price, breakdown and description
//! - [`part_number`] - Canonical identity encoding
//! - [`category`] - HMI / PLC categories behind one interface
//! - [`cart`] - Line items with merge-by-identity
//! - [`order`] - Order message text
//! - [`validation`] - Input parsing and customer field checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use pacs_core::catalog::{ExtraRole, PriceCatalog, SheetRow};
//! use pacs_core::{pricer, Configuration, Money, Presence};
//!
//! let catalog = PriceCatalog::builder()
//!     .row(SheetRow::new("PACs 7035E", Money::from_rials(1_000_000), "HMI 3.5"))
//!     .extra(ExtraRole::SdCard, Money::from_rials(50_000))
//!     .build();
//!
//! let config = Configuration {
//!     sd_card: Presence::Present,
//!     lan: Presence::Absent,
//!     ..Configuration::default()
//! };
//!
//! assert_eq!(pricer::price(&config, &catalog).rials(), 1_050_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod category;
pub mod error;
pub mod money;
pub mod order;
pub mod part_number;
pub mod pricer;
pub mod resolver;
pub mod sizes;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{AddOutcome, Cart, CartTotals, LineItem};
pub use catalog::{ExtraRole, PriceCatalog, PriceEntry};
pub use category::{Category, Configurable, PlcConfiguration, PlcModel, Quote, Selection};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::OrderRequest;
pub use part_number::PartNumber;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Prefix shared by part numbers and base-unit price rows.
pub const PART_PREFIX: &str = "PACs";

/// Upper bound of the analog input/output selectors (inclusive).
pub const MAX_ANALOG_SELECTION: u8 = 4;

/// Per-channel cap applied to the smallest chassis on top of its joint limit.
pub const SMALLEST_SIZE_ANALOG_CAP: u8 = 2;

//! # pacs-pricelist: Price Sheet Loader
//!
//! Reads the exported price sheet from disk and builds the read-only
//! [`PriceCatalog`](pacs_core::PriceCatalog) the pricer works against.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Catalog Load Flow                                 │
//! │                                                                         │
//! │  quoter startup / `reload`                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                pacs-pricelist (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   tokio::fs::read ──► RawRow[] ──► SheetRow[] ──► PriceCatalog  │   │
//! │  │                       (JSON)      (rounded,      (roles bound)  │   │
//! │  │                                    filtered)                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogState swaps the new catalog in                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Sheet Format
//! ```json
//! [
//!   { "name": "PACs 7035E", "price": 1000000, "description": "HMI 3.5 inch" },
//!   { "name": "extra.sdCard", "price": 50000 }
//! ]
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pacs_core::catalog::RoleBindings;
//!
//! let catalog = pacs_pricelist::load_catalog("prices.json", &RoleBindings::default()).await?;
//! ```

pub mod error;
pub mod loader;

pub use error::{PriceListError, PriceListResult};
pub use loader::{ensure_all_bound, load_catalog, load_rows, parse_rows};

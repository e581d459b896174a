//! # Catalog State
//!
//! Holds the price catalog behind an `RwLock` and tracks whether it has
//! loaded.
//!
//! ## Load and Reload
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  startup ──► spawn_load() ──► Loading ──┬──► Ready(Arc<PriceCatalog>)   │
//! │                                         └──► Failed(message)            │
//! │  startup, no sheet path ──► Unconfigured                                │
//! │                                                                         │
//! │  reload ───► load() builds a complete catalog off to the side,         │
//! │              then swaps it in with ONE write.                           │
//! │              Readers see the old catalog or the new one, never a mix.   │
//! │              A failed reload keeps the old catalog.                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Readers clone the `Arc` and release the lock immediately, so pricing
//! never holds it.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use pacs_core::catalog::RoleBindings;
use pacs_core::PriceCatalog;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::error::{ApiError, ErrorCode};

/// What readers see.
#[derive(Debug, Clone)]
pub enum CatalogSnapshot {
    /// No sheet path is configured; nothing will load.
    Unconfigured,
    Loading,
    Failed(String),
    Ready(Arc<PriceCatalog>),
}

impl CatalogSnapshot {
    pub fn catalog(&self) -> Option<&PriceCatalog> {
        match self {
            CatalogSnapshot::Ready(catalog) => Some(catalog),
            _ => None,
        }
    }
}

/// Serializable summary for `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "state")]
pub enum CatalogStatus {
    Unconfigured,
    Loading,
    Failed { message: String },
    Ready {
        rows: usize,
        #[serde(rename = "unboundRoles")]
        unbound_roles: Vec<String>,
    },
}

impl From<&CatalogSnapshot> for CatalogStatus {
    fn from(snapshot: &CatalogSnapshot) -> Self {
        match snapshot {
            CatalogSnapshot::Unconfigured => CatalogStatus::Unconfigured,
            CatalogSnapshot::Loading => CatalogStatus::Loading,
            CatalogSnapshot::Failed(message) => CatalogStatus::Failed {
                message: message.clone(),
            },
            CatalogSnapshot::Ready(catalog) => CatalogStatus::Ready {
                rows: catalog.row_count(),
                unbound_roles: catalog
                    .unbound_roles()
                    .into_iter()
                    .map(|role| role.key().to_string())
                    .collect(),
            },
        }
    }
}

/// Where and how to load the sheet.
#[derive(Debug, Clone)]
pub struct CatalogSource {
    pub path: PathBuf,
    pub bindings: RoleBindings,
    pub require_all_extras: bool,
}

/// Shared catalog state. Cloning shares the same slot.
#[derive(Debug, Clone)]
pub struct CatalogState {
    slot: Arc<RwLock<CatalogSnapshot>>,
}

impl CatalogState {
    /// Starts in `Loading`.
    pub fn new() -> Self {
        CatalogState {
            slot: Arc::new(RwLock::new(CatalogSnapshot::Loading)),
        }
    }

    /// No sheet to load. Stays this way until a catalog is swapped in.
    pub fn unconfigured() -> Self {
        CatalogState {
            slot: Arc::new(RwLock::new(CatalogSnapshot::Unconfigured)),
        }
    }

    /// Already-built catalog, for tests and embedding.
    pub fn ready(catalog: PriceCatalog) -> Self {
        let state = CatalogState::new();
        state.replace(catalog);
        state
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        self.slot.read().expect("Catalog lock poisoned").clone()
    }

    pub fn status(&self) -> CatalogStatus {
        CatalogStatus::from(&self.snapshot())
    }

    /// The catalog, or the reason there is none.
    pub fn require(&self) -> Result<Arc<PriceCatalog>, ApiError> {
        match self.snapshot() {
            CatalogSnapshot::Ready(catalog) => Ok(catalog),
            CatalogSnapshot::Unconfigured => Err(ApiError::catalog_unconfigured()),
            CatalogSnapshot::Loading => Err(ApiError::catalog_loading()),
            CatalogSnapshot::Failed(message) => {
                Err(ApiError::new(ErrorCode::CatalogError, message))
            }
        }
    }

    /// Swaps in a fully built catalog.
    pub fn replace(&self, catalog: PriceCatalog) {
        let catalog = Arc::new(catalog);
        *self.slot.write().expect("Catalog lock poisoned") = CatalogSnapshot::Ready(catalog);
    }

    /// Records a load failure unless a catalog is already being served.
    fn mark_failed(&self, message: String) {
        let mut slot = self.slot.write().expect("Catalog lock poisoned");
        if !matches!(*slot, CatalogSnapshot::Ready(_)) {
            *slot = CatalogSnapshot::Failed(message);
        }
    }

    /// Loads the sheet and swaps it in. Returns the row count.
    pub async fn load(&self, source: &CatalogSource) -> Result<usize, ApiError> {
        let result = async {
            let catalog = pacs_pricelist::load_catalog(&source.path, &source.bindings).await?;
            if source.require_all_extras {
                pacs_pricelist::ensure_all_bound(&catalog)?;
            }
            Ok::<_, pacs_pricelist::PriceListError>(catalog)
        }
        .await;

        match result {
            Ok(catalog) => {
                let rows = catalog.row_count();
                self.replace(catalog);
                info!(rows, "price catalog ready");
                Ok(rows)
            }
            Err(e) => {
                warn!(error = %e, "price catalog load failed");
                let err = ApiError::from(e);
                self.mark_failed(err.message.clone());
                Err(err)
            }
        }
    }

    /// Fire-and-forget load at startup.
    pub fn spawn_load(&self, source: CatalogSource) -> JoinHandle<()> {
        let state = self.clone();
        tokio::spawn(async move {
            // failure is recorded in the slot and logged by load()
            let _ = state.load(&source).await;
        })
    }
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sheet(base_price: i64) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{ "name": "PACs 7035E", "price": {base_price}, "description": "HMI" }},
               {{ "name": "extra.sdCard", "price": 50000 }}]"#
        )
        .unwrap();
        file
    }

    fn source(path: PathBuf) -> CatalogSource {
        CatalogSource {
            path,
            bindings: RoleBindings::default(),
            require_all_extras: false,
        }
    }

    #[test]
    fn test_starts_loading() {
        let state = CatalogState::new();
        assert!(matches!(state.snapshot(), CatalogSnapshot::Loading));
        assert_eq!(state.require().unwrap_err().code, ErrorCode::CatalogLoading);
        assert_eq!(state.status(), CatalogStatus::Loading);
    }

    #[test]
    fn test_unconfigured_reports_config_error() {
        let state = CatalogState::unconfigured();
        assert_eq!(state.status(), CatalogStatus::Unconfigured);
        assert_eq!(state.require().unwrap_err().code, ErrorCode::ConfigError);

        state.replace(PriceCatalog::default());
        assert!(state.require().is_ok());
    }

    #[tokio::test]
    async fn test_spawned_load_becomes_ready() {
        let file = sheet(1_000_000);
        let state = CatalogState::new();
        state.spawn_load(source(file.path().to_path_buf())).await.unwrap();

        let catalog = state.require().unwrap();
        assert_eq!(catalog.row_count(), 2);
        match state.status() {
            CatalogStatus::Ready { rows, unbound_roles } => {
                assert_eq!(rows, 2);
                assert_eq!(unbound_roles.len(), 4);
            }
            other => panic!("unexpected status {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_reload_swaps_and_old_snapshot_survives() {
        let first = sheet(1_000_000);
        let second = sheet(2_000_000);
        let state = CatalogState::new();
        state.load(&source(first.path().to_path_buf())).await.unwrap();

        let held = state.require().unwrap();
        state.load(&source(second.path().to_path_buf())).await.unwrap();

        let key = "PACs 7035E";
        assert_eq!(held.lookup(key).unwrap().unit_price.rials(), 1_000_000);
        assert_eq!(
            state.require().unwrap().lookup(key).unwrap().unit_price.rials(),
            2_000_000
        );
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_catalog() {
        let file = sheet(1_000_000);
        let state = CatalogState::new();
        state.load(&source(file.path().to_path_buf())).await.unwrap();

        let err = state
            .load(&source(PathBuf::from("/missing/prices.json")))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogError);
        assert!(state.require().is_ok());
    }

    #[tokio::test]
    async fn test_failed_first_load_and_strict_bindings() {
        let state = CatalogState::new();
        assert!(state.load(&source(PathBuf::from("/missing.json"))).await.is_err());
        assert!(matches!(state.status(), CatalogStatus::Failed { .. }));

        let file = sheet(1_000_000);
        let strict = CatalogSource {
            require_all_extras: true,
            ..source(file.path().to_path_buf())
        };
        let err = state.load(&strict).await.unwrap_err();
        assert!(err.message.contains("not bound"));
    }
}

//! # State Module
//!
//! Application state for the quoter, one focused type per concern.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      AppState (repl owner)                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │       ┌──────────────────┬───┴──────────────┬──────────────────┐       │
//! │       ▼                  ▼                  ▼                  ▼        │
//! │  ┌────────────┐  ┌──────────────┐  ┌──────────────┐  ┌────────────┐    │
//! │  │CatalogState│  │  CartState   │  │ SessionState │  │ConfigState │    │
//! │  │            │  │              │  │              │  │            │    │
//! │  │ Arc<RwLock<│  │  Arc<Mutex<  │  │  Mutex<      │  │ read-only  │    │
//! │  │  Snapshot>>│  │    Cart>>    │  │   Session>   │  │            │    │
//! │  └────────────┘  └──────────────┘  └──────────────┘  └────────────┘    │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CatalogState: written once per load, read on every quote            │
//! │  • CartState / SessionState: exclusive access, held briefly            │
//! │  • ConfigState: read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands take only the states they need.

mod cart;
mod catalog;
mod config;
mod session;

pub use cart::CartState;
pub use catalog::{CatalogSnapshot, CatalogSource, CatalogState, CatalogStatus};
pub use config::{ConfigError, ConfigOverrides, ConfigState, CONFIG_FILE_NAME};
pub use session::{Session, SessionState, Tab};

/// Every state the shell dispatches against.
#[derive(Debug, Default)]
pub struct AppState {
    pub catalog: CatalogState,
    pub cart: CartState,
    pub session: SessionState,
    pub config: ConfigState,
}

impl AppState {
    /// The catalog starts `Loading` when a sheet path is configured and
    /// `Unconfigured` otherwise.
    pub fn new(config: ConfigState) -> Self {
        let catalog = if config.catalog.path.is_some() {
            CatalogState::new()
        } else {
            CatalogState::unconfigured()
        };
        AppState {
            catalog,
            config,
            ..Self::default()
        }
    }

    /// Where the sheet comes from, if configured.
    pub fn catalog_source(&self) -> Option<CatalogSource> {
        self.config.catalog.path.clone().map(|path| CatalogSource {
            path,
            bindings: self.config.catalog.roles.clone(),
            require_all_extras: self.config.catalog.require_all_extras,
        })
    }
}

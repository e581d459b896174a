//! # Catalog Commands
//!
//! Price list status and reload.

use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{AppState, CartState, CatalogState, CatalogStatus, SessionState, Tab};

/// Overview shown by `status`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub catalog: CatalogStatus,
    pub tab: Tab,
    pub cart_lines: usize,
}

pub fn status(catalog: &CatalogState, cart: &CartState, session: &SessionState) -> StatusResponse {
    debug!("status command");
    StatusResponse {
        catalog: catalog.status(),
        tab: session.with_session(|s| s.tab),
        cart_lines: cart.with_cart(|c| c.len()),
    }
}

/// Re-reads the configured sheet and swaps it in.
///
/// The current catalog keeps serving until the new one is complete, and
/// stays in place if the reload fails. Cart lines keep their frozen prices.
pub async fn reload(state: &AppState) -> Result<CatalogStatus, ApiError> {
    debug!("reload command");
    let source = state
        .catalog_source()
        .ok_or_else(ApiError::catalog_unconfigured)?;

    let rows = state.catalog.load(&source).await?;
    info!(rows, path = %source.path.display(), "price catalog reloaded");
    Ok(state.catalog.status())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::ConfigState;
    use std::io::Write;

    #[test]
    fn test_status_while_loading() {
        let state = AppState::default();
        let response = status(&state.catalog, &state.cart, &state.session);
        assert_eq!(response.catalog, CatalogStatus::Loading);
        assert_eq!(response.tab, Tab::Hmi);
        assert_eq!(response.cart_lines, 0);
    }

    #[tokio::test]
    async fn test_reload_without_source() {
        let err = reload(&AppState::default()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigError);
    }

    #[test]
    fn test_status_without_configured_sheet() {
        let state = AppState::new(ConfigState::default());
        let response = status(&state.catalog, &state.cart, &state.session);
        assert_eq!(response.catalog, CatalogStatus::Unconfigured);
    }

    #[tokio::test]
    async fn test_reload_reads_configured_sheet() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{ "name": "PACs 7035E", "price": 1000000 }}]"#).unwrap();

        let mut config = ConfigState::default();
        config.catalog.path = Some(file.path().to_path_buf());
        let state = AppState::new(config);

        match reload(&state).await.unwrap() {
            CatalogStatus::Ready { rows, .. } => assert_eq!(rows, 1),
            other => panic!("unexpected status {other:?}"),
        }
    }
}

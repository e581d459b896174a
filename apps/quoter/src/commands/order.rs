//! # Order Commands
//!
//! Turns the cart into a message and a messenger deep link.
//!
//! ## Order Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  order Sara | Acme                                                      │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  1. Phone number from config (CONFIG_ERROR when unset)                 │
//! │  2. compose_message(cart, request, greeting)                           │
//! │       blank name/company ──► VALIDATION_ERROR                          │
//! │       empty cart ──────────► EMPTY_CART                                │
//! │  3. https://wa.me/<phone>?text=<percent-encoded message>               │
//! │                                                                         │
//! │  The cart is left as is.                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use pacs_core::order::compose_message;
use pacs_core::OrderRequest;
use serde::Serialize;
use tracing::{debug, info};
use url::Url;

use crate::error::ApiError;
use crate::state::{CartState, ConfigState};

const DEEP_LINK_BASE: &str = "https://wa.me/";

/// Composed order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub message: String,
    pub link: String,
}

/// Composes the order message and its deep link.
pub fn place_order(
    cart: &CartState,
    config: &ConfigState,
    name: &str,
    company: &str,
) -> Result<OrderResponse, ApiError> {
    debug!(name = %name, company = %company, "place_order command");
    let phone = config.order_phone()?;
    let request = OrderRequest::new(name, company);

    let message = cart.with_cart(|c| compose_message(c, &request, &config.order.greeting))?;
    let link = order_link(phone, &message)?;

    info!(chars = message.chars().count(), "order message composed");
    Ok(OrderResponse { message, link })
}

/// `https://wa.me/<phone>?text=<text>` with the text percent-encoded.
///
/// Spaces become `%20` rather than `+`.
pub fn order_link(phone: &str, text: &str) -> Result<String, ApiError> {
    let mut link = Url::parse(DEEP_LINK_BASE)
        .map_err(|e| ApiError::internal(format!("Invalid deep link base: {}", e)))?;
    link.set_path(phone);

    let encoded: String = url::form_urlencoded::byte_serialize(text.as_bytes()).collect();
    link.set_query(Some(&format!("text={}", encoded.replace('+', "%20"))));

    Ok(link.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use pacs_core::catalog::SheetRow;
    use pacs_core::{Configurable, Configuration, Money, PriceCatalog};

    fn config_with_phone() -> ConfigState {
        let mut config = ConfigState::default();
        config.order.phone = Some("989120000000".into());
        config
    }

    fn filled_cart() -> CartState {
        let catalog = PriceCatalog::builder()
            .row(SheetRow::new("PACs 7035E", Money::from_rials(1_000_000), "HMI"))
            .build();
        let cart = CartState::new();
        cart.with_cart_mut(|c| c.add(Configuration::default().quote(&catalog)));
        cart
    }

    #[test]
    fn test_link_encoding() {
        let link = order_link("989120000000", "a b+c\nسلام").unwrap();
        assert_eq!(
            link,
            "https://wa.me/989120000000?text=a%20b%2Bc%0A%D8%B3%D9%84%D8%A7%D9%85"
        );
    }

    #[test]
    fn test_place_order() {
        let cart = filled_cart();
        let response = place_order(&cart, &config_with_phone(), " Sara ", "Acme").unwrap();

        assert!(response.message.starts_with("سلام وقت بخیر\nSara هستم از شرکت Acme\n"));
        assert!(response.message.contains("PACs7035E-ACT00NL"));
        assert!(response.link.starts_with("https://wa.me/989120000000?text="));
        assert_eq!(cart.with_cart(|c| c.len()), 1);
    }

    #[test]
    fn test_order_errors() {
        let config = config_with_phone();
        assert_eq!(
            place_order(&CartState::new(), &config, "Sara", "Acme").unwrap_err().code,
            ErrorCode::EmptyCart
        );
        assert_eq!(
            place_order(&filled_cart(), &config, "Sara", "  ").unwrap_err().code,
            ErrorCode::ValidationError
        );
        assert_eq!(
            place_order(&filled_cart(), &ConfigState::default(), "Sara", "Acme")
                .unwrap_err()
                .code,
            ErrorCode::ConfigError
        );
    }
}

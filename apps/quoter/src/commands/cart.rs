//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐                        │
//! │  │  Empty   │────►│ In Cart  │────►│  Order   │                        │
//! │  │  Cart    │     │          │     │  Message │                        │
//! │  └──────────┘     └──────────┘     └──────────┘                        │
//! │                        │           (order.rs, cart kept)               │
//! │                   confirm                                               │
//! │                   qty / remove                                          │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear ───────────────────────►  (back to empty)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use pacs_core::validation::parse_quantity;
use pacs_core::{AddOutcome, Cart, CartTotals, Configurable, LineItem, PartNumber};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{CartState, CatalogState, SessionState};

/// Cart response including items and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<LineItem>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.items().to_vec(),
            totals: CartTotals::from(cart),
        }
    }
}

/// Result of a confirm.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmResponse {
    pub identity: PartNumber,
    pub outcome: AddOutcome,
    pub cart: CartResponse,
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::from(c))
}

/// Adds one unit of the open tab's selection to the cart.
///
/// ## Behavior
/// - Refused while the price list is loading, unconfigured or failed
/// - Same identity already in cart: quantity increases, price stays frozen
/// - Otherwise a new line with the current price and texts
pub fn confirm(
    catalog: &CatalogState,
    session: &SessionState,
    cart: &CartState,
) -> Result<ConfirmResponse, ApiError> {
    debug!("confirm command");
    let prices = catalog.require()?;
    let selection = session.with_session(|s| s.selection());
    let quote = selection.quote(&prices);
    let identity = quote.identity.clone();

    let (outcome, response) = cart.with_cart_mut(|c| {
        let outcome = c.add(quote);
        (outcome, CartResponse::from(&*c))
    });

    match outcome {
        AddOutcome::Inserted => info!(identity = %identity, "added to cart"),
        AddOutcome::Merged(quantity) => info!(identity = %identity, quantity, "merged into cart line"),
    }

    Ok(ConfirmResponse {
        identity,
        outcome,
        cart: response,
    })
}

/// Sets the quantity of a line.
///
/// ## Arguments
/// * `line_raw` - 1-based line number as shown in the cart listing
/// * `quantity_raw` - new quantity; malformed or zero input is ignored
pub fn update_quantity(cart: &CartState, line_raw: &str, quantity_raw: &str) -> Result<CartResponse, ApiError> {
    debug!(line = %line_raw, quantity = %quantity_raw, "update_quantity command");
    let line: usize = line_raw
        .trim()
        .parse()
        .ok()
        .filter(|n| *n >= 1)
        .ok_or_else(|| ApiError::not_found("Cart line", line_raw.trim()))?;
    let quantity = parse_quantity(quantity_raw);

    cart.with_cart_mut(|c| {
        if line > c.len() {
            return Err(ApiError::not_found("Cart line", &line.to_string()));
        }
        if !c.set_quantity(line - 1, quantity) {
            debug!(line, quantity, "quantity left unchanged");
        }
        Ok(CartResponse::from(&*c))
    })
}

/// Removes the line with this identity.
pub fn remove_from_cart(cart: &CartState, identity: &str) -> Result<CartResponse, ApiError> {
    debug!(identity = %identity, "remove_from_cart command");
    let identity = PartNumber::new(identity.trim());

    cart.with_cart_mut(|c| match c.remove(&identity) {
        0 => Err(ApiError::not_found("Cart item", identity.as_str())),
        _ => Ok(CartResponse::from(&*c)),
    })
}

/// Clears all items from the cart.
pub fn clear_cart(cart: &CartState) -> CartResponse {
    debug!("clear_cart command");
    cart.with_cart_mut(|c| {
        c.clear();
        CartResponse::from(&*c)
    })
}

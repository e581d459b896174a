//! # Order Message
//!
//! Builds the plain-text order sent to the sales line. Turning the text
//! into a deep link is left to the application.
//!
//! ```text
//! سلام وقت بخیر
//! <name> هستم از شرکت <company>
//! <identity> <options summary>
//!       X <quantity>
//!      ---------------------
//!  ...one block per line...
//! <total line>
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::validation::validate_customer_field;

/// Greeting used when none is configured.
pub const DEFAULT_GREETING: &str = "سلام وقت بخیر";

/// Who is ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub customer_name: String,
    pub customer_company: String,
}

impl OrderRequest {
    pub fn new(name: impl Into<String>, company: impl Into<String>) -> Self {
        OrderRequest {
            customer_name: name.into(),
            customer_company: company.into(),
        }
    }

    /// Returns a trimmed copy, or a `Required` error naming the first
    /// blank field.
    pub fn validate(&self) -> CoreResult<OrderRequest> {
        Ok(OrderRequest {
            customer_name: validate_customer_field("customer name", &self.customer_name)?,
            customer_company: validate_customer_field("customer company", &self.customer_company)?,
        })
    }
}

/// Composes the order text for every line in `cart`.
///
/// Fails with a validation error for blank customer fields and with
/// [`CoreError::EmptyCart`] when there is nothing to order. The cart is
/// only read.
pub fn compose_message(cart: &Cart, request: &OrderRequest, greeting: &str) -> CoreResult<String> {
    let request = request.validate()?;
    if cart.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    let products: String = cart
        .items()
        .iter()
        .map(|item| {
            format!(
                "{} {} \n      X {} \n     --------------------- \n ",
                item.identity, item.options_summary, item.quantity
            )
        })
        .collect();

    debug!(lines = cart.len(), "order message composed");

    Ok(format!(
        "{}\n{} هستم از شرکت {}\n{}\nجمع کل: {}",
        greeting,
        request.customer_name,
        request.customer_company,
        products,
        cart.total()
    ))
}

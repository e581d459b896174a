//! # Cart State
//!
//! Holds the session cart.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Shell Line               Command                 Cart Change           │
//! │  ──────────               ───────                 ───────────           │
//! │                                                                         │
//! │  confirm ────────────────► confirm() ──────────► add(quote)            │
//! │                                                                         │
//! │  qty 2 5 ────────────────► update_quantity() ──► set_quantity(1, 5)    │
//! │                                                                         │
//! │  remove <pn> ────────────► remove_from_cart() ─► remove(identity)      │
//! │                                                                         │
//! │  clear ──────────────────► clear_cart() ───────► clear()               │
//! │                                                                         │
//! │  cart ───────────────────► get_cart() ─────────► (read only)           │
//! │                                                                         │
//! │  NOTE: All operations take the Mutex briefly and release it.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use pacs_core::Cart;

/// Shared cart state.
///
/// `Arc<Mutex<Cart>>`: cart operations are short and nearly all write, so a
/// plain mutex is enough.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = cart_state.with_cart(|cart| CartTotals::from(cart));
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let outcome = cart_state.with_cart_mut(|cart| cart.add(quote));
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&mut cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pacs_core::{Category, Money, PartNumber, Quote};

    #[test]
    fn test_clones_share_one_cart() {
        let state = CartState::new();
        let other = state.clone();
        other.with_cart_mut(|cart| {
            cart.add(Quote {
                identity: PartNumber::new("PACs 5100"),
                unit_price: Money::from_rials(10),
                description: String::new(),
                options_summary: String::new(),
                category: Category::Plc,
            })
        });
        assert_eq!(state.with_cart(|cart| cart.len()), 1);
    }
}

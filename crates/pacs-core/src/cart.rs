//! # Cart
//!
//! Ordered line items, unique by part number.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Action                  Operation                Change                │
//! │  ──────                  ─────────                ──────                │
//! │                                                                         │
//! │  Confirm ───────────────► add(quote) ───────────► qty + 1 or push       │
//! │                                                                         │
//! │  Change Quantity ───────► set_quantity(i, q) ───► items[i].qty = q      │
//! │                           (q < 1 or bad index: nothing happens)         │
//! │                                                                         │
//! │  Click Remove ──────────► remove(identity) ─────► retain(!= identity)   │
//! │                                                                         │
//! │  Clear ─────────────────► clear() ──────────────► items.clear()         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::category::{Category, Quote};
use crate::money::Money;
use crate::part_number::PartNumber;

/// A product in the cart.
///
/// Price and texts are frozen when the line is first added. Merging a
/// second confirm of the same identity only bumps the quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub identity: PartNumber,
    /// Always at least 1.
    pub quantity: u32,
    pub unit_price: Money,
    pub description: String,
    pub options_summary: String,
    pub category: Category,
    #[ts(type = "string")]
    pub added_at: DateTime<Utc>,
}

impl LineItem {
    pub fn from_quote(quote: Quote) -> Self {
        LineItem {
            identity: quote.identity,
            quantity: 1,
            unit_price: quote.unit_price,
            description: quote.description,
            options_summary: quote.options_summary,
            category: quote.category,
            added_at: Utc::now(),
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }
}

/// What [`Cart::add`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AddOutcome {
    Inserted,
    /// Existing line bumped to the contained quantity.
    Merged(u32),
}

/// The cart.
///
/// ## Invariants
/// - Identities are unique
/// - Quantities are at least 1
/// - Insertion order is preserved
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds one unit of the quoted product, merging with an existing line
    /// of the same identity.
    pub fn add(&mut self, quote: Quote) -> AddOutcome {
        if let Some(item) = self.items.iter_mut().find(|i| i.identity == quote.identity) {
            item.quantity = item.quantity.saturating_add(1);
            debug!(identity = %item.identity, quantity = item.quantity, "cart line merged");
            return AddOutcome::Merged(item.quantity);
        }

        debug!(identity = %quote.identity, "cart line inserted");
        self.items.push(LineItem::from_quote(quote));
        AddOutcome::Inserted
    }

    /// Removes every line with this identity. Returns how many were removed.
    pub fn remove(&mut self, identity: &PartNumber) -> usize {
        let before = self.items.len();
        self.items.retain(|i| &i.identity != identity);
        before - self.items.len()
    }

    /// Sets the quantity of the line at `index`.
    ///
    /// Quantities below 1 and indexes past the end are ignored; returns
    /// whether anything changed.
    pub fn set_quantity(&mut self, index: usize, quantity: u32) -> bool {
        if quantity < 1 {
            return false;
        }
        match self.items.get_mut(index) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Σ unit price × quantity, saturating at the `Money` bounds.
    pub fn total(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }
}

/// Cart totals summary for responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: u32,
    pub total_quantity: u32,
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: u32::try_from(cart.len()).unwrap_or(u32::MAX),
            total_quantity: u32::try_from(cart.total_quantity()).unwrap_or(u32::MAX),
            total: cart.total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(identity: &str, rials: i64) -> Quote {
        Quote {
            identity: PartNumber::new(identity),
            unit_price: Money::from_rials(rials),
            description: format!("{identity} description"),
            options_summary: String::new(),
            category: Category::Hmi,
        }
    }

    /// Small LCG so randomized sequences are reproducible without a crate.
    struct Lcg(u64);

    impl Lcg {
        fn next(&mut self) -> u64 {
            self.0 = self
                .0
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            self.0 >> 33
        }

        fn below(&mut self, n: u64) -> u64 {
            self.next() % n
        }
    }

    #[test]
    fn test_add_same_identity_merges() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(quote("A", 1_000)), AddOutcome::Inserted);
        assert_eq!(cart.add(quote("A", 1_000)), AddOutcome::Merged(2));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.total().rials(), 2_000);
    }

    #[test]
    fn test_merge_keeps_first_price() {
        let mut cart = Cart::new();
        cart.add(quote("A", 1_000));
        cart.add(quote("A", 9_999));
        assert_eq!(cart.items()[0].unit_price.rials(), 1_000);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        cart.add(quote("B", 1));
        cart.add(quote("A", 1));
        cart.add(quote("B", 1));
        let ids: Vec<&str> = cart.items().iter().map(|i| i.identity.as_str()).collect();
        assert_eq!(ids, vec!["B", "A"]);
    }

    #[test]
    fn test_set_quantity_ignores_zero_and_bad_index() {
        let mut cart = Cart::new();
        cart.add(quote("A", 500));

        assert!(!cart.set_quantity(0, 0));
        assert_eq!(cart.items()[0].quantity, 1);

        assert!(!cart.set_quantity(5, 3));
        assert!(cart.set_quantity(0, 4));
        assert_eq!(cart.total().rials(), 2_000);
    }

    #[test]
    fn test_total_saturates_at_huge_quantities() {
        let mut cart = Cart::new();
        for id in ["A", "B", "C", "D", "E", "F"] {
            cart.add(quote(id, 390_000_000));
        }
        for index in 0..cart.len() {
            assert!(cart.set_quantity(index, u32::MAX));
        }

        assert_eq!(cart.total(), Money::from_rials(i64::MAX));
        assert_eq!(CartTotals::from(&cart).total_quantity, u32::MAX);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::new();
        cart.add(quote("A", 1));
        cart.add(quote("B", 1));

        assert_eq!(cart.remove(&PartNumber::new("A")), 1);
        assert_eq!(cart.remove(&PartNumber::new("A")), 0);
        assert_eq!(cart.items()[0].identity.as_str(), "B");

        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.total().is_zero());
    }

    #[test]
    fn test_totals_summary() {
        let mut cart = Cart::new();
        cart.add(quote("A", 100));
        cart.add(quote("A", 100));
        cart.add(quote("B", 50));
        let totals = CartTotals::from(&cart);
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.total_quantity, 3);
        assert_eq!(totals.total.rials(), 250);
    }

    #[test]
    fn test_total_after_random_sequences() {
        let identities = ["A", "B", "C", "D"];
        let prices = [1_000, 2_500, 70_000, 3];

        for seed in 0..50 {
            let mut rng = Lcg(seed);
            let mut cart = Cart::new();

            for _ in 0..200 {
                let pick = rng.below(4) as usize;
                match rng.below(3) {
                    0 => {
                        cart.add(quote(identities[pick], prices[pick]));
                    }
                    1 => {
                        cart.remove(&PartNumber::new(identities[pick]));
                    }
                    _ => {
                        let index = rng.below(5) as usize;
                        let qty = rng.below(6) as u32;
                        cart.set_quantity(index, qty);
                    }
                }

                let expected: i64 = cart
                    .items()
                    .iter()
                    .map(|i| i.unit_price.rials() * i64::from(i.quantity))
                    .sum();
                assert_eq!(cart.total().rials(), expected);
                assert!(cart.items().iter().all(|i| i.quantity >= 1));

                let mut seen: Vec<&str> = cart.items().iter().map(|i| i.identity.as_str()).collect();
                seen.sort_unstable();
                seen.dedup();
                assert_eq!(seen.len(), cart.len());
            }
        }
    }
}

//! # Money Module
//!
//! Provides the `Money` type for Rial amounts.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Price sheets arrive as spreadsheet numbers (f64 in JSON).              │
//! │  Summing a base unit and five extras in f64 can drift by a Rial.        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Rials                                            │
//! │    The loader rounds once at the edge; every sum after that is exact.   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pacs_core::money::Money;
//!
//! let base = Money::from_rials(1_000_000);
//! let sd = Money::from_rials(50_000);
//! assert_eq!((base + sd).to_string(), "1,050,000");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole Rials.
///
/// ## Design Decisions
/// - **i64 (signed)**: sums stay exact well beyond any realistic quote
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **No fractional unit**: the catalog currency has none in practice
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole Rials.
    #[inline]
    pub const fn from_rials(rials: i64) -> Self {
        Money(rials)
    }

    /// Creates a Money value from a spreadsheet number.
    ///
    /// This is the only float entry point and exists for the sheet loader.
    /// Fractions round half away from zero; non-finite values become zero.
    ///
    /// ## Example
    /// ```rust
    /// use pacs_core::money::Money;
    ///
    /// assert_eq!(Money::from_sheet_number(1_250_000.0).rials(), 1_250_000);
    /// assert_eq!(Money::from_sheet_number(99.5).rials(), 100);
    /// assert_eq!(Money::from_sheet_number(f64::NAN).rials(), 0);
    /// ```
    pub fn from_sheet_number(value: f64) -> Self {
        if value.is_finite() {
            Money(value.round() as i64)
        } else {
            Money(0)
        }
    }

    /// Returns the value in Rials.
    #[inline]
    pub const fn rials(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display groups thousands with commas, the way prices are copied out of
/// the configurator ("1,050,000"). The currency label is added by the app.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        if self.0 < 0 {
            write!(f, "-{}", grouped)
        } else {
            write!(f, "{}", grouped)
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

/// Multiplication by a count (taps, channels, quantity).
///
/// Arithmetic saturates at the `i64` bounds instead of wrapping or panicking.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        Money(self.0.saturating_mul(i64::from(qty)))
    }
}

impl Mul<u8> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u8) -> Self {
        Money(self.0.saturating_mul(i64::from(qty)))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

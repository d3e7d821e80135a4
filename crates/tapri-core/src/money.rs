//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Rent of 1000.00 prorated over 3 remaining days in floats:             │
//! │    333.333… × 3 = 999.9999999999999  ❌ cost drifts                     │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units + explicit remainder                 │
//! │    100000 / 3 → [33334, 33333, 33333]  (sum = 100000 exactly)          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tapri_core::money::Money;
//!
//! let price = Money::from_cents(4050); // 40.50
//! let doubled = price * 2;             // 81.00
//! let total = price + Money::from_cents(500);
//! assert_eq!(total.cents(), 4550);
//! assert_eq!(doubled.to_string(), "81.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (paise, cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: net profit is routinely negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serialized as a bare integer**: the dashboard formats it
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  BilledLineItem.price / .profit ──► total_sales / gross_profit         │
/// │                                                                         │
/// │  ExpenseRecord.amount ───────────┐                                      │
/// │  StockPurchaseEntry.total_cost ──┼──► total_expenses ──► net_profit    │
/// │    (monthly: split_evenly) ──────┘                                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use tapri_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -5.50, not -4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    ///
    /// ## Example
    /// ```rust
    /// use tapri_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).major(), 10);
    /// assert_eq!(Money::from_cents(-550).major(), -5);
    /// ```
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Splits the amount into `parts` shares that add back up exactly.
    ///
    /// ## Remainder Handling
    /// ```text
    /// 1000.00 over 3 days
    ///      │
    ///      ▼
    /// base = 33333, remainder = 1
    ///      │
    ///      ▼
    /// [33334, 33333, 33333]   ← earliest shares absorb the remainder
    /// ```
    ///
    /// Negative amounts split the same way with the sign carried through.
    /// `parts == 0` yields no shares.
    ///
    /// ## Example
    /// ```rust
    /// use tapri_core::money::Money;
    ///
    /// let shares = Money::from_cents(310_000).split_evenly(31);
    /// assert_eq!(shares.len(), 31);
    /// assert!(shares.iter().all(|s| s.cents() == 10_000));
    ///
    /// let shares = Money::from_cents(100).split_evenly(3);
    /// assert_eq!(shares, vec![Money::from_cents(34), Money::from_cents(33), Money::from_cents(33)]);
    /// ```
    pub fn split_evenly(&self, parts: u32) -> Vec<Money> {
        if parts == 0 {
            return Vec::new();
        }

        let parts_i = i64::from(parts);
        let base = self.0 / parts_i;
        // Same sign as self.0, magnitude < parts
        let remainder = self.0 % parts_i;
        let step = remainder.signum();
        let extra = remainder.unsigned_abs();

        (0..u64::from(parts))
            .map(|i| {
                if i < extra {
                    Money(base + step)
                } else {
                    Money(base)
                }
            })
            .collect()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain `-12.50` rendering.
///
/// ## Note
/// Currency symbols and thousands grouping belong to the presentation layer.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
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
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

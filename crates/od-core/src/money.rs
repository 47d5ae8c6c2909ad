//! # Money Module
//!
//! Provides the `Money` type for handling rupee amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing a cart with parseFloat:                                        │
//! │    657.90 + 87.00 + 217.00 = 961.9000000000001  ❌ WRONG!              │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paisa (1 rupee = 100 paisa)                      │
//! │    65790 + 8700 + 21700 = 96190 paisa = Rs. 961.90                      │
//! │    Rounding happens once, when tax is computed                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use od_core::money::Money;
//!
//! // Menu prices arrive as display strings
//! let price = Money::parse("1,629.00").unwrap();
//! assert_eq!(price.paisa(), 162_900);
//!
//! // Arithmetic operations
//! let doubled = price * 2;
//! assert_eq!(doubled.to_string(), "Rs. 3258.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::TaxRate;

/// Paisa per rupee.
const MINOR_PER_MAJOR: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A rupee amount in paisa (the smallest currency unit).
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  CatalogItem.base_price ──┐                                             │
/// │                           ├──► unit price ──► × quantity = entry price │
/// │  add-on price table ──────┘                                             │
/// │                                                                         │
/// │  Σ entry prices = subtotal ──► tax (16%) ──► grand total               │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paisa.
    #[inline]
    pub const fn from_paisa(paisa: i64) -> Self {
        Money(paisa)
    }

    /// Creates a Money value from whole rupees and paisa.
    ///
    /// ```rust
    /// use od_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees(657, 90).paisa(), 65_790);
    /// ```
    #[inline]
    pub const fn from_rupees(rupees: i64, paisa: i64) -> Self {
        Money(rupees * MINOR_PER_MAJOR + paisa)
    }

    /// Parses a menu price string.
    ///
    /// ## Accepted Forms
    /// ```text
    /// "861.00"     → 86100
    /// "1,629.00"   → 162900   (thousands separators are stripped)
    /// ",4440.00"   → 444000   (stray separators too)
    /// "500.0"      → 50000
    /// "2000"       → 200000
    /// ```
    ///
    /// Negative amounts, more than two fractional digits, and anything
    /// that is not a digit are rejected.
    pub fn parse(input: &str) -> Result<Money, ValidationError> {
        let cleaned: String = input.trim().chars().filter(|c| *c != ',').collect();

        if cleaned.is_empty() {
            return Err(ValidationError::required("price"));
        }
        if cleaned.starts_with('-') {
            return Err(ValidationError::invalid_format("price", "must not be negative"));
        }

        let (whole, fraction) = match cleaned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (cleaned.as_str(), ""),
        };

        let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
            return Err(ValidationError::invalid_format(
                "price",
                "must contain only digits, separators and a decimal point",
            ));
        }
        if fraction.len() > 2 {
            return Err(ValidationError::invalid_format(
                "price",
                "at most two decimal places",
            ));
        }

        let overflow = || ValidationError::invalid_format("price", "amount too large");
        let rupees: i64 = whole.parse().map_err(|_| overflow())?;
        let paisa: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| overflow())? * 10,
            _ => fraction.parse().map_err(|_| overflow())?,
        };

        rupees
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|r| r.checked_add(paisa))
            .map(Money)
            .ok_or_else(overflow)
    }

    /// Returns the value in paisa.
    #[inline]
    pub const fn paisa(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the paisa portion (always 0-99).
    #[inline]
    pub const fn paisa_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
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

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Amount as a plain two-decimal string, e.g. `"998.76"`.
    ///
    /// This is the form the presentation layer prefixes with its
    /// currency symbol.
    pub fn amount_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.rupees().abs(), self.paisa_part())
    }

    /// Calculates tax, rounding half up to the nearest paisa.
    ///
    /// ## Example
    /// ```rust
    /// use od_core::money::Money;
    /// use od_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_rupees(861, 0);
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(1600)); // 16%
    /// assert_eq!(tax.paisa(), 13_776); // Rs. 137.76
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 keeps large carts from overflowing; +5000 rounds half up
        let tax = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money(tax as i64)
    }

    /// Multiplies money by a quantity, saturating instead of overflowing.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the rupee amount the way the menu prints it.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rs. {}", self.amount_string())
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

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paisa() {
        let money = Money::from_paisa(65_790);
        assert_eq!(money.paisa(), 65_790);
        assert_eq!(money.rupees(), 657);
        assert_eq!(money.paisa_part(), 90);
    }

    #[test]
    fn test_parse_plain_prices() {
        assert_eq!(Money::parse("861.00").unwrap().paisa(), 86_100);
        assert_eq!(Money::parse("332.35").unwrap().paisa(), 33_235);
        assert_eq!(Money::parse("2000").unwrap().paisa(), 200_000);
        assert_eq!(Money::parse("500.0").unwrap().paisa(), 50_000);
        assert_eq!(Money::parse("  87.00 ").unwrap().paisa(), 8_700);
    }

    #[test]
    fn test_parse_strips_thousands_separators() {
        assert_eq!(Money::parse("1,629.00").unwrap().paisa(), 162_900);
        assert_eq!(Money::parse("2,483.70").unwrap().paisa(), 248_370);
        assert_eq!(Money::parse(",4440.00").unwrap().paisa(), 444_000);
        assert_eq!(Money::parse("1,000,000.50").unwrap().paisa(), 100_000_050);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("-5.00").is_err());
        assert!(Money::parse("12.345").is_err());
        assert!(Money::parse("Rs. 12").is_err());
        assert!(Money::parse(".50").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("99999999999999999999").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_paisa(99_876).to_string(), "Rs. 998.76");
        assert_eq!(Money::from_paisa(500).to_string(), "Rs. 5.00");
        assert_eq!(Money::zero().to_string(), "Rs. 0.00");
        assert_eq!(Money::from_paisa(-550).amount_string(), "-5.50");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_rupees(10, 0);
        let b = Money::from_rupees(5, 0);

        assert_eq!((a + b).paisa(), 1500);
        assert_eq!((a - b).paisa(), 500);
        assert_eq!((a * 3).paisa(), 3000);

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total.paisa(), 2000);
    }

    #[test]
    fn test_tax_at_sixteen_percent() {
        let rate = TaxRate::from_bps(1600);
        assert_eq!(Money::from_paisa(86_100).calculate_tax(rate).paisa(), 13_776);
        // 0.16 × 333 = 53.28 → 53
        assert_eq!(Money::from_paisa(333).calculate_tax(rate).paisa(), 53);
        // 0.16 × 3 = 0.48 → 0
        assert_eq!(Money::from_paisa(3).calculate_tax(rate).paisa(), 0);
        // 0.16 × 4 = 0.64 → 1
        assert_eq!(Money::from_paisa(4).calculate_tax(rate).paisa(), 1);
    }

    #[test]
    fn test_tax_rounds_half_up() {
        // 10.00 × 8.25% = 0.825 → 0.83
        let tax = Money::from_paisa(1000).calculate_tax(TaxRate::from_bps(825));
        assert_eq!(tax.paisa(), 83);
    }

    #[test]
    fn test_multiply_quantity_saturates() {
        let huge = Money::from_paisa(i64::MAX / 2);
        assert_eq!(huge.multiply_quantity(4).paisa(), i64::MAX);
    }

    /// Summing many line items never drifts the way float sums do.
    #[test]
    fn test_no_accumulated_rounding_error() {
        let dime = Money::parse("0.10").unwrap();
        let total: Money = std::iter::repeat(dime).take(1000).sum();
        assert_eq!(total.paisa(), 10_000);
    }
}

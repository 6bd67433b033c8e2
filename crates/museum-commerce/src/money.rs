//! Money type for representing monetary values.
//!
//! Amounts are full-precision decimals. Nothing is rounded while totals
//! accumulate; rounding to cents happens only when an amount is displayed.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Neg, Sub};

use crate::error::CommerceError;

/// Number of decimal places shown for an amount.
pub const DISPLAY_PLACES: u32 = 2;

/// Currency symbol used for display.
pub const SYMBOL: &str = "$";

/// A monetary value in the shop's currency.
///
/// Serializes as a plain JSON number so stored carts stay readable by
/// the page scripts that share the slot.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money {
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
}

impl Money {
    /// Create a Money value from a decimal amount.
    pub const fn new(amount: Decimal) -> Self {
        Self { amount }
    }

    /// Create a Money value from cents.
    ///
    /// ```
    /// use museum_commerce::money::Money;
    /// assert_eq!(Money::from_cents(4999).display(), "$49.99");
    /// ```
    pub fn from_cents(cents: i64) -> Self {
        Self::new(Decimal::new(cents, DISPLAY_PLACES))
    }

    /// Zero.
    pub const fn zero() -> Self {
        Self::new(Decimal::ZERO)
    }

    /// The full-precision amount.
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Whether the amount has no fraction of a cent.
    pub fn is_whole_cents(&self) -> bool {
        self.amount.normalize().scale() <= DISPLAY_PLACES
    }

    /// Get the absolute value.
    pub fn abs(&self) -> Self {
        Self::new(self.amount.abs())
    }

    /// Multiply by a quantity.
    pub fn try_multiply(&self, quantity: i64) -> Option<Money> {
        self.amount
            .checked_mul(Decimal::from(quantity))
            .map(Money::new)
    }

    /// Multiply by a fractional rate (e.g. `0.102` for 10.2%).
    pub fn try_times_rate(&self, rate: Decimal) -> Option<Money> {
        self.amount.checked_mul(rate).map(Money::new)
    }

    /// Try to add another Money value.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        self.amount.checked_add(other.amount).map(Money::new)
    }

    /// Sum an iterator of Money values, returning None on overflow.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>) -> Option<Money> {
        iter.try_fold(Money::zero(), |acc, m| acc.try_add(m))
    }

    /// The amount rounded to cents, half away from zero.
    pub fn rounded(&self) -> Decimal {
        let mut rounded = self
            .amount
            .round_dp_with_strategy(DISPLAY_PLACES, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(DISPLAY_PLACES);
        rounded
    }

    /// Format for display.
    ///
    /// Non-negative amounts read `$X.XX`; negative amounts drop the sign and
    /// are wrapped in parentheses, `($X.XX)`.
    pub fn display(&self) -> String {
        let rounded = self.rounded();
        if rounded.is_sign_negative() && !rounded.is_zero() {
            format!("({}{})", SYMBOL, rounded.abs())
        } else {
            format!("{}{}", SYMBOL, rounded.abs())
        }
    }

    /// Parse a displayed price such as `"$1,250.00"`, `"12.5"` or `"($3.00)"`.
    pub fn parse(text: &str) -> Result<Money, CommerceError> {
        let trimmed = text.trim();
        let (negative, body) = match trimmed
            .strip_prefix('(')
            .and_then(|t| t.strip_suffix(')'))
        {
            Some(inner) => (true, inner),
            None => (false, trimmed),
        };

        let cleaned: String = body
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',' && *c != '$')
            .collect();
        if cleaned.is_empty() {
            return Err(CommerceError::InvalidPrice(text.to_string()));
        }

        let amount: Decimal = cleaned
            .parse()
            .map_err(|_| CommerceError::InvalidPrice(text.to_string()))?;

        Ok(Money::new(if negative { -amount } else { amount }))
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money::new(amount)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::new(self.amount + other.amount)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money::new(self.amount - other.amount)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money::new(-self.amount)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_cents() {
        let m = Money::from_cents(4999);
        assert_eq!(m.amount(), Decimal::new(4999, 2));
    }

    #[test]
    fn test_money_try_sum() {
        let parts = [Money::from_cents(11_500), Money::from_cents(-1000), Money::zero()];
        assert_eq!(Money::try_sum(parts.iter()), Some(Money::from_cents(10_500)));
        assert_eq!(Money::try_sum([].iter()), Some(Money::zero()));

        let huge = [Money::new(Decimal::MAX), Money::new(Decimal::MAX)];
        assert_eq!(Money::try_sum(huge.iter()), None);
    }

    #[test]
    fn test_money_whole_cents() {
        assert!(Money::from_cents(4999).is_whole_cents());
        assert!(Money::new(Decimal::new(49_990, 3)).is_whole_cents());
        assert!(Money::new(Decimal::new(50, 0)).is_whole_cents());
        assert!(!Money::new(Decimal::new(49_995, 3)).is_whole_cents());
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_cents(4999).display(), "$49.99");
        assert_eq!(Money::from_cents(25_000).display(), "$250.00");
        assert_eq!(Money::zero().display(), "$0.00");
    }

    #[test]
    fn test_money_display_negative_uses_parentheses() {
        assert_eq!(Money::from_cents(-1000).display(), "($10.00)");
        assert_eq!(Money::from_cents(-3750).display(), "($37.50)");
    }

    #[test]
    fn test_money_display_rounds_half_away_from_zero() {
        // 115.00 * 0.102 = 11.73 exactly; 11.725 rounds up.
        assert_eq!(Money::new(Decimal::new(11725, 3)).display(), "$11.73");
        assert_eq!(Money::new(Decimal::new(-11725, 3)).display(), "($11.73)");
        assert_eq!(Money::new(Decimal::new(11724, 3)).display(), "$11.72");
    }

    #[test]
    fn test_money_display_tiny_negative_is_not_parenthesized() {
        assert_eq!(Money::new(Decimal::new(-1, 3)).display(), "$0.00");
    }

    #[test]
    fn test_money_no_rounding_during_accumulation() {
        let third = Money::new(Decimal::new(3333, 3)); // 3.333
        let total: Money = [third, third, third].into_iter().sum();
        assert_eq!(total.amount(), Decimal::new(9999, 3));
        assert_eq!(total.display(), "$10.00");
    }

    #[test]
    fn test_money_multiply() {
        let m = Money::from_cents(1000);
        assert_eq!(m.try_multiply(3), Some(Money::from_cents(3000)));
    }

    #[test]
    fn test_money_times_rate() {
        let m = Money::from_cents(11_500);
        let tax = m.try_times_rate(Decimal::new(102, 3)).unwrap();
        assert_eq!(tax.amount(), Decimal::new(1173, 2));
    }

    #[test]
    fn test_money_multiply_overflow() {
        let m = Money::new(Decimal::MAX);
        assert_eq!(m.try_multiply(2), None);
    }

    #[test]
    fn test_money_parse() {
        assert_eq!(Money::parse("$25.00").unwrap(), Money::from_cents(2500));
        assert_eq!(Money::parse(" $1,250.50 ").unwrap(), Money::from_cents(125_050));
        assert_eq!(Money::parse("12.5").unwrap(), Money::from_cents(1250));
        assert_eq!(Money::parse("($3.00)").unwrap(), Money::from_cents(-300));
    }

    #[test]
    fn test_money_parse_rejects_garbage() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("$").is_err());
        assert!(Money::parse("free").is_err());
    }

    #[test]
    fn test_money_serializes_as_number() {
        let json = serde_json::to_string(&Money::from_cents(2500)).unwrap();
        assert_eq!(json.parse::<f64>().unwrap(), 25.0);

        let back: Money = serde_json::from_str("19.99").unwrap();
        assert_eq!(back, Money::from_cents(1999));
    }
}

//! Cart pricing calculations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::{DiscountKind, DiscountOutcome, DiscountTier};
use crate::error::CommerceError;
use crate::money::Money;

/// Static pricing parameters for the shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingRules {
    /// Volume discount table, ascending by `min`.
    pub tiers: Vec<DiscountTier>,
    /// Member discount rate.
    pub member_rate: Decimal,
    /// Sales tax rate applied to the subtotal.
    pub tax_rate: Decimal,
    /// Shipping charged below the free shipping threshold.
    pub flat_shipping: Decimal,
    /// Item total at which shipping is waived (inclusive).
    pub free_shipping_threshold: Decimal,
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            tiers: DiscountTier::standard_table(),
            member_rate: Decimal::new(10, 2),
            tax_rate: Decimal::new(102, 3),
            flat_shipping: Decimal::new(2500, 2),
            free_shipping_threshold: Decimal::new(20_000, 2),
        }
    }
}

impl PricingRules {
    /// Check the tier table and rates.
    ///
    /// The table must start at zero, ascend without overlap, leave no gap
    /// at cent granularity, and end with an unbounded tier.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let cent = Decimal::new(1, 2);

        let first = self
            .tiers
            .first()
            .ok_or_else(|| CommerceError::InvalidTierTable("table is empty".to_string()))?;
        if !first.min.is_zero() {
            return Err(CommerceError::InvalidTierTable(format!(
                "first tier starts at {} instead of 0",
                first.min
            )));
        }

        for (i, tier) in self.tiers.iter().enumerate() {
            check_rate("tier rate", tier.rate)?;
            match tier.max {
                Some(max) if max < tier.min => {
                    return Err(CommerceError::InvalidTierTable(format!(
                        "tier {i} has max {max} below min {}",
                        tier.min
                    )));
                }
                None if i + 1 != self.tiers.len() => {
                    return Err(CommerceError::InvalidTierTable(format!(
                        "tier {i} is unbounded but is not the last tier"
                    )));
                }
                _ => {}
            }
        }

        for (i, pair) in self.tiers.windows(2).enumerate() {
            let (prev, next) = (&pair[0], &pair[1]);
            // Unbounded tiers before the last were rejected above.
            let Some(prev_max) = prev.max else { continue };
            if next.min <= prev_max {
                return Err(CommerceError::InvalidTierTable(format!(
                    "tier {} overlaps tier {i}",
                    i + 1
                )));
            }
            if next.min - prev_max > cent {
                return Err(CommerceError::InvalidTierTable(format!(
                    "gap between {prev_max} and {}",
                    next.min
                )));
            }
        }

        if let Some(last) = self.tiers.last() {
            if last.max.is_some() {
                return Err(CommerceError::InvalidTierTable(
                    "last tier must be unbounded".to_string(),
                ));
            }
        }

        check_rate("member_rate", self.member_rate)?;
        if self.tax_rate.is_sign_negative() {
            return Err(CommerceError::InvalidRate {
                name: "tax_rate",
                value: self.tax_rate.to_string(),
            });
        }
        if self.flat_shipping.is_sign_negative() {
            return Err(CommerceError::InvalidRate {
                name: "flat_shipping",
                value: self.flat_shipping.to_string(),
            });
        }
        if self.free_shipping_threshold.is_sign_negative() {
            return Err(CommerceError::InvalidRate {
                name: "free_shipping_threshold",
                value: self.free_shipping_threshold.to_string(),
            });
        }
        Ok(())
    }

    /// Tax rate as a percentage label, e.g. `"10.2%"`.
    pub fn tax_label(&self) -> String {
        format!("{}%", (self.tax_rate * Decimal::ONE_HUNDRED).normalize())
    }

    /// Shipping is waived at or above the threshold.
    pub fn has_free_shipping(&self, item_total: Money) -> bool {
        item_total.amount() >= self.free_shipping_threshold
    }
}

fn check_rate(name: &'static str, rate: Decimal) -> Result<(), CommerceError> {
    if rate.is_sign_negative() || rate >= Decimal::ONE {
        return Err(CommerceError::InvalidRate {
            name,
            value: rate.to_string(),
        });
    }
    Ok(())
}

/// Complete pricing breakdown for a cart.
///
/// Computed fresh on every render and never persisted. All amounts are full
/// precision; round only when displaying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PricingSnapshot {
    /// `Σ unit_price × qty`.
    pub item_total: Money,
    /// Volume discount (`≤ 0`).
    pub volume_discount: Money,
    /// Member discount (`≤ 0`).
    pub member_discount: Money,
    /// Shipping (`≥ 0`).
    pub shipping: Money,
    /// `item_total + discounts + shipping`.
    pub sub_total: Money,
    /// `sub_total × tax_rate`.
    pub tax_amount: Money,
    /// `sub_total + tax_amount`.
    pub invoice_total: Money,
    /// Shipping was waived.
    pub has_free_shipping: bool,
    /// Which discount applies.
    pub discount: DiscountKind,
}

impl PricingSnapshot {
    /// Price an item total under a resolved discount.
    pub fn compute(
        item_total: Money,
        outcome: &DiscountOutcome,
        rules: &PricingRules,
    ) -> Result<Self, CommerceError> {
        let has_free_shipping = rules.has_free_shipping(item_total);
        let shipping = if has_free_shipping {
            Money::zero()
        } else {
            Money::new(rules.flat_shipping)
        };

        let sub_total = Money::try_sum(
            [
                item_total,
                outcome.volume_discount,
                outcome.member_discount,
                shipping,
            ]
            .iter(),
        )
        .ok_or(CommerceError::Overflow)?;
        let tax_amount = sub_total
            .try_times_rate(rules.tax_rate)
            .ok_or(CommerceError::Overflow)?;
        let invoice_total = sub_total
            .try_add(&tax_amount)
            .ok_or(CommerceError::Overflow)?;

        Ok(Self {
            item_total,
            volume_discount: outcome.volume_discount,
            member_discount: outcome.member_discount,
            shipping,
            sub_total,
            tax_amount,
            invoice_total,
            has_free_shipping,
            discount: outcome.kind,
        })
    }

    /// Total savings from discounts (positive).
    pub fn savings(&self) -> Money {
        -(self.volume_discount + self.member_discount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{resolve_discount, NoPrompt};

    fn cents(c: i64) -> Money {
        Money::from_cents(c)
    }

    fn price(total: i64, is_member: bool) -> PricingSnapshot {
        let rules = PricingRules::default();
        let outcome = resolve_discount(&rules, cents(total), is_member, &mut NoPrompt).unwrap();
        PricingSnapshot::compute(cents(total), &outcome, &rules).unwrap()
    }

    #[test]
    fn test_default_rules_are_valid() {
        PricingRules::default().validate().unwrap();
    }

    #[test]
    fn test_non_member_hundred_dollars() {
        let p = price(10_000, false);
        assert_eq!(p.volume_discount, cents(-1000));
        assert_eq!(p.member_discount, Money::zero());
        assert_eq!(p.shipping, cents(2500));
        assert_eq!(p.sub_total, cents(11_500));
        assert_eq!(p.tax_amount.display(), "$11.73");
        assert_eq!(p.invoice_total.display(), "$126.73");
        assert!(!p.has_free_shipping);
        assert_eq!(p.savings(), cents(1000));
    }

    #[test]
    fn test_free_shipping_threshold() {
        assert!(!price(19_999, false).has_free_shipping);
        assert_eq!(price(19_999, false).shipping, cents(2500));

        let p = price(20_000, false);
        assert!(p.has_free_shipping);
        assert!(p.shipping.is_zero());
        assert_eq!(p.volume_discount, cents(-3000));
    }

    #[test]
    fn test_empty_total_still_charges_shipping() {
        let p = price(0, false);
        assert_eq!(p.sub_total, cents(2500));
        assert_eq!(p.discount, DiscountKind::None);
    }

    #[test]
    fn test_full_precision_until_display() {
        // 66.66 * 5% = 3.333, carried unrounded into the subtotal.
        let rules = PricingRules::default();
        let total = cents(6666);
        let outcome = resolve_discount(&rules, total, false, &mut NoPrompt).unwrap();
        let p = PricingSnapshot::compute(total, &outcome, &rules).unwrap();
        assert_eq!(p.volume_discount.amount(), Decimal::new(-3333, 3));
        assert_eq!(p.sub_total.amount(), Decimal::new(88_327, 3));
        assert_eq!(p.sub_total.display(), "$88.33");
    }

    #[test]
    fn test_tax_label() {
        assert_eq!(PricingRules::default().tax_label(), "10.2%");
    }

    #[test]
    fn test_validate_rejects_overlap() {
        let mut rules = PricingRules::default();
        rules.tiers[1].min = Decimal::new(4999, 2);
        assert!(matches!(
            rules.validate(),
            Err(CommerceError::InvalidTierTable(_))
        ));
    }

    #[test]
    fn test_validate_rejects_negative_amounts() {
        let mut rules = PricingRules::default();
        rules.free_shipping_threshold = Decimal::new(-1, 0);
        assert!(matches!(
            rules.validate(),
            Err(CommerceError::InvalidRate {
                name: "free_shipping_threshold",
                ..
            })
        ));

        let mut rules = PricingRules::default();
        rules.tax_rate = Decimal::new(-5, 1);
        assert!(matches!(
            rules.validate(),
            Err(CommerceError::InvalidRate { name: "tax_rate", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_gap() {
        let mut rules = PricingRules::default();
        rules.tiers[1].min = Decimal::new(6000, 2);
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bounded_last_tier() {
        let mut rules = PricingRules::default();
        rules.tiers[3].max = Some(Decimal::new(100_000, 2));
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_rates() {
        let mut rules = PricingRules::default();
        rules.member_rate = Decimal::ONE;
        assert!(matches!(
            rules.validate(),
            Err(CommerceError::InvalidRate { name: "member_rate", .. })
        ));

        let mut rules = PricingRules::default();
        rules.tiers[0].min = Decimal::ONE;
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_rules_from_partial_toml_json() {
        let rules: PricingRules = serde_json::from_str(r#"{"member_rate": "0.2"}"#).unwrap();
        assert_eq!(rules.member_rate, Decimal::new(2, 1));
        assert_eq!(rules.tiers, DiscountTier::standard_table());
    }
}

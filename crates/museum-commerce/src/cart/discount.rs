//! Volume and member discount policy.
//!
//! The two discounts never stack. A non-member gets the volume discount for
//! their tier. A member whose total sits in a zero-rate tier gets the member
//! discount. When both could apply the shopper is asked to pick one through
//! a [`DiscountDecider`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::PricingRules;
use crate::error::CommerceError;
use crate::money::Money;

/// One row of the volume discount table, a closed interval `[min, max]`.
///
/// `max = None` means the tier is unbounded above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountTier {
    /// Lowest item total in the tier (inclusive).
    pub min: Decimal,
    /// Highest item total in the tier (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Decimal>,
    /// Discount rate as a fraction (`0.05` for 5%).
    pub rate: Decimal,
}

impl DiscountTier {
    pub const fn new(min: Decimal, max: Option<Decimal>, rate: Decimal) -> Self {
        Self { min, max, rate }
    }

    /// Check if an item total falls inside this tier.
    pub fn contains(&self, total: Decimal) -> bool {
        total >= self.min && self.max.map_or(true, |max| total <= max)
    }

    /// The standard museum shop table.
    ///
    /// | item total      | rate |
    /// |-----------------|------|
    /// | 0.00 – 49.99    | 0%   |
    /// | 50.00 – 99.99   | 5%   |
    /// | 100.00 – 199.99 | 10%  |
    /// | 200.00 and up   | 15%  |
    pub fn standard_table() -> Vec<DiscountTier> {
        vec![
            DiscountTier::new(Decimal::ZERO, Some(Decimal::new(4999, 2)), Decimal::ZERO),
            DiscountTier::new(
                Decimal::new(5000, 2),
                Some(Decimal::new(9999, 2)),
                Decimal::new(5, 2),
            ),
            DiscountTier::new(
                Decimal::new(10_000, 2),
                Some(Decimal::new(19_999, 2)),
                Decimal::new(10, 2),
            ),
            DiscountTier::new(Decimal::new(20_000, 2), None, Decimal::new(15, 2)),
        ]
    }
}

/// Rate of the single tier containing `item_total`.
///
/// Falls back to `0` when no tier matches, which a valid table never
/// allows for cent-precision totals.
pub fn volume_rate(tiers: &[DiscountTier], item_total: Money) -> Decimal {
    let total = item_total.amount();
    match tiers.iter().find(|tier| tier.contains(total)) {
        Some(tier) => tier.rate,
        None => {
            tracing::warn!(%total, "item total outside every volume tier");
            Decimal::ZERO
        }
    }
}

/// Which discount was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    /// Neither discount applies.
    #[default]
    None,
    /// Volume discount from the tier table.
    Volume,
    /// Flat member discount.
    Member,
}

impl DiscountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountKind::None => "none",
            DiscountKind::Volume => "volume",
            DiscountKind::Member => "member",
        }
    }
}

/// The shopper's answer when both discounts could apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountChoice {
    Member,
    Volume,
}

impl DiscountChoice {
    /// Interpret a raw prompt response.
    ///
    /// Only an explicit `"volume"` (trimmed, any case) selects the volume
    /// discount. Anything else, including no response at all, is Member.
    pub fn from_response(response: Option<&str>) -> Self {
        match response.map(|r| r.trim().to_lowercase()) {
            Some(r) if r == "volume" => DiscountChoice::Volume,
            _ => DiscountChoice::Member,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountChoice::Member => "member",
            DiscountChoice::Volume => "volume",
        }
    }
}

/// What the shopper is asked when both discounts could apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountPrompt {
    /// Pre-discount item total.
    pub item_total: Money,
    /// Volume rate the total qualifies for.
    pub volume_rate: Decimal,
    /// Member rate.
    pub member_rate: Decimal,
}

impl DiscountPrompt {
    /// Volume discount amount if chosen (positive).
    pub fn volume_savings(&self) -> Money {
        self.item_total
            .try_times_rate(self.volume_rate)
            .unwrap_or_default()
    }

    /// Member discount amount if chosen (positive).
    pub fn member_savings(&self) -> Money {
        self.item_total
            .try_times_rate(self.member_rate)
            .unwrap_or_default()
    }

    /// Prompt text shown to the shopper.
    pub fn message(&self) -> String {
        format!(
            "Discounts cannot be combined. Type \"member\" for the member discount ({}) or \"volume\" for the volume discount ({}).",
            self.member_savings(),
            self.volume_savings()
        )
    }
}

/// Synchronous decision callback for the member-vs-volume choice.
///
/// Returns the raw response, or `None` when the shopper dismissed the
/// prompt. The response is interpreted by [`DiscountChoice::from_response`].
pub trait DiscountDecider {
    fn decide(&mut self, prompt: &DiscountPrompt) -> Option<String>;
}

impl<F> DiscountDecider for F
where
    F: FnMut(&DiscountPrompt) -> Option<String>,
{
    fn decide(&mut self, prompt: &DiscountPrompt) -> Option<String> {
        self(prompt)
    }
}

/// Decider for contexts that cannot ask anyone. Always dismisses, which
/// resolves to the member discount.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrompt;

impl DiscountDecider for NoPrompt {
    fn decide(&mut self, _prompt: &DiscountPrompt) -> Option<String> {
        None
    }
}

/// Result of discount resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiscountOutcome {
    /// Volume discount (`≤ 0`).
    pub volume_discount: Money,
    /// Member discount (`≤ 0`).
    pub member_discount: Money,
    /// Which discount applies.
    pub kind: DiscountKind,
    /// Rate of the applied discount.
    pub rate: Decimal,
    /// The shopper chose volume over member; the member toggle must be
    /// switched off.
    pub reset_member_toggle: bool,
}

impl DiscountOutcome {
    fn none() -> Self {
        Self {
            volume_discount: Money::zero(),
            member_discount: Money::zero(),
            kind: DiscountKind::None,
            rate: Decimal::ZERO,
            reset_member_toggle: false,
        }
    }

    fn volume(
        item_total: Money,
        rate: Decimal,
        reset_member_toggle: bool,
    ) -> Result<Self, CommerceError> {
        Ok(Self {
            volume_discount: -discount_amount(item_total, rate)?,
            kind: DiscountKind::Volume,
            rate,
            reset_member_toggle,
            ..Self::none()
        })
    }

    fn member(item_total: Money, rate: Decimal) -> Result<Self, CommerceError> {
        Ok(Self {
            member_discount: -discount_amount(item_total, rate)?,
            kind: DiscountKind::Member,
            rate,
            ..Self::none()
        })
    }
}

fn discount_amount(item_total: Money, rate: Decimal) -> Result<Money, CommerceError> {
    item_total
        .try_times_rate(rate)
        .ok_or(CommerceError::Overflow)
}

/// Decide which discount applies to `item_total`.
///
/// Fails only when a discount amount overflows. The decider is only consulted when the shopper is a member and the
/// total also qualifies for a non-zero volume rate.
pub fn resolve_discount<D: DiscountDecider + ?Sized>(
    rules: &PricingRules,
    item_total: Money,
    is_member: bool,
    decider: &mut D,
) -> Result<DiscountOutcome, CommerceError> {
    let rate = volume_rate(&rules.tiers, item_total);

    if !is_member {
        return if rate.is_zero() {
            Ok(DiscountOutcome::none())
        } else {
            DiscountOutcome::volume(item_total, rate, false)
        };
    }

    if rate.is_zero() {
        return DiscountOutcome::member(item_total, rules.member_rate);
    }

    let prompt = DiscountPrompt {
        item_total,
        volume_rate: rate,
        member_rate: rules.member_rate,
    };
    let response = decider.decide(&prompt);
    let choice = DiscountChoice::from_response(response.as_deref());
    tracing::debug!(
        response = response.as_deref().unwrap_or("<dismissed>"),
        choice = choice.as_str(),
        "discount choice resolved"
    );

    match choice {
        DiscountChoice::Volume => DiscountOutcome::volume(item_total, rate, true),
        DiscountChoice::Member => DiscountOutcome::member(item_total, rules.member_rate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cents(c: i64) -> Money {
        Money::from_cents(c)
    }

    fn answer(response: &'static str) -> impl FnMut(&DiscountPrompt) -> Option<String> {
        move |_| Some(response.to_string())
    }

    #[test]
    fn test_tier_boundaries() {
        let tiers = DiscountTier::standard_table();
        assert_eq!(volume_rate(&tiers, cents(0)), Decimal::ZERO);
        assert_eq!(volume_rate(&tiers, cents(4999)), Decimal::ZERO);
        assert_eq!(volume_rate(&tiers, cents(5000)), Decimal::new(5, 2));
        assert_eq!(volume_rate(&tiers, cents(9999)), Decimal::new(5, 2));
        assert_eq!(volume_rate(&tiers, cents(10_000)), Decimal::new(10, 2));
        assert_eq!(volume_rate(&tiers, cents(19_999)), Decimal::new(10, 2));
        assert_eq!(volume_rate(&tiers, cents(20_000)), Decimal::new(15, 2));
        assert_eq!(volume_rate(&tiers, cents(9_999_999)), Decimal::new(15, 2));
    }

    #[test]
    fn test_total_outside_table_falls_back_to_zero() {
        let tiers = DiscountTier::standard_table();
        // Between 49.99 and 50.00: only reachable with sub-cent prices.
        let gap = Money::new(Decimal::new(49_995, 3));
        assert_eq!(volume_rate(&tiers, gap), Decimal::ZERO);
    }

    #[test]
    fn test_discount_overflow_is_an_error() {
        // Only rates above 1 can overflow; validation rejects them.
        let mut rules = PricingRules::default();
        rules.tiers = vec![DiscountTier::new(Decimal::ZERO, None, Decimal::TWO)];
        rules.member_rate = Decimal::TWO;
        let huge = Money::new(Decimal::MAX);

        assert!(matches!(
            resolve_discount(&rules, huge, false, &mut NoPrompt),
            Err(CommerceError::Overflow)
        ));
        assert!(matches!(
            resolve_discount(&rules, huge, true, &mut answer("volume")),
            Err(CommerceError::Overflow)
        ));
        assert!(matches!(
            resolve_discount(&rules, huge, true, &mut NoPrompt),
            Err(CommerceError::Overflow)
        ));
    }

    #[test]
    fn test_choice_from_response() {
        assert_eq!(DiscountChoice::from_response(Some("volume")), DiscountChoice::Volume);
        assert_eq!(DiscountChoice::from_response(Some("  VoLuMe \n")), DiscountChoice::Volume);
        assert_eq!(DiscountChoice::from_response(Some("member")), DiscountChoice::Member);
        assert_eq!(DiscountChoice::from_response(Some("vol")), DiscountChoice::Member);
        assert_eq!(DiscountChoice::from_response(Some("")), DiscountChoice::Member);
        assert_eq!(DiscountChoice::from_response(None), DiscountChoice::Member);
    }

    #[test]
    fn test_non_member_gets_volume() {
        let rules = PricingRules::default();
        let outcome = resolve_discount(&rules, cents(10_000), false, &mut NoPrompt).unwrap();
        assert_eq!(outcome.kind, DiscountKind::Volume);
        assert_eq!(outcome.volume_discount, cents(-1000));
        assert!(outcome.member_discount.is_zero());
        assert!(!outcome.reset_member_toggle);
    }

    #[test]
    fn test_non_member_in_zero_tier_gets_nothing() {
        let rules = PricingRules::default();
        let outcome = resolve_discount(&rules, cents(4999), false, &mut NoPrompt).unwrap();
        assert_eq!(outcome.kind, DiscountKind::None);
        assert!(outcome.volume_discount.is_zero());
        assert!(outcome.member_discount.is_zero());
    }

    #[test]
    fn test_member_in_zero_tier_skips_prompt() {
        let rules = PricingRules::default();
        let mut asked = false;
        let outcome = resolve_discount(&rules, cents(4000), true, &mut |_: &DiscountPrompt| {
            asked = true;
            Some("volume".to_string())
        })
        .unwrap();
        assert!(!asked);
        assert_eq!(outcome.kind, DiscountKind::Member);
        assert_eq!(outcome.member_discount, cents(-400));
        assert!(outcome.volume_discount.is_zero());
    }

    #[test]
    fn test_member_choosing_volume_resets_toggle() {
        let rules = PricingRules::default();
        let outcome = resolve_discount(&rules, cents(25_000), true, &mut answer("Volume")).unwrap();
        assert_eq!(outcome.kind, DiscountKind::Volume);
        assert_eq!(outcome.volume_discount, cents(-3750));
        assert!(outcome.member_discount.is_zero());
        assert!(outcome.reset_member_toggle);
    }

    #[test]
    fn test_member_dismissing_prompt_defaults_to_member() {
        let rules = PricingRules::default();
        let outcome = resolve_discount(&rules, cents(25_000), true, &mut NoPrompt).unwrap();
        assert_eq!(outcome.kind, DiscountKind::Member);
        assert_eq!(outcome.member_discount, cents(-2500));
        assert!(outcome.volume_discount.is_zero());
        assert!(!outcome.reset_member_toggle);
    }

    #[test]
    fn test_prompt_reports_both_savings() {
        let rules = PricingRules::default();
        let mut seen = None;
        resolve_discount(&rules, cents(10_000), true, &mut |p: &DiscountPrompt| {
            seen = Some(p.clone());
            None
        })
        .unwrap();
        let prompt = seen.unwrap();
        assert_eq!(prompt.volume_savings(), cents(1000));
        assert_eq!(prompt.member_savings(), cents(1000));
        assert!(prompt.message().contains("\"volume\""));
    }

    #[test]
    fn test_discounts_are_mutually_exclusive() {
        let rules = PricingRules::default();
        for total in [0, 1, 4999, 5000, 9999, 10_000, 19_999, 20_000, 123_456] {
            for is_member in [false, true] {
                for response in ["member", "volume", "other"] {
                    let outcome =
                        resolve_discount(&rules, cents(total), is_member, &mut answer(response))
                            .unwrap();
                    let non_zero = [outcome.volume_discount, outcome.member_discount]
                        .iter()
                        .filter(|m| !m.is_zero())
                        .count();
                    assert!(non_zero <= 1, "total={total} member={is_member}");
                    if is_member && total > 0 {
                        assert_eq!(non_zero, 1, "total={total} member={is_member}");
                    }
                    assert!(!outcome.volume_discount.is_positive());
                    assert!(!outcome.member_discount.is_positive());
                }
            }
        }
    }
}

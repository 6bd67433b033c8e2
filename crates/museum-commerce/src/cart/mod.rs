//! Shopping cart module.
//!
//! Contains the cart and line items, the volume/member discount policy
//! and the pricing engine.

#[allow(clippy::module_inception)]
mod cart;
mod discount;
mod pricing;

pub use cart::{Cart, LineItem, QuantityChange};
pub use discount::{
    resolve_discount, volume_rate, DiscountChoice, DiscountDecider, DiscountKind,
    DiscountOutcome, DiscountPrompt, DiscountTier, NoPrompt,
};
pub use pricing::{PricingRules, PricingSnapshot};

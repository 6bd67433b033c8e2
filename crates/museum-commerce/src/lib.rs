//! Cart, pricing and cart-page rendering for the museum shop.
//!
//! - **Cart**: line items keyed by product id, persisted as a JSON array in
//!   one key-value slot ([`store::CartStore`])
//! - **Discounts**: volume tiers or a flat member rate, never both
//! - **Pricing**: item total, discount, shipping, tax and invoice total
//! - **Rendering**: the cart page redrawn after every change
//!
//! # Example
//!
//! ```rust
//! use museum_cache::MemoryStore;
//! use museum_commerce::prelude::*;
//!
//! let mut shop = Storefront::new(
//!     CartStore::new(MemoryStore::new()),
//!     Document::cart_page(),
//!     NoPrompt,
//!     RenderController::default(),
//! );
//!
//! shop.add_to_cart(&ProductSource::new("A", "Scarab Amulet", "$100.00", "scarab.jpg"))
//!     .unwrap();
//! let state = shop.render().unwrap();
//!
//! assert_eq!(state.snapshot().unwrap().invoice_total.display(), "$126.73");
//! ```

pub mod error;
pub mod ids;
pub mod money;
pub mod product;

pub mod cart;
pub mod render;
pub mod store;
pub mod storefront;

pub use error::CommerceError;
pub use ids::ProductId;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::money::Money;
    pub use crate::product::ProductSource;

    // Cart
    pub use crate::cart::{
        resolve_discount, Cart, DiscountChoice, DiscountDecider, DiscountKind, DiscountOutcome,
        DiscountPrompt, DiscountTier, LineItem, NoPrompt, PricingRules, PricingSnapshot,
        QuantityChange,
    };

    // Rendering
    pub use crate::render::{
        CartView, Document, Element, ItemRow, RenderController, RenderState,
    };

    // Storage
    pub use crate::store::{CartStore, CART_KEY};
    pub use crate::storefront::Storefront;
}

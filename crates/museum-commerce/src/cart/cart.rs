//! Cart and line item types.

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A line item in the cart.
///
/// Field names match the stored JSON shape:
/// `{"id", "name", "unitPrice", "qty", "image"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItem {
    /// Product being purchased.
    pub id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price cached at the time the item was added.
    #[serde(rename = "unitPrice")]
    pub unit_price: Money,
    /// Quantity.
    pub qty: i64,
    /// Image reference.
    #[serde(default)]
    pub image: String,
}

impl LineItem {
    /// Create a new line item with a quantity of one.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        unit_price: Money,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            unit_price,
            qty: 1,
            image: image.into(),
        }
    }

    /// Builder-style quantity override.
    pub fn with_qty(mut self, qty: i64) -> Self {
        self.qty = qty;
        self
    }

    /// Whether this item takes part in pricing: `qty > 0` and a positive
    /// `unit_price` in whole cents.
    pub fn is_priceable(&self) -> bool {
        self.qty > 0 && self.unit_price.is_positive() && self.unit_price.is_whole_cents()
    }

    /// `unit_price * qty`.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.unit_price
            .try_multiply(self.qty)
            .ok_or(CommerceError::Overflow)
    }
}

/// Result of decrementing an item's quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// Quantity went down and the item stays in the cart.
    Decremented(i64),
    /// Quantity reached zero and the item was removed.
    Removed,
    /// No item with that id.
    Missing,
}

/// A shopping cart: an ordered sequence of line items keyed by product id.
///
/// Serializes as a bare JSON array of line items.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from stored items.
    ///
    /// Repeated ids are folded into the first occurrence so the cart stays
    /// keyed by id.
    pub fn from_items(items: impl IntoIterator<Item = LineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            match cart.find_item_mut(&item.id) {
                Some(existing) => existing.qty = existing.qty.saturating_add(item.qty),
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Items that take part in pricing.
    pub fn priceable_items(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter().filter(|i| i.is_priceable())
    }

    /// Drop items that cannot be priced. Returns how many were dropped.
    pub fn retain_priceable(&mut self) -> usize {
        let len_before = self.items.len();
        self.items.retain(LineItem::is_priceable);
        len_before - self.items.len()
    }

    /// Get an item by product id.
    pub fn find_item(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    fn find_item_mut(&mut self, id: &ProductId) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|i| &i.id == id)
    }

    /// Add one unit of a product.
    ///
    /// An existing id gets its quantity bumped; a new id is appended with a
    /// quantity of one. Returns the resulting quantity.
    pub fn add_item(
        &mut self,
        id: ProductId,
        name: impl Into<String>,
        unit_price: Money,
        image: impl Into<String>,
    ) -> i64 {
        if let Some(existing) = self.find_item_mut(&id) {
            existing.qty = existing.qty.saturating_add(1);
            return existing.qty;
        }
        self.items.push(LineItem::new(id, name, unit_price, image));
        1
    }

    /// Increase an item's quantity by one. Returns the new quantity, or
    /// `None` if the id is not in the cart.
    pub fn increment(&mut self, id: &ProductId) -> Option<i64> {
        let item = self.find_item_mut(id)?;
        item.qty = item.qty.saturating_add(1);
        Some(item.qty)
    }

    /// Decrease an item's quantity by one, removing it when it reaches zero.
    pub fn decrement(&mut self, id: &ProductId) -> QuantityChange {
        let Some(item) = self.find_item_mut(id) else {
            return QuantityChange::Missing;
        };
        item.qty = item.qty.saturating_sub(1);
        if item.qty <= 0 {
            self.remove_item(id);
            QuantityChange::Removed
        } else {
            QuantityChange::Decremented(item.qty)
        }
    }

    /// Remove an item from the cart. Returns whether anything was removed.
    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != id);
        self.items.len() < len_before
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Total quantity across priceable items, for badge counters.
    pub fn item_count(&self) -> i64 {
        self.priceable_items()
            .fold(0_i64, |acc, i| acc.saturating_add(i.qty))
    }

    /// Number of line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart has no priceable items.
    pub fn is_empty(&self) -> bool {
        self.priceable_items().next().is_none()
    }

    /// `Σ unit_price × qty` over priceable items, at full precision.
    pub fn item_total(&self) -> Result<Money, CommerceError> {
        self.priceable_items()
            .try_fold(Money::zero(), |acc, item| {
                acc.try_add(&item.line_total()?)
                    .ok_or(CommerceError::Overflow)
            })
    }
}

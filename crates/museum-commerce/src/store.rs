//! Cart persistence in a single key-value slot.

use museum_cache::{Cache, KeyValueStore};
use serde_json::Value;

use crate::cart::{Cart, LineItem};
use crate::error::CommerceError;

/// Storage key of the cart slot. The suffix versions the stored shape.
pub const CART_KEY: &str = "museum-cart-v1";

/// Owns the persisted cart.
///
/// Nothing holds on to the stored cart between operations: callers read a
/// fresh copy, mutate it and write it back.
#[derive(Debug, Clone)]
pub struct CartStore<S> {
    cache: Cache<S>,
    key: String,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Store the cart under [`CART_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, CART_KEY)
    }

    /// Store the cart under a custom key.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            cache: Cache::new(store),
            key: key.into(),
        }
    }

    /// The slot key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the persisted cart.
    ///
    /// Never fails: missing, unreadable or non-array data reads as an empty
    /// cart. Array entries that are not line items are skipped, and items
    /// that cannot be priced are dropped from the returned copy. They stay
    /// in storage until the next write.
    pub fn read_cart(&self) -> Cart {
        let text = match self.cache.get_raw(&self.key) {
            Ok(Some(text)) => text,
            Ok(None) => return Cart::new(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "cart slot unreadable, using empty cart");
                return Cart::new();
            }
        };

        let entries = match serde_json::from_str::<Value>(&text) {
            Ok(Value::Array(entries)) => entries,
            Ok(other) => {
                tracing::warn!(key = %self.key, kind = json_kind(&other), "cart slot is not an array, using empty cart");
                return Cart::new();
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "cart slot is corrupt, using empty cart");
                return Cart::new();
            }
        };

        let total = entries.len();
        let items: Vec<LineItem> = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect();
        let malformed = total - items.len();

        let mut cart = Cart::from_items(items);
        let unpriceable = cart.retain_priceable();
        if malformed + unpriceable > 0 {
            tracing::debug!(malformed, unpriceable, "filtered stored cart items");
        }
        cart
    }

    /// Replace the persisted cart.
    pub fn write_cart(&mut self, cart: &Cart) -> Result<(), CommerceError> {
        self.cache.set(&self.key, cart)?;
        tracing::debug!(key = %self.key, items = cart.len(), "cart written");
        Ok(())
    }

    /// Persist an empty cart.
    pub fn clear(&mut self) -> Result<(), CommerceError> {
        self.write_cart(&Cart::new())
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        self.cache.store()
    }

    /// Consume and return the underlying store.
    pub fn into_inner(self) -> S {
        self.cache.into_inner()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

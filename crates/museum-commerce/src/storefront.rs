//! Trigger surface for page scripts.
//!
//! Each operation is synchronous read-modify-write-render: read a fresh
//! cart from the store, change it, write it back, redraw. Unknown item ids
//! are no-ops and still redraw.

use museum_cache::KeyValueStore;

use crate::cart::{DiscountDecider, QuantityChange};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::product::ProductSource;
use crate::render::{refresh_badges, CartView, Element, RenderController, RenderState};
use crate::store::CartStore;

/// The cart engine wired to one page.
pub struct Storefront<S, V, D> {
    store: CartStore<S>,
    view: V,
    decider: D,
    renderer: RenderController,
}

impl<S, V, D> Storefront<S, V, D>
where
    S: KeyValueStore,
    V: CartView,
    D: DiscountDecider,
{
    pub fn new(store: CartStore<S>, view: V, decider: D, renderer: RenderController) -> Self {
        Self {
            store,
            view,
            decider,
            renderer,
        }
    }

    /// Full redraw from the stored cart.
    pub fn render(&mut self) -> Result<RenderState, CommerceError> {
        self.renderer
            .render(&self.store, &mut self.view, &mut self.decider)
    }

    /// Add one unit of a shop product.
    ///
    /// Only the item count badge is refreshed; this runs on the shop page,
    /// which has no cart table. Returns the item's new quantity.
    pub fn add_to_cart(&mut self, source: &ProductSource) -> Result<i64, CommerceError> {
        let unit_price = source.unit_price()?;
        let mut cart = self.store.read_cart();
        let qty = cart.add_item(
            source.id.clone(),
            source.name.clone(),
            unit_price,
            source.image.clone(),
        );
        self.store.write_cart(&cart)?;
        refresh_badges(&cart, &mut self.view);
        tracing::debug!(id = %source.id, qty, "added to cart");
        Ok(qty)
    }

    /// Increase an item's quantity by one.
    pub fn inc_qty(&mut self, id: &ProductId) -> Result<RenderState, CommerceError> {
        let mut cart = self.store.read_cart();
        match cart.increment(id) {
            Some(qty) => {
                self.store.write_cart(&cart)?;
                tracing::debug!(%id, qty, "quantity increased");
            }
            None => tracing::debug!(%id, "increment ignored, item not in cart"),
        }
        self.render()
    }

    /// Decrease an item's quantity by one. At zero the item is removed.
    pub fn dec_qty(&mut self, id: &ProductId) -> Result<RenderState, CommerceError> {
        let mut cart = self.store.read_cart();
        match cart.decrement(id) {
            QuantityChange::Decremented(qty) => {
                self.store.write_cart(&cart)?;
                tracing::debug!(%id, qty, "quantity decreased");
            }
            QuantityChange::Removed => {
                self.store.write_cart(&cart)?;
                tracing::debug!(%id, "quantity reached zero, item removed");
            }
            QuantityChange::Missing => {
                tracing::debug!(%id, "decrement ignored, item not in cart");
            }
        }
        self.render()
    }

    /// Remove an item entirely.
    pub fn remove_item(&mut self, id: &ProductId) -> Result<RenderState, CommerceError> {
        let mut cart = self.store.read_cart();
        if cart.remove_item(id) {
            self.store.write_cart(&cart)?;
            tracing::debug!(%id, "item removed");
        }
        self.render()
    }

    /// Empty the cart and switch the member toggle off.
    pub fn clear_cart(&mut self) -> Result<RenderState, CommerceError> {
        self.store.clear()?;
        self.view.set_checked(Element::MemberToggle, false);
        tracing::debug!("cart cleared");
        self.render()
    }

    /// The member checkbox changed.
    pub fn set_member(&mut self, is_member: bool) -> Result<RenderState, CommerceError> {
        self.view.set_checked(Element::MemberToggle, is_member);
        self.render()
    }

    /// Whether the member checkbox is ticked.
    pub fn is_member(&self) -> bool {
        self.view
            .is_checked(Element::MemberToggle)
            .unwrap_or(false)
    }

    pub fn store(&self) -> &CartStore<S> {
        &self.store
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn decider_mut(&mut self) -> &mut D {
        &mut self.decider
    }

    /// Consume the storefront, returning the store and view.
    pub fn into_parts(self) -> (CartStore<S>, V) {
        (self.store, self.view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::NoPrompt;
    use crate::render::Document;
    use museum_cache::MemoryStore;

    fn shop() -> Storefront<MemoryStore, Document, NoPrompt> {
        Storefront::new(
            CartStore::new(MemoryStore::new()),
            Document::shop_page(),
            NoPrompt,
            RenderController::default(),
        )
    }

    #[test]
    fn test_add_to_cart_refreshes_badge_only() {
        let mut shop = shop();
        let source = ProductSource::new("A", "Scarab", "$25.00", "a.jpg");

        assert_eq!(shop.add_to_cart(&source).unwrap(), 1);
        assert_eq!(shop.add_to_cart(&source).unwrap(), 2);
        assert_eq!(shop.view().text(Element::CartCount), Some("2"));
        assert!(!shop.view().has(Element::CartSummary));
    }

    #[test]
    fn test_add_to_cart_rejects_bad_price() {
        let mut shop = shop();
        let source = ProductSource::new("A", "Scarab", "call us", "");
        assert!(matches!(
            shop.add_to_cart(&source),
            Err(CommerceError::InvalidPrice(_))
        ));
        assert!(shop.store().read_cart().is_empty());
    }

    #[test]
    fn test_render_on_shop_page_is_contract_violation() {
        let mut shop = shop();
        assert!(matches!(
            shop.render(),
            Err(CommerceError::MissingElement("cart-items"))
        ));
    }
}

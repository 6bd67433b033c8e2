//! Cart page rendering.
//!
//! The render controller reads the cart, prices it and writes the result
//! into a [`CartView`]. There is no diffing: every render rewrites the item
//! rows and the summary from scratch.

mod document;
pub mod html;

pub use document::{Document, Node};

use museum_cache::KeyValueStore;
use serde::Serialize;

use crate::cart::{resolve_discount, Cart, DiscountDecider, PricingRules, PricingSnapshot};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use crate::store::CartStore;

/// Width every summary label is padded to.
pub const SUMMARY_LABEL_WIDTH: usize = 18;

/// Page elements the renderer writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Element {
    /// Body of the line item table.
    CartItems,
    /// Text block with the pricing summary.
    CartSummary,
    /// The line item table itself.
    CartTable,
    /// Message shown when the cart is empty.
    EmptyMessage,
    /// Container for the checkout / clear buttons.
    CartActions,
    /// "Free shipping" badge.
    FreeShippingBadge,
    /// Member checkbox.
    MemberToggle,
    /// Item count badge in the header.
    CartCount,
}

impl Element {
    pub const ALL: [Element; 8] = [
        Element::CartItems,
        Element::CartSummary,
        Element::CartTable,
        Element::EmptyMessage,
        Element::CartActions,
        Element::FreeShippingBadge,
        Element::MemberToggle,
        Element::CartCount,
    ];

    /// DOM id of the element.
    pub const fn id(&self) -> &'static str {
        match self {
            Element::CartItems => "cart-items",
            Element::CartSummary => "cart-summary",
            Element::CartTable => "cart-table",
            Element::EmptyMessage => "cart-empty",
            Element::CartActions => "cart-actions",
            Element::FreeShippingBadge => "free-shipping",
            Element::MemberToggle => "member-toggle",
            Element::CartCount => "cart-count",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.id() == id)
    }

    /// Elements every page that calls `render` must provide.
    pub const fn is_required(&self) -> bool {
        matches!(self, Element::CartItems | Element::CartSummary)
    }
}

/// One rendered row of the item table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemRow {
    pub id: ProductId,
    pub name: String,
    pub qty: i64,
    pub unit_price: Money,
    pub line_total: Money,
}

impl ItemRow {
    fn rows_for(cart: &Cart) -> Result<Vec<ItemRow>, CommerceError> {
        cart.priceable_items()
            .map(|item| {
                Ok(ItemRow {
                    id: item.id.clone(),
                    name: item.name.clone(),
                    qty: item.qty,
                    unit_price: item.unit_price,
                    line_total: item.line_total()?,
                })
            })
            .collect()
    }
}

/// The page as seen by the renderer.
///
/// Every write returns whether the element exists on the page. The
/// renderer skips optional elements that are missing.
pub trait CartView {
    /// Check if the page has this element.
    fn has(&self, element: Element) -> bool;

    /// Show or hide an element.
    fn set_visible(&mut self, element: Element, visible: bool) -> bool;

    /// Replace an element's text content.
    fn set_text(&mut self, element: Element, text: &str) -> bool;

    /// Replace the rows of a table body.
    fn set_rows(&mut self, element: Element, rows: &[ItemRow]) -> bool;

    /// Checkbox state, or `None` if the element is missing.
    fn is_checked(&self, element: Element) -> Option<bool>;

    /// Set checkbox state.
    fn set_checked(&mut self, element: Element, checked: bool) -> bool;
}

/// Which state the page was rendered in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum RenderState {
    /// No priceable items.
    Empty,
    /// Items were listed and priced.
    Populated(PricingSnapshot),
}

impl RenderState {
    pub fn snapshot(&self) -> Option<&PricingSnapshot> {
        match self {
            RenderState::Empty => None,
            RenderState::Populated(snapshot) => Some(snapshot),
        }
    }
}

/// Reads, prices and draws the cart.
#[derive(Debug, Clone, Default)]
pub struct RenderController {
    rules: PricingRules,
}

impl RenderController {
    pub fn new(rules: PricingRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &PricingRules {
        &self.rules
    }

    /// Render the cart page from the current stored cart.
    ///
    /// The member discount prompt, if needed, is asked through `decider`
    /// before anything is written. Choosing the volume discount unchecks
    /// the member toggle.
    pub fn render<S, V, D>(
        &self,
        store: &CartStore<S>,
        view: &mut V,
        decider: &mut D,
    ) -> Result<RenderState, CommerceError>
    where
        S: KeyValueStore,
        V: CartView + ?Sized,
        D: DiscountDecider + ?Sized,
    {
        for element in Element::ALL.iter().filter(|e| e.is_required()) {
            if !view.has(*element) {
                return Err(CommerceError::MissingElement(element.id()));
            }
        }

        let cart = store.read_cart();
        refresh_badges(&cart, view);

        if cart.is_empty() {
            view.set_visible(Element::CartTable, false);
            view.set_visible(Element::CartActions, false);
            view.set_visible(Element::FreeShippingBadge, false);
            view.set_visible(Element::EmptyMessage, true);
            view.set_rows(Element::CartItems, &[]);
            view.set_text(Element::CartSummary, "");
            tracing::debug!("rendered empty cart");
            return Ok(RenderState::Empty);
        }

        let rows = ItemRow::rows_for(&cart)?;
        let item_total = cart.item_total()?;
        let is_member = view.is_checked(Element::MemberToggle).unwrap_or(false);
        let outcome = resolve_discount(&self.rules, item_total, is_member, decider)?;
        if outcome.reset_member_toggle {
            view.set_checked(Element::MemberToggle, false);
        }
        let snapshot = PricingSnapshot::compute(item_total, &outcome, &self.rules)?;

        view.set_visible(Element::EmptyMessage, false);
        view.set_visible(Element::CartTable, true);
        view.set_visible(Element::CartActions, true);
        view.set_visible(Element::FreeShippingBadge, snapshot.has_free_shipping);
        view.set_rows(Element::CartItems, &rows);
        view.set_text(Element::CartSummary, &summary_text(&snapshot, &self.rules));

        tracing::debug!(
            items = rows.len(),
            item_total = %snapshot.item_total,
            discount = snapshot.discount.as_str(),
            invoice_total = %snapshot.invoice_total,
            "rendered cart"
        );
        Ok(RenderState::Populated(snapshot))
    }
}

/// Partial refresh: update the item count badge only.
pub fn refresh_badges<V: CartView + ?Sized>(cart: &Cart, view: &mut V) {
    view.set_text(Element::CartCount, &cart.item_count().to_string());
}

/// The summary block, one labeled amount per line, labels padded to
/// [`SUMMARY_LABEL_WIDTH`] so the amounts line up in a fixed-width font.
pub fn summary_text(snapshot: &PricingSnapshot, rules: &PricingRules) -> String {
    let tax_label = format!("Tax ({}):", rules.tax_label());
    let lines: [(&str, Money); 7] = [
        ("Item Total:", snapshot.item_total),
        ("Volume Discount:", snapshot.volume_discount),
        ("Member Discount:", snapshot.member_discount),
        ("Shipping:", snapshot.shipping),
        ("Subtotal:", snapshot.sub_total),
        (&tax_label, snapshot.tax_amount),
        ("Invoice Total:", snapshot.invoice_total),
    ];
    lines
        .iter()
        .map(|(label, amount)| format!("{label:<width$}{amount}", width = SUMMARY_LABEL_WIDTH))
        .collect::<Vec<_>>()
        .join("\n")
}

//! End-to-end cart page scenarios.

use museum_cache::MemoryStore;
use museum_commerce::prelude::*;

type Answer = Box<dyn FnMut(&DiscountPrompt) -> Option<String>>;
type Page = Storefront<MemoryStore, Document, Answer>;

fn cart_page_with(items: Vec<LineItem>, answer: Option<&'static str>) -> Page {
    let mut store = CartStore::new(MemoryStore::new());
    store.write_cart(&Cart::from_items(items)).unwrap();
    let decider: Answer = Box::new(move |_: &DiscountPrompt| answer.map(str::to_string));
    Storefront::new(
        store,
        Document::cart_page(),
        decider,
        RenderController::default(),
    )
}

fn item(id: &str, cents: i64, qty: i64) -> LineItem {
    LineItem::new(ProductId::new(id), format!("Item {id}"), Money::from_cents(cents), "")
        .with_qty(qty)
}

fn snapshot(state: RenderState) -> PricingSnapshot {
    match state {
        RenderState::Populated(snapshot) => snapshot,
        RenderState::Empty => panic!("expected a populated cart"),
    }
}

#[test]
fn test_hundred_dollar_cart_non_member() {
    let mut page = cart_page_with(vec![item("A", 10_000, 1)], None);
    let p = snapshot(page.render().unwrap());

    assert_eq!(p.volume_discount.display(), "($10.00)");
    assert!(p.member_discount.is_zero());
    assert_eq!(p.shipping.display(), "$25.00");
    assert_eq!(p.sub_total.display(), "$115.00");
    assert_eq!(p.tax_amount.display(), "$11.73");
    assert_eq!(p.invoice_total.display(), "$126.73");
}

#[test]
fn test_member_choosing_volume_on_large_cart() {
    let mut page = cart_page_with(vec![item("A", 25_000, 1)], Some("volume"));
    let p = snapshot(page.set_member(true).unwrap());

    assert_eq!(p.volume_discount.display(), "($37.50)");
    assert!(p.member_discount.is_zero());
    assert!(p.shipping.is_zero());
    assert!(p.has_free_shipping);
    assert!(!page.is_member());
    assert!(page.view().is_visible(Element::FreeShippingBadge));
}

#[test]
fn test_member_dismissing_prompt_keeps_member_discount() {
    let mut page = cart_page_with(vec![item("A", 25_000, 1)], None);
    let p = snapshot(page.set_member(true).unwrap());

    assert_eq!(p.discount, DiscountKind::Member);
    assert_eq!(p.member_discount.display(), "($25.00)");
    assert!(p.volume_discount.is_zero());
    assert!(page.is_member());
}

#[test]
fn test_inc_and_dec_quantities() {
    let mut page = cart_page_with(vec![item("A", 2000, 1), item("B", 500, 2)], None);

    let p = snapshot(page.inc_qty(&ProductId::new("A")).unwrap());
    assert_eq!(p.item_total, Money::from_cents(5000));
    assert_eq!(page.view().text(Element::CartCount), Some("4"));

    let p = snapshot(page.dec_qty(&ProductId::new("B")).unwrap());
    assert_eq!(p.item_total, Money::from_cents(4500));
    assert_eq!(page.view().rows(Element::CartItems).len(), 2);
}

#[test]
fn test_decrement_last_unit_removes_item() {
    let mut page = cart_page_with(vec![item("A", 2000, 1), item("B", 500, 1)], None);
    page.dec_qty(&ProductId::new("A")).unwrap();

    let cart = page.store().read_cart();
    assert!(cart.find_item(&ProductId::new("A")).is_none());
    assert_eq!(cart.len(), 1);
    assert_eq!(page.view().rows(Element::CartItems).len(), 1);
}

#[test]
fn test_decrement_only_item_shows_empty_state() {
    let mut page = cart_page_with(vec![item("A", 2000, 1)], None);
    let state = page.dec_qty(&ProductId::new("A")).unwrap();

    assert_eq!(state, RenderState::Empty);
    assert!(page.view().is_visible(Element::EmptyMessage));
    assert!(!page.view().is_visible(Element::CartTable));
    assert!(!page.view().is_visible(Element::CartActions));
}

#[test]
fn test_remove_item_is_idempotent() {
    let mut page = cart_page_with(vec![item("A", 2000, 1), item("B", 500, 1)], None);

    page.remove_item(&ProductId::new("A")).unwrap();
    let once = page.store().read_cart();
    page.remove_item(&ProductId::new("A")).unwrap();
    assert_eq!(page.store().read_cart(), once);
}

#[test]
fn test_unknown_ids_are_noops() {
    let mut page = cart_page_with(vec![item("A", 2000, 1)], None);
    let before = page.store().read_cart();

    page.inc_qty(&ProductId::new("nope")).unwrap();
    page.dec_qty(&ProductId::new("nope")).unwrap();
    page.remove_item(&ProductId::new("nope")).unwrap();

    assert_eq!(page.store().read_cart(), before);
}

#[test]
fn test_clear_cart_resets_member_toggle() {
    let mut page = cart_page_with(vec![item("A", 2000, 1)], None);
    page.set_member(true).unwrap();
    assert!(page.is_member());

    let state = page.clear_cart().unwrap();
    assert_eq!(state, RenderState::Empty);
    assert!(!page.is_member());
    assert!(page.store().read_cart().is_empty());
    assert_eq!(page.view().text(Element::CartCount), Some("0"));
}

#[test]
fn test_shop_add_then_cart_page_render() {
    let mut shop = Storefront::new(
        CartStore::new(MemoryStore::new()),
        Document::shop_page(),
        NoPrompt,
        RenderController::default(),
    );
    shop.add_to_cart(&ProductSource::new("A", "Scarab", "$100.00", "a.jpg"))
        .unwrap();
    shop.add_to_cart(&ProductSource::new("B", "Papyrus", "$20.00", "b.jpg"))
        .unwrap();
    shop.add_to_cart(&ProductSource::new("B", "Papyrus", "$20.00", "b.jpg"))
        .unwrap();

    // Same slot, different page.
    let (store, _) = shop.into_parts();
    let mut cart_page = Storefront::new(
        store,
        Document::cart_page(),
        NoPrompt,
        RenderController::default(),
    );
    let p = snapshot(cart_page.render().unwrap());
    assert_eq!(p.item_total, Money::from_cents(14_000));
    assert_eq!(p.volume_discount.display(), "($14.00)");

    let rows = cart_page.view().rows(Element::CartItems);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].qty, 2);
    assert_eq!(rows[1].line_total, Money::from_cents(4000));
}

#[test]
fn test_corrupt_storage_renders_empty() {
    let store = CartStore::new(MemoryStore::with_slot(CART_KEY, "{{{"));
    let mut page = Storefront::new(
        store,
        Document::cart_page(),
        NoPrompt,
        RenderController::default(),
    );
    assert_eq!(page.render().unwrap(), RenderState::Empty);
}

#[test]
fn test_unpriceable_stored_items_never_contribute() {
    let raw = r#"[{"id":"A","name":"A","unitPrice":40,"qty":2,"image":""},
                  {"id":"B","name":"B","unitPrice":0,"qty":9,"image":""},
                  {"id":"C","name":"C","unitPrice":15,"qty":-3,"image":""}]"#;
    let mut page = Storefront::new(
        CartStore::new(MemoryStore::with_slot(CART_KEY, raw)),
        Document::cart_page(),
        NoPrompt,
        RenderController::default(),
    );
    let p = snapshot(page.render().unwrap());
    assert_eq!(p.item_total, Money::from_cents(8000));
    assert_eq!(page.view().rows(Element::CartItems).len(), 1);
}

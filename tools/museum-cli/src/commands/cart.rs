//! Cart commands: one trigger per invocation, then the page is shown.

use anyhow::{anyhow, Result};
use museum_commerce::prelude::*;
use serde::Serialize;

use super::{ItemArgs, MemberArgs, RenderArgs};
use crate::context::{CliStorefront, Context};
use crate::output::discount_badge;

/// Column widths of the item table.
const COLUMNS: [usize; 4] = [32, 5, 12, 12];

/// Show the cart page.
pub fn render(args: RenderArgs, ctx: &Context) -> Result<()> {
    let mut page = ctx.storefront(Document::cart_page())?;
    let state = page.render()?;
    if args.html {
        println!("{}", item_markup(page.view()));
        return Ok(());
    }
    show_page(ctx, &page, &state);
    Ok(())
}

/// Markup of the item table body as the page would hold it.
fn item_markup(doc: &Document) -> String {
    doc.inner_html(Element::CartItems).unwrap_or_default()
}

/// Add one unit of a catalog item. Runs against the shop page, so only the
/// item count is shown.
pub fn add(args: ItemArgs, ctx: &Context) -> Result<()> {
    let id = args.product_id();
    let product = ctx.config.product(&id).ok_or_else(|| {
        anyhow!(
            "Unknown product '{}'. Run `museum shop` to list the catalog.",
            id
        )
    })?;

    let mut shop = ctx.storefront(Document::shop_page())?;
    let qty = shop.add_to_cart(product)?;
    let item_count = shop.view().text(Element::CartCount).unwrap_or("0");

    if ctx.output.is_json() {
        ctx.output.json(&AddedJson {
            id: &product.id,
            qty,
            item_count,
        });
        return Ok(());
    }

    ctx.output
        .success(&format!("Added {} (quantity {})", product.name, qty));
    ctx.output.kv("items in cart", item_count);
    Ok(())
}

pub fn inc(args: ItemArgs, ctx: &Context) -> Result<()> {
    let mut page = ctx.storefront(Document::cart_page())?;
    let state = page.inc_qty(&args.product_id())?;
    show_page(ctx, &page, &state);
    Ok(())
}

pub fn dec(args: ItemArgs, ctx: &Context) -> Result<()> {
    let mut page = ctx.storefront(Document::cart_page())?;
    let state = page.dec_qty(&args.product_id())?;
    show_page(ctx, &page, &state);
    Ok(())
}

pub fn remove(args: ItemArgs, ctx: &Context) -> Result<()> {
    let mut page = ctx.storefront(Document::cart_page())?;
    let state = page.remove_item(&args.product_id())?;
    show_page(ctx, &page, &state);
    Ok(())
}

pub fn clear(ctx: &Context) -> Result<()> {
    let mut page = ctx.storefront(Document::cart_page())?;
    let state = page.clear_cart()?;
    ctx.output.success("Cart cleared");
    show_page(ctx, &page, &state);
    Ok(())
}

pub fn member(args: MemberArgs, ctx: &Context) -> Result<()> {
    let mut page = ctx.storefront(Document::cart_page())?;
    let state = page.set_member(args.state.is_on())?;
    show_page(ctx, &page, &state);
    Ok(())
}

#[derive(Serialize)]
struct AddedJson<'a> {
    id: &'a ProductId,
    qty: i64,
    item_count: &'a str,
}

#[derive(Serialize)]
struct PageJson<'a> {
    #[serde(flatten)]
    state: &'a RenderState,
    items: &'a [ItemRow],
    member: bool,
    item_count: &'a str,
}

fn show_page(ctx: &Context, page: &CliStorefront, state: &RenderState) {
    let doc = page.view();

    if ctx.output.is_json() {
        ctx.output.json(&PageJson {
            state,
            items: doc.rows(Element::CartItems),
            member: page.is_member(),
            item_count: doc.text(Element::CartCount).unwrap_or("0"),
        });
        return;
    }

    ctx.output.header("Cart");

    let snapshot = match state {
        RenderState::Empty => {
            ctx.output.info("Your cart is empty.");
            return;
        }
        RenderState::Populated(snapshot) => snapshot,
    };

    ctx.output
        .table_row(&["ITEM", "QTY", "PRICE", "TOTAL"], &COLUMNS);
    for row in doc.rows(Element::CartItems) {
        let label = format!("{} [{}]", row.name, row.id);
        ctx.output.table_row(
            &[
                &label,
                &row.qty.to_string(),
                &row.unit_price.display(),
                &row.line_total.display(),
            ],
            &COLUMNS,
        );
    }

    ctx.output.blank();
    if let Some(summary) = doc.text(Element::CartSummary) {
        ctx.output.block(summary);
    }
    ctx.output.blank();

    ctx.output.kv("discount", &discount_badge(snapshot.discount));
    ctx.output
        .kv("member", if page.is_member() { "yes" } else { "no" });
    if doc.is_visible(Element::FreeShippingBadge) {
        ctx.output.success("Free shipping!");
    }
}

//! Shop catalog listing.

use anyhow::Result;
use museum_commerce::prelude::*;
use serde::Serialize;

use crate::context::Context;

const COLUMNS: [usize; 4] = [20, 36, 10, 8];

#[derive(Serialize)]
struct CatalogEntry<'a> {
    id: &'a ProductId,
    name: &'a str,
    price: Option<Money>,
    image: &'a str,
    in_cart: i64,
}

/// List the catalog with the quantity of each item already in the cart.
pub fn run(ctx: &Context) -> Result<()> {
    let cart = ctx.cart_store().read_cart();

    let entries: Vec<CatalogEntry<'_>> = ctx
        .config
        .shop
        .items
        .iter()
        .map(|item| CatalogEntry {
            id: &item.id,
            name: &item.name,
            price: item.unit_price().ok(),
            image: &item.image,
            in_cart: cart.find_item(&item.id).map_or(0, |i| i.qty),
        })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&entries);
        return Ok(());
    }

    ctx.output.header("Shop");

    if entries.is_empty() {
        ctx.output.info("The catalog is empty.");
        ctx.output
            .info("Add [[shop.items]] to museum.toml, or run `museum config init`.");
        return Ok(());
    }

    ctx.output
        .table_row(&["ID", "NAME", "PRICE", "IN CART"], &COLUMNS);
    for entry in &entries {
        let price = entry
            .price
            .map(|p| p.display())
            .unwrap_or_else(|| "n/a".to_string());
        ctx.output.table_row(
            &[
                entry.id.as_str(),
                entry.name,
                &price,
                &entry.in_cart.to_string(),
            ],
            &COLUMNS,
        );
    }

    let unpriced = entries.iter().filter(|e| e.price.is_none()).count();
    if unpriced > 0 {
        ctx.output.warn(&format!(
            "{} item(s) have a price that cannot be read and cannot be added",
            unpriced
        ));
    }

    Ok(())
}

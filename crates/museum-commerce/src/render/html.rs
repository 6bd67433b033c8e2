//! Item table markup.

use super::ItemRow;

/// Render the item table body.
///
/// Each row carries `data-id` and `data-action` attributes that the page
/// script wires to `inc_qty`, `dec_qty` and `remove_item`.
pub fn item_rows(rows: &[ItemRow]) -> String {
    rows.iter().map(item_row).collect::<Vec<_>>().join("\n")
}

/// Render a single item row.
pub fn item_row(row: &ItemRow) -> String {
    let id = escape(row.id.as_str());
    format!(
        r#"<tr class="cart-row" data-id="{id}">
    <td class="cart-name">{name}</td>
    <td class="cart-qty">
        <button class="qty-btn" data-action="dec" data-id="{id}" aria-label="Decrease quantity">-</button>
        <span class="qty-value">{qty}</span>
        <button class="qty-btn" data-action="inc" data-id="{id}" aria-label="Increase quantity">+</button>
    </td>
    <td class="cart-price">{unit_price}</td>
    <td class="cart-line-total">{line_total}</td>
    <td class="cart-remove"><button class="remove-btn" data-action="remove" data-id="{id}">Remove</button></td>
</tr>"#,
        id = id,
        name = escape(&row.name),
        qty = row.qty,
        unit_price = row.unit_price,
        line_total = row.line_total,
    )
}

/// Escape text for HTML content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

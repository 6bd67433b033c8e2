//! Shop products as seen by the add-to-cart gesture.

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;

/// What a shop-page "add to cart" gesture carries.
///
/// The price is the text shown on the product card (e.g. `"$25.00"`), not a
/// number, because that is what the page has at hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSource {
    /// Product id.
    pub id: ProductId,
    /// Product title.
    pub name: String,
    /// Displayed price text.
    #[serde(rename = "price")]
    pub price_text: String,
    /// Image reference.
    #[serde(default)]
    pub image: String,
}

impl ProductSource {
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price_text: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price_text: price_text.into(),
            image: image.into(),
        }
    }

    /// Parse the displayed price.
    ///
    /// Rejects text that is not a price, prices that are not positive and
    /// prices with a fraction of a cent, since such an item would never be
    /// priced anyway.
    pub fn unit_price(&self) -> Result<Money, CommerceError> {
        let price = Money::parse(&self.price_text)?;
        if !price.is_positive() || !price.is_whole_cents() {
            return Err(CommerceError::InvalidPrice(self.price_text.clone()));
        }
        Ok(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_price() {
        let source = ProductSource::new("A", "Scarab", "$25.00", "img/a.jpg");
        assert_eq!(source.unit_price().unwrap(), Money::from_cents(2500));
    }

    #[test]
    fn test_unit_price_rejects_non_positive() {
        assert!(ProductSource::new("A", "Free map", "$0.00", "").unit_price().is_err());
        assert!(ProductSource::new("A", "Odd", "($5.00)", "").unit_price().is_err());
        assert!(ProductSource::new("A", "Soon", "TBA", "").unit_price().is_err());
    }

    #[test]
    fn test_unit_price_rejects_fractional_cents() {
        let coin = ProductSource::new("A", "Coin", "$49.995", "");
        assert!(matches!(coin.unit_price(), Err(CommerceError::InvalidPrice(_))));

        let padded = ProductSource::new("A", "Coin", "$49.990", "");
        assert_eq!(padded.unit_price().unwrap(), Money::from_cents(4999));
    }

    #[test]
    fn test_deserialize_from_catalog_entry() {
        let source: ProductSource = serde_json::from_str(
            r#"{"id": "B", "name": "Replica Vase", "price": "$120.00"}"#,
        )
        .unwrap();
        assert_eq!(source.id.as_str(), "B");
        assert_eq!(source.image, "");
        assert_eq!(source.unit_price().unwrap(), Money::from_cents(12_000));
    }
}

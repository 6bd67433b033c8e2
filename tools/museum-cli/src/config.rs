//! CLI configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use museum_commerce::cart::PricingRules;
use museum_commerce::product::ProductSource;
use museum_commerce::store::CART_KEY;
use museum_commerce::ProductId;
use serde::{Deserialize, Serialize};

/// Config file names, searched for in this order.
pub const CONFIG_NAMES: [&str; 3] = ["museum.toml", ".museum.toml", "museum.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Cart storage.
    #[serde(default)]
    pub store: StoreConfig,

    /// Pricing overrides.
    #[serde(default)]
    pub pricing: PricingRules,

    /// Shop catalog.
    #[serde(default)]
    pub shop: ShopConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Look up a catalog item by id.
    pub fn product(&self, id: &ProductId) -> Option<&ProductSource> {
        self.shop.items.iter().find(|item| &item.id == id)
    }
}

/// Where the cart slot lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// File standing in for browser local storage.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,

    /// Slot key.
    #[serde(default = "default_store_key")]
    pub key: String,
}

fn default_store_path() -> PathBuf {
    PathBuf::from(".museum").join("storage.json")
}

fn default_store_key() -> String {
    CART_KEY.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            key: default_store_key(),
        }
    }
}

/// Shop catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Items shown on the shop page.
    #[serde(default)]
    pub items: Vec<ProductSource>,
}

/// Generate a default museum.toml config file.
pub fn generate_default_config() -> String {
    r#"# Museum shop configuration

[store]
path = ".museum/storage.json"
key = "museum-cart-v1"

[pricing]
member_rate = 0.10
tax_rate = 0.102
flat_shipping = 25
free_shipping_threshold = 200

[[pricing.tiers]]
min = 0
max = 49.99
rate = 0

[[pricing.tiers]]
min = 50
max = 99.99
rate = 0.05

[[pricing.tiers]]
min = 100
max = 199.99
rate = 0.10

[[pricing.tiers]]
min = 200
rate = 0.15

[[shop.items]]
id = "scarab-amulet"
name = "Scarab Amulet Replica"
price = "$24.99"
image = "images/scarab.jpg"

[[shop.items]]
id = "papyrus-print"
name = "Book of the Dead Papyrus Print"
price = "$49.00"
image = "images/papyrus.jpg"

[[shop.items]]
id = "canopic-jar"
name = "Canopic Jar Set"
price = "$129.50"
image = "images/canopic.jpg"
"#
    .to_string()
}

pub mod client;

use serde::{Deserialize, Serialize};

/// A named axis of variation (e.g. "Size") with its declared values.
///
/// Value order is significant only for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductOption {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// One purchasable combination of option values.
///
/// The `option1..option3` slots are aligned positionally with the product's
/// option list: slot *k* holds the value for the *k*-th declared option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub option1: Option<String>,
    #[serde(default)]
    pub option2: Option<String>,
    #[serde(default)]
    pub option3: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub inventory_quantity: Option<i64>,
}

impl ProductVariant {
    /// Value of the positional option slot, if any. Slot 0 is `option1`.
    pub fn option_value(&self, index: usize) -> Option<&str> {
        let slot = match index {
            0 => &self.option1,
            1 => &self.option2,
            2 => &self.option3,
            _ => return None,
        };
        slot.as_deref()
    }
}

/// Point-in-time view of a product's options, variants, and description.
///
/// Snapshots are value objects: fetched fresh from the store per event and
/// replaced wholesale, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub options: Vec<ProductOption>,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    #[serde(default)]
    pub body_html: Option<String>,
}

//! Basket data model

use serde::{Deserialize, Serialize};

/// One product entry in the basket.
///
/// Field names are the cookie wire format; `basket_items` holds a JSON
/// array of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: u32,
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
}

impl LineItem {
    /// Create a catalog entry not yet counted in the basket.
    pub fn new(id: u32, name: impl Into<String>, unit_price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            quantity: 0,
            unit_price,
        }
    }

    /// quantity × unit_price for this line.
    pub fn subtotal(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }
}

// matchday/src/models/cart_item.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line of the browser cart, as submitted at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
  pub product_id: String,
  pub name: String,
  pub size: Option<String>,
  pub quantity: u32,
  pub price: Decimal,
  pub sale_price: Option<Decimal>,
  pub currency: String,
}

impl CartItem {
  /// Sale price when present, list price otherwise.
  pub fn unit_price(&self) -> Decimal {
    self.sale_price.unwrap_or(self.price)
  }
}

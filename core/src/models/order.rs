// matchday/src/models/order.rs

use crate::models::cart_item::CartItem;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
  pub name: String,
  pub email: String,
  pub phone: String,
  pub address: String,
  pub city: String,
  pub state: String,
  pub zip: String,
  pub country: String,
  pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
  pub product_id: String,
  pub name: String,
  pub size: Option<String>,
  pub quantity: u32,
  pub unit_price: Decimal,
  pub currency: String,
}

impl From<&CartItem> for OrderLine {
  fn from(item: &CartItem) -> Self {
    Self {
      product_id: item.product_id.clone(),
      name: item.name.clone(),
      size: item.size.clone(),
      quantity: item.quantity,
      unit_price: item.unit_price(),
      currency: item.currency.clone(),
    }
  }
}

impl OrderLine {
  pub fn line_total(&self) -> Decimal {
    self.unit_price * Decimal::from(self.quantity)
  }
}

/// A cash-on-delivery shop order. Exists only for the duration of a checkout
/// request: it is emailed and returned, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
  pub id: String,
  pub customer: Customer,
  pub items: Vec<OrderLine>,
  pub subtotal: Decimal,
  pub shipping_fee: Decimal,
  pub total: Decimal,
  pub currency: String,
  pub created_at: DateTime<Utc>,
}

impl Order {
  pub fn item_count(&self) -> u32 {
    self.items.iter().map(|l| l.quantity).sum()
  }

  pub fn lines_total(&self) -> Decimal {
    self.items.iter().map(OrderLine::line_total).sum()
  }
}

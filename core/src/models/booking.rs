// matchday/src/models/booking.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
  Confirmed,
  /// Never produced here; cancellations happen in the CMS.
  Cancelled,
}

impl BookingStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      BookingStatus::Confirmed => "confirmed",
      BookingStatus::Cancelled => "cancelled",
    }
  }
}

/// A ticket purchase. `id` is the customer-facing `TKT-...` reference, not the
/// store's document id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
  pub id: String,
  pub match_id: String,
  pub name: String,
  pub email: String,
  pub quantity: u32,
  pub status: BookingStatus,
  pub created_at: DateTime<Utc>,
}

impl Booking {
  pub fn confirmed(
    id: String,
    match_id: String,
    name: String,
    email: String,
    quantity: u32,
    created_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      match_id,
      name,
      email,
      quantity,
      status: BookingStatus::Confirmed,
      created_at,
    }
  }
}

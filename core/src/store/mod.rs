// matchday/src/store/mod.rs

//! The content store seam. The CMS owns every durable record; this crate only
//! reads fixtures, creates booking documents and moves the availability counter.

pub mod memory;

pub use memory::MemoryStore;

use crate::models::{Booking, Fixture};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
  #[error("content store write token is not configured")]
  MissingWriteToken,

  #[error("content store request failed: {0}")]
  Transport(String),

  #[error("content store returned {status}: {message}")]
  Api { status: u16, message: String },

  #[error("content store response could not be decoded: {0}")]
  Decode(String),

  #[error("document {0} kept changing; gave up after retries")]
  Contention(String),
}

/// Result of an atomic "decrement only if enough tickets remain" operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reservation {
  Reserved { remaining: u32 },
  /// Nothing was written. `available` is the count seen by the store.
  Insufficient { available: u32 },
  TicketingClosed,
  MatchMissing,
}

/// Reference to a document created in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
  pub document_id: String,
}

#[async_trait]
pub trait ContentStore: Send + Sync {
  /// Fails when the store was configured without write credentials.
  fn ensure_writable(&self) -> Result<(), StoreError>;

  async fn fetch_fixture(&self, id: &str) -> Result<Option<Fixture>, StoreError>;

  /// Fixtures kicking off at or after `from`, earliest first.
  async fn upcoming_fixtures(&self, from: DateTime<Utc>, limit: usize) -> Result<Vec<Fixture>, StoreError>;

  async fn create_booking(&self, booking: &Booking) -> Result<StoredDocument, StoreError>;

  /// Decrements availability by `quantity` in one store operation, only if
  /// ticketing is open and at least `quantity` tickets remain.
  async fn reserve_tickets(&self, match_id: &str, quantity: u32) -> Result<Reservation, StoreError>;

  /// Gives back a reservation whose booking could not be recorded.
  async fn release_tickets(&self, match_id: &str, quantity: u32) -> Result<(), StoreError>;
}

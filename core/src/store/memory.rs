// matchday/src/store/memory.rs

//! In-process content store for tests and local development.

use crate::models::{Booking, Fixture};
use crate::store::{ContentStore, Reservation, StoreError, StoredDocument};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Default)]
struct Documents {
  fixtures: HashMap<String, Fixture>,
  bookings: Vec<(StoredDocument, Booking)>,
}

/// Every operation runs under one mutex, so `reserve_tickets` is atomic.
#[derive(Debug)]
pub struct MemoryStore {
  docs: Mutex<Documents>,
  writable: bool,
}

impl Default for MemoryStore {
  fn default() -> Self {
    Self::new()
  }
}

impl MemoryStore {
  pub fn new() -> Self {
    Self {
      docs: Mutex::new(Documents::default()),
      writable: true,
    }
  }

  pub fn with_fixtures(fixtures: impl IntoIterator<Item = Fixture>) -> Self {
    let store = Self::new();
    for fixture in fixtures {
      store.insert_fixture(fixture);
    }
    store
  }

  /// Parses a JSON array of fixture documents (CMS shape).
  pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
    let fixtures: Vec<Fixture> = serde_json::from_str(json)?;
    Ok(Self::with_fixtures(fixtures))
  }

  /// Behaves like a store configured without a write token.
  pub fn read_only(mut self) -> Self {
    self.writable = false;
    self
  }

  pub fn insert_fixture(&self, fixture: Fixture) {
    self.docs.lock().fixtures.insert(fixture.id.clone(), fixture);
  }

  pub fn fixture(&self, id: &str) -> Option<Fixture> {
    self.docs.lock().fixtures.get(id).cloned()
  }

  pub fn bookings(&self) -> Vec<Booking> {
    self.docs.lock().bookings.iter().map(|(_, b)| b.clone()).collect()
  }

  fn check_writable(&self) -> Result<(), StoreError> {
    if self.writable {
      Ok(())
    } else {
      Err(StoreError::MissingWriteToken)
    }
  }
}

#[async_trait]
impl ContentStore for MemoryStore {
  fn ensure_writable(&self) -> Result<(), StoreError> {
    self.check_writable()
  }

  async fn fetch_fixture(&self, id: &str) -> Result<Option<Fixture>, StoreError> {
    Ok(self.fixture(id))
  }

  async fn upcoming_fixtures(&self, from: DateTime<Utc>, limit: usize) -> Result<Vec<Fixture>, StoreError> {
    let mut upcoming: Vec<Fixture> = self
      .docs
      .lock()
      .fixtures
      .values()
      .filter(|f| f.date >= from)
      .cloned()
      .collect();
    upcoming.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
    upcoming.truncate(limit);
    Ok(upcoming)
  }

  async fn create_booking(&self, booking: &Booking) -> Result<StoredDocument, StoreError> {
    self.check_writable()?;
    let mut docs = self.docs.lock();
    let stored = StoredDocument {
      document_id: format!("booking-{}", docs.bookings.len() + 1),
    };
    docs.bookings.push((stored.clone(), booking.clone()));
    debug!(document_id = %stored.document_id, booking_id = %booking.id, "Booking document created.");
    Ok(stored)
  }

  async fn reserve_tickets(&self, match_id: &str, quantity: u32) -> Result<Reservation, StoreError> {
    self.check_writable()?;
    let mut docs = self.docs.lock();
    let Some(fixture) = docs.fixtures.get_mut(match_id) else {
      return Ok(Reservation::MatchMissing);
    };
    if !fixture.has_tickets {
      return Ok(Reservation::TicketingClosed);
    }
    let available = fixture.availability();
    if available < quantity {
      return Ok(Reservation::Insufficient { available });
    }
    let remaining = available - quantity;
    fixture.ticket_availability = Some(i64::from(remaining));
    Ok(Reservation::Reserved { remaining })
  }

  async fn release_tickets(&self, match_id: &str, quantity: u32) -> Result<(), StoreError> {
    self.check_writable()?;
    if let Some(fixture) = self.docs.lock().fixtures.get_mut(match_id) {
      let restored = i64::from(fixture.availability()) + i64::from(quantity);
      fixture.ticket_availability = Some(restored);
    }
    Ok(())
  }
}

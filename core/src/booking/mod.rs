// matchday/src/booking/mod.rs

//! Ticket booking: one registered pipeline plus the function that runs it and
//! turns the final context into a [`BookingOutcome`].

mod pipeline;

pub use pipeline::register_booking_pipeline;

use crate::collaborators::Collaborators;
use crate::error::{ServiceError, ServiceResult};
use crate::models::{Booking, Fixture};
use crate::notify::NotificationReport;
use crate::pipeline::ContextData;
use crate::registry::Registry;
use crate::validation::BookingRequest;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

pub mod steps {
  pub const ENSURE_WRITE_ACCESS: &str = "ensure_write_access";
  pub const VALIDATE_REQUEST: &str = "validate_request";
  pub const LOAD_FIXTURE: &str = "load_fixture";
  pub const RESERVE_TICKETS: &str = "reserve_tickets";
  pub const CREATE_BOOKING: &str = "create_booking";
  pub const NOTIFY_CUSTOMER: &str = "notify_customer";
  pub const NOTIFY_ADMIN: &str = "notify_admin";
}

/// What happened to the fixture's availability counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum InventoryUpdate {
  Pending,
  Reserved { quantity: u32, remaining: u32 },
  /// The store could not be written. The booking still stands.
  Failed { reason: String },
}

/// Working data of one booking request.
#[derive(Debug)]
pub struct BookingCtxData {
  pub collaborators: Collaborators,
  pub payload: Value,
  pub request: Option<BookingRequest>,
  pub fixture: Option<Fixture>,
  pub inventory: InventoryUpdate,
  pub booking: Option<Booking>,
  pub document_id: Option<String>,
  pub notifications: NotificationReport,
}

impl BookingCtxData {
  pub fn new(collaborators: Collaborators, payload: Value) -> Self {
    Self {
      collaborators,
      payload,
      request: None,
      fixture: None,
      inventory: InventoryUpdate::Pending,
      booking: None,
      document_id: None,
      notifications: NotificationReport::default(),
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookingOutcome {
  pub booking: Booking,
  pub fixture: Fixture,
  pub inventory: InventoryUpdate,
  pub notifications: NotificationReport,
}

pub fn sold_out_message(available: u32, requested: u32) -> String {
  format!("Only {available} ticket(s) available. You requested {requested}.")
}

/// Runs the booking pipeline registered in `registry` for `payload`.
#[instrument(name = "booking::place", skip_all)]
pub async fn place_booking(
  registry: &Registry<ServiceError>,
  collaborators: &Collaborators,
  payload: Value,
) -> ServiceResult<BookingOutcome> {
  let ctx = ContextData::new(BookingCtxData::new(collaborators.clone(), payload));
  let report = registry.run(ctx.clone()).await?;

  if !report.is_completed() {
    return Err(ServiceError::Internal("booking pipeline stopped early".to_string()));
  }

  let mut data = ctx.write();
  let (Some(booking), Some(fixture)) = (data.booking.take(), data.fixture.take()) else {
    return Err(ServiceError::Internal("booking pipeline finished without a booking".to_string()));
  };

  info!(
    booking_id = %booking.id,
    match_id = %booking.match_id,
    quantity = booking.quantity,
    soft_failures = report.soft_failures.len(),
    "Booking placed."
  );

  Ok(BookingOutcome {
    booking,
    fixture,
    inventory: std::mem::replace(&mut data.inventory, InventoryUpdate::Pending),
    notifications: std::mem::take(&mut data.notifications),
  })
}

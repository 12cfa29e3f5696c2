// matchday/src/booking/pipeline.rs

use crate::booking::{sold_out_message, steps, BookingCtxData, InventoryUpdate};
use crate::error::{PipelineError, ServiceError, ServiceResult};
use crate::ids::new_booking_id;
use crate::models::Booking;
use crate::notify::{templates, DeliveryStatus};
use crate::pipeline::{ContextData, Pipeline, PipelineControl};
use crate::registry::Registry;
use crate::store::{ContentStore, Reservation, StoreError};
use crate::validation::{validate_booking, BookingRequest};
use chrono::Utc;
use tracing::{error, info, warn};

type Ctx = ContextData<BookingCtxData>;

pub fn register_booking_pipeline(registry: &Registry<ServiceError>) -> Result<(), PipelineError> {
  let mut p = Pipeline::<BookingCtxData, ServiceError>::new(&[
    (steps::ENSURE_WRITE_ACCESS, false, None),
    (steps::VALIDATE_REQUEST, false, None),
    (steps::LOAD_FIXTURE, false, None),
    (steps::RESERVE_TICKETS, false, None),
    (steps::CREATE_BOOKING, false, None),
    (steps::NOTIFY_CUSTOMER, true, None),
    (steps::NOTIFY_ADMIN, true, None),
  ]);

  p.on_root(steps::ENSURE_WRITE_ACCESS, ensure_write_access)?;
  p.on_root(steps::VALIDATE_REQUEST, validate_request)?;
  p.on_root(steps::LOAD_FIXTURE, load_fixture)?;
  p.on_root(steps::RESERVE_TICKETS, reserve_tickets)?;
  p.on_root(steps::CREATE_BOOKING, create_booking)?;
  p.on_root(steps::NOTIFY_CUSTOMER, notify_customer)?;
  p.on_root(steps::NOTIFY_ADMIN, notify_admin)?;

  registry.register_pipeline(p);
  info!("Booking pipeline registered.");
  Ok(())
}

/// Bookings write to the store, so a store without write credentials is a
/// configuration fault. Checked before anything is read.
async fn ensure_write_access(ctx: Ctx) -> ServiceResult<PipelineControl> {
  let store = ctx.with(|d| d.collaborators.store.clone());
  store.ensure_writable().map_err(|e| {
    error!(error = %e, "Booking refused: content store is read-only.");
    ServiceError::Config(e.to_string())
  })?;
  Ok(PipelineControl::Continue)
}

async fn validate_request(ctx: Ctx) -> ServiceResult<PipelineControl> {
  let parsed = ctx.with(|d| validate_booking(&d.payload));
  match parsed {
    Ok(request) => {
      ctx.write().request = Some(request);
      Ok(PipelineControl::Continue)
    }
    Err(errors) => {
      info!(fields = errors.len(), "Booking request failed validation.");
      Err(ServiceError::Validation(errors))
    }
  }
}

fn request_of(ctx: &Ctx) -> ServiceResult<BookingRequest> {
  ctx
    .with(|d| d.request.clone())
    .ok_or_else(|| ServiceError::Internal("booking request missing from context".to_string()))
}

async fn load_fixture(ctx: Ctx) -> ServiceResult<PipelineControl> {
  let request = request_of(&ctx)?;
  let store = ctx.with(|d| d.collaborators.store.clone());

  let Some(fixture) = store.fetch_fixture(&request.match_id).await? else {
    info!(match_id = %request.match_id, "Booking for unknown match.");
    return Err(ServiceError::NotFound("Match not found".to_string()));
  };

  if !fixture.has_tickets {
    return Err(ServiceError::Rule("Tickets are not available for this match".to_string()));
  }
  let available = fixture.availability();
  if available < request.quantity {
    info!(match_id = %fixture.id, available, requested = request.quantity, "Not enough tickets.");
    return Err(ServiceError::Rule(sold_out_message(available, request.quantity)));
  }

  ctx.write().fixture = Some(fixture);
  Ok(PipelineControl::Continue)
}

/// Takes the tickets with one conditional store operation. A lost race is a
/// rule violation; a store fault other than contention is recorded and the
/// booking goes ahead.
async fn reserve_tickets(ctx: Ctx) -> ServiceResult<PipelineControl> {
  let request = request_of(&ctx)?;
  let store = ctx.with(|d| d.collaborators.store.clone());

  let update = match store.reserve_tickets(&request.match_id, request.quantity).await {
    Ok(Reservation::Reserved { remaining }) => {
      info!(match_id = %request.match_id, quantity = request.quantity, remaining, "Tickets reserved.");
      InventoryUpdate::Reserved {
        quantity: request.quantity,
        remaining,
      }
    }
    Ok(Reservation::Insufficient { available }) => {
      info!(match_id = %request.match_id, available, requested = request.quantity, "Reservation lost a race.");
      return Err(ServiceError::Rule(sold_out_message(available, request.quantity)));
    }
    Ok(Reservation::TicketingClosed) => {
      return Err(ServiceError::Rule("Tickets are not available for this match".to_string()));
    }
    Ok(Reservation::MatchMissing) => {
      return Err(ServiceError::NotFound("Match not found".to_string()));
    }
    Err(e @ StoreError::Contention(_)) => {
      return Err(contention_outcome(store.as_ref(), &request, e).await);
    }
    Err(e) => {
      warn!(match_id = %request.match_id, error = %e, "Inventory update failed; booking continues.");
      InventoryUpdate::Failed { reason: e.to_string() }
    }
  };

  ctx.write().inventory = update;
  Ok(PipelineControl::Continue)
}

/// Every conditional write lost to a competing buyer. Reports the fresh
/// availability when the tickets are gone; otherwise fails without booking.
async fn contention_outcome(store: &dyn ContentStore, request: &BookingRequest, err: StoreError) -> ServiceError {
  warn!(match_id = %request.match_id, error = %err, "Reservation kept losing to concurrent writes.");
  match store.fetch_fixture(&request.match_id).await {
    Ok(Some(fixture)) if fixture.availability() < request.quantity => {
      ServiceError::Rule(sold_out_message(fixture.availability(), request.quantity))
    }
    Ok(None) => ServiceError::NotFound("Match not found".to_string()),
    _ => ServiceError::Store(err),
  }
}

async fn create_booking(ctx: Ctx) -> ServiceResult<PipelineControl> {
  let request = request_of(&ctx)?;
  let (store, inventory) = ctx.with(|d| (d.collaborators.store.clone(), d.inventory.clone()));

  let booking = Booking::confirmed(
    new_booking_id(),
    request.match_id.clone(),
    request.name,
    request.email,
    request.quantity,
    Utc::now(),
  );

  match store.create_booking(&booking).await {
    Ok(stored) => {
      info!(booking_id = %booking.id, document_id = %stored.document_id, "Booking recorded.");
      let mut data = ctx.write();
      data.document_id = Some(stored.document_id);
      data.booking = Some(booking);
      Ok(PipelineControl::Continue)
    }
    Err(e) => {
      error!(booking_id = %booking.id, error = %e, "Booking record could not be created.");
      if let InventoryUpdate::Reserved { quantity, .. } = inventory {
        match store.release_tickets(&request.match_id, quantity).await {
          Ok(()) => info!(match_id = %request.match_id, quantity, "Reserved tickets released."),
          Err(release_err) => error!(
            match_id = %request.match_id,
            quantity,
            error = %release_err,
            "Reserved tickets could not be released."
          ),
        }
      }
      Err(ServiceError::Store(e))
    }
  }
}

async fn notify_customer(ctx: Ctx) -> ServiceResult<PipelineControl> {
  let (collab, booking, fixture) = ctx.with(|d| (d.collaborators.clone(), d.booking.clone(), d.fixture.clone()));
  let (Some(booking), Some(fixture)) = (booking, fixture) else {
    return Err(ServiceError::Internal("nothing to notify about".to_string()));
  };

  let message = templates::booking_confirmation(&collab.notify, &booking, &fixture);
  let result = collab.mailer.send(&message).await;
  ctx.write().notifications.customer = DeliveryStatus::from_send(&result, collab.mailer.delivers());
  result?;
  Ok(PipelineControl::Continue)
}

async fn notify_admin(ctx: Ctx) -> ServiceResult<PipelineControl> {
  let (collab, booking, fixture) = ctx.with(|d| (d.collaborators.clone(), d.booking.clone(), d.fixture.clone()));
  let (Some(booking), Some(fixture)) = (booking, fixture) else {
    return Err(ServiceError::Internal("nothing to notify about".to_string()));
  };

  let message = templates::booking_admin_alert(&collab.notify, &booking, &fixture);
  let result = collab.mailer.send(&message).await;
  ctx.write().notifications.admin = DeliveryStatus::from_send(&result, collab.mailer.delivers());
  result?;
  Ok(PipelineControl::Continue)
}

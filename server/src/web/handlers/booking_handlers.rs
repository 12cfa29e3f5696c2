// matchday_server/src/web/handlers/booking_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::handlers::json_body;
use matchday::InventoryUpdate;

#[instrument(name = "handler::create_booking", skip(app_state, body))]
pub async fn create_booking_handler(app_state: web::Data<AppState>, body: web::Bytes) -> Result<HttpResponse, AppError> {
  let payload = json_body(&body)?;
  let outcome = app_state.club.place_booking(payload).await?;

  if let InventoryUpdate::Failed { reason } = &outcome.inventory {
    warn!(
      booking_id = %outcome.booking.id,
      %reason,
      "Booking confirmed but availability was not updated; reconcile in the CMS."
    );
  }
  info!(
    booking_id = %outcome.booking.id,
    customer_email = ?outcome.notifications.customer,
    admin_email = ?outcome.notifications.admin,
    "Booking request completed."
  );

  Ok(HttpResponse::Ok().json(json!({
    "success": true,
    "bookingId": outcome.booking.id,
    "booking": outcome.booking,
  })))
}

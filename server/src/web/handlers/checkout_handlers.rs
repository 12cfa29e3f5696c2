// matchday_server/src/web/handlers/checkout_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::handlers::json_body;
use matchday::checkout::ORDER_PLACED_MESSAGE;

#[instrument(name = "handler::checkout", skip(app_state, body))]
pub async fn checkout_handler(app_state: web::Data<AppState>, body: web::Bytes) -> Result<HttpResponse, AppError> {
  let payload = json_body(&body)?;
  let outcome = app_state.club.place_order(payload).await?;

  info!(
    order_id = %outcome.order.id,
    total = %outcome.order.total,
    customer_email = ?outcome.notifications.customer,
    admin_email = ?outcome.notifications.admin,
    "Checkout request completed."
  );

  Ok(HttpResponse::Ok().json(json!({
    "success": true,
    "orderId": outcome.order.id,
    "message": ORDER_PLACED_MESSAGE,
  })))
}

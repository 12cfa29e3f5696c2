// matchday_server/src/web/handlers/mod.rs

pub mod booking_handlers;
pub mod calendar_handlers;
pub mod checkout_handlers;
pub mod match_handlers;

use crate::errors::AppError;
use actix_web::web::Bytes;
use serde_json::Value;

/// Parses a JSON body. Field-level checks happen later, in the pipelines.
pub(crate) fn json_body(body: &Bytes) -> Result<Value, AppError> {
  serde_json::from_slice(body).map_err(|e| {
    tracing::info!(error = %e, "Unreadable JSON body.");
    AppError::BadRequest("Request body must be valid JSON".to_string())
  })
}

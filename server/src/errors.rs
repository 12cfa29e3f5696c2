// matchday_server/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use matchday::{FieldError, ServiceError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {} field(s)", .0.len())]
  Validation(Vec<FieldError>),

  /// Rejected by a business rule or an unreadable body.
  #[error("Bad Request: {0}")]
  BadRequest(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl From<ServiceError> for AppError {
  fn from(err: ServiceError) -> Self {
    match err {
      ServiceError::Validation(fields) => AppError::Validation(fields),
      ServiceError::NotFound(m) => AppError::NotFound(m),
      ServiceError::Rule(m) => AppError::BadRequest(m),
      ServiceError::Config(m) => AppError::Config(m),
      other => AppError::Internal(other.to_string()),
    }
  }
}

impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    AppError::Internal(err.to_string())
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::info!(application_error = %self, "Request rejected");
    }

    let body = match self {
      AppError::Validation(details) => json!({ "error": "Validation failed", "details": details }),
      AppError::BadRequest(m) | AppError::NotFound(m) => json!({ "error": m }),
      AppError::Config(_) => json!({ "error": "Server configuration error" }),
      AppError::Internal(_) => json!({ "error": "An internal error occurred" }),
    };
    HttpResponse::build(status).json(body)
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;

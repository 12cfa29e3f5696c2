// matchday/src/error.rs

//! Errors raised by the pipeline engine itself, as opposed to the errors
//! returned by the handlers that run inside it.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PipelineError {
  #[error("Step not found: {step_name}")]
  StepNotFound { step_name: String },

  #[error("Step already defined: {step_name}")]
  DuplicateStep { step_name: String },

  #[error("Handler missing for required step: {step_name}")]
  HandlerMissing { step_name: String },

  #[error("No pipeline registered for context type {type_name}")]
  NotRegistered { type_name: String },

  #[error("Context type mismatch during dispatch (expected {expected_type})")]
  TypeMismatch { expected_type: String },

  #[error("Internal pipeline error: {0}")]
  Internal(String),
}

/// Failure of a booking or checkout request, as seen by whoever called the
/// service. The HTTP layer maps each variant to a status code.
#[derive(Debug, Error)]
pub enum ServiceError {
  #[error("Invalid request ({} field error(s))", .0.len())]
  Validation(Vec<crate::validation::FieldError>),

  #[error("{0}")]
  NotFound(String),

  /// A business rule refused the request (ticketing closed, sold out).
  #[error("{0}")]
  Rule(String),

  #[error("Configuration error: {0}")]
  Config(String),

  #[error(transparent)]
  Store(#[from] crate::store::StoreError),

  #[error(transparent)]
  Mail(#[from] crate::notify::MailError),

  #[error(transparent)]
  Pipeline(#[from] PipelineError),

  #[error("Internal error: {0}")]
  Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

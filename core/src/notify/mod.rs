// matchday/src/notify/mod.rs

//! Outbound email: the `Mailer` seam, a log-only implementation, delivery
//! bookkeeping and the HTML templates.

pub mod templates;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
  pub from: String,
  pub to: String,
  pub subject: String,
  pub html: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MailError {
  #[error("email transport failed: {0}")]
  Transport(String),

  #[error("email provider rejected the message ({status}): {message}")]
  Rejected { status: u16, message: String },
}

#[async_trait]
pub trait Mailer: Send + Sync {
  /// Sends `message` and returns the provider's message id.
  async fn send(&self, message: &EmailMessage) -> Result<String, MailError>;

  /// False for mailers that only record messages instead of delivering them.
  fn delivers(&self) -> bool {
    true
  }
}

/// Used when no email provider is configured: logs each message and reports success.
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
  async fn send(&self, message: &EmailMessage) -> Result<String, MailError> {
    let message_id = format!("logged_{}", uuid::Uuid::new_v4());
    info!(
      to = %message.to,
      subject = %message.subject,
      %message_id,
      "Email provider not configured; message logged instead of sent."
    );
    Ok(message_id)
  }

  fn delivers(&self) -> bool {
    false
  }
}

/// Sender identity and links used in every email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifySettings {
  pub from: String,
  pub admin_email: String,
  pub club_name: String,
  pub site_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum DeliveryStatus {
  #[serde(rename_all = "camelCase")]
  Sent { message_id: String },
  /// Accepted by a log-only mailer.
  Logged,
  Failed { reason: String },
  /// The step never ran because an earlier step ended the pipeline.
  Skipped,
}

impl DeliveryStatus {
  pub fn from_send(result: &Result<String, MailError>, delivered: bool) -> Self {
    match result {
      Ok(_) if !delivered => DeliveryStatus::Logged,
      Ok(message_id) => DeliveryStatus::Sent {
        message_id: message_id.clone(),
      },
      Err(e) => DeliveryStatus::Failed { reason: e.to_string() },
    }
  }

  pub fn is_failed(&self) -> bool {
    matches!(self, DeliveryStatus::Failed { .. })
  }
}

/// Delivery result for the two emails sent after a booking or an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationReport {
  pub customer: DeliveryStatus,
  pub admin: DeliveryStatus,
}

impl Default for NotificationReport {
  fn default() -> Self {
    Self {
      customer: DeliveryStatus::Skipped,
      admin: DeliveryStatus::Skipped,
    }
  }
}

// matchday_server/src/services/resend.rs

use async_trait::async_trait;
use matchday::{EmailMessage, MailError, Mailer};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{info, instrument};

pub const RESEND_API_URL: &str = "https://api.resend.com";

#[derive(Debug, Deserialize)]
struct SendResponse {
  id: String,
}

/// Transactional email through the Resend HTTP API.
#[derive(Clone)]
pub struct ResendMailer {
  client: Client,
  api_key: String,
  api_url: String,
}

impl ResendMailer {
  pub fn new(api_key: String, timeout: Duration) -> Result<Self, MailError> {
    Self::with_base_url(api_key, RESEND_API_URL, timeout)
  }

  pub fn with_base_url(api_key: String, api_url: &str, timeout: Duration) -> Result<Self, MailError> {
    let client = Client::builder()
      .timeout(timeout)
      .build()
      .map_err(|e| MailError::Transport(e.to_string()))?;
    Ok(Self {
      client,
      api_key,
      api_url: api_url.trim_end_matches('/').to_string(),
    })
  }
}

#[async_trait]
impl Mailer for ResendMailer {
  #[instrument(skip(self, message), fields(to = %message.to, subject = %message.subject))]
  async fn send(&self, message: &EmailMessage) -> Result<String, MailError> {
    let response = self
      .client
      .post(format!("{}/emails", self.api_url))
      .bearer_auth(&self.api_key)
      .json(&json!({
        "from": message.from,
        "to": [message.to],
        "subject": message.subject,
        "html": message.html,
      }))
      .send()
      .await
      .map_err(|e| MailError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      return Err(MailError::Rejected {
        status: status.as_u16(),
        message: body,
      });
    }

    let sent: SendResponse = response.json().await.map_err(|e| MailError::Transport(e.to_string()))?;
    info!(message_id = %sent.id, "Email accepted by provider.");
    Ok(sent.id)
  }
}

// tests/common/mod.rs
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, Utc};
use matchday::{Club, Collaborators, EmailMessage, Fixture, MailError, Mailer, MemoryStore, NotifySettings};
use matchday_server::config::AppConfig;
use matchday_server::state::AppState;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub fn memory_config() -> AppConfig {
  let vars: HashMap<&str, &str> = [
    ("CONTENT_STORE", "memory"),
    ("SITE_URL", "https://club.test"),
    ("CLUB_NAME", "Thimphu City FC"),
    ("ADMIN_EMAIL", "admin@club.test"),
  ]
  .into_iter()
  .collect();
  AppConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap()
}

pub fn fixture(id: &str, availability: i64) -> Fixture {
  Fixture {
    id: id.to_string(),
    home_team: "Thimphu City".to_string(),
    away_team: "Paro FC".to_string(),
    competition: Some("Bhutan Premier League".to_string()),
    date: Utc::now() + Duration::days(10),
    venue: Some("Changlimithang Stadium".to_string()),
    has_tickets: true,
    ticket_availability: Some(availability),
  }
}

#[derive(Debug, Default)]
pub struct RecordingMailer {
  pub sent: Mutex<Vec<EmailMessage>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
  async fn send(&self, message: &EmailMessage) -> Result<String, MailError> {
    let mut sent = self.sent.lock().unwrap();
    sent.push(message.clone());
    Ok(format!("msg-{}", sent.len()))
  }
}

pub fn app_state(store: Arc<MemoryStore>, mailer: Arc<dyn Mailer>) -> AppState {
  let config = memory_config();
  let notify = NotifySettings {
    from: config.email_from.clone(),
    admin_email: config.admin_email.clone(),
    club_name: config.club_name.clone(),
    site_url: config.site_url.clone(),
  };
  let collaborators = Collaborators::new(store, notify)
    .with_mailer(mailer)
    .with_shipping_fee(config.shipping_fee);
  AppState {
    club: Arc::new(Club::new(collaborators).unwrap()),
    config: Arc::new(config),
  }
}

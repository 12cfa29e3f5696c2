// tests/common/mod.rs
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use matchday::{
  Booking, Club, Collaborators, ContentStore, ContextData, EmailMessage, Fixture, MailError, Mailer, MemoryStore,
  NotifySettings, PipelineControl, PipelineError, Reservation, StoreError, StoredDocument,
};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::Level;

// --- Engine test context ---
#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub counter: i32,
  pub message: String,
  pub steps_executed: Vec<String>,
  pub should_stop_at: Option<String>,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Engine error: {0}")]
  Engine(PipelineError),

  #[error("Test handler failed: {0}")]
  Handler(String),
}

impl From<PipelineError> for TestError {
  fn from(e: PipelineError) -> Self {
    TestError::Engine(e)
  }
}

pub fn create_simple_handler(
  step_name: &'static str,
  message_to_append: &'static str,
) -> matchday::pipeline::Handler<TestContext, TestError> {
  Box::new(move |ctx: ContextData<TestContext>| {
    Box::pin(async move {
      let mut guard = ctx.write();
      guard.counter += 1;
      guard.message.push_str(message_to_append);
      guard.steps_executed.push(step_name.to_string());
      if guard.should_stop_at.as_deref() == Some(step_name) {
        return Ok(PipelineControl::Stop);
      }
      Ok(PipelineControl::Continue)
    })
  })
}

pub fn create_failing_handler(
  step_name: &'static str,
  error_message: &'static str,
) -> matchday::pipeline::Handler<TestContext, TestError> {
  Box::new(move |ctx: ContextData<TestContext>| {
    Box::pin(async move {
      ctx.write().steps_executed.push(step_name.to_string());
      Err(TestError::Handler(error_message.to_string()))
    })
  })
}

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Domain fixtures ---
pub fn kickoff_in(days: i64) -> DateTime<Utc> {
  let today = Utc::now().date_naive().and_hms_opt(9, 30, 0).map(|dt| dt.and_utc());
  today.unwrap_or_else(Utc::now) + Duration::days(days)
}

pub fn fixture(id: &str, availability: i64) -> Fixture {
  Fixture {
    id: id.to_string(),
    home_team: "Thimphu City".to_string(),
    away_team: "Paro FC".to_string(),
    competition: Some("Bhutan Premier League".to_string()),
    date: kickoff_in(10),
    venue: Some("Changlimithang Stadium".to_string()),
    has_tickets: true,
    ticket_availability: Some(availability),
  }
}

pub fn frozen_fixture(id: &str, home: &str, away: &str, day: u32) -> Fixture {
  Fixture {
    id: id.to_string(),
    home_team: home.to_string(),
    away_team: away.to_string(),
    competition: Some("Bhutan Premier League, Round 3".to_string()),
    date: Utc.with_ymd_and_hms(2026, 11, day, 9, 30, 0).unwrap(),
    venue: Some("Changlimithang Stadium; Thimphu".to_string()),
    has_tickets: true,
    ticket_availability: Some(100),
  }
}

pub fn notify_settings() -> NotifySettings {
  NotifySettings {
    from: "Thimphu City FC <tickets@club.test>".to_string(),
    admin_email: "admin@club.test".to_string(),
    club_name: "Thimphu City FC".to_string(),
    site_url: "https://club.test".to_string(),
  }
}

pub fn build_club(store: Arc<dyn ContentStore>, mailer: Arc<dyn Mailer>) -> Club {
  let collaborators = Collaborators::new(store, notify_settings()).with_mailer(mailer);
  Club::new(collaborators).unwrap()
}

// --- Mailers ---
#[derive(Debug, Default)]
pub struct RecordingMailer {
  pub sent: Mutex<Vec<EmailMessage>>,
}

impl RecordingMailer {
  pub fn messages(&self) -> Vec<EmailMessage> {
    self.sent.lock().clone()
  }

  pub fn message_to(&self, to: &str) -> Option<EmailMessage> {
    self.sent.lock().iter().find(|m| m.to == to).cloned()
  }
}

#[async_trait]
impl Mailer for RecordingMailer {
  async fn send(&self, message: &EmailMessage) -> Result<String, MailError> {
    let mut sent = self.sent.lock();
    sent.push(message.clone());
    Ok(format!("msg-{}", sent.len()))
  }
}

#[derive(Debug, Default)]
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
  async fn send(&self, _message: &EmailMessage) -> Result<String, MailError> {
    Err(MailError::Rejected {
      status: 422,
      message: "domain not verified".to_string(),
    })
  }
}

// --- Store wrapper with switchable faults ---
#[derive(Debug)]
pub struct FaultyStore {
  pub inner: Arc<MemoryStore>,
  pub fail_reserve: AtomicBool,
  pub fail_create: AtomicBool,
  /// Tickets a competing buyer takes before every reservation gives up.
  pub competitor_takes: Mutex<Option<u32>>,
  pub fetch_calls: Mutex<usize>,
}

impl FaultyStore {
  pub fn new(inner: Arc<MemoryStore>) -> Self {
    Self {
      inner,
      fail_reserve: AtomicBool::new(false),
      fail_create: AtomicBool::new(false),
      competitor_takes: Mutex::new(None),
      fetch_calls: Mutex::new(0),
    }
  }

  pub fn failing_reserve(self) -> Self {
    self.fail_reserve.store(true, Ordering::SeqCst);
    self
  }

  pub fn contended(self, competitor_takes: u32) -> Self {
    *self.competitor_takes.lock() = Some(competitor_takes);
    self
  }

  pub fn failing_create(self) -> Self {
    self.fail_create.store(true, Ordering::SeqCst);
    self
  }
}

#[async_trait]
impl ContentStore for FaultyStore {
  fn ensure_writable(&self) -> Result<(), StoreError> {
    self.inner.ensure_writable()
  }

  async fn fetch_fixture(&self, id: &str) -> Result<Option<Fixture>, StoreError> {
    *self.fetch_calls.lock() += 1;
    self.inner.fetch_fixture(id).await
  }

  async fn upcoming_fixtures(&self, from: DateTime<Utc>, limit: usize) -> Result<Vec<Fixture>, StoreError> {
    self.inner.upcoming_fixtures(from, limit).await
  }

  async fn create_booking(&self, booking: &Booking) -> Result<StoredDocument, StoreError> {
    if self.fail_create.load(Ordering::SeqCst) {
      return Err(StoreError::Api {
        status: 500,
        message: "mutation failed".to_string(),
      });
    }
    self.inner.create_booking(booking).await
  }

  async fn reserve_tickets(&self, match_id: &str, quantity: u32) -> Result<Reservation, StoreError> {
    if self.fail_reserve.load(Ordering::SeqCst) {
      return Err(StoreError::Transport("connection reset".to_string()));
    }
    let competitor = *self.competitor_takes.lock();
    if let Some(taken) = competitor {
      if taken > 0 {
        self.inner.reserve_tickets(match_id, taken).await?;
      }
      return Err(StoreError::Contention(format!(
        "document {} kept changing; gave up after retries",
        match_id
      )));
    }
    self.inner.reserve_tickets(match_id, quantity).await
  }

  async fn release_tickets(&self, match_id: &str, quantity: u32) -> Result<(), StoreError> {
    self.inner.release_tickets(match_id, quantity).await
  }
}

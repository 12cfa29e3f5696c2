// matchday/src/club.rs

//! The entry point used by the HTTP layer: owns the pipeline registry and the
//! collaborators, and exposes one method per operation.

use crate::booking::{self, BookingOutcome};
use crate::calendar::{calendar_links, generate_ics, CalendarLinks, CalendarOptions};
use crate::checkout::{self, OrderOutcome};
use crate::collaborators::Collaborators;
use crate::error::{PipelineError, ServiceError, ServiceResult};
use crate::models::Fixture;
use crate::registry::Registry;
use chrono::Utc;
use serde_json::Value;
use tracing::instrument;

pub struct Club {
  registry: Registry<ServiceError>,
  collaborators: Collaborators,
}

impl Club {
  pub fn new(collaborators: Collaborators) -> Result<Self, PipelineError> {
    let registry = Registry::new();
    booking::register_booking_pipeline(&registry)?;
    checkout::register_checkout_pipeline(&registry)?;
    Ok(Self { registry, collaborators })
  }

  pub fn collaborators(&self) -> &Collaborators {
    &self.collaborators
  }

  pub async fn place_booking(&self, payload: Value) -> ServiceResult<BookingOutcome> {
    booking::place_booking(&self.registry, &self.collaborators, payload).await
  }

  pub async fn place_order(&self, payload: Value) -> ServiceResult<OrderOutcome> {
    checkout::place_order(&self.registry, &self.collaborators, payload).await
  }

  #[instrument(skip(self))]
  pub async fn upcoming_fixtures(&self, limit: usize) -> ServiceResult<Vec<Fixture>> {
    Ok(self.collaborators.store.upcoming_fixtures(Utc::now(), limit).await?)
  }

  pub async fn fixture(&self, id: &str) -> ServiceResult<Fixture> {
    self
      .collaborators
      .store
      .fetch_fixture(id)
      .await?
      .ok_or_else(|| ServiceError::NotFound("Match not found".to_string()))
  }

  pub async fn fixtures_calendar(&self, options: &CalendarOptions, limit: usize) -> ServiceResult<String> {
    let fixtures = self.upcoming_fixtures(limit).await?;
    Ok(generate_ics(&fixtures, options, Utc::now()))
  }

  pub async fn fixture_calendar(&self, id: &str, options: &CalendarOptions) -> ServiceResult<String> {
    let fixture = self.fixture(id).await?;
    Ok(generate_ics(std::slice::from_ref(&fixture), options, Utc::now()))
  }

  pub async fn fixture_links(&self, id: &str) -> ServiceResult<CalendarLinks> {
    Ok(calendar_links(&self.fixture(id).await?))
  }
}

impl std::fmt::Debug for Club {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Club").field("collaborators", &self.collaborators).finish_non_exhaustive()
  }
}

// matchday/src/models/fixture.rs

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Every fixture is exported to calendars as a fixed two-hour event.
pub const FIXTURE_DURATION_HOURS: i64 = 2;

/// A scheduled match as stored in the content store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
  #[serde(rename = "_id")]
  pub id: String,
  pub home_team: String,
  pub away_team: String,
  #[serde(default)]
  pub competition: Option<String>,
  pub date: DateTime<Utc>,
  #[serde(default)]
  pub venue: Option<String>,
  #[serde(default)]
  pub has_tickets: bool,
  /// Raw counter as edited in the CMS; may be missing or, through manual
  /// edits, negative. Read it through [`Fixture::availability`].
  #[serde(default)]
  pub ticket_availability: Option<i64>,
}

impl Fixture {
  pub fn title(&self) -> String {
    format!("{} vs {}", self.home_team, self.away_team)
  }

  /// Unsold tickets, floored at zero.
  pub fn availability(&self) -> u32 {
    let raw = self.ticket_availability.unwrap_or(0).max(0);
    u32::try_from(raw).unwrap_or(u32::MAX)
  }

  pub fn ends_at(&self) -> DateTime<Utc> {
    self.date + Duration::hours(FIXTURE_DURATION_HOURS)
  }
}

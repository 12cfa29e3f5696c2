// matchday/src/calendar/links.rs

//! "Add to calendar" deep links. Each provider takes the event in its own
//! query-string dialect.

use crate::calendar::event_description;
use crate::calendar::ics::format_utc;
use crate::models::Fixture;
use serde::Serialize;
use urlencoding::encode;

const GOOGLE_BASE: &str = "https://calendar.google.com/calendar/render";
const OUTLOOK_BASE: &str = "https://outlook.live.com/calendar/0/deeplink/compose";
const YAHOO_BASE: &str = "https://calendar.yahoo.com/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarLinks {
  pub google: String,
  pub outlook: String,
  pub yahoo: String,
}

fn query(params: &[(&str, &str)]) -> String {
  params
    .iter()
    .map(|(k, v)| format!("{}={}", k, encode(v)))
    .collect::<Vec<_>>()
    .join("&")
}

pub fn google_link(fixture: &Fixture) -> String {
  let dates = format!("{}/{}", format_utc(fixture.date), format_utc(fixture.ends_at()));
  let details = event_description(fixture);
  let location = fixture.venue.clone().unwrap_or_default();
  format!(
    "{GOOGLE_BASE}?{}",
    query(&[
      ("action", "TEMPLATE"),
      ("text", &fixture.title()),
      ("dates", &dates),
      ("details", &details),
      ("location", &location),
    ])
  )
}

pub fn outlook_link(fixture: &Fixture) -> String {
  let start = fixture.date.format("%Y-%m-%dT%H:%M:%SZ").to_string();
  let end = fixture.ends_at().format("%Y-%m-%dT%H:%M:%SZ").to_string();
  let body = event_description(fixture);
  let location = fixture.venue.clone().unwrap_or_default();
  format!(
    "{OUTLOOK_BASE}?{}",
    query(&[
      ("path", "/calendar/action/compose"),
      ("rru", "addevent"),
      ("subject", &fixture.title()),
      ("startdt", &start),
      ("enddt", &end),
      ("body", &body),
      ("location", &location),
    ])
  )
}

pub fn yahoo_link(fixture: &Fixture) -> String {
  let desc = event_description(fixture);
  let location = fixture.venue.clone().unwrap_or_default();
  format!(
    "{YAHOO_BASE}?{}",
    query(&[
      ("v", "60"),
      ("title", &fixture.title()),
      ("st", &format_utc(fixture.date)),
      ("et", &format_utc(fixture.ends_at())),
      ("desc", &desc),
      ("in_loc", &location),
    ])
  )
}

pub fn calendar_links(fixture: &Fixture) -> CalendarLinks {
  CalendarLinks {
    google: google_link(fixture),
    outlook: outlook_link(fixture),
    yahoo: yahoo_link(fixture),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{TimeZone, Utc};

  fn fixture() -> Fixture {
    Fixture {
      id: "m1".to_string(),
      home_team: "Thimphu City".to_string(),
      away_team: "Paro FC".to_string(),
      competition: None,
      date: Utc.with_ymd_and_hms(2026, 11, 1, 9, 30, 0).unwrap(),
      venue: Some("Changlimithang Stadium".to_string()),
      has_tickets: false,
      ticket_availability: None,
    }
  }

  #[test]
  fn google_link_uses_compact_date_range() {
    let link = google_link(&fixture());
    assert!(link.starts_with("https://calendar.google.com/calendar/render?action=TEMPLATE"));
    assert!(link.contains("text=Thimphu%20City%20vs%20Paro%20FC"));
    assert!(link.contains("dates=20261101T093000Z%2F20261101T113000Z"));
  }

  #[test]
  fn outlook_link_uses_iso_timestamps() {
    let link = outlook_link(&fixture());
    assert!(link.contains("startdt=2026-11-01T09%3A30%3A00Z"));
    assert!(link.contains("enddt=2026-11-01T11%3A30%3A00Z"));
    assert!(link.contains("rru=addevent"));
  }

  #[test]
  fn yahoo_link_carries_location() {
    let link = yahoo_link(&fixture());
    assert!(link.contains("v=60"));
    assert!(link.contains("st=20261101T093000Z"));
    assert!(link.contains("in_loc=Changlimithang%20Stadium"));
  }
}

// matchday/src/calendar/mod.rs

//! Fixture export: iCalendar documents and "add to calendar" links.

pub mod ics;
pub mod links;

pub use ics::{generate_ics, CalendarOptions};
pub use links::{calendar_links, CalendarLinks};

use crate::models::Fixture;

/// Text shown as the event description by every export format.
pub(crate) fn event_description(fixture: &Fixture) -> String {
  let mut parts = Vec::new();
  if let Some(competition) = &fixture.competition {
    parts.push(competition.clone());
  }
  if let Some(venue) = &fixture.venue {
    parts.push(format!("Venue: {venue}"));
  }
  if fixture.has_tickets {
    parts.push("Tickets available online".to_string());
  }
  parts.join("\n")
}

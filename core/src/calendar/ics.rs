// matchday/src/calendar/ics.rs

//! RFC 5545 output. Byte-for-byte deterministic for a given fixture list and
//! `dtstamp`.

use crate::calendar::event_description;
use crate::models::Fixture;
use chrono::{DateTime, Utc};

const CRLF: &str = "\r\n";
const MAX_LINE_OCTETS: usize = 75;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarOptions {
  pub club_name: String,
  /// Shown by calendar apps as the subscription name.
  pub calendar_name: String,
  /// Right-hand side of every event UID.
  pub domain: String,
}

pub fn format_utc(ts: DateTime<Utc>) -> String {
  ts.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Escapes a TEXT value: backslash, semicolon, comma and newlines.
pub fn escape_text(value: &str) -> String {
  let mut out = String::with_capacity(value.len());
  let mut chars = value.chars().peekable();
  while let Some(c) = chars.next() {
    match c {
      '\\' => out.push_str("\\\\"),
      ';' => out.push_str("\\;"),
      ',' => out.push_str("\\,"),
      '\r' => {
        if chars.peek() == Some(&'\n') {
          chars.next();
        }
        out.push_str("\\n");
      }
      '\n' => out.push_str("\\n"),
      other => out.push(other),
    }
  }
  out
}

/// Splits a content line into 75-octet chunks joined by CRLF + space, never
/// inside a UTF-8 sequence.
pub fn fold_line(line: &str) -> String {
  if line.len() <= MAX_LINE_OCTETS {
    return line.to_string();
  }

  let mut out = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
  let mut budget = MAX_LINE_OCTETS;
  let mut used = 0;
  for c in line.chars() {
    let width = c.len_utf8();
    if used + width > budget {
      out.push_str(CRLF);
      out.push(' ');
      // The leading space counts toward the continuation line's length.
      budget = MAX_LINE_OCTETS - 1;
      used = 0;
    }
    out.push(c);
    used += width;
  }
  out
}

fn push_line(out: &mut String, line: &str) {
  out.push_str(&fold_line(line));
  out.push_str(CRLF);
}

fn push_event(out: &mut String, fixture: &Fixture, options: &CalendarOptions, dtstamp: DateTime<Utc>) {
  push_line(out, "BEGIN:VEVENT");
  push_line(out, &format!("UID:{}@{}", fixture.id, options.domain));
  push_line(out, &format!("DTSTAMP:{}", format_utc(dtstamp)));
  push_line(out, &format!("DTSTART:{}", format_utc(fixture.date)));
  push_line(out, &format!("DTEND:{}", format_utc(fixture.ends_at())));
  push_line(out, &format!("SUMMARY:{}", escape_text(&fixture.title())));
  let description = event_description(fixture);
  if !description.is_empty() {
    push_line(out, &format!("DESCRIPTION:{}", escape_text(&description)));
  }
  if let Some(venue) = &fixture.venue {
    push_line(out, &format!("LOCATION:{}", escape_text(venue)));
  }
  if let Some(competition) = &fixture.competition {
    push_line(out, &format!("CATEGORIES:{}", escape_text(competition)));
  }
  push_line(out, "STATUS:CONFIRMED");
  push_line(out, "TRANSP:OPAQUE");
  push_line(out, "END:VEVENT");
}

/// Builds a VCALENDAR with one two-hour VEVENT per fixture, in input order.
pub fn generate_ics(fixtures: &[Fixture], options: &CalendarOptions, dtstamp: DateTime<Utc>) -> String {
  let mut out = String::new();
  push_line(&mut out, "BEGIN:VCALENDAR");
  push_line(&mut out, "VERSION:2.0");
  push_line(&mut out, &format!("PRODID:-//{}//Fixtures//EN", options.club_name.replace("//", "/")));
  push_line(&mut out, "CALSCALE:GREGORIAN");
  push_line(&mut out, "METHOD:PUBLISH");
  push_line(&mut out, &format!("X-WR-CALNAME:{}", escape_text(&options.calendar_name)));
  push_line(&mut out, "X-WR-TIMEZONE:UTC");
  for fixture in fixtures {
    push_event(&mut out, fixture, options, dtstamp);
  }
  push_line(&mut out, "END:VCALENDAR");
  out
}

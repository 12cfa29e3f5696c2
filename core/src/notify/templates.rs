// matchday/src/notify/templates.rs

//! HTML bodies for booking and order emails.
//!
//! Every value that came from a request passes through [`sanitize_html`]
//! before it is placed in a body, and through [`sanitize_header`] before it is
//! placed in a subject.

use crate::models::{Booking, Fixture, Order};
use crate::notify::{EmailMessage, NotifySettings};
use crate::sanitize::{sanitize_header, sanitize_html};
use rust_decimal::Decimal;
use std::fmt::Write;

pub fn format_money(amount: Decimal, currency: &str) -> String {
  format!("{} {:.2}", currency, amount)
}

fn kickoff(fixture: &Fixture) -> String {
  fixture.date.format("%A %-d %B %Y, %H:%M UTC").to_string()
}

fn layout(settings: &NotifySettings, heading: &str, body: &str) -> String {
  format!(
    "<!DOCTYPE html><html><body style=\"font-family:Arial,sans-serif;color:#222\">\
     <h1 style=\"font-size:20px\">{heading}</h1>{body}\
     <p style=\"color:#777;font-size:12px\">{club} &middot; <a href=\"{site}\">{site}</a></p>\
     </body></html>",
    heading = heading,
    body = body,
    club = sanitize_html(&settings.club_name),
    site = sanitize_html(&settings.site_url),
  )
}

fn row(label: &str, value: &str) -> String {
  format!("<tr><td style=\"padding:4px 12px 4px 0\"><strong>{label}</strong></td><td>{value}</td></tr>")
}

fn fixture_rows(fixture: &Fixture) -> String {
  let mut rows = row("Match", &sanitize_html(&fixture.title()));
  rows.push_str(&row("Kick-off", &kickoff(fixture)));
  if let Some(venue) = &fixture.venue {
    rows.push_str(&row("Venue", &sanitize_html(venue)));
  }
  if let Some(competition) = &fixture.competition {
    rows.push_str(&row("Competition", &sanitize_html(competition)));
  }
  rows
}

pub fn booking_confirmation(settings: &NotifySettings, booking: &Booking, fixture: &Fixture) -> EmailMessage {
  let mut rows = row("Booking reference", &sanitize_html(&booking.id));
  rows.push_str(&fixture_rows(fixture));
  rows.push_str(&row("Tickets", &booking.quantity.to_string()));

  let body = format!(
    "<p>Hi {name},</p><p>Your tickets are confirmed. Show this reference at the gate.</p><table>{rows}</table>",
    name = sanitize_html(&booking.name),
  );

  EmailMessage {
    from: settings.from.clone(),
    to: booking.email.clone(),
    subject: sanitize_header(&format!("Booking confirmed: {} ({})", fixture.title(), booking.id)),
    html: layout(settings, "Booking confirmed", &body),
  }
}

pub fn booking_admin_alert(settings: &NotifySettings, booking: &Booking, fixture: &Fixture) -> EmailMessage {
  let mut rows = row("Reference", &sanitize_html(&booking.id));
  rows.push_str(&row("Name", &sanitize_html(&booking.name)));
  rows.push_str(&row("Email", &sanitize_html(&booking.email)));
  rows.push_str(&row("Tickets", &booking.quantity.to_string()));
  rows.push_str(&fixture_rows(fixture));
  rows.push_str(&row("Booked at", &booking.created_at.to_rfc3339()));

  EmailMessage {
    from: settings.from.clone(),
    to: settings.admin_email.clone(),
    subject: sanitize_header(&format!(
      "New booking: {} x{} by {}",
      fixture.title(),
      booking.quantity,
      booking.name
    )),
    html: layout(settings, "New ticket booking", &format!("<table>{rows}</table>")),
  }
}

fn order_table(order: &Order) -> String {
  let mut table = String::from(
    "<table style=\"border-collapse:collapse\"><tr><th align=\"left\">Item</th><th>Size</th><th>Qty</th><th align=\"right\">Price</th></tr>",
  );
  for line in &order.items {
    let _ = write!(
      table,
      "<tr><td>{}</td><td>{}</td><td align=\"center\">{}</td><td align=\"right\">{}</td></tr>",
      sanitize_html(&line.name),
      line.size.as_deref().map(sanitize_html).unwrap_or_else(|| "-".to_string()),
      line.quantity,
      format_money(line.line_total(), &sanitize_html(&line.currency)),
    );
  }
  let currency = sanitize_html(&order.currency);
  let _ = write!(
    table,
    "<tr><td colspan=\"3\">Subtotal</td><td align=\"right\">{}</td></tr>\
     <tr><td colspan=\"3\">Shipping</td><td align=\"right\">{}</td></tr>\
     <tr><td colspan=\"3\"><strong>Total</strong></td><td align=\"right\"><strong>{}</strong></td></tr></table>",
    format_money(order.subtotal, &currency),
    format_money(order.shipping_fee, &currency),
    format_money(order.total, &currency),
  );
  table
}

fn address_block(order: &Order) -> String {
  let c = &order.customer;
  let mut lines = vec![sanitize_html(&c.name), sanitize_html(&c.address)];
  let locality = [c.city.as_str(), c.state.as_str(), c.zip.as_str()]
    .iter()
    .filter(|s| !s.is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(", ");
  lines.push(sanitize_html(&locality));
  lines.push(sanitize_html(&c.country));
  lines.push(format!("Phone: {}", sanitize_html(&c.phone)));
  format!("<p>{}</p>", lines.join("<br>"))
}

pub fn order_confirmation(settings: &NotifySettings, order: &Order) -> EmailMessage {
  let body = format!(
    "<p>Hi {name},</p><p>Thanks for your order <strong>{id}</strong>. \
     Payment is cash on delivery; please have {total} ready when it arrives.</p>{table}\
     <h2 style=\"font-size:16px\">Delivery address</h2>{address}",
    name = sanitize_html(&order.customer.name),
    id = sanitize_html(&order.id),
    total = format_money(order.total, &sanitize_html(&order.currency)),
    table = order_table(order),
    address = address_block(order),
  );

  EmailMessage {
    from: settings.from.clone(),
    to: order.customer.email.clone(),
    subject: sanitize_header(&format!("Order received: {}", order.id)),
    html: layout(settings, "Order received", &body),
  }
}

pub fn order_admin_alert(settings: &NotifySettings, order: &Order) -> EmailMessage {
  let mut body = format!(
    "<p>Order <strong>{id}</strong> from {name} &lt;{email}&gt;, {count} item(s).</p>{table}\
     <h2 style=\"font-size:16px\">Ship to</h2>{address}",
    id = sanitize_html(&order.id),
    name = sanitize_html(&order.customer.name),
    email = sanitize_html(&order.customer.email),
    count = order.item_count(),
    table = order_table(order),
    address = address_block(order),
  );
  if !order.customer.notes.is_empty() {
    let _ = write!(body, "<h2 style=\"font-size:16px\">Notes</h2><p>{}</p>", sanitize_html(&order.customer.notes));
  }

  EmailMessage {
    from: settings.from.clone(),
    to: settings.admin_email.clone(),
    subject: sanitize_header(&format!(
      "New order {}: {}",
      order.id,
      format_money(order.total, &order.currency)
    )),
    html: layout(settings, "New shop order", &body),
  }
}
